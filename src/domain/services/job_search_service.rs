// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::job_listing::{JobListing, UpsertOutcome};
use crate::domain::models::search_metadata::{SearchMetadata, SearchStatus};
use crate::domain::models::search_query::JobSearchQuery;
use crate::domain::repositories::job_listing_repository::JobListingRepository;
use crate::domain::repositories::search_metadata_repository::SearchMetadataRepository;
use crate::domain::services::fetcher::Fetcher;
use crate::domain::services::normalizer::Normalizer;
use crate::domain::services::paginator::{Collection, Paginator};
use crate::utils::errors::StorageError;
use chrono::Utc;
use metrics::{counter, histogram};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

#[derive(Error, Debug)]
pub enum JobSearchError {
    #[error("validation failed: {0}")]
    ValidationError(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// 搜索编排状态
///
/// STARTED → FETCHING → NORMALIZING → STORING → SUCCEEDED / PARTIAL / FAILED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Started,
    Fetching,
    Normalizing,
    Storing,
    Succeeded,
    Partial,
    Failed,
}

impl fmt::Display for SearchPhase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SearchPhase::Started => write!(f, "started"),
            SearchPhase::Fetching => write!(f, "fetching"),
            SearchPhase::Normalizing => write!(f, "normalizing"),
            SearchPhase::Storing => write!(f, "storing"),
            SearchPhase::Succeeded => write!(f, "succeeded"),
            SearchPhase::Partial => write!(f, "partial"),
            SearchPhase::Failed => write!(f, "failed"),
        }
    }
}

impl From<SearchStatus> for SearchPhase {
    fn from(status: SearchStatus) -> Self {
        match status {
            SearchStatus::Success => SearchPhase::Succeeded,
            SearchStatus::Partial => SearchPhase::Partial,
            SearchStatus::Failed => SearchPhase::Failed,
        }
    }
}

/// 职位搜索服务
///
/// 流水线入口：分页抓取 → 规范化 → 去重存储 → 写入搜索元数据。
/// 单条记录规范化失败只计入跳过数；只有输入非法和存储错误会让调用失败。
pub struct JobSearchService<LR, MR> {
    paginator: Paginator,
    provider_name: String,
    normalizer: Normalizer,
    listing_repo: Arc<LR>,
    metadata_repo: Arc<MR>,
}

impl<LR, MR> JobSearchService<LR, MR>
where
    LR: JobListingRepository + 'static,
    MR: SearchMetadataRepository + 'static,
{
    pub fn new(
        fetcher: Arc<Fetcher>,
        normalizer: Normalizer,
        listing_repo: Arc<LR>,
        metadata_repo: Arc<MR>,
    ) -> Self {
        Self {
            provider_name: fetcher.provider_name().to_string(),
            paginator: Paginator::new(fetcher),
            normalizer,
            listing_repo,
            metadata_repo,
        }
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    /// 执行一次职位搜索
    ///
    /// # 参数
    ///
    /// * `job_title` - 职位名称，不能为空
    /// * `job_location` - 地点，可以为空
    /// * `max_page_depth` - 最多获取的页数，至少为 1
    ///
    /// # 返回值
    ///
    /// * `Ok(SearchMetadata)` - 已写入的搜索记录（可能为 partial 或 failed）
    /// * `Err(JobSearchError)` - 输入非法（不写记录）或存储不可用
    #[instrument(skip(self), fields(search_id))]
    pub async fn process_job_search(
        &self,
        job_title: &str,
        job_location: &str,
        max_page_depth: u32,
    ) -> Result<SearchMetadata, JobSearchError> {
        let started = Instant::now();
        let executed_at = Utc::now();
        let search_id = Uuid::new_v4();
        tracing::Span::current().record("search_id", tracing::field::display(search_id));

        let query = JobSearchQuery::new(job_title, job_location, max_page_depth);
        query
            .validate()
            .map_err(|e| JobSearchError::ValidationError(e.to_string()))?;
        self.enter(SearchPhase::Started);

        self.enter(SearchPhase::Fetching);
        let collection = match self.paginator.collect(&query, query.max_page_depth).await {
            Ok(collection) => collection,
            Err(e) => {
                warn!(error = %e, "No pages could be fetched");
                let metadata = SearchMetadata {
                    id: search_id,
                    query,
                    pages_fetched: 0,
                    listings_found: 0,
                    listings_new: 0,
                    listings_skipped: 0,
                    executed_at,
                    duration_ms: started.elapsed().as_millis() as u64,
                    status: SearchStatus::Failed,
                    error: Some(e.to_string()),
                };
                return self.finish(metadata).await;
            }
        };

        self.enter(SearchPhase::Normalizing);
        let (listings, skipped) = self.normalize_all(&collection, search_id);

        self.enter(SearchPhase::Storing);
        let mut new = 0u32;
        for listing in &listings {
            let outcome = self.listing_repo.upsert_listing(listing).await.map_err(|e| {
                error!(source_url = %listing.source_url, error = %e, "Storage failed, aborting batch");
                e
            })?;
            if outcome == UpsertOutcome::Inserted {
                new += 1;
            }
        }

        let status = if collection.partial {
            SearchStatus::Partial
        } else {
            SearchStatus::Success
        };

        let metadata = SearchMetadata {
            id: search_id,
            query,
            pages_fetched: collection.pages_fetched,
            listings_found: collection.records.len() as u32,
            listings_new: new,
            listings_skipped: skipped,
            executed_at,
            duration_ms: started.elapsed().as_millis() as u64,
            status,
            error: collection.last_error.as_ref().map(ToString::to_string),
        };
        self.finish(metadata).await
    }

    fn enter(&self, phase: SearchPhase) {
        debug!(phase = %phase, provider = %self.provider_name, "Job search phase");
    }

    fn normalize_all(&self, collection: &Collection, search_id: Uuid) -> (Vec<JobListing>, u32) {
        let seen_at = Utc::now();
        let mut listings = Vec::with_capacity(collection.records.len());
        let mut skipped = 0u32;

        for (index, raw) in collection.records.iter().enumerate() {
            match self.normalizer.normalize_at(raw, &self.provider_name, seen_at) {
                Ok(mut listing) => {
                    listing.first_search_id = Some(search_id);
                    listings.push(listing);
                }
                Err(e) => {
                    skipped += 1;
                    warn!(record = index, error = %e, "Skipping record that failed normalization");
                }
            }
        }

        (listings, skipped)
    }

    async fn finish(&self, metadata: SearchMetadata) -> Result<SearchMetadata, JobSearchError> {
        self.metadata_repo.record_search_metadata(&metadata).await?;
        self.enter(metadata.status.into());

        counter!("job_search_runs_total", "status" => metadata.status.to_string()).increment(1);
        counter!("job_search_listings_found_total").increment(metadata.listings_found as u64);
        counter!("job_search_listings_new_total").increment(metadata.listings_new as u64);
        counter!("job_search_listings_skipped_total").increment(metadata.listings_skipped as u64);
        histogram!("job_search_duration_seconds").record(metadata.duration_ms as f64 / 1000.0);

        info!(
            job_title = %metadata.query.job_title,
            job_location = %metadata.query.job_location,
            status = %metadata.status,
            pages = metadata.pages_fetched,
            found = metadata.listings_found,
            new = metadata.listings_new,
            skipped = metadata.listings_skipped,
            duration_ms = metadata.duration_ms,
            "Job search finished"
        );
        Ok(metadata)
    }
}
