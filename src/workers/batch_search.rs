// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::WorkflowSettings;
use crate::domain::models::search_metadata::{SearchMetadata, SearchStatus};
use crate::domain::repositories::job_listing_repository::JobListingRepository;
use crate::domain::repositories::search_metadata_repository::SearchMetadataRepository;
use crate::domain::services::job_search_service::{JobSearchError, JobSearchService};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{error, info, warn};

/// 批量搜索的汇总结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub searches: usize,
    pub succeeded: usize,
    pub partial: usize,
    pub failed: usize,
    /// 输入非法被拒绝的搜索
    pub rejected: usize,
    /// 因存储错误中止的搜索
    pub aborted: usize,
    pub listings_found: u64,
    pub listings_new: u64,
}

impl BatchSummary {
    fn record(&mut self, result: &Result<SearchMetadata, JobSearchError>) {
        self.searches += 1;
        match result {
            Ok(metadata) => {
                match metadata.status {
                    SearchStatus::Success => self.succeeded += 1,
                    SearchStatus::Partial => self.partial += 1,
                    SearchStatus::Failed => self.failed += 1,
                }
                self.listings_found += metadata.listings_found as u64;
                self.listings_new += metadata.listings_new as u64;
            }
            Err(JobSearchError::ValidationError(_)) => self.rejected += 1,
            Err(JobSearchError::Storage(_)) => self.aborted += 1,
        }
    }
}

/// 批量搜索执行器
///
/// 对职位名称 × 地点的每个组合执行一次搜索，最多 `max_concurrent` 个同时进行。
/// 单次搜索内的页面仍然顺序获取。
pub struct BatchSearchRunner<LR, MR> {
    service: Arc<JobSearchService<LR, MR>>,
    max_page_depth: u32,
    max_concurrent: usize,
}

impl<LR, MR> BatchSearchRunner<LR, MR>
where
    LR: JobListingRepository + 'static,
    MR: SearchMetadataRepository + 'static,
{
    pub fn new(
        service: Arc<JobSearchService<LR, MR>>,
        max_page_depth: u32,
        max_concurrent: usize,
    ) -> Self {
        Self {
            service,
            max_page_depth,
            max_concurrent: max_concurrent.max(1),
        }
    }

    pub fn from_settings(service: Arc<JobSearchService<LR, MR>>, settings: &WorkflowSettings) -> Self {
        Self::new(service, settings.max_page_depth, settings.max_concurrent)
    }

    /// 生成所有 (职位, 地点) 组合；没有配置地点时只按职位搜索
    pub fn plan(job_titles: &[String], locations: &[String]) -> Vec<(String, String)> {
        if locations.is_empty() {
            return job_titles.iter().map(|t| (t.clone(), String::new())).collect();
        }
        job_titles
            .iter()
            .flat_map(|title| {
                locations
                    .iter()
                    .map(move |location| (title.clone(), location.clone()))
            })
            .collect()
    }

    pub async fn run(&self, job_titles: &[String], locations: &[String]) -> BatchSummary {
        let plan = Self::plan(job_titles, locations);
        info!(
            searches = plan.len(),
            max_concurrent = self.max_concurrent,
            "Starting batch job search"
        );

        let results: Vec<_> = stream::iter(plan)
            .map(|(title, location)| {
                let service = Arc::clone(&self.service);
                let depth = self.max_page_depth;
                async move {
                    let result = service.process_job_search(&title, &location, depth).await;
                    match &result {
                        Err(JobSearchError::ValidationError(e)) => {
                            warn!(job_title = %title, job_location = %location, error = %e, "Search rejected")
                        }
                        Err(JobSearchError::Storage(e)) => {
                            error!(job_title = %title, job_location = %location, error = %e, "Search aborted")
                        }
                        Ok(_) => {}
                    }
                    result
                }
            })
            .buffer_unordered(self.max_concurrent)
            .collect()
            .await;

        let mut summary = BatchSummary::default();
        for result in &results {
            summary.record(result);
        }

        info!(
            searches = summary.searches,
            succeeded = summary.succeeded,
            partial = summary.partial,
            failed = summary.failed,
            rejected = summary.rejected,
            aborted = summary.aborted,
            new = summary.listings_new,
            "Batch job search finished"
        );
        summary
    }
}
