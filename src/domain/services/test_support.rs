// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::job_listing::{JobListing, UpsertOutcome};
use crate::domain::models::search_metadata::{SearchMetadata, SearchMetadataId};
use crate::domain::repositories::job_listing_repository::JobListingRepository;
use crate::domain::repositories::search_metadata_repository::SearchMetadataRepository;
use crate::domain::search::provider::{FetchError, JobSearchProvider, PageRequest, RawPage};
use crate::utils::errors::StorageError;
use async_trait::async_trait;
use serde_json::json;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// 按顺序返回预设结果的搜索服务；预设用完后返回空页
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<Result<RawPage, FetchError>>>,
    requests: Mutex<Vec<(u32, Option<String>)>>,
    calls: AtomicU32,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<Result<RawPage, FetchError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// 已收到的 (页码, 续页令牌)
    pub fn requests(&self) -> Vec<(u32, Option<String>)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobSearchProvider for ScriptedProvider {
    async fn fetch_page(&self, request: &PageRequest<'_>) -> Result<RawPage, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((request.page_number, request.cursor.map(str::to_string)));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(RawPage::default()))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// 构造包含 `count` 条记录的页面
pub fn page(count: usize, has_more: bool) -> RawPage {
    page_with_prefix("job", count, has_more)
}

pub fn page_with_prefix(prefix: &str, count: usize, has_more: bool) -> RawPage {
    RawPage {
        records: (0..count)
            .map(|i| {
                json!({
                    "title": format!("Engineer {prefix}-{i}"),
                    "company_name": "Acme",
                    "location": "Remote",
                    "apply_link": format!("https://jobs.example.com/{prefix}/{i}?utm_source=google_jobs_apply"),
                })
            })
            .collect(),
        next_cursor: has_more.then(|| format!("{prefix}-next")),
    }
}

/// 内存职位仓库；`fail_after` 次写入之后返回存储不可用
#[derive(Default)]
pub struct InMemoryListings {
    listings: Mutex<HashMap<(String, String), JobListing>>,
    writes: AtomicU32,
    fail_after: Option<u32>,
}

impl InMemoryListings {
    pub fn failing_after(writes: u32) -> Self {
        Self {
            fail_after: Some(writes),
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.listings.lock().unwrap().len()
    }
}

#[async_trait]
impl JobListingRepository for InMemoryListings {
    async fn upsert_listing(&self, listing: &JobListing) -> Result<UpsertOutcome, StorageError> {
        let writes = self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_after.is_some_and(|limit| writes >= limit) {
            return Err(StorageError::Unavailable("connection refused".to_string()));
        }

        let key = (listing.provider.clone(), listing.source_url.clone());
        let mut listings = self.listings.lock().unwrap();
        match listings.get_mut(&key) {
            Some(existing) => {
                existing.last_seen_at = listing.last_seen_at;
                Ok(UpsertOutcome::Duplicate)
            }
            None => {
                listings.insert(key, listing.clone());
                Ok(UpsertOutcome::Inserted)
            }
        }
    }

    async fn find_listing(
        &self,
        provider: &str,
        source_url: &str,
    ) -> Result<Option<JobListing>, StorageError> {
        Ok(self
            .listings
            .lock()
            .unwrap()
            .get(&(provider.to_string(), source_url.to_string()))
            .cloned())
    }

    async fn count_listings(&self) -> Result<u64, StorageError> {
        Ok(self.len() as u64)
    }
}

/// 内存搜索元数据仓库
#[derive(Default)]
pub struct InMemoryMetadata {
    records: Mutex<Vec<SearchMetadata>>,
}

impl InMemoryMetadata {
    pub fn records(&self) -> Vec<SearchMetadata> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchMetadataRepository for InMemoryMetadata {
    async fn record_search_metadata(
        &self,
        metadata: &SearchMetadata,
    ) -> Result<SearchMetadataId, StorageError> {
        self.records.lock().unwrap().push(metadata.clone());
        Ok(metadata.id)
    }

    async fn find_search_metadata(
        &self,
        id: SearchMetadataId,
    ) -> Result<Option<SearchMetadata>, StorageError> {
        Ok(self.records().into_iter().find(|m| m.id == id))
    }

    async fn recent_searches(&self, limit: u64) -> Result<Vec<SearchMetadata>, StorageError> {
        let mut records = self.records();
        records.sort_by(|a, b| b.executed_at.cmp(&a.executed_at));
        records.truncate(limit as usize);
        Ok(records)
    }
}
