// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::job_listing::{JobListing, UpsertOutcome};
use crate::utils::errors::StorageError;
use async_trait::async_trait;

/// 职位仓库特质
///
/// 以 `(provider, source_url)` 为键去重。唯一性由存储层约束保证，
/// 不依赖应用层加锁；并发写入同一键时只会有一次 `Inserted`。
#[async_trait]
pub trait JobListingRepository: Send + Sync {
    /// 插入职位；键已存在时只刷新 `last_seen_at` 并返回 `Duplicate`
    async fn upsert_listing(&self, listing: &JobListing) -> Result<UpsertOutcome, StorageError>;
    /// 按去重键查找
    async fn find_listing(
        &self,
        provider: &str,
        source_url: &str,
    ) -> Result<Option<JobListing>, StorageError>;
    /// 职位总数
    async fn count_listings(&self) -> Result<u64, StorageError>;
}
