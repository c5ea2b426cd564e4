// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::search_metadata::{SearchMetadata, SearchMetadataId};
use crate::utils::errors::StorageError;
use async_trait::async_trait;

/// 搜索元数据仓库特质
///
/// 只追加：每次搜索一条记录，即使查询重复也不去重、不更新
#[async_trait]
pub trait SearchMetadataRepository: Send + Sync {
    /// 写入一条搜索记录
    async fn record_search_metadata(
        &self,
        metadata: &SearchMetadata,
    ) -> Result<SearchMetadataId, StorageError>;
    /// 根据ID查找
    async fn find_search_metadata(
        &self,
        id: SearchMetadataId,
    ) -> Result<Option<SearchMetadata>, StorageError>;
    /// 最近的搜索记录，按执行时间倒序
    async fn recent_searches(&self, limit: u64) -> Result<Vec<SearchMetadata>, StorageError>;
}
