// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::search_metadata::{SearchMetadata, SearchMetadataId, SearchStatus};
use crate::domain::models::search_query::JobSearchQuery;
use crate::domain::repositories::search_metadata_repository::SearchMetadataRepository;
use crate::infrastructure::database::entities::search_metadata as search_metadata_entity;
use crate::utils::errors::StorageError;
use async_trait::async_trait;
use sea_orm::*;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

/// 搜索元数据仓库实现
pub struct SearchMetadataRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl SearchMetadataRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// 写入前转换计数列，超出 `i32` 范围时报错而不是截断
    fn to_column<T: TryInto<i32>>(value: T, column: &str) -> Result<i32, StorageError> {
        value.try_into().map_err(|_| {
            StorageError::Database(format!("{} does not fit in an integer column", column))
        })
    }

    fn from_column<T: TryFrom<i64>>(
        value: impl Into<i64>,
        column: &str,
        id: Uuid,
    ) -> Result<T, StorageError> {
        let value = value.into();
        T::try_from(value).map_err(|_| {
            StorageError::Corrupt(format!("search {} has out-of-range {} `{}`", id, column, value))
        })
    }

    fn to_domain(model: search_metadata_entity::Model) -> Result<SearchMetadata, StorageError> {
        let status = SearchStatus::from_str(&model.status).map_err(|_| {
            StorageError::Corrupt(format!(
                "search {} has unknown status `{}`",
                model.id, model.status
            ))
        })?;

        Ok(SearchMetadata {
            id: model.id,
            query: JobSearchQuery {
                job_title: model.job_title,
                job_location: model.job_location,
                max_page_depth: Self::from_column(model.max_page_depth, "max_page_depth", model.id)?,
            },
            pages_fetched: Self::from_column(model.pages_fetched, "pages_fetched", model.id)?,
            listings_found: Self::from_column(model.listings_found, "listings_found", model.id)?,
            listings_new: Self::from_column(model.listings_new, "listings_new", model.id)?,
            listings_skipped: Self::from_column(model.listings_skipped, "listings_skipped", model.id)?,
            executed_at: model.executed_at.into(),
            duration_ms: Self::from_column(model.duration_ms, "duration_ms", model.id)?,
            status,
            error: model.error,
        })
    }
}

#[async_trait]
impl SearchMetadataRepository for SearchMetadataRepositoryImpl {
    async fn record_search_metadata(
        &self,
        metadata: &SearchMetadata,
    ) -> Result<SearchMetadataId, StorageError> {
        let active_model = search_metadata_entity::ActiveModel {
            id: Set(metadata.id),
            job_title: Set(metadata.query.job_title.clone()),
            job_location: Set(metadata.query.job_location.clone()),
            max_page_depth: Set(Self::to_column(metadata.query.max_page_depth, "max_page_depth")?),
            pages_fetched: Set(Self::to_column(metadata.pages_fetched, "pages_fetched")?),
            listings_found: Set(Self::to_column(metadata.listings_found, "listings_found")?),
            listings_new: Set(Self::to_column(metadata.listings_new, "listings_new")?),
            listings_skipped: Set(Self::to_column(metadata.listings_skipped, "listings_skipped")?),
            status: Set(metadata.status.to_string()),
            error: Set(metadata.error.clone()),
            duration_ms: Set(i64::try_from(metadata.duration_ms).map_err(|_| {
                StorageError::Database("duration_ms does not fit in a bigint column".to_string())
            })?),
            executed_at: Set(metadata.executed_at.into()),
        };

        search_metadata_entity::Entity::insert(active_model)
            .exec_without_returning(self.db.as_ref())
            .await?;

        Ok(metadata.id)
    }

    async fn find_search_metadata(
        &self,
        id: SearchMetadataId,
    ) -> Result<Option<SearchMetadata>, StorageError> {
        search_metadata_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .map(Self::to_domain)
            .transpose()
    }

    async fn recent_searches(&self, limit: u64) -> Result<Vec<SearchMetadata>, StorageError> {
        search_metadata_entity::Entity::find()
            .order_by_desc(search_metadata_entity::Column::ExecutedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(Self::to_domain)
            .collect()
    }
}
