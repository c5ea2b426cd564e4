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

use crate::domain::models::job_listing::{JobListing, UpsertOutcome};
use crate::domain::repositories::job_listing_repository::JobListingRepository;
use crate::infrastructure::database::entities::job_listing as job_listing_entity;
use crate::utils::errors::StorageError;
use async_trait::async_trait;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::*;
use std::sync::Arc;
use tracing::debug;

/// 职位仓库实现
pub struct JobListingRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl JobListingRepositoryImpl {
    /// 创建新的职位仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn to_active_model(listing: &JobListing) -> job_listing_entity::ActiveModel {
        job_listing_entity::ActiveModel {
            id: Set(listing.id),
            title: Set(listing.title.clone()),
            company: Set(listing.company.clone()),
            location: Set(listing.location.clone()),
            description: Set(listing.description.clone()),
            source_url: Set(listing.source_url.clone()),
            provider: Set(listing.provider.clone()),
            via: Set(listing.via.clone()),
            schedule: Set(listing.schedule.clone()),
            salary: Set(listing.salary.clone()),
            posted_at: Set(listing.posted_at.map(Into::into)),
            raw_payload: Set(listing.raw_payload.clone()),
            first_search_id: Set(listing.first_search_id),
            first_seen_at: Set(listing.first_seen_at.into()),
            last_seen_at: Set(listing.last_seen_at.into()),
        }
    }

    fn to_domain(model: job_listing_entity::Model) -> JobListing {
        JobListing {
            id: model.id,
            title: model.title,
            company: model.company,
            location: model.location,
            description: model.description,
            source_url: model.source_url,
            provider: model.provider,
            via: model.via,
            schedule: model.schedule,
            salary: model.salary,
            posted_at: model.posted_at.map(Into::into),
            raw_payload: model.raw_payload,
            first_search_id: model.first_search_id,
            first_seen_at: model.first_seen_at.into(),
            last_seen_at: model.last_seen_at.into(),
        }
    }
}

#[async_trait]
impl JobListingRepository for JobListingRepositoryImpl {
    async fn upsert_listing(&self, listing: &JobListing) -> Result<UpsertOutcome, StorageError> {
        let insert = job_listing_entity::Entity::insert(Self::to_active_model(listing)).on_conflict(
            OnConflict::columns([
                job_listing_entity::Column::Provider,
                job_listing_entity::Column::SourceUrl,
            ])
            .do_nothing()
            .to_owned(),
        );

        // 去重键之外的唯一约束冲突（例如主键）只有在去重键确实已存在时才算 duplicate
        let violation = match insert.exec_without_returning(self.db.as_ref()).await {
            Ok(rows) if rows > 0 => return Ok(UpsertOutcome::Inserted),
            Ok(_) => None,
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => Some(e),
            Err(e) => return Err(e.into()),
        };

        let refreshed = job_listing_entity::Entity::update_many()
            .col_expr(
                job_listing_entity::Column::LastSeenAt,
                Expr::value(listing.last_seen_at.fixed_offset()),
            )
            .filter(job_listing_entity::Column::Provider.eq(listing.provider.as_str()))
            .filter(job_listing_entity::Column::SourceUrl.eq(listing.source_url.as_str()))
            .exec(self.db.as_ref())
            .await?;

        if refreshed.rows_affected == 0 {
            if let Some(e) = violation {
                return Err(e.into());
            }
        }

        debug!(provider = %listing.provider, source_url = %listing.source_url, "Listing already stored");
        Ok(UpsertOutcome::Duplicate)
    }

    async fn find_listing(
        &self,
        provider: &str,
        source_url: &str,
    ) -> Result<Option<JobListing>, StorageError> {
        let model = job_listing_entity::Entity::find()
            .filter(job_listing_entity::Column::Provider.eq(provider))
            .filter(job_listing_entity::Column::SourceUrl.eq(source_url))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Self::to_domain))
    }

    async fn count_listings(&self) -> Result<u64, StorageError> {
        Ok(job_listing_entity::Entity::find()
            .count(self.db.as_ref())
            .await?)
    }
}
