// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub use sea_orm_migration::prelude::*;

mod m20250105_000001_create_job_listings;
mod m20250105_000002_create_search_metadata;

/// 数据库迁移器
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    /// 获取所有迁移
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250105_000001_create_job_listings::Migration),
            Box::new(m20250105_000002_create_search_metadata::Migration),
        ]
    }
}
