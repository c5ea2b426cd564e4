// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SearchMetadata::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SearchMetadata::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SearchMetadata::JobTitle).string().not_null())
                    .col(ColumnDef::new(SearchMetadata::JobLocation).string().not_null())
                    .col(ColumnDef::new(SearchMetadata::MaxPageDepth).integer().not_null())
                    .col(
                        ColumnDef::new(SearchMetadata::PagesFetched)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SearchMetadata::ListingsFound)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SearchMetadata::ListingsNew)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SearchMetadata::ListingsSkipped)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(SearchMetadata::Status).string().not_null())
                    .col(ColumnDef::new(SearchMetadata::Error).text())
                    .col(
                        ColumnDef::new(SearchMetadata::DurationMs)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SearchMetadata::ExecutedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_search_metadata_executed_at")
                    .table(SearchMetadata::Table)
                    .col(SearchMetadata::ExecutedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SearchMetadata::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SearchMetadata {
    Table,
    Id,
    JobTitle,
    JobLocation,
    MaxPageDepth,
    PagesFetched,
    ListingsFound,
    ListingsNew,
    ListingsSkipped,
    Status,
    Error,
    DurationMs,
    ExecutedAt,
}
