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
                    .table(JobListings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JobListings::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(JobListings::Title).string().not_null())
                    .col(ColumnDef::new(JobListings::Company).string().not_null())
                    .col(ColumnDef::new(JobListings::Location).string().not_null())
                    .col(ColumnDef::new(JobListings::Description).text())
                    .col(ColumnDef::new(JobListings::SourceUrl).text().not_null())
                    .col(ColumnDef::new(JobListings::Provider).string().not_null())
                    .col(ColumnDef::new(JobListings::Via).string())
                    .col(ColumnDef::new(JobListings::Schedule).string())
                    .col(ColumnDef::new(JobListings::Salary).string())
                    .col(ColumnDef::new(JobListings::PostedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(JobListings::RawPayload).json().not_null())
                    .col(ColumnDef::new(JobListings::FirstSearchId).uuid())
                    .col(
                        ColumnDef::new(JobListings::FirstSeenAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(JobListings::LastSeenAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Dedup key: at most one listing per (provider, source_url)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_job_listings_provider_source_url")
                    .table(JobListings::Table)
                    .col(JobListings::Provider)
                    .col(JobListings::SourceUrl)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_job_listings_last_seen_at")
                    .table(JobListings::Table)
                    .col(JobListings::LastSeenAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(JobListings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum JobListings {
    Table,
    Id,
    Title,
    Company,
    Location,
    Description,
    SourceUrl,
    Provider,
    Via,
    Schedule,
    Salary,
    PostedAt,
    RawPayload,
    FirstSearchId,
    FirstSeenAt,
    LastSeenAt,
}
