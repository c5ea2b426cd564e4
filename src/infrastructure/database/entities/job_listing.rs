// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "job_listings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub source_url: String,
    pub provider: String,
    pub via: Option<String>,
    pub schedule: Option<String>,
    pub salary: Option<String>,
    pub posted_at: Option<ChronoDateTimeWithTimeZone>,
    pub raw_payload: Json,
    pub first_search_id: Option<Uuid>,
    pub first_seen_at: ChronoDateTimeWithTimeZone,
    pub last_seen_at: ChronoDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
