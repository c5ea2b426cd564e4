// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 职位实体
///
/// 规范化后持久化的职位记录。`(provider, source_url)` 全局唯一；
/// 创建后只会在再次遇到时刷新 `last_seen_at`，本流水线不会删除记录。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobListing {
    /// 职位唯一标识符
    pub id: Uuid,
    /// 职位名称
    pub title: String,
    /// 公司名称
    pub company: String,
    /// 工作地点
    pub location: String,
    /// 职位描述
    pub description: Option<String>,
    /// 规范化后的来源URL，作为去重键的一部分
    pub source_url: String,
    /// 数据提供方
    pub provider: String,
    /// 职位发布渠道，例如 "via LinkedIn"
    pub via: Option<String>,
    /// 工作类型，例如 "Full-time"
    pub schedule: Option<String>,
    /// 薪资描述
    pub salary: Option<String>,
    /// 发布时间
    pub posted_at: Option<DateTime<Utc>>,
    /// 原始记录，用于审计
    pub raw_payload: serde_json::Value,
    /// 首次发现该职位的搜索ID
    pub first_search_id: Option<Uuid>,
    /// 首次发现时间
    pub first_seen_at: DateTime<Utc>,
    /// 最近一次发现时间
    pub last_seen_at: DateTime<Utc>,
}

impl JobListing {
    /// 去重键
    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.provider, &self.source_url)
    }
}

/// 写入结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    /// 新插入
    Inserted,
    /// 已存在，只刷新了 `last_seen_at`
    Duplicate,
}

impl fmt::Display for UpsertOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UpsertOutcome::Inserted => write!(f, "inserted"),
            UpsertOutcome::Duplicate => write!(f, "duplicate"),
        }
    }
}
