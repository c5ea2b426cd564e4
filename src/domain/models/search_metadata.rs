// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::search_query::JobSearchQuery;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 搜索记录ID
pub type SearchMetadataId = Uuid;

/// 搜索元数据
///
/// 每次编排搜索生成一条，写入后不可变，永久保留用于审计
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchMetadata {
    /// 搜索记录唯一标识符
    pub id: SearchMetadataId,
    /// 搜索参数
    pub query: JobSearchQuery,
    /// 成功获取的页数
    pub pages_fetched: u32,
    /// 获取到的原始记录数
    pub listings_found: u32,
    /// 新插入的职位数
    pub listings_new: u32,
    /// 规范化失败被跳过的记录数
    pub listings_skipped: u32,
    /// 执行时间
    pub executed_at: DateTime<Utc>,
    /// 执行耗时（毫秒）
    pub duration_ms: u64,
    /// 最终状态
    pub status: SearchStatus,
    /// 部分成功或失败时的最后一个错误
    pub error: Option<String>,
}

/// 搜索状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// 所有请求的页面都已获取
    Success,
    /// 第一页之后的某页失败
    Partial,
    /// 没有获取到任何页面
    Failed,
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SearchStatus::Success => write!(f, "success"),
            SearchStatus::Partial => write!(f, "partial"),
            SearchStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for SearchStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(SearchStatus::Success),
            "partial" => Ok(SearchStatus::Partial),
            "failed" => Ok(SearchStatus::Failed),
            _ => Err(()),
        }
    }
}
