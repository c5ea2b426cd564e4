// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::search_query::JobSearchQuery;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// 搜索服务返回的原始职位记录
pub type RawRecord = serde_json::Value;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("rate limit exceeded")]
    RateLimited { retry_after: Option<Duration> },
    #[error("provider returned server error {status}")]
    Server { status: u16 },
    #[error("provider rejected request with status {status}: {message}")]
    Client { status: u16, message: String },
    #[error("authentication failed: {0}")]
    Unauthorized(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("invalid page number {0}, pages start at 1")]
    InvalidPage(u32),
    #[error("gave up after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        source: Box<FetchError>,
    },
}

impl FetchError {
    /// 是否为临时性错误（超时、5xx、限流、网络、响应损坏）
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FetchError::Network(_)
                | FetchError::Timeout
                | FetchError::RateLimited { .. }
                | FetchError::Server { .. }
                | FetchError::MalformedResponse(_)
        )
    }

    /// 最后一次观察到的原因
    pub fn last_cause(&self) -> &FetchError {
        match self {
            FetchError::RetriesExhausted { source, .. } => source.last_cause(),
            other => other,
        }
    }
}

/// 单页请求
#[derive(Debug, Clone, Copy)]
pub struct PageRequest<'a> {
    pub query: &'a JobSearchQuery,
    /// 从 1 开始的页码
    pub page_number: u32,
    /// 上一页返回的续页令牌，第一页为 `None`
    pub cursor: Option<&'a str>,
}

/// 单页结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPage {
    pub records: Vec<RawRecord>,
    /// 下一页令牌；为 `None` 表示没有更多页面
    pub next_cursor: Option<String>,
}

impl RawPage {
    pub fn has_more(&self) -> bool {
        self.next_cursor.as_deref().is_some_and(|c| !c.is_empty())
    }
}

/// 职位搜索服务接口
///
/// 不同的数据提供方通过实现该 trait 接入，流水线不根据提供方名称分支
#[async_trait]
pub trait JobSearchProvider: Send + Sync {
    /// 请求一页结果，只发一次网络请求，不做重试
    async fn fetch_page(&self, request: &PageRequest<'_>) -> Result<RawPage, FetchError>;

    /// 写入存储时使用的提供方名称
    fn name(&self) -> &str;
}
