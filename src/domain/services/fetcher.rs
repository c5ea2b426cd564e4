// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::search_query::JobSearchQuery;
use crate::domain::search::provider::{FetchError, JobSearchProvider, PageRequest, RawPage};
use crate::utils::retry_policy::RetryPolicy;
use metrics::counter;
use std::sync::Arc;
use tracing::{debug, warn};

/// 单页抓取器
///
/// 负责重试与退避：临时性错误最多尝试 `max_attempts` 次，
/// 不可重试的错误（4xx、认证失败）立即返回，不消耗重试次数。
pub struct Fetcher {
    provider: Arc<dyn JobSearchProvider>,
    policy: RetryPolicy,
}

impl Fetcher {
    pub fn new(provider: Arc<dyn JobSearchProvider>, policy: RetryPolicy) -> Self {
        Self { provider, policy }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// 获取一页结果
    ///
    /// # 参数
    ///
    /// * `query` - 搜索参数
    /// * `page_number` - 从 1 开始的页码
    /// * `cursor` - 上一页返回的续页令牌
    ///
    /// # 返回值
    ///
    /// * `Ok(RawPage)` - 该页原始记录及是否还有下一页
    /// * `Err(FetchError)` - 不可重试错误，或 `RetriesExhausted` 携带最后一次的原因
    pub async fn fetch_page(
        &self,
        query: &JobSearchQuery,
        page_number: u32,
        cursor: Option<&str>,
    ) -> Result<RawPage, FetchError> {
        if page_number < 1 {
            return Err(FetchError::InvalidPage(page_number));
        }

        let request = PageRequest {
            query,
            page_number,
            cursor,
        };

        let mut attempt = 0;
        loop {
            attempt += 1;
            counter!("job_search_fetch_attempts_total").increment(1);

            let error = match self.provider.fetch_page(&request).await {
                Ok(page) => {
                    debug!(
                        page = page_number,
                        attempt,
                        records = page.records.len(),
                        has_more = page.has_more(),
                        "Fetched page"
                    );
                    return Ok(page);
                }
                Err(e) => e,
            };

            if !error.is_retryable() {
                warn!(page = page_number, attempt, error = %error, "Non-retryable fetch error");
                return Err(error);
            }

            if !self.policy.should_retry(attempt) {
                warn!(page = page_number, attempts = attempt, error = %error, "Fetch retries exhausted");
                return Err(FetchError::RetriesExhausted {
                    attempts: attempt,
                    source: Box::new(error),
                });
            }

            let mut wait = self.policy.calculate_backoff(attempt);
            if let FetchError::RateLimited {
                retry_after: Some(retry_after),
            } = &error
            {
                wait = wait.max((*retry_after).min(self.policy.max_backoff));
            }

            warn!(
                page = page_number,
                attempt,
                wait_ms = wait.as_millis() as u64,
                error = %error,
                "Retrying page fetch"
            );
            tokio::time::sleep(wait).await;
        }
    }
}
