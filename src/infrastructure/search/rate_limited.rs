// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::search::provider::{FetchError, JobSearchProvider, PageRequest, RawPage};
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// 限流包装器
///
/// 所有共享同一实例的搜索共用一个每分钟配额，请求前等待许可
pub struct RateLimitedProvider<P: JobSearchProvider> {
    inner: P,
    limiter: Arc<DirectRateLimiter>,
}

impl<P: JobSearchProvider> RateLimitedProvider<P> {
    /// # 参数
    ///
    /// * `provider` - 被包装的搜索服务
    /// * `calls_per_minute` - 每分钟最多请求数，0 视为 1
    pub fn new(provider: P, calls_per_minute: u32) -> Self {
        let per_minute = NonZeroU32::new(calls_per_minute).unwrap_or(NonZeroU32::MIN);
        Self::with_quota(provider, Quota::per_minute(per_minute))
    }

    pub fn with_quota(provider: P, quota: Quota) -> Self {
        Self {
            inner: provider,
            limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }
}

#[async_trait]
impl<P: JobSearchProvider> JobSearchProvider for RateLimitedProvider<P> {
    async fn fetch_page(&self, request: &PageRequest<'_>) -> Result<RawPage, FetchError> {
        self.limiter.until_ready().await;
        self.inner.fetch_page(request).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
