// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::SearchProviderSettings;
use crate::domain::search::provider::{FetchError, JobSearchProvider, PageRequest, RawPage, RawRecord};
use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

const MAX_ERROR_BODY_CHARS: usize = 200;

/// SearchAPI.io 客户端配置
#[derive(Debug, Clone)]
pub struct SearchApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub engine: String,
    pub country: String,
    pub language: String,
    pub provider_name: String,
    pub timeout: Duration,
}

impl From<&SearchProviderSettings> for SearchApiConfig {
    fn from(settings: &SearchProviderSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone().filter(|k| !k.trim().is_empty()),
            engine: settings.engine.clone(),
            country: settings.country.clone(),
            language: settings.language.clone(),
            provider_name: settings.provider_name.clone(),
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchApiResponse {
    #[serde(default)]
    jobs: Vec<RawRecord>,
    pagination: Option<Pagination>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    next_page_token: Option<String>,
}

/// SearchAPI.io Google Jobs 搜索服务
///
/// 每页一次 GET 请求；第二页起通过 `next_page_token` 续页
pub struct SearchApiProvider {
    client: Client,
    config: SearchApiConfig,
}

impl SearchApiProvider {
    pub fn new(config: SearchApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("jobfocus/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// 构建查询参数
    pub fn build_params(&self, request: &PageRequest<'_>, api_key: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("engine", self.config.engine.clone()),
            ("q", request.query.search_text()),
            ("api_key", api_key.to_string()),
            ("gl", self.config.country.clone()),
            ("hl", self.config.language.clone()),
        ];

        if let Some(token) = request.cursor.filter(|t| !t.is_empty()) {
            params.push(("next_page_token", token.to_string()));
        }

        params
    }

    /// 解析响应体
    pub fn parse_response(body: &str) -> Result<RawPage, FetchError> {
        let response: SearchApiResponse = serde_json::from_str(body)
            .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;

        if let Some(error) = response.error {
            // 没有结果时 SearchAPI 以 200 返回 error 字段
            if response.jobs.is_empty() && error.to_ascii_lowercase().contains("any results") {
                return Ok(RawPage::default());
            }
            return Err(FetchError::MalformedResponse(format!("provider error: {}", error)));
        }

        let next_cursor = response
            .pagination
            .and_then(|p| p.next_page_token)
            .filter(|t| !t.is_empty());

        Ok(RawPage {
            // 空页之后不再续页
            next_cursor: if response.jobs.is_empty() { None } else { next_cursor },
            records: response.jobs,
        })
    }

    fn classify_transport_error(err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Network(err.to_string())
        }
    }

    fn parse_retry_after(response: &reqwest::Response) -> Option<Duration> {
        response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
    }
}

#[async_trait]
impl JobSearchProvider for SearchApiProvider {
    async fn fetch_page(&self, request: &PageRequest<'_>) -> Result<RawPage, FetchError> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            FetchError::Unauthorized("search provider api key is not configured".to_string())
        })?;

        let params = self.build_params(request, api_key);
        info!(
            query = %request.query.search_text(),
            page = request.page_number,
            "Fetching jobs"
        );

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&params)
            .send()
            .await
            .map_err(Self::classify_transport_error)?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited {
                retry_after: Self::parse_retry_after(&response),
            });
        }
        if status == StatusCode::REQUEST_TIMEOUT {
            return Err(FetchError::Timeout);
        }
        if status.is_server_error() {
            return Err(FetchError::Server {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FetchError::Unauthorized(message),
                _ => FetchError::Client {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let body = response
            .text()
            .await
            .map_err(Self::classify_transport_error)?;
        let page = Self::parse_response(&body)?;

        debug!(
            page = request.page_number,
            records = page.records.len(),
            has_more = page.has_more(),
            "SearchAPI page parsed"
        );
        Ok(page)
    }

    fn name(&self) -> &str {
        &self.config.provider_name
    }
}
