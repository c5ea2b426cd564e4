// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含数据库、搜索服务、重试、规范化、批量搜索与遥测等配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 部署环境标识
    pub environment: String,
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 搜索服务配置
    pub search_provider: SearchProviderSettings,
    /// 重试配置
    pub retry: RetrySettings,
    /// 规范化配置
    pub normalization: NormalizationSettings,
    /// 批量搜索配置
    pub workflow: WorkflowSettings,
    /// 日志与指标配置
    pub telemetry: TelemetrySettings,
}

/// 数据库配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// 搜索服务配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SearchProviderSettings {
    /// 搜索接口地址
    pub base_url: String,
    /// API 密钥
    pub api_key: Option<String>,
    /// 搜索引擎标识
    pub engine: String,
    /// 国家代码 (gl)
    pub country: String,
    /// 语言代码 (hl)
    pub language: String,
    /// 写入存储的 provider 名称
    pub provider_name: String,
    /// 单次请求超时（秒）
    pub timeout_secs: u64,
    /// 每分钟最多请求数
    pub calls_per_minute: u32,
}

/// 重试配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct RetrySettings {
    /// 总尝试次数
    pub max_attempts: u32,
    /// 最小退避（秒）
    pub min_backoff_secs: f64,
    /// 最大退避（秒）
    pub max_backoff_secs: f64,
    /// 退避乘数
    pub backoff_multiplier: f64,
    /// 抖动因子
    pub jitter_factor: f64,
}

/// 规范化配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct NormalizationSettings {
    /// 精确匹配的跟踪参数
    pub tracking_params: Vec<String>,
    /// 前缀匹配的跟踪参数
    pub tracking_param_prefixes: Vec<String>,
    /// 是否去掉 URL 片段
    pub strip_fragment: bool,
    /// 是否压缩地点字符串中的空白
    pub normalize_location: bool,
}

/// 批量搜索配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowSettings {
    /// 职位名称列表
    pub job_titles: Vec<String>,
    /// 地点列表
    pub locations: Vec<String>,
    /// 每次搜索的最大页数
    pub max_page_depth: u32,
    /// 最大并发搜索数
    pub max_concurrent: usize,
}

/// 遥测配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    /// 是否输出 JSON 日志
    pub json: bool,
    /// Prometheus 监听地址，例如 `0.0.0.0:9000`
    pub metrics_addr: Option<String>,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 加载顺序：默认值 → `config/default` → `config/{APP_ENVIRONMENT}` → `JOBFOCUS__*` 环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("JOBFOCUS")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("workflow.job_titles")
                    .with_list_parse_key("workflow.locations")
                    .with_list_parse_key("normalization.tracking_params")
                    .with_list_parse_key("normalization.tracking_param_prefixes")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// 只使用内置默认值构建配置
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("environment", "development")?
            // Default DB pool settings
            .set_default("database.url", "postgres://localhost:5432/jobfocus")?
            .set_default("database.max_connections", 20)?
            .set_default("database.min_connections", 2)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            // Default search provider settings
            .set_default("search_provider.base_url", "https://www.searchapi.io/api/v1/search")?
            .set_default("search_provider.engine", "google_jobs")?
            .set_default("search_provider.country", "us")?
            .set_default("search_provider.language", "en")?
            .set_default("search_provider.provider_name", "searchapi_google_jobs")?
            .set_default("search_provider.timeout_secs", 30)?
            .set_default("search_provider.calls_per_minute", 30)?
            // Default retry settings
            .set_default("retry.max_attempts", 3)?
            .set_default("retry.min_backoff_secs", 4.0)?
            .set_default("retry.max_backoff_secs", 10.0)?
            .set_default("retry.backoff_multiplier", 2.0)?
            .set_default("retry.jitter_factor", 0.1)?
            // Default normalization settings
            .set_default(
                "normalization.tracking_params",
                crate::utils::url_utils::DEFAULT_TRACKING_PARAMS.to_vec(),
            )?
            .set_default(
                "normalization.tracking_param_prefixes",
                crate::utils::url_utils::DEFAULT_TRACKING_PREFIXES.to_vec(),
            )?
            .set_default("normalization.strip_fragment", true)?
            .set_default("normalization.normalize_location", true)?
            // Default workflow settings
            .set_default("workflow.job_titles", Vec::<String>::new())?
            .set_default("workflow.locations", Vec::<String>::new())?
            .set_default("workflow.max_page_depth", 3)?
            .set_default("workflow.max_concurrent", 3)?
            // Default telemetry settings
            .set_default("telemetry.json", false)
    }
}
