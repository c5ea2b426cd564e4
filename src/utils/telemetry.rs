// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::TelemetrySettings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info,jobfocus=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
}

/// 初始化日志
///
/// `RUST_LOG` 优先，否则使用默认过滤器；`json = true` 时输出结构化 JSON 日志
pub fn init_telemetry(settings: &TelemetrySettings) {
    let registry = tracing_subscriber::registry().with(env_filter());

    let result = if settings.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    // 测试中可能被多次调用
    if let Err(e) = result {
        tracing::debug!("tracing subscriber already initialized: {}", e);
    }
}
