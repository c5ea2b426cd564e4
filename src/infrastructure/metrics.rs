// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

/// 注册指标描述
pub fn describe_metrics() {
    describe_counter!(
        "job_search_runs_total",
        "Number of finished job searches, labelled by status"
    );
    describe_counter!(
        "job_search_listings_found_total",
        "Raw records returned by the search provider"
    );
    describe_counter!(
        "job_search_listings_new_total",
        "Listings inserted for the first time"
    );
    describe_counter!(
        "job_search_listings_skipped_total",
        "Records dropped because they failed normalization"
    );
    describe_counter!(
        "job_search_fetch_attempts_total",
        "Page fetch attempts including retries"
    );
    describe_histogram!(
        "job_search_duration_seconds",
        Unit::Seconds,
        "Wall-clock duration of a job search"
    );
}

/// 启动 Prometheus 导出器
///
/// 地址无效或端口被占用时只记录警告，不影响搜索流程
pub fn init_metrics(addr: &str) {
    let addr: SocketAddr = match addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Invalid metrics address {}: {}", addr, e);
            return;
        }
    };

    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return;
    }

    describe_metrics();
    info!("Metrics exporter listening on {}", addr);
}
