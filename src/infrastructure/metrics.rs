// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

use crate::config::settings::MetricsSettings;

/// 初始化指标系统
///
/// 启动 Prometheus 导出端点并注册评论服务使用的指标。地址非法或端口被占用时只记录警告。
pub fn init_metrics(settings: &MetricsSettings) {
    let addr: SocketAddr = match settings.listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!(
                "Invalid metrics listen address {}: {}. Metrics exporter disabled.",
                settings.listen_addr, e
            );
            return;
        }
    };

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return;
    }

    describe_metrics();
    info!("Metrics exporter listening on {}", addr);
}

fn describe_metrics() {
    describe_counter!(
        "review_requests_total",
        "Total number of review generation requests, by effective mode"
    );
    describe_counter!(
        "review_failures_total",
        "Total number of failed review generations, by error kind"
    );
    describe_counter!(
        "review_upstream_retries_total",
        "Total number of retried upstream completion calls"
    );
    describe_counter!(
        "review_upstream_tokens_total",
        "Total tokens reported by the upstream provider"
    );
    describe_histogram!(
        "review_duration_seconds",
        Unit::Seconds,
        "End-to-end duration of review generation"
    );
}
