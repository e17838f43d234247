// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

/// 任务计数指标，按结果（completed/failed）分类
pub const JOBS_TOTAL: &str = "linkprobe_jobs_total";
/// 探测计数指标，按结果（valid/http_error/network_error/timeout）分类
pub const PROBES_TOTAL: &str = "linkprobe_probes_total";
/// 单次探测耗时
pub const PROBE_DURATION_SECONDS: &str = "linkprobe_probe_duration_seconds";

/// 启动Prometheus导出器
///
/// 地址无效或端口被占用时只记录警告，服务继续运行
pub fn init_metrics(listen_addr: &str) {
    let addr: SocketAddr = match listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Invalid metrics address {}: {}", listen_addr, e);
            return;
        }
    };

    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return;
    }

    describe_counter!(JOBS_TOTAL, "Link jobs finished, by outcome");
    describe_counter!(PROBES_TOTAL, "Domain probes finished, by outcome");
    describe_histogram!(
        PROBE_DURATION_SECONDS,
        Unit::Seconds,
        "Duration of a single domain probe"
    );

    info!("Metrics exporter listening on {}", addr);
}
