//! farmsync-telemetry - 可观测性库
//!
//! 日志（tracing）与 Prometheus 指标

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// 指标名称
pub mod names {
    pub const SALES_RECORDED: &str = "farmsync_sales_recorded_total";
    pub const LOANS_ISSUED: &str = "farmsync_loans_issued_total";
    pub const PAYROLL_RUNS: &str = "farmsync_payroll_runs_total";
    pub const GATEWAY_REQUESTS: &str = "farmsync_gateway_requests_total";
    pub const GATEWAY_UPSTREAM_FAILURES: &str = "farmsync_gateway_upstream_failures_total";
}

/// 初始化 tracing
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// 初始化 JSON 格式的 tracing（生产环境）
pub fn init_tracing_json(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json())
        .init();
}

/// 初始化 Prometheus metrics
///
/// 全局只能安装一次，重复调用返回错误
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// 业务计数器 +1
pub fn increment(name: &'static str) {
    metrics::counter!(name).increment(1);
}

/// 带单个标签的计数器 +1
pub fn increment_labeled(name: &'static str, label: &'static str, value: String) {
    metrics::counter!(name, label => value).increment(1);
}
