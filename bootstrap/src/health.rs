//! 健康检查与指标端点
//!
//! `/health` 只说明进程存活，`/ready` 会 ping 数据库

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use farmsync_adapter_postgres::ping;
use farmsync_common::{HealthResponse, ReadinessReport};
use metrics_exporter_prometheus::PrometheusHandle;

use crate::Infrastructure;

/// 存活 / 就绪路由
pub fn health_routes() -> Router<Infrastructure> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
}

/// `/metrics` 路由（Prometheus 文本格式）
pub fn metrics_routes(handle: PrometheusHandle) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(handle)
}

async fn health_handler(State(infra): State<Infrastructure>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(
        infra.config().app_name.clone(),
        env!("CARGO_PKG_VERSION"),
    ))
}

async fn ready_handler(State(infra): State<Infrastructure>) -> impl IntoResponse {
    let report = ReadinessReport::new().check("postgres", ping(&infra.pool()).await);

    let code = if report.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(report))
}

async fn metrics_handler(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        handle.render(),
    )
}
