//! 服务启动器
//!
//! 所有 HTTP 服务共用的启动流程

use axum::Router;
use farmsync_config::AppConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::health::{health_routes, metrics_routes};
use crate::infrastructure::Infrastructure;
use crate::runtime::{init_runtime, shutdown_signal};

/// 运行 HTTP 服务
///
/// 这是所有服务的统一入口点。它负责：
/// 1. 加载配置（`default.toml` + `{service}.toml` + 环境变量）
/// 2. 初始化日志与 Prometheus 记录器
/// 3. 创建基础设施资源（连接池带重试，按配置执行 migrations）
/// 4. 调用闭包构建业务路由，并挂上健康检查与 `/metrics`
/// 5. 启动服务器并处理 graceful shutdown
///
/// # 示例
///
/// ```ignore
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     farmsync_bootstrap::run("config", "worker-service", |infra| {
///         worker_service::router(infra.token_service())
///     })
///     .await
/// }
/// ```
pub async fn run<F>(
    config_dir: &str,
    service_name: &str,
    build_routes: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(&Infrastructure) -> Router<Infrastructure>,
{
    let config = AppConfig::load_for(config_dir, service_name)?;

    init_runtime(&config);
    info!("Starting {} service", config.app_name);

    let metrics = if config.telemetry.metrics_enabled {
        match farmsync_telemetry::init_metrics() {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!(error = %e, "Failed to install Prometheus recorder, /metrics disabled");
                None
            }
        }
    } else {
        None
    };

    let addr = config.server.addr();
    let infra = Infrastructure::from_config(config).await?;
    let routes = build_routes(&infra);
    let app = build_app(infra, routes, metrics);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "HTTP server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Service stopped");

    Ok(())
}

/// 组装完整应用：业务路由 + 健康检查 + 可选的 `/metrics`，外加 trace 与 CORS 层
pub fn build_app(
    infra: Infrastructure,
    routes: Router<Infrastructure>,
    metrics: Option<PrometheusHandle>,
) -> Router {
    let mut app = routes.merge(health_routes()).with_state(infra);

    if let Some(handle) = metrics {
        app = app.merge(metrics_routes(handle));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
