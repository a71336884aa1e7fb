//! FarmSync API Gateway

mod config;
mod proxy;
mod routing;

use farmsync_bootstrap::{metrics_routes, shutdown_signal};
use farmsync_telemetry::{init_metrics, init_tracing, init_tracing_json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::GatewayConfig;
use crate::proxy::{ProxyState, proxy_router};
use crate::routing::RouteTable;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // 加载配置
    let config = GatewayConfig::load("config")?;
    config.validate()?;

    if config.is_production() {
        init_tracing_json(&config.telemetry.log_level);
    } else {
        init_tracing(&config.telemetry.log_level);
    }

    let routes = RouteTable::from_config(&config);
    for (backend, url) in &config.backends {
        info!(%backend, %url, "Backend configured");
    }

    let mut app = proxy_router(ProxyState::new(config.app_name.clone(), routes));

    if config.telemetry.metrics_enabled {
        match init_metrics() {
            Ok(handle) => app = metrics_routes(handle).merge(app),
            Err(e) => warn!(error = %e, "Failed to install metrics recorder"),
        }
    }

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // 启动服务器
    let addr = config.server.addr();
    info!(%addr, "Starting gateway");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway stopped");
    Ok(())
}
