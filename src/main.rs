//! FarmSync 单体进程
//!
//! 在一个进程里挂载认证、工人、财务三组路由，共用连接池与签名密钥

use axum::Router;
use farmsync_bootstrap::Infrastructure;

fn routes(infra: &Infrastructure) -> Router<Infrastructure> {
    let tokens = infra.token_service();
    Router::new()
        .merge(user_service::router(tokens.clone()))
        .merge(worker_service::router(tokens.clone()))
        .merge(financial_service::router(tokens))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    farmsync_bootstrap::run("config", "farmsync", routes).await
}
