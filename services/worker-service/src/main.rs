//! Worker Service

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    farmsync_bootstrap::run("config", "worker-service", |infra| {
        worker_service::router(infra.token_service())
    })
    .await
}
