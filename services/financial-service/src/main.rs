//! Financial Service

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    farmsync_bootstrap::run("config", "financial-service", |infra| {
        financial_service::router(infra.token_service())
    })
    .await
}
