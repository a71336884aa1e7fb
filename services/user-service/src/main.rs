//! User Service

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    farmsync_bootstrap::run("config", "user-service", |infra| {
        user_service::router(infra.token_service())
    })
    .await
}
