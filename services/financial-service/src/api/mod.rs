//! HTTP 接口层

mod dto;
mod handlers;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use farmsync_auth_core::{TokenService, auth_middleware};
use farmsync_bootstrap::Infrastructure;

/// 仪表盘、收成、销售、收支与库存路由，全部需要 Bearer 令牌
pub fn router(tokens: TokenService) -> Router<Infrastructure> {
    Router::new()
        .route("/api/dashboard", get(handlers::dashboard))
        .route("/api/yields", get(handlers::list_yields).post(handlers::record_yield))
        .route("/api/sales", get(handlers::list_sales).post(handlers::record_sale))
        .route("/api/financials", get(handlers::list_entries))
        .route("/api/financials/revenue", post(handlers::record_revenue))
        .route("/api/financials/expense", post(handlers::record_expense))
        .route("/api/inventory", get(handlers::list_inventory).post(handlers::add_inventory))
        .route_layer(middleware::from_fn_with_state(tokens, auth_middleware))
}
