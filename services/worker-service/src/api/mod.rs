//! HTTP 接口层

mod dto;
mod handlers;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use farmsync_auth_core::{TokenService, auth_middleware};
use farmsync_bootstrap::Infrastructure;

/// `/api/workers/*` 路由，全部需要 Bearer 令牌
pub fn router(tokens: TokenService) -> Router<Infrastructure> {
    Router::new()
        .route("/api/workers", get(handlers::list).post(handlers::create))
        .route("/api/workers/{id}", get(handlers::detail))
        .route("/api/workers/{id}/attendance", post(handlers::mark_attendance))
        .route("/api/workers/{id}/loan", post(handlers::issue_loan))
        .route("/api/workers/{id}/payroll", post(handlers::run_payroll))
        .route_layer(middleware::from_fn_with_state(tokens, auth_middleware))
}
