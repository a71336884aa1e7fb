//! HTTP 接口层

mod dto;
mod handlers;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use farmsync_auth_core::{TokenService, auth_middleware};
use farmsync_bootstrap::Infrastructure;

/// `/api/auth/*` 路由
///
/// 注册与登录公开，`/me` 需要 Bearer 令牌
pub fn router(tokens: TokenService) -> Router<Infrastructure> {
    let protected = Router::new()
        .route("/api/auth/me", get(handlers::me))
        .route_layer(middleware::from_fn_with_state(tokens, auth_middleware));

    Router::new()
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/login", post(handlers::login))
        .merge(protected)
}
