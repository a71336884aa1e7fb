//! 认证中间件

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use farmsync_common::OwnerId;
use farmsync_errors::AppError;
use tracing::{debug, warn};

use crate::{Claims, TokenService};

/// 认证 Claims 提取器
///
/// 用于从请求中获取已验证的 Claims
/// 应该在 auth_middleware 之后使用
#[derive(Debug, Clone)]
pub struct AuthClaims(pub Claims);

impl AuthClaims {
    pub fn owner_id(&self) -> OwnerId {
        self.0.owner_id()
    }
}

impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthClaims)
            .ok_or_else(|| AppError::unauthorized("Missing authentication"))
    }
}

/// JWT 认证中间件
///
/// 验证请求中的 JWT token 并将 claims 注入到请求扩展中
pub async fn auth_middleware(
    State(token_service): State<TokenService>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(token) => token,
        None => {
            warn!("Missing or invalid authorization header");
            return Err(AppError::unauthorized("Missing bearer token"));
        }
    };

    debug!("Validating JWT token");
    let claims = token_service.validate_token(token).inspect_err(|e| {
        warn!(error = %e, "Token validation failed");
    })?;

    debug!(owner_id = claims.owner_id, "Token validated");
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
