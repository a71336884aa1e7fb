//! 路由处理函数

use axum::{Json, extract::State, http::StatusCode};
use farmsync_adapter_postgres::{PgPool, PostgresUserRepository};
use farmsync_auth_core::{AuthClaims, TokenService};
use farmsync_errors::{ApiJson, AppResult};

use super::dto::*;
use crate::application::{AuthHandler, LoginCommand, RegisterCommand};

fn auth_handler(pool: PgPool, tokens: TokenService) -> AuthHandler {
    AuthHandler::new(PostgresUserRepository::new(pool), tokens)
}

pub async fn register(
    State(pool): State<PgPool>,
    State(tokens): State<TokenService>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let user = auth_handler(pool, tokens)
        .handle_register(RegisterCommand {
            email: req.email,
            password: req.password,
            name: req.name,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully",
            user_id: user.external_id.to_string(),
        }),
    ))
}

pub async fn login(
    State(pool): State<PgPool>,
    State(tokens): State<TokenService>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let result = auth_handler(pool, tokens)
        .handle_login(LoginCommand {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        message: "Login successful",
        user_id: result.user.external_id.to_string(),
        access_token: result.access_token,
        token_type: "Bearer",
        expires_in: result.expires_in,
    }))
}

pub async fn me(
    State(pool): State<PgPool>,
    State(tokens): State<TokenService>,
    claims: AuthClaims,
) -> AppResult<Json<MeResponse>> {
    let user = auth_handler(pool, tokens).handle_me(claims.owner_id()).await?;

    Ok(Json(MeResponse {
        user_id: user.external_id.to_string(),
        email: user.email,
        name: user.name,
    }))
}
