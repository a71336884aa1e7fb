//! 认证命令处理器

use farmsync_adapter_postgres::PostgresUserRepository;
use farmsync_auth_core::TokenService;
use farmsync_common::OwnerId;
use farmsync_domain::{Email, HashedPassword, User};
use farmsync_errors::{AppError, AppResult};
use tracing::{info, warn};

use super::commands::*;

/// 登录结果
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    pub access_token: String,
    pub expires_in: i64,
}

/// 认证命令处理器
pub struct AuthHandler {
    users: PostgresUserRepository,
    tokens: TokenService,
}

impl AuthHandler {
    pub fn new(users: PostgresUserRepository, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    /// 注册
    pub async fn handle_register(&self, cmd: RegisterCommand) -> AppResult<User> {
        cmd.validate().map_err(AppError::validation)?;
        let email = Email::new(cmd.email)?;

        // 并发注册由唯一约束兜底（仓储层映射为 Conflict）
        if self.users.exists_by_email(&email).await? {
            return Err(AppError::conflict("Email already exists"));
        }

        let password_hash = HashedPassword::from_plain(&cmd.password)?;
        let user = self
            .users
            .create(&email, &password_hash, cmd.name.trim())
            .await?;

        info!(owner_id = %user.id, "User registered");
        Ok(user)
    }

    /// 登录，成功后签发访问令牌
    ///
    /// 邮箱不存在与密码错误返回同样的 401
    pub async fn handle_login(&self, cmd: LoginCommand) -> AppResult<LoginResult> {
        let invalid = || AppError::unauthorized("Invalid credentials");

        let email = Email::new(cmd.email).map_err(|_| invalid())?;
        let user = self.users.find_by_email(&email).await?.ok_or_else(invalid)?;

        let hash = HashedPassword::from_hash(user.password_hash.clone());
        if !hash.verify(&cmd.password)? {
            warn!(owner_id = %user.id, "Login failed: wrong password");
            return Err(invalid());
        }

        let access_token = self.tokens.generate_access_token(&user.external_id, user.id)?;
        info!(owner_id = %user.id, "User logged in");

        Ok(LoginResult {
            user,
            access_token,
            expires_in: self.tokens.access_token_expires_in(),
        })
    }

    /// 当前用户
    pub async fn handle_me(&self, owner: OwnerId) -> AppResult<User> {
        self.users
            .find_by_id(owner)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
