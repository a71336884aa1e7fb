//! 基础设施资源管理
//!
//! 连接池与令牌服务，作为 axum 的共享状态

use std::sync::Arc;
use std::time::Duration;

use axum::extract::FromRef;
use farmsync_adapter_postgres::{
    PgPool, PostgresConfig, create_lazy_pool, create_pool, run_migrations,
};
use farmsync_auth_core::TokenService;
use farmsync_config::{AppConfig, JwtConfig};
use farmsync_errors::AppResult;
use secrecy::ExposeSecret;
use tracing::info;

use crate::retry::{Backoff, retry_startup};

/// 基础设施资源容器
///
/// 克隆开销很小（连接池与配置均为共享引用）
#[derive(Clone)]
pub struct Infrastructure {
    config: Arc<AppConfig>,
    pool: PgPool,
    tokens: TokenService,
}

impl Infrastructure {
    /// 从配置创建基础设施资源（连接数据库带重试）
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let pg_config = PostgresConfig::new(config.database.url.expose_secret())
            .with_max_connections(config.database.max_connections);
        let pool = retry_startup(&Backoff::default(), "PostgreSQL connection", || {
            let cfg = pg_config.clone();
            async move { create_pool(&cfg).await }
        })
        .await?;
        info!(
            max_connections = config.database.max_connections,
            "PostgreSQL connection pool created"
        );

        if config.database.run_migrations {
            run_migrations(&pool).await?;
        }

        let tokens = token_service(&config.jwt);

        Ok(Self::new(config, pool, tokens))
    }

    /// 创建延迟连接的基础设施（首次查询时才建立连接，不执行 migrations）
    pub fn connect_lazy(config: AppConfig) -> AppResult<Self> {
        let pg_config = PostgresConfig::new(config.database.url.expose_secret())
            .with_max_connections(config.database.max_connections)
            .with_connect_timeout(Duration::from_secs(1));
        let pool = create_lazy_pool(&pg_config)?;
        let tokens = token_service(&config.jwt);

        Ok(Self::new(config, pool, tokens))
    }

    /// 由已有资源组装
    pub fn new(config: AppConfig, pool: PgPool, tokens: TokenService) -> Self {
        Self {
            config: Arc::new(config),
            pool,
            tokens,
        }
    }

    /// 获取应用配置
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 获取 PostgreSQL 连接池
    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    /// 获取 Token 服务
    pub fn token_service(&self) -> TokenService {
        self.tokens.clone()
    }
}

/// 按 JWT 配置创建令牌服务
pub fn token_service(jwt: &JwtConfig) -> TokenService {
    TokenService::new(
        jwt.secret.expose_secret(),
        jwt.expires_in as i64,
        jwt.issuer.clone(),
        jwt.audience.clone(),
    )
}

impl FromRef<Infrastructure> for PgPool {
    fn from_ref(infra: &Infrastructure) -> Self {
        infra.pool.clone()
    }
}

impl FromRef<Infrastructure> for TokenService {
    fn from_ref(infra: &Infrastructure) -> Self {
        infra.tokens.clone()
    }
}
