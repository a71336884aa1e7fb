//! Gateway 配置
//!
//! 与各服务共用分层加载（`default.toml` → `gateway.toml` → `{APP_ENV}.toml` → `FARMSYNC_*`），
//! 后端地址还可以用 `USER_SERVICE_URL` 等环境变量覆盖

use std::collections::BTreeMap;

use farmsync_config::{ConfigError, ServerConfig, TelemetryConfig, current_env, figment};
use figment::Figment;
use serde::Deserialize;

/// 后端名 → 覆盖其地址的环境变量
const URL_OVERRIDES: [(&str, &str); 3] = [
    ("user", "USER_SERVICE_URL"),
    ("worker", "WORKER_SERVICE_URL"),
    ("financial", "FINANCIAL_SERVICE_URL"),
];

/// 路由规则：前缀 → 后端名
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteRule {
    pub prefix: String,
    pub backend: String,
}

impl RouteRule {
    fn new(prefix: &str, backend: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            backend: backend.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default = "current_env")]
    pub app_env: String,
    pub server: ServerConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    /// 后端名 → 基础 URL
    #[serde(default = "default_backends")]
    pub backends: BTreeMap<String, String>,
    #[serde(default = "default_routes")]
    pub routes: Vec<RouteRule>,
}

fn default_app_name() -> String {
    "gateway".to_string()
}

fn default_backends() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("user".to_string(), "http://user_service:5001".to_string()),
        ("worker".to_string(), "http://worker_service:5002".to_string()),
        ("financial".to_string(), "http://financial_service:5003".to_string()),
    ])
}

fn default_routes() -> Vec<RouteRule> {
    vec![
        RouteRule::new("/api/auth", "user"),
        RouteRule::new("/api/workers", "worker"),
        RouteRule::new("/api/dashboard", "financial"),
        RouteRule::new("/api/yields", "financial"),
        RouteRule::new("/api/sales", "financial"),
        RouteRule::new("/api/financials", "financial"),
        RouteRule::new("/api/inventory", "financial"),
    ]
}

impl GatewayConfig {
    /// 从配置目录和进程环境加载
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let config = Self::from_figment(figment(config_dir, Some("gateway")))?;
        Ok(config.with_url_overrides(|key| std::env::var(key).ok()))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        Ok(figment.extract()?)
    }

    /// 应用 `*_SERVICE_URL` 覆盖，`lookup` 通常为 `std::env::var`
    pub fn with_url_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        for (backend, key) in URL_OVERRIDES {
            if let Some(url) = lookup(key).filter(|u| !u.trim().is_empty()) {
                self.backends.insert(backend.to_string(), url.trim().to_string());
            }
        }
        self
    }

    /// 每条路由的后端都必须配置了地址
    pub fn validate(&self) -> Result<(), String> {
        for rule in &self.routes {
            if !rule.prefix.starts_with('/') {
                return Err(format!("Route prefix '{}' must start with '/'", rule.prefix));
            }
            if !self.backends.contains_key(&rule.backend) {
                return Err(format!(
                    "Route '{}' points to unknown backend '{}'",
                    rule.prefix, rule.backend
                ));
            }
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }
}
