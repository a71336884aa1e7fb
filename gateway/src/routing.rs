//! 路由表
//!
//! 按路径段做最长前缀匹配：`/api/workers` 匹配 `/api/workers` 与 `/api/workers/7/loan`，
//! 不匹配 `/api/workersx`

use crate::config::GatewayConfig;

/// 一条已解析的路由
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub prefix: String,
    pub backend: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    /// 按前缀长度降序
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(mut routes: Vec<Route>) -> Self {
        for route in &mut routes {
            let trimmed = route.prefix.trim_end_matches('/');
            route.prefix = if trimmed.is_empty() { "/".to_string() } else { trimmed.to_string() };
            route.base_url = route.base_url.trim_end_matches('/').to_string();
        }
        routes.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Self { routes }
    }

    /// 由配置构建，未知后端的规则会被跳过（启动时已做校验）
    pub fn from_config(config: &GatewayConfig) -> Self {
        let routes = config
            .routes
            .iter()
            .filter_map(|rule| {
                config.backends.get(&rule.backend).map(|base_url| Route {
                    prefix: rule.prefix.clone(),
                    backend: rule.backend.clone(),
                    base_url: base_url.clone(),
                })
            })
            .collect();
        Self::new(routes)
    }

    pub fn resolve(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| matches_prefix(&route.prefix, path))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn matches_prefix(prefix: &str, path: &str) -> bool {
    if prefix == "/" {
        return path.starts_with('/');
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
