//! `/health` 与 `/ready` 的响应体

use serde::{Deserialize, Serialize};

/// 存活检查：进程在跑即可
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

impl HealthResponse {
    pub fn healthy(service: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            service: service.into(),
            version: version.into(),
        }
    }
}

/// 单个依赖的探测结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Probe {
    pub up: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    /// 连接池当前连接数 / 空闲连接数
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connections: Option<(u32, u32)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Probe {
    pub fn up(latency_ms: u64) -> Self {
        Self {
            up: true,
            latency_ms: Some(latency_ms),
            connections: None,
            error: None,
        }
    }

    pub fn down(error: impl Into<String>) -> Self {
        Self {
            up: false,
            latency_ms: None,
            connections: None,
            error: Some(error.into()),
        }
    }

    pub fn with_connections(mut self, size: u32, idle: u32) -> Self {
        self.connections = Some((size, idle));
        self
    }
}

/// 就绪检查报告，任一依赖不可用即整体不就绪
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadinessReport {
    pub ready: bool,
    pub checks: Vec<NamedProbe>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedProbe {
    pub name: String,
    #[serde(flatten)]
    pub probe: Probe,
}

impl ReadinessReport {
    pub fn new() -> Self {
        Self {
            ready: true,
            checks: Vec::new(),
        }
    }

    pub fn check(mut self, name: impl Into<String>, probe: Probe) -> Self {
        self.ready &= probe.up;
        self.checks.push(NamedProbe {
            name: name.into(),
            probe,
        });
        self
    }
}
