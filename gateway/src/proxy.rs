//! 反向代理
//!
//! 原样转发方法、路径、查询串、请求体以及 `Content-Type` / `Authorization`，
//! 原样回传后端的状态码、响应体和 `Content-Type`

use std::sync::Arc;

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use farmsync_common::HealthResponse;
use farmsync_errors::AppError;
use farmsync_telemetry::{increment_labeled, names};
use serde_json::json;
use tracing::{debug, warn};

use crate::routing::RouteTable;

/// 请求体上限
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// 代理共享状态
#[derive(Clone)]
pub struct ProxyState {
    pub service_name: String,
    pub client: reqwest::Client,
    pub routes: Arc<RouteTable>,
}

impl ProxyState {
    pub fn new(service_name: impl Into<String>, routes: RouteTable) -> Self {
        Self {
            service_name: service_name.into(),
            client: reqwest::Client::new(),
            routes: Arc::new(routes),
        }
    }
}

/// 网关路由：`/health` 自己应答，其余请求按路由表转发
pub fn proxy_router(state: ProxyState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .fallback(forward)
        .with_state(state)
}

async fn health_handler(State(state): State<ProxyState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(
        state.service_name.clone(),
        env!("CARGO_PKG_VERSION"),
    ))
}

async fn forward(State(state): State<ProxyState>, request: Request) -> Response {
    let path = request.uri().path().to_string();
    let Some(route) = state.routes.resolve(&path) else {
        return AppError::not_found(format!("No route for {}", path)).into_response();
    };

    increment_labeled(names::GATEWAY_REQUESTS, "backend", route.backend.clone());

    let (parts, body) = request.into_parts();
    let body = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return AppError::validation(format!("Failed to read request body: {}", e))
                .into_response();
        }
    };

    let url = match parts.uri.query() {
        Some(query) => format!("{}{}?{}", route.base_url, path, query),
        None => format!("{}{}", route.base_url, path),
    };
    debug!(method = %parts.method, %url, backend = %route.backend, "Forwarding request");

    let mut upstream = state.client.request(parts.method.clone(), &url).body(body);
    for name in [header::CONTENT_TYPE, header::AUTHORIZATION] {
        if let Some(value) = parts.headers.get(&name) {
            upstream = upstream.header(name, value.clone());
        }
    }

    let response = match upstream.send().await {
        Ok(response) => response,
        Err(e) => {
            warn!(backend = %route.backend, %url, error = %e, "Upstream unreachable");
            increment_labeled(names::GATEWAY_UPSTREAM_FAILURES, "backend", route.backend.clone());
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "error": format!("Failed to connect to service: {}", e) })),
            )
                .into_response();
        }
    };

    relay(response).await
}

async fn relay(response: reqwest::Response) -> Response {
    let status = response.status();
    let content_type = response.headers().get(header::CONTENT_TYPE).cloned();

    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "Failed to read upstream response");
            return AppError::upstream_unavailable(format!("Upstream response broken: {}", e))
                .into_response();
        }
    };

    let mut relayed = Response::new(Body::from(bytes));
    *relayed.status_mut() = status;
    if let Some(content_type) = content_type {
        relayed.headers_mut().insert(header::CONTENT_TYPE, content_type);
    } else {
        relayed
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/octet-stream"));
    }
    relayed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::Route;
    use axum::http::{HeaderMap, Method, Uri};
    use serde_json::Value;
    use tokio::net::TcpListener;
    use tower::ServiceExt;

    /// 回显收到的请求
    async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> impl IntoResponse {
        let get_header = |name: header::HeaderName| {
            headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
        };
        let status = if uri.path().ends_with("/missing") {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::CREATED
        };
        (
            status,
            Json(json!({
                "method": method.as_str(),
                "path": uri.path(),
                "query": uri.query(),
                "authorization": get_header(header::AUTHORIZATION),
                "contentType": get_header(header::CONTENT_TYPE),
                "body": body,
            })),
        )
    }

    async fn spawn_backend() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().fallback(echo);
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn gateway(routes: Vec<(&str, &str, String)>) -> Router {
        let table = RouteTable::new(
            routes
                .into_iter()
                .map(|(prefix, backend, base_url)| Route {
                    prefix: prefix.to_string(),
                    backend: backend.to_string(),
                    base_url,
                })
                .collect(),
        );
        proxy_router(ProxyState::new("gateway", table))
    }

    async fn read_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_forwards_request_and_relays_response() {
        let backend = spawn_backend().await;
        let app = gateway(vec![("/api/workers", "worker", backend)]);

        let request = Request::builder()
            .method("POST")
            .uri("/api/workers/3/loan?dry=1")
            .header(header::AUTHORIZATION, "Bearer abc")
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-ignored", "1")
            .body(Body::from(r#"{"amount":200}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        let echoed = read_json(response).await;
        assert_eq!(echoed["method"], "POST");
        assert_eq!(echoed["path"], "/api/workers/3/loan");
        assert_eq!(echoed["query"], "dry=1");
        assert_eq!(echoed["authorization"], "Bearer abc");
        assert_eq!(echoed["contentType"], "application/json");
        assert_eq!(echoed["body"], r#"{"amount":200}"#);
    }

    #[tokio::test]
    async fn test_backend_status_is_relayed() {
        let backend = spawn_backend().await;
        let app = gateway(vec![("/api/sales", "financial", backend)]);

        let request = Request::builder()
            .uri("/api/sales/missing")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_json(response).await["method"], "GET");
    }

    #[tokio::test]
    async fn test_unreachable_backend_returns_503() {
        let app = gateway(vec![("/api/auth", "user", "http://127.0.0.1:1".to_string())]);

        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = read_json(response).await;
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .starts_with("Failed to connect to service: ")
        );
    }

    #[tokio::test]
    async fn test_unmatched_path_returns_problem_details() {
        let app = gateway(vec![("/api/auth", "user", "http://127.0.0.1:1".to_string())]);

        let request = Request::builder()
            .uri("/api/authx")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/problem+json"
        );
        assert_eq!(read_json(response).await["detail"], "Not found: No route for /api/authx");
    }

    #[tokio::test]
    async fn test_health_is_answered_locally() {
        let app = gateway(vec![]);

        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["service"], "gateway");
    }
}
