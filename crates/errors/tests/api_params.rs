//! ApiQuery / ApiPath 提取器测试

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use farmsync_errors::{ApiPath, ApiQuery};
use serde::Deserialize;
use tower::ServiceExt;

#[derive(Deserialize)]
struct Window {
    months: Option<i64>,
}

fn app() -> Router {
    Router::new()
        .route(
            "/dashboard",
            get(|ApiQuery(window): ApiQuery<Window>| async move {
                window.months.unwrap_or(6).to_string()
            }),
        )
        .route(
            "/workers/{id}",
            get(|ApiPath(id): ApiPath<i32>| async move { id.to_string() }),
        )
}

async fn get_uri(uri: &str) -> Response {
    app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn problem(response: Response) -> serde_json::Value {
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/problem+json"
    );
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_valid_params_are_extracted() {
    let response = get_uri("/dashboard?months=12").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"12");

    let response = get_uri("/workers/7").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_bad_query_is_problem_details() {
    let problem = problem(get_uri("/dashboard?months=abc").await).await;
    assert_eq!(problem["status"], 400);
    assert_eq!(problem["title"], "Validation Error");
    assert!(problem["detail"].as_str().unwrap().starts_with("Validation error: "));
}

#[tokio::test]
async fn test_bad_path_is_problem_details() {
    let problem = problem(get_uri("/workers/abc").await).await;
    assert_eq!(problem["status"], 400);
    assert_eq!(problem["title"], "Validation Error");
}
