use super::*;
use crate::pipeline::test_helpers::{Behaviors, Harness, harness};
use crate::types::ConversionReply;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use std::time::Duration;
use tower::ServiceExt;


/// Router over a mocked pipeline whose storage lives in the harness temp dirs
fn test_app(behaviors: Behaviors) -> (Router, Harness) {
    let h = harness(behaviors);
    let mut config = Config::default();
    config.storage.output_dir = h.output_dir.clone();
    config.storage.temp_dir = h.temp_dir.clone();

    (create_router(h.pipeline.clone(), Arc::new(config)), h)
}

fn post_convert(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/convert")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn reply_of(response: Response<Body>) -> ConversionReply {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn test_api_server_spawns_and_shuts_down() {
    let h = harness(Behaviors::default());
    let mut config = Config::default();
    config.api.bind_address = "127.0.0.1:0".parse().unwrap(); // OS assigns a free port
    let config = Arc::new(config);

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(start_api_server(h.pipeline.clone(), config, async move {
        stop_rx.await.ok();
    }));

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!server.is_finished(), "server should keep running until shutdown");

    stop_tx.send(()).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server should stop after shutdown signal")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_api_server_bind_failure() {
    let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let h = harness(Behaviors::default());
    let mut config = Config::default();
    config.api.bind_address = taken.local_addr().unwrap();

    let result =
        start_api_server(h.pipeline.clone(), Arc::new(config), std::future::pending::<()>()).await;

    assert!(matches!(result, Err(crate::Error::Io(_))));
}

#[tokio::test]
async fn test_cors_enabled() {
    let (app, _h) = test_app(Behaviors::default());

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_cors_disabled() {
    let h = harness(Behaviors::default());
    let mut config = Config::default();
    config.api.cors_enabled = false;
    let app = create_router(h.pipeline.clone(), Arc::new(config));

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        !response.headers().contains_key("access-control-allow-origin"),
        "CORS header should be absent when CORS is disabled"
    );
}

#[tokio::test]
async fn test_cors_specific_origins() {
    let h = harness(Behaviors::default());
    let mut config = Config::default();
    config.api.cors_origins = vec!["http://allowed.example".to_string()];
    let app = create_router(h.pipeline.clone(), Arc::new(config));

    let allowed = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("Origin", "http://allowed.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        allowed.headers().get("access-control-allow-origin").unwrap(),
        "http://allowed.example"
    );

    let denied = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("Origin", "http://other.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(!denied.headers().contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn test_swagger_ui_enabled() {
    let (app, _h) = test_app(Behaviors::default());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/swagger-ui/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(body.contains("<html") || body.contains("<!DOCTYPE html>"));
}

#[tokio::test]
async fn test_swagger_ui_disabled() {
    let h = harness(Behaviors::default());
    let mut config = Config::default();
    config.api.swagger_ui = false;
    let app = create_router(h.pipeline.clone(), Arc::new(config));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/swagger-ui/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
