mod common;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{TestApp, TEST_SECRET};
use toy_corner_api::{
    config::AppConfig,
    database::{
        Collection, DatabaseError, DatabaseResult, DeleteResult, DocumentStore, InsertOneResult, MemoryStore,
        UpdateResult,
    },
    filter::{Filter, JsonDocument},
    AppState,
};

/// A store whose server can never be reached.
struct UnreachableStore;

fn refused<T>() -> DatabaseResult<T> {
    Err(DatabaseError::ConnectionError("connection refused".to_string()))
}

#[async_trait]
impl DocumentStore for UnreachableStore {
    async fn find(&self, _: Collection, _: &Filter) -> DatabaseResult<Vec<JsonDocument>> {
        refused()
    }
    async fn find_one(&self, _: Collection, _: &Filter) -> DatabaseResult<Option<JsonDocument>> {
        refused()
    }
    async fn insert_one(&self, _: Collection, _: JsonDocument) -> DatabaseResult<InsertOneResult> {
        refused()
    }
    async fn update_one(&self, _: Collection, _: &Filter, _: JsonDocument) -> DatabaseResult<UpdateResult> {
        refused()
    }
    async fn delete_one(&self, _: Collection, _: &Filter) -> DatabaseResult<DeleteResult> {
        refused()
    }
    async fn health_check(&self) -> DatabaseResult<()> {
        refused()
    }
}

fn unreachable_app() -> TestApp {
    let state = AppState::new(Arc::new(UnreachableStore), AppConfig::for_tests(TEST_SECRET)).unwrap();
    TestApp::with_state(state, MemoryStore::new())
}

#[tokio::test]
async fn root_reports_liveness() -> Result<()> {
    let app = TestApp::new();
    let res = app.get("/").await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!("Toy Corner Server"));
    Ok(())
}

#[tokio::test]
async fn health_reports_connected_store() -> Result<()> {
    let app = TestApp::new();
    let res = app.get("/health").await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "ok");
    assert_eq!(res.body["database"], "connected");
    Ok(())
}

#[tokio::test]
async fn health_is_503_when_store_is_down() -> Result<()> {
    let app = unreachable_app();
    let res = app.get("/health").await?;

    assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.body["database"], "unreachable");
    Ok(())
}

#[tokio::test]
async fn storage_outage_surfaces_as_503_without_detail() -> Result<()> {
    let app = unreachable_app();
    let res = app.get("/products").await?;

    assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.body["error"], true);
    assert!(!res.body["message"].as_str().unwrap_or_default().contains("refused"));
    Ok(())
}

#[tokio::test]
async fn jwt_issues_verifiable_token() -> Result<()> {
    let app = TestApp::new();
    let res = app.post("/jwt", json!({ "email": "a@b.c", "role": "seller" })).await?;

    assert_eq!(res.status, StatusCode::OK);
    let token = res.body["token"].as_str().expect("token string");

    let identity = app.state.tokens.verify(token)?;
    assert_eq!(identity.email(), Some("a@b.c"));
    assert_eq!(identity.0.get("role"), Some(&json!("seller")));
    assert!(identity.0.get("exp").is_none());
    Ok(())
}

#[tokio::test]
async fn jwt_rejects_non_object_claims() -> Result<()> {
    let app = TestApp::new();
    let res = app.post("/jwt", json!(["not", "an", "object"])).await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], "BAD_REQUEST");
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_a_structured_400() -> Result<()> {
    let app = TestApp::new();
    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/orders")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{ not json"))?;

    let response = tower::ServiceExt::oneshot(app.router.clone(), request).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body: serde_json::Value = serde_json::from_slice(&bytes)?;
    assert_eq!(body["code"], "INVALID_JSON");
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_json_404() -> Result<()> {
    let app = TestApp::new();
    let res = app.get("/nope/nothing").await?;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["code"], "NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn permissive_cors_echoes_any_origin() -> Result<()> {
    let app = TestApp::new();
    let request = axum::http::Request::builder()
        .method(Method::GET)
        .uri("/products")
        .header("origin", "https://somewhere.example")
        .body(axum::body::Body::empty())?;

    let response = tower::ServiceExt::oneshot(app.router.clone(), request).await?;
    assert_eq!(response.headers().get("access-control-allow-origin").map(|v| v.as_bytes()), Some(&b"*"[..]));
    Ok(())
}
