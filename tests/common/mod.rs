#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use toy_corner_api::{
    app,
    auth::Identity,
    config::AppConfig,
    database::{Collection, DocumentStore, MemoryStore},
    AppState,
};

pub const TEST_SECRET: &str = "integration-test-secret";
pub const SELLER: &str = "seller@toys.test";
pub const OTHER_SELLER: &str = "rival@toys.test";

/// Router over a fresh in-memory store.
pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
    pub state: AppState,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(AppConfig::for_tests(TEST_SECRET))
    }

    pub fn with_config(config: AppConfig) -> Self {
        let store = MemoryStore::new();
        let state = AppState::new(Arc::new(store.clone()), config).expect("test state");
        Self::with_state(state, store)
    }

    pub fn with_state(state: AppState, store: MemoryStore) -> Self {
        Self {
            router: app(state.clone()),
            store,
            state,
        }
    }

    pub fn token_for(&self, email: &str) -> String {
        let identity = Identity::try_from(json!({ "email": email })).expect("object claims");
        self.state.tokens.issue(&identity).expect("token")
    }

    pub async fn request(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        Ok(TestResponse { status, body })
    }

    pub async fn get(&self, uri: &str) -> Result<TestResponse> {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> Result<TestResponse> {
        self.request(Method::POST, uri, None, Some(body)).await
    }

    /// Insert straight into the store, bypassing auth. Returns the new id.
    pub async fn seed(&self, collection: Collection, document: Value) -> Result<String> {
        let document = document.as_object().cloned().context("seed document must be an object")?;
        let result = self.store.insert_one(collection, document).await?;
        Ok(result.inserted_id)
    }

    pub async fn seed_product(&self, name: &str, seller: &str) -> Result<String> {
        self.seed(
            Collection::Products,
            json!({ "name": name, "sellerEmail": seller, "price": 10, "subCategory": "cars" }),
        )
        .await
    }
}

pub fn names(body: &Value) -> Vec<String> {
    body.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// The app served on a real socket, for tests that go through reqwest.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn(router: Router) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        let server = Self { port, base_url, handle };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = client.get(format!("{}/", self.base_url)).send().await {
                if resp.status() == reqwest::StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
