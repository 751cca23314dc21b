//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use brickify::models::AppConfig;
use brickify::server::{build_router, create_app_state_with_config, AppState};
use brickify::services::{InMemorySessionStore, SessionStore};

/// Test application with router and direct access to the session store
pub struct TestApp {
    router: axum::Router,
    pub sessions: Arc<InMemorySessionStore>,
}

impl TestApp {
    /// Create a new test application with the default configuration
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application whose document backend is `url`
    pub fn with_backend(url: &str) -> Self {
        Self::with_config(AppConfig::default().with_backend_url(Some(url.to_string())))
    }

    /// Create a test application from an explicit configuration
    pub fn with_config(config: AppConfig) -> Self {
        let state = create_app_state_with_config(config).expect("Failed to create app state");
        let sessions = state.sessions.clone();

        // Same router as production, minus Swagger UI
        let router = build_router(state);

        Self { router, sessions }
    }

    /// Create the state for custom router configuration
    pub fn create_state() -> AppState {
        create_app_state_with_config(AppConfig::default()).expect("Failed to create app state")
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request without a body
    pub async fn post(&self, path: &str) -> TestResponse {
        self.request(Request::post(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: &str) -> TestResponse {
        let builder = Request::post(path).header("Content-Type", "application/json");
        self.request(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Make a PUT request with JSON body
    pub async fn put_json(&self, path: &str, body: &str) -> TestResponse {
        let builder = Request::put(path).header("Content-Type", "application/json");
        self.request(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Make a PUT request with a raw body
    pub async fn put_bytes(&self, path: &str, body: Vec<u8>) -> TestResponse {
        let builder = Request::put(path).header("Content-Type", "application/octet-stream");
        self.request(builder.body(Body::from(body)).unwrap()).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request(Request::delete(path).body(Body::empty()).unwrap())
            .await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Create a session and return its id
    pub async fn create_session(&self) -> String {
        let response = self.post("/api/sessions").await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());

        let json: serde_json::Value = response.json();
        json["id"].as_str().unwrap().to_string()
    }

    /// Create a session, upload `image` and build at `width`
    pub async fn session_with_mosaic(&self, image: Vec<u8>, width: u32) -> String {
        let id = self.create_session().await;

        let response = self.put_bytes(&format!("/api/sessions/{id}/image"), image).await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text());

        let response = self
            .post(&format!("/api/sessions/{id}/mosaic?width={width}"))
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text());

        id
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get raw body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Value of a header, if present and ASCII
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Check if response is a PNG image
    pub fn is_png(&self) -> bool {
        self.body.len() >= 8 && &self.body[0..8] == b"\x89PNG\r\n\x1a\n"
    }
}
