//! Shared helpers for the HTTP integration tests

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use dinepick_server::auth::JwtConfig;
use dinepick_server::db::DbService;
use dinepick_server::{Config, ServerState, api};
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
}

impl TestApp {
    /// Fresh in-memory database behind the full router
    pub async fn new() -> Self {
        Self::with_random_limits(1, 50).await
    }

    /// Same as [`TestApp::new`] with custom `limit` defaults for the random endpoint
    pub async fn with_random_limits(default_limit: usize, max_limit: usize) -> Self {
        let db = DbService::in_memory().await.expect("in-memory database");

        let mut config = Config::with_overrides("./target/test-data", "sqlite::memory:", 0);
        config.jwt = JwtConfig {
            secret: "integration-test-secret-at-least-32-chars".to_string(),
            expiration_minutes: 15,
            issuer: "dinepick".to_string(),
            audience: "dinepick-clients".to_string(),
        };
        config.default_random_limit = default_limit;
        config.max_random_limit = max_limit;

        let state = ServerState::with_pool(config, db.pool);
        let app = api::build_app(state.clone());
        Self { app, state }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None, token).await
    }

    pub async fn post(&self, uri: &str, body: Value, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body), token).await
    }

    /// Register `username` and return an access token
    pub async fn register_and_login(&self, username: &str) -> String {
        let (status, _) = self
            .post(
                "/api/users",
                json!({
                    "username": username,
                    "email": format!("{username}@test.com"),
                    "password": "test-password",
                }),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self
            .post(
                "/api/users/token",
                json!({ "username": username, "password": "test-password" }),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["access_token"].as_str().unwrap().to_string()
    }

    /// Create a restaurant through the API and return its id
    pub async fn create_restaurant(&self, token: &str, name: &str, lat: f64, lng: f64) -> i64 {
        let (status, body) = self
            .post(
                "/api/restaurants",
                json!({ "name": name, "address": "1 Main St", "lat": lat, "lng": lng }),
                Some(token),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["id"].as_i64().unwrap()
    }
}
