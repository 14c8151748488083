//! Test harness: the full router over an in-memory store
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use restaurant_server::api::build_app;
use restaurant_server::auth::{JwtConfig, JwtService};
use restaurant_server::db::DbService;
use restaurant_server::{Config, ServerState};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const SECRET: &str = "integration-test-secret-at-least-32-chars";

pub struct TestApp {
    pub state: ServerState,
    app: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let jwt_config = JwtConfig::with_secret(SECRET);
        let config = Config::with_jwt(jwt_config.clone());
        let db = DbService::in_memory().await.expect("in-memory database");
        let jwt = Arc::new(JwtService::with_config(jwt_config));
        let state = ServerState::new(config, db, jwt);
        let app = build_app(&state);
        Self { state, app }
    }

    /// Token for a user whose id is `<role>-1`
    pub fn token(&self, role: &str) -> String {
        self.state
            .jwt_service
            .generate_token(&format!("{role}-1"), &format!("{role} tester"), role)
            .expect("token")
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");
        self.send(request).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None, None).await
    }

    /// Create a restaurant as admin and return its `data`
    pub async fn create_restaurant(&self, name: &str, province: &str, postalcode: &str) -> Value {
        let admin = self.token("admin");
        let (status, body) = self
            .request(
                Method::POST,
                "/api/v1/restaurants",
                Some(&admin),
                Some(restaurant_body(name, province, postalcode)),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"].clone()
    }
}

pub fn restaurant_body(name: &str, province: &str, postalcode: &str) -> Value {
    json!({
        "name": name,
        "foodtype": "Thai",
        "address": "99 Charoen Krung Rd",
        "province": province,
        "postalcode": postalcode,
        "tel": "021234567",
        "picture": "https://example.com/restaurant.jpg"
    })
}

pub fn id_of(data: &Value) -> i64 {
    data["id"].as_i64().expect("numeric id")
}
