//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use userhub_api::{AppState, build_router, build_state_with_repository};
use userhub_auth::jwt::{JwtDecoder, JwtEncoder};
use userhub_core::config::{AppConfig, Argon2Config, DatabaseBackend, ImageStorageMode};
use userhub_core::types::AccountId;
use userhub_database::MemoryAccountRepository;
use userhub_entity::account::Role;

/// Signing secret shared by the app under test and locally minted tokens.
pub const TEST_SECRET: &str = "integration-test-secret-0123456789";

/// Smallest PNG signature the image store recognises.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01\0\0\0\x01";

const BOUNDARY: &str = "userhub-test-boundary";

/// Configuration with an in-memory store and cheap password hashing.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.database.backend = DatabaseBackend::Memory;
    config.auth.jwt_secret = TEST_SECRET.to_string();
    config.auth.argon2 = Argon2Config {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    };
    config.storage.image_mode = ImageStorageMode::Inline;
    config
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for building custom routers in tests
    pub state: AppState,
    /// Application config
    pub config: AppConfig,
    encoder: JwtEncoder,
}

impl TestApp {
    /// Create a new test application with the default test config
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Create a test application from a custom config
    pub async fn with_config(config: AppConfig) -> Self {
        let repo = Arc::new(MemoryAccountRepository::new());
        let state = build_state_with_repository(config.clone(), repo)
            .await
            .expect("Failed to build app state");
        let router = build_router(state.clone());
        let encoder = JwtEncoder::new(&config.auth);

        Self {
            router,
            state,
            config,
            encoder,
        }
    }

    /// Mint a valid token for an arbitrary subject with `role`
    pub fn token_for(&self, role: &str) -> String {
        let role = Role::new(role).expect("valid role");
        self.encoder
            .issue(AccountId::new(), &role, None)
            .expect("Failed to issue token")
    }

    /// Mint a token that expired a minute ago
    pub fn expired_token(&self, role: &str) -> String {
        let role = Role::new(role).expect("valid role");
        self.encoder
            .issue_with_ttl(AccountId::new(), &role, None, chrono::Duration::minutes(-1))
            .expect("Failed to issue token")
    }

    /// Decoder matching the app's signing secret
    pub fn decoder(&self) -> JwtDecoder {
        JwtDecoder::new(&self.config.auth)
    }

    /// Register an account through the API and return its JSON representation
    pub async fn register(&self, username: &str, password: &str, region: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/register",
                Some(serde_json::json!({
                    "username": username,
                    "password": password,
                    "region": region,
                })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "register failed: {}",
            response.body
        );
        response.body["data"].clone()
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Make a multipart request to the test app
    pub async fn multipart(
        &self,
        method: &str,
        path: &str,
        parts: &[FormPart<'_>],
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(multipart_body(parts)))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a prepared request to `router`
    pub async fn send_to(router: Router, req: Request<Body>) -> TestResponse {
        let response = router.oneshot(req).await.expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        Self::send_to(self.router.clone(), req).await
    }
}

/// One part of a multipart form
pub enum FormPart<'a> {
    /// Plain text field
    Text(&'a str, &'a str),
    /// File field with its bytes
    File(&'a str, &'a [u8]),
}

fn multipart_body(parts: &[FormPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            FormPart::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            FormPart::File(name, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"upload.png\"\r\n\
                         Content-Type: image/png\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
