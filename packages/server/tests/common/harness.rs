//! Router-level test harness.
//!
//! Builds the full application against an in-memory SQLite pool and drives
//! it through `tower::ServiceExt::oneshot`, so every request crosses the
//! real middleware stack (bearer gate included).

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use jsonwebtoken::Algorithm;
use metrics_exporter_prometheus::PrometheusBuilder;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use api_core::domains::auth::JwtCodec;
use api_core::server::build_app;

pub const TEST_PRIVATE_KEY: &str = include_str!("../fixtures/jwt_private.pem");
pub const TEST_PUBLIC_KEY: &str = include_str!("../fixtures/jwt_public.pem");
pub const OTHER_PRIVATE_KEY: &str = include_str!("../fixtures/other_private.pem");

pub struct TestApp {
    pub router: Router,
    pub codec: Arc<JwtCodec>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        sqlx::migrate!("./migrations").run(&pool).await.expect("migrations");

        let codec = Arc::new(
            JwtCodec::new(
                TEST_PRIVATE_KEY.as_bytes(),
                TEST_PUBLIC_KEY.as_bytes(),
                Algorithm::RS256,
                60,
            )
            .expect("test codec"),
        );

        // build_recorder avoids the one-global-recorder-per-process limit
        let metrics_handle = PrometheusBuilder::new().build_recorder().handle();

        let router = build_app(pool, codec.clone(), metrics_handle);
        Self { router, codec }
    }

    /// Send a request, returning status and parsed JSON body.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let (status, bytes) = self.raw_request(method, uri, token, body).await;
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON response body")
        };
        (status, json)
    }

    /// Send a request, returning status and raw body bytes.
    pub async fn raw_request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        };

        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body")
            .to_vec();
        (status, bytes)
    }

    /// Obtain a bearer token through the issuance endpoint.
    pub async fn token_for(&self, user: &str) -> String {
        let (status, body) = self
            .request(Method::GET, &format!("/api/v1/token/{user}"), None, None)
            .await;
        assert_eq!(status, StatusCode::OK);
        body["access_token"].as_str().expect("access_token").to_string()
    }

    /// Execute a GraphQL operation with an optional bearer token.
    pub async fn graphql(
        &self,
        token: Option<&str>,
        query: &str,
    ) -> (StatusCode, serde_json::Value) {
        self.request(
            Method::POST,
            "/graphql",
            token,
            Some(serde_json::json!({ "query": query })),
        )
        .await
    }
}
