use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{debug, warn};

use crate::domains::auth::{Claims, JwtCodec};

/// Authenticated identity: the decoded claims of a verified bearer token.
///
/// Inserted into request extensions by the gate; request-scoped only.
#[derive(Clone, Debug)]
pub struct Identity(pub Claims);

/// Bearer-token gate in front of protected routes.
///
/// A missing or non-`Bearer` header is rejected before the codec is ever
/// invoked; a present-but-invalid token is rejected with a distinct detail
/// string but the same 401 classification.
pub async fn require_bearer(
    codec: Arc<JwtCodec>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(request.headers().get(AUTHORIZATION)) else {
        warn!("missing or malformed Authorization header");
        return unauthorized("Missing or invalid token");
    };

    match codec.verify(token) {
        Ok(claims) => {
            debug!("bearer token verified");
            request.extensions_mut().insert(Identity(claims));
            next.run(request).await
        }
        Err(_) => {
            warn!("bearer token verification failed");
            unauthorized("Token verification failed")
        }
    }
}

/// Extract the candidate token from an `Authorization: Bearer <token>` header.
fn bearer_token(header: Option<&HeaderValue>) -> Option<&str> {
    header?.to_str().ok()?.strip_prefix("Bearer ")
}

fn unauthorized(detail: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "detail": detail }))).into_response()
}
