use axum::extract::{Extension, Path};
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::common::ApiError;
use crate::domains::auth::{ClaimValue, Claims};
use crate::server::app::AppState;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// Issue a bearer token for the given subject.
///
/// Any non-empty path segment is accepted; it is echoed into the claims map
/// as both key and value. The endpoint itself is ungated.
pub async fn issue_token(
    Extension(state): Extension<AppState>,
    Path(user): Path<String>,
) -> Result<Json<TokenResponse>, ApiError> {
    let mut claims = Claims::new();
    claims.insert(user.clone(), ClaimValue::Text(user.clone()));

    let token = state.codec.issue(claims)?;
    info!(user = %user, "bearer token issued");

    Ok(Json(TokenResponse { access_token: token, token_type: "bearer" }))
}
