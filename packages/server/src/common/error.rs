use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::domains::auth::AuthError;
use crate::domains::users::UserError;

/// HTTP-facing error: a status code plus a `{"detail": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self { status, detail: detail.into() }
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, detail)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            UserError::IdTaken | UserError::IdNotFound => {
                Self::new(StatusCode::BAD_REQUEST, err.to_string())
            }
            UserError::Database(e) => {
                tracing::error!(error = %e, "database failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "database error")
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidToken => Self::unauthorized("Token verification failed"),
            AuthError::KeyMaterial(e) => {
                tracing::error!(error = %e, "key material failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "token signing error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_error_status_mapping() {
        assert_eq!(ApiError::from(UserError::NotFound).status, StatusCode::NOT_FOUND);
        assert_eq!(ApiError::from(UserError::IdTaken).status, StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(UserError::IdNotFound).status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_user_error_detail_strings() {
        assert_eq!(ApiError::from(UserError::NotFound).detail, "NO USER FOUND");
        assert_eq!(ApiError::from(UserError::IdTaken).detail, "ID already taken");
        assert_eq!(ApiError::from(UserError::IdNotFound).detail, "ID not found");
    }

    #[test]
    fn test_invalid_token_maps_to_unauthorized() {
        let err = ApiError::from(AuthError::InvalidToken);
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.detail, "Token verification failed");
    }
}
