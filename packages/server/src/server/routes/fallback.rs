use axum::extract::Path;
use axum::Json;
use tracing::warn;

use crate::domains::users::data::MessageResponse;

/// Catch-all for unmatched paths under the API prefix.
pub async fn default_path_handler(Path(full_path): Path<String>) -> Json<MessageResponse> {
    warn!(path = %full_path, "default path hit");
    Json(MessageResponse::new(format!("DEFAULT PATH HIT for /{full_path}")))
}
