//! HTTP request metrics.
//!
//! Captures all responses, including framework-level errors that occur
//! before a handler runs (404, 405, JSON parse failures).

use std::time::{Duration, Instant};

use axum::middleware::Next;
use axum::response::Response;
use metrics::{counter, histogram};

/// Record a counter and latency histogram for every request.
///
/// Applied as an outer layer so even unmatched paths are counted.
pub async fn track_http_metrics(
    request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    record_http_request(&method, &path, response.status().as_u16(), start.elapsed());

    response
}

/// Metric: `http_requests_total`, `http_request_duration_seconds`
/// Labels: `method`, `endpoint`, `status_code`
fn record_http_request(method: &str, path: &str, status_code: u16, duration: Duration) {
    // Normalize the endpoint to prevent label cardinality explosion
    let endpoint = normalize_endpoint(path);

    histogram!("http_request_duration_seconds",
        "method" => method.to_string(),
        "endpoint" => endpoint.clone()
    )
    .record(duration.as_secs_f64());

    counter!("http_requests_total",
        "method" => method.to_string(),
        "endpoint" => endpoint,
        "status_code" => status_code.to_string()
    )
    .increment(1);
}

/// Replace dynamic path segments (user ids, token subjects) with
/// placeholders so every label value is drawn from a fixed set.
fn normalize_endpoint(path: &str) -> String {
    match path {
        "/graphql" => "/graphql".to_string(),
        "/metrics" => "/metrics".to_string(),
        "/api/v1/health" => "/api/v1/health".to_string(),
        "/api/v1/user" => "/api/v1/user".to_string(),
        "/api/v1/users" => "/api/v1/users".to_string(),
        _ => normalize_dynamic_endpoint(path),
    }
}

fn normalize_dynamic_endpoint(path: &str) -> String {
    let parts: Vec<&str> = path.split('/').collect();

    // /api/v1/token/{user} and /api/v1/user/{id} → parts.len() == 5
    if parts.len() == 5 && parts[1] == "api" && parts[2] == "v1" {
        if parts[3] == "token" {
            return "/api/v1/token/{user}".to_string();
        }
        if parts[3] == "user" {
            return "/api/v1/user/{id}".to_string();
        }
    }

    // Unknown paths normalized to "/other" to bound cardinality
    "/other".to_string()
}
