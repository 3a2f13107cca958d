//! Application setup and router construction.

use std::sync::Arc;

use axum::{
    extract::{Extension, Request},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domains::auth::JwtCodec;
use crate::server::graphql::{create_schema, GraphQLContext};
use crate::server::middleware::{require_bearer, track_http_metrics, Identity};
use crate::server::routes::{
    add_user, default_path_handler, delete_user, delete_users, get_user, get_users,
    graphql_handler, health_handler, issue_token, update_user,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub codec: Arc<JwtCodec>,
}

/// Middleware to create GraphQLContext per-request
async fn create_graphql_context(
    Extension(state): Extension<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    // Identity was published by the bearer gate running before this layer
    let identity = request.extensions().get::<Identity>().cloned();

    let context = GraphQLContext::new(state.db_pool.clone(), identity);
    request.extensions_mut().insert(context);

    next.run(request).await
}

/// Build the Axum application router
///
/// REST routes live under `/api/v1`; the GraphQL endpoint is mounted at
/// `/graphql`. The bearer gate guards the `/user*` routes and the GraphQL
/// endpoint alike: the upstream implementation left GraphQL ungated, which
/// is treated here as a bug rather than behavior to preserve.
pub fn build_app(
    pool: SqlitePool,
    codec: Arc<JwtCodec>,
    metrics_handle: PrometheusHandle,
) -> Router {
    // GraphQL schema (singleton)
    let schema = Arc::new(create_schema());

    let app_state = AppState { db_pool: pool, codec: codec.clone() };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    // Protected REST routes
    let gate_codec = codec.clone();
    let user_routes = Router::new()
        .route("/user", post(add_user))
        .route("/user/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/users", get(get_users).delete(delete_users))
        .route_layer(middleware::from_fn(move |req, next| {
            require_bearer(gate_codec.clone(), req, next)
        }));

    let api = Router::new()
        .route("/token/:user", get(issue_token))
        .route("/health", get(health_handler))
        .route("/*path", get(default_path_handler))
        .merge(user_routes);

    // GraphQL routes, gated like the REST user routes
    let graphql = Router::new().route("/graphql", post(graphql_handler));

    // GraphQL playground only in debug builds (development)
    #[cfg(debug_assertions)]
    let graphql = graphql.route("/graphql", get(crate::server::routes::graphql_playground));

    let gql_codec = codec.clone();
    let graphql = graphql
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(create_graphql_context))
        .layer(middleware::from_fn(move |req, next| {
            require_bearer(gql_codec.clone(), req, next)
        }));

    // Prometheus scrape endpoint
    let metrics = Router::new().route(
        "/metrics",
        get(move || {
            let handle = metrics_handle.clone();
            async move { handle.render() }
        }),
    );

    Router::new()
        .nest("/api/v1", api)
        .merge(graphql)
        .merge(metrics)
        .layer(middleware::from_fn(track_http_metrics))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State (schema for the GraphQL handler)
        .with_state(schema)
}
