use sqlx::SqlitePool;

use juniper::{FieldError, FieldResult};

use crate::domains::users::UserService;
use crate::server::middleware::Identity;

/// GraphQL request context
///
/// Shared pool plus the per-request identity published by the bearer gate.
#[derive(Clone)]
pub struct GraphQLContext {
    pub db_pool: SqlitePool,
    pub identity: Option<Identity>,
}

impl juniper::Context for GraphQLContext {}

impl GraphQLContext {
    pub fn new(db_pool: SqlitePool, identity: Option<Identity>) -> Self {
        Self { db_pool, identity }
    }

    pub fn service(&self) -> UserService {
        UserService::new(&self.db_pool)
    }

    /// Require an authenticated identity.
    ///
    /// The bearer gate already guards the endpoint; this keeps resolvers
    /// safe if the schema is ever executed outside the gated router.
    pub fn require_auth(&self) -> FieldResult<&Identity> {
        self.identity
            .as_ref()
            .ok_or_else(|| FieldError::new("Authentication required", juniper::Value::null()))
    }
}
