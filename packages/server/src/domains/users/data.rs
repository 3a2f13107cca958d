//! Transport-facing user types (REST request/response bodies, GraphQL object).

use serde::{Deserialize, Serialize};

use super::models::User;

/// Body for add and update requests. `description` is accepted but unused.
#[derive(Debug, Deserialize)]
pub struct UserWriteRequest {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Single-user response. `msg` is always serialized (null when absent).
#[derive(Debug, Serialize)]
pub struct UserFetchResponse {
    pub id: i32,
    pub name: String,
    pub msg: Option<String>,
}

impl From<User> for UserFetchResponse {
    fn from(user: User) -> Self {
        Self { id: user.id, name: user.name, msg: None }
    }
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserFetchResponse>,
}

/// Generic outcome message for write operations.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// GraphQL view of a user.
#[derive(Debug, Clone, juniper::GraphQLObject)]
pub struct UserData {
    pub id: i32,
    pub name: String,
}

impl From<User> for UserData {
    fn from(user: User) -> Self {
        Self { id: user.id, name: user.name }
    }
}
