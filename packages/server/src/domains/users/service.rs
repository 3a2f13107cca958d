use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{info, warn};

use super::models::User;

/// Domain failures for user operations.
///
/// Display strings double as the HTTP `detail` payloads, so both
/// presentation layers report identical messages.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("NO USER FOUND")]
    NotFound,

    #[error("ID already taken")]
    IdTaken,

    #[error("ID not found")]
    IdNotFound,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// The single user-facing service, shared by the REST handlers and the
/// GraphQL resolvers.
#[derive(Clone)]
pub struct UserService {
    pool: SqlitePool,
}

impl UserService {
    pub fn new(pool: &SqlitePool) -> Self {
        Self { pool: pool.clone() }
    }

    /// Fetch a user by id.
    pub async fn get_user(&self, id: i32) -> Result<User, UserError> {
        info!(id, "fetching user");
        match User::find_by_id(id, &self.pool).await? {
            Some(user) => Ok(user),
            None => {
                warn!(id, "user not found");
                Err(UserError::NotFound)
            }
        }
    }

    /// Fetch all users.
    pub async fn get_users(&self) -> Result<Vec<User>, UserError> {
        info!("fetching all users");
        Ok(User::find_all(&self.pool).await?)
    }

    /// Add a user, rejecting an id that is already live.
    ///
    /// Lookup-then-insert rather than relying on a store constraint, so a
    /// duplicate id surfaces as a domain error.
    pub async fn add_user(&self, id: i32, name: String) -> Result<&'static str, UserError> {
        info!(id, "adding user");
        if User::find_by_id(id, &self.pool).await?.is_some() {
            warn!(id, "id already exists");
            return Err(UserError::IdTaken);
        }
        User { id, name }.insert(&self.pool).await?;
        info!(id, "user added");
        Ok("Record Inserted")
    }

    /// Change an existing user's name.
    pub async fn update_user(&self, id: i32, name: String) -> Result<&'static str, UserError> {
        info!(id, "updating user");
        let affected = User::update_name(id, &name, &self.pool).await?;
        if affected == 0 {
            warn!(id, "id not found for update");
            return Err(UserError::IdNotFound);
        }
        info!(id, "user updated");
        Ok("Record Updated")
    }

    /// Delete a single user.
    pub async fn delete_user(&self, id: i32) -> Result<&'static str, UserError> {
        info!(id, "deleting user");
        let affected = User::delete(id, &self.pool).await?;
        if affected == 0 {
            warn!(id, "id not found for deletion");
            return Err(UserError::IdNotFound);
        }
        info!(id, "user deleted");
        Ok("Record Deleted")
    }

    /// Delete every user record.
    pub async fn delete_users(&self) -> Result<&'static str, UserError> {
        info!("deleting all users");
        let affected = User::delete_all(&self.pool).await?;
        info!(affected, "all user records deleted");
        Ok("All Records Deleted")
    }
}
