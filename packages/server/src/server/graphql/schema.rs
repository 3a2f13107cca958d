//! GraphQL schema definition.

use juniper::{EmptySubscription, FieldError, FieldResult, RootNode};
use tracing::info;

use super::context::GraphQLContext;
use crate::domains::users::data::UserData;
use crate::domains::users::UserError;

/// Convert a domain error to a juniper FieldError for thin resolvers
fn to_field_error(e: UserError) -> FieldError {
    FieldError::new(e.to_string(), juniper::Value::null())
}

pub struct Query;

#[juniper::graphql_object(context = GraphQLContext)]
impl Query {
    /// Get a user by id
    async fn user(ctx: &GraphQLContext, id: i32) -> FieldResult<Option<UserData>> {
        ctx.require_auth()?;

        info!(id, "user query called");
        let user = ctx.service().get_user(id).await.map_err(to_field_error)?;
        Ok(Some(UserData::from(user)))
    }

    /// Get all users
    async fn users(ctx: &GraphQLContext) -> FieldResult<Vec<UserData>> {
        ctx.require_auth()?;

        info!("users query called");
        let users = ctx.service().get_users().await.map_err(to_field_error)?;
        Ok(users.into_iter().map(UserData::from).collect())
    }
}

pub struct Mutation;

#[juniper::graphql_object(context = GraphQLContext)]
impl Mutation {
    /// Add a new user with the given id and name
    async fn add_user(ctx: &GraphQLContext, id: i32, name: String) -> FieldResult<String> {
        ctx.require_auth()?;

        info!(id, "addUser mutation called");
        let message = ctx.service().add_user(id, name).await.map_err(to_field_error)?;
        Ok(message.to_string())
    }

    /// Update the name of an existing user
    async fn update_user(ctx: &GraphQLContext, id: i32, name: String) -> FieldResult<String> {
        ctx.require_auth()?;

        info!(id, "updateUser mutation called");
        let message = ctx.service().update_user(id, name).await.map_err(to_field_error)?;
        Ok(message.to_string())
    }

    /// Delete a user by id
    async fn delete_user(ctx: &GraphQLContext, id: i32) -> FieldResult<String> {
        ctx.require_auth()?;

        info!(id, "deleteUser mutation called");
        let message = ctx.service().delete_user(id).await.map_err(to_field_error)?;
        Ok(message.to_string())
    }

    /// Delete all users
    async fn delete_all_users(ctx: &GraphQLContext) -> FieldResult<String> {
        ctx.require_auth()?;

        info!("deleteAllUsers mutation called");
        let message = ctx.service().delete_users().await.map_err(to_field_error)?;
        Ok(message.to_string())
    }
}

pub type Schema = RootNode<'static, Query, Mutation, EmptySubscription<GraphQLContext>>;

pub fn create_schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}
