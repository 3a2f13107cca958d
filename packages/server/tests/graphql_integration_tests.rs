//! Integration tests for the GraphQL endpoint.
//!
//! The GraphQL endpoint sits behind the same bearer gate as the REST user
//! routes, and its resolvers share the REST layer's service and store.

mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_graphql_requires_token() {
    let app = TestApp::spawn().await;

    let (status, body) = app.graphql(None, "{ users { id name } }").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Missing or invalid token");
}

#[tokio::test]
async fn test_graphql_rejects_invalid_token() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .graphql(Some("not-a-real-token"), "{ users { id name } }")
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Token verification failed");
}

#[tokio::test]
async fn test_graphql_add_and_query_user() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice").await;

    let (status, body) = app
        .graphql(Some(&token), r#"mutation { addUser(id: 1, name: "Alice") }"#)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["addUser"], "Record Inserted");

    let (status, body) = app
        .graphql(Some(&token), "{ user(id: 1) { id name } }")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"], json!({"id": 1, "name": "Alice"}));
}

#[tokio::test]
async fn test_graphql_users_listing() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice").await;

    for (id, name) in [(1, "Alice"), (2, "Bob")] {
        let (status, _) = app
            .graphql(Some(&token), &format!(r#"mutation {{ addUser(id: {id}, name: "{name}") }}"#))
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = app.graphql(Some(&token), "{ users { id name } }").await;
    assert_eq!(
        body["data"]["users"],
        json!([{"id": 1, "name": "Alice"}, {"id": 2, "name": "Bob"}])
    );
}

#[tokio::test]
async fn test_graphql_update_and_delete() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice").await;

    app.graphql(Some(&token), r#"mutation { addUser(id: 1, name: "Alice") }"#).await;

    let (_, body) = app
        .graphql(Some(&token), r#"mutation { updateUser(id: 1, name: "Alicia") }"#)
        .await;
    assert_eq!(body["data"]["updateUser"], "Record Updated");

    let (_, body) = app
        .graphql(Some(&token), r#"mutation { deleteUser(id: 1) }"#)
        .await;
    assert_eq!(body["data"]["deleteUser"], "Record Deleted");

    // A deleted user surfaces the service's not-found message as a field error
    let (_, body) = app.graphql(Some(&token), "{ user(id: 1) { id name } }").await;
    assert_eq!(body["errors"][0]["message"], "NO USER FOUND");
}

#[tokio::test]
async fn test_graphql_delete_all_users() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice").await;

    app.graphql(Some(&token), r#"mutation { addUser(id: 1, name: "Alice") }"#).await;
    app.graphql(Some(&token), r#"mutation { addUser(id: 2, name: "Bob") }"#).await;

    let (_, body) = app
        .graphql(Some(&token), "mutation { deleteAllUsers }")
        .await;
    assert_eq!(body["data"]["deleteAllUsers"], "All Records Deleted");

    let (_, body) = app.graphql(Some(&token), "{ users { id } }").await;
    assert_eq!(body["data"]["users"], json!([]));
}

#[tokio::test]
async fn test_graphql_duplicate_id_field_error() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice").await;

    app.graphql(Some(&token), r#"mutation { addUser(id: 1, name: "Alice") }"#).await;

    let (status, body) = app
        .graphql(Some(&token), r#"mutation { addUser(id: 1, name: "Alice") }"#)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["errors"][0]["message"], "ID already taken");
}

#[tokio::test]
async fn test_rest_and_graphql_share_one_store() {
    let app = TestApp::spawn().await;
    let token = app.token_for("alice").await;

    // Write through REST, read through GraphQL
    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/user",
            Some(&token),
            Some(json!({"id": 9, "name": "Shared"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.graphql(Some(&token), "{ user(id: 9) { name } }").await;
    assert_eq!(body["data"]["user"]["name"], "Shared");
}
