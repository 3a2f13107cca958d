// User Directory API
//
// A small CRUD API exposing user records over REST and GraphQL, guarded by
// JWT bearer authentication. Both presentation layers delegate to one shared
// service over a single-table relational store.

pub mod common;
pub mod config;
pub mod domains;
pub mod server;

pub use config::*;
