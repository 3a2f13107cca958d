//! User records: store adapter, shared service and transport types.

pub mod data;
pub mod models;
pub mod service;

pub use models::User;
pub use service::{UserError, UserService};
