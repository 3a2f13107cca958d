// HTTP routes
pub mod auth;
pub mod fallback;
pub mod graphql;
pub mod health;
pub mod users;

pub use auth::*;
pub use fallback::*;
pub use graphql::*;
pub use health::*;
pub use users::*;
