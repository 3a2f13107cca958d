// HTTP middleware
pub mod jwt_auth;
pub mod metrics;

pub use jwt_auth::*;
pub use metrics::*;
