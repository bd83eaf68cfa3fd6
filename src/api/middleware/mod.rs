//! API middleware components

pub mod admin_auth;
pub mod logging;
pub mod user_auth;

pub use admin_auth::{RequireAdmin, ADMIN_KEY_HEADER};
pub use logging::{logging_middleware, REQUEST_ID_HEADER};
pub use user_auth::RequireUserId;
