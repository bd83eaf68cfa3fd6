//! API layer - HTTP endpoints and middleware

pub mod auth;
pub mod health;
pub mod middleware;
pub mod offers;
pub mod router;
pub mod state;
pub mod types;
pub mod users;

pub use middleware::RequireUserId;
pub use router::create_router;
pub use state::AppState;
