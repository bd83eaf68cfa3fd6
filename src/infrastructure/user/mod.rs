//! User infrastructure module
//!
//! Password hashing with Argon2 and the user service.

mod password;
mod service;

pub use password::{Argon2Hasher, PasswordHasher};
pub use service::UserService;
