//! User domain
//!
//! Accounts that publish offers: the entity, registration request,
//! validation rules and the repository trait.

mod create;
mod entity;
mod repository;
mod validation;

pub use create::UserCreate;
pub use entity::{User, UserId};
pub use repository::{UserFilter, UserRepository};
pub use validation::{
    password_violations, username_violations, validate_password, validate_username,
    MAX_USERNAME_LENGTH, MIN_USERNAME_LENGTH, USERNAME_PATTERN,
};

#[cfg(test)]
pub use repository::MockUserRepository;
