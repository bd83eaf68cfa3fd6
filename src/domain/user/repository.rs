//! User repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{User, UserId};
use crate::domain::paging::{Page, PagingDto};
use crate::domain::DomainError;

/// Equality predicate for single-user lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFilter {
    IdEquals(UserId),
    UsernameEquals(String),
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        match self {
            Self::IdEquals(id) => user.id() == id,
            Self::UsernameEquals(username) => user.username() == username,
        }
    }
}

/// Repository trait for user storage
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find the user matching `filter`, if any
    async fn find_one(&self, filter: &UserFilter) -> Result<Option<User>, DomainError>;

    /// Insert a new user; usernames are unique
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Overwrite an existing user
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Users ordered by creation time
    async fn list(&self, paging: &PagingDto) -> Result<Page<User>, DomainError>;
}
