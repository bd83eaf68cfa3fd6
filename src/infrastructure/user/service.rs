//! User service for registration, authentication and enablement

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{
    DomainError, Page, PagingDto, User, UserCreate, UserFilter, UserId, UserRepository,
};

use super::password::PasswordHasher;

/// User service for registration and account management
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    /// Register a new, enabled user
    pub async fn register(&self, request: UserCreate) -> Result<User, DomainError> {
        debug!(request = %request, "Registering user");
        request.validate()?;

        let username = request.username.unwrap_or_default();
        let password = request.password.unwrap_or_default();

        let existing = self
            .repository
            .find_one(&UserFilter::UsernameEquals(username.clone()))
            .await?;

        if existing.is_some() {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                username
            )));
        }

        let password_hash = self.hasher.hash(&password)?;
        let user = self.repository.create(User::new(username, password_hash)).await?;

        info!(user_id = %user.id(), username = %user.username(), "User registered");
        Ok(user)
    }

    /// Check credentials. Unknown users, wrong passwords and disabled
    /// accounts all yield `None`.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let Some(user) = self
            .repository
            .find_one(&UserFilter::UsernameEquals(username.to_string()))
            .await?
        else {
            return Ok(None);
        };

        if !user.is_enabled() {
            debug!(user_id = %user.id(), "Rejected login for disabled user");
            return Ok(None);
        }

        if !self.hasher.verify(password, user.password_hash()) {
            return Ok(None);
        }

        Ok(Some(user))
    }

    pub async fn get(&self, id: &UserId) -> Result<User, DomainError> {
        self.repository
            .find_one(&UserFilter::IdEquals(*id))
            .await?
            .ok_or_else(|| DomainError::user_not_found(*id))
    }

    pub async fn list(&self, paging: &PagingDto) -> Result<Page<User>, DomainError> {
        self.repository.list(paging).await
    }

    /// Enable or disable a user
    pub async fn set_enabled(&self, id: &UserId, enabled: bool) -> Result<User, DomainError> {
        let mut user = self.get(id).await?;
        user.set_enabled(enabled);

        let user = self.repository.update(&user).await?;
        info!(user_id = %user.id(), enabled, "User enablement changed");

        Ok(user)
    }
}
