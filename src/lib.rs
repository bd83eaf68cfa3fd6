//! Offer Service
//!
//! Registered users publish offers. Publishing checks that the publisher
//! exists and is enabled and stores the offer, all inside one store
//! transaction. Users, offers and the HTTP surface around them are backed by
//! either an in-memory store or PostgreSQL.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::{info, warn};

use api::state::AppState;
use infrastructure::auth::{JwtConfig, JwtService};
use infrastructure::storage::StorageFactory;
use infrastructure::user::Argon2Hasher;

/// Create the application state from configuration
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_config = config.storage_config()?;
    info!(backend = ?storage_config.storage_type(), "Initializing storage");

    let stores = StorageFactory::create(&storage_config).await?;
    let jwt_service = Arc::new(create_jwt_service(config));

    Ok(AppState::new(stores, Arc::new(Argon2Hasher::new()), jwt_service)
        .with_admin_key(resolve_admin_key(config)))
}

/// Admin key from configuration, then `ADMIN_KEY`. Blank values count as unset.
fn resolve_admin_key(config: &AppConfig) -> Option<String> {
    let key = config
        .auth
        .admin_key
        .clone()
        .or_else(|| std::env::var("ADMIN_KEY").ok())
        .filter(|key| !key.trim().is_empty());

    if key.is_none() {
        warn!("No admin key configured. Account administration routes will reject every request.");
    }

    key
}

/// JWT service from the configured secret, then `JWT_SECRET`, then a random
/// per-process secret
fn create_jwt_service(config: &AppConfig) -> JwtService {
    let secret = config
        .auth
        .jwt_secret
        .clone()
        .or_else(|| std::env::var("JWT_SECRET").ok())
        .unwrap_or_else(|| {
            warn!(
                "No JWT secret configured. Generating a random secret; \
                issued tokens will not survive a restart."
            );
            generate_random_secret()
        });

    JwtService::new(JwtConfig::new(
        secret,
        u64::from(config.auth.jwt_expiration_hours),
    ))
}

fn generate_random_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OfferCreate, UserCreate};

    #[tokio::test]
    async fn test_create_app_state_in_memory() {
        let state = create_app_state(&AppConfig::default()).await.unwrap();

        let user = state
            .user_service
            .register(UserCreate::new("alice", "password123"))
            .await
            .unwrap();
        let offer = state
            .offer_service
            .create_offer(OfferCreate::new("Lamp", 900), *user.id())
            .await
            .unwrap();

        assert_eq!(offer.publisher(), user.id());
    }

    #[test]
    fn test_configured_jwt_secret() {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = Some("configured-secret".to_string());
        config.auth.jwt_expiration_hours = 2;

        let service = create_jwt_service(&config);
        assert_eq!(service.expiration_hours(), 2);

        let verifier = JwtService::new(JwtConfig::new("configured-secret", 2));
        let token = service.generate(&crate::domain::User::new("alice", "h")).unwrap();
        assert!(verifier.validate(&token).is_ok());
    }

    #[test]
    fn test_blank_admin_key_is_unset() {
        let mut config = AppConfig::default();
        config.auth.admin_key = Some("admin-secret".to_string());
        assert_eq!(resolve_admin_key(&config).as_deref(), Some("admin-secret"));

        config.auth.admin_key = Some("   ".to_string());
        assert!(resolve_admin_key(&config).is_none());
    }

    #[test]
    fn test_random_secret() {
        let secret = generate_random_secret();
        assert_eq!(secret.len(), 64);
        assert_ne!(secret, generate_random_secret());
    }
}
