//! Storage factory for runtime backend selection

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, OfferRepository, TransactionManager, UserRepository};

use super::in_memory::InMemoryStore;
use super::migrations::run_migrations;
use super::postgres::{PostgresConfig, PostgresStore};

/// Supported storage types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    InMemory,
    Postgres(PostgresConfig),
}

impl StorageConfig {
    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// Store handles shared by the services, all backed by one store
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserRepository>,
    pub offers: Arc<dyn OfferRepository>,
    pub transactions: Arc<dyn TransactionManager>,
}

impl Stores {
    /// Every handle backed by the same in-memory store
    pub fn in_memory(store: InMemoryStore) -> Self {
        let store = Arc::new(store);

        Self {
            users: store.clone(),
            offers: store.clone(),
            transactions: store,
        }
    }

    pub fn postgres(store: PostgresStore) -> Self {
        let store = Arc::new(store);

        Self {
            users: store.clone(),
            offers: store.clone(),
            transactions: store,
        }
    }
}

/// Factory for creating store instances
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates the stores described by `config`. PostgreSQL schemas are
    /// migrated before the stores are returned.
    pub async fn create(config: &StorageConfig) -> Result<Stores, DomainError> {
        match config {
            StorageConfig::InMemory => {
                info!("Using in-memory storage");
                Ok(Stores::in_memory(InMemoryStore::new()))
            }
            StorageConfig::Postgres(pg_config) => {
                info!("Connecting to PostgreSQL");
                let store = PostgresStore::connect(pg_config).await?;
                run_migrations(store.pool()).await?;
                info!("PostgreSQL connection established");

                Ok(Stores::postgres(store))
            }
        }
    }
}
