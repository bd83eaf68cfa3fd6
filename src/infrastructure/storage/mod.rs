//! Storage infrastructure - store implementations

mod factory;
mod in_memory;
pub mod migrations;
mod postgres;

pub use factory::{StorageConfig, StorageFactory, StorageType, Stores};
pub use in_memory::InMemoryStore;
pub use migrations::{run_migrations, Migration, Migrator, PostgresMigrator};
pub use postgres::{PostgresConfig, PostgresStore};
