//! Migrate command - applies the PostgreSQL schema and exits

use anyhow::bail;
use tracing::info;

use crate::infrastructure::storage::{Migrator, PostgresMigrator, PostgresStore, StorageConfig};

pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let StorageConfig::Postgres(pg_config) = config.storage_config()? else {
        bail!("Migrations require the postgres storage backend (storage.backend = \"postgres\")");
    };

    let store = PostgresStore::connect(&pg_config).await?;
    let migrator = PostgresMigrator::new(store.pool().clone());

    apply(&migrator).await?;
    Ok(())
}

/// Runs pending migrations and reports the schema version they leave behind
async fn apply(migrator: &dyn Migrator) -> anyhow::Result<Option<i64>> {
    migrator.run().await?;
    let version = migrator.version().await?;

    match version {
        Some(version) => info!(version, "Migrations complete"),
        None => info!("Migrations complete, no schema version recorded"),
    }

    Ok(version)
}
