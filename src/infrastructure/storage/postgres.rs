//! PostgreSQL store implementation with connection pooling
//!
//! Identifiers are stored as their canonical text form and converted back
//! through [`crate::domain::identifier`] when rows are read.

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{PgExecutor, Postgres, Row, Transaction};
use tracing::debug;

use crate::domain::{
    DomainError, Offer, OfferId, OfferRepository, Page, PageWindow, PagingDto,
    TransactionManager, UnitOfWork, User, UserFilter, UserId, UserRepository,
};

/// PostgreSQL connection configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/offer_service".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }
}

/// PostgreSQL-backed store for users and offers
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool
    pub async fn connect(config: &PostgresConfig) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

const USER_COLUMNS: &str = "id, username, password_hash, enabled, created_at, updated_at";
const OFFER_COLUMNS: &str =
    "id, publisher_id, title, description, price_cents, created_at, updated_at";

#[async_trait]
impl UserRepository for PostgresStore {
    async fn find_one(&self, filter: &UserFilter) -> Result<Option<User>, DomainError> {
        fetch_user(&self.pool, filter).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, password_hash, enabled, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id().to_persisted())
        .bind(user.username())
        .bind(user.password_hash())
        .bind(user.is_enabled())
        .bind(user.created_at())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::conflict(format!("Username '{}' already exists", user.username()))
            } else {
                DomainError::storage(format!("Failed to create user: {}", e))
            }
        })?;

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = $2, password_hash = $3, enabled = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(user.id().to_persisted())
        .bind(user.username())
        .bind(user.password_hash())
        .bind(user.is_enabled())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::conflict(format!("Username '{}' already exists", user.username()))
            } else {
                DomainError::storage(format!("Failed to update user: {}", e))
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::user_not_found(*user.id()));
        }

        Ok(user.clone())
    }

    async fn list(&self, paging: &PagingDto) -> Result<Page<User>, DomainError> {
        let (limit, offset) = limit_offset(paging.window());

        let rows = sqlx::query(&format!(
            "SELECT {} FROM users ORDER BY created_at, id LIMIT $1 OFFSET $2",
            USER_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count users: {}", e)))?;

        let users = rows.iter().map(row_to_user).collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(users, paging, total_to_u64(total)))
    }
}

#[async_trait]
impl OfferRepository for PostgresStore {
    async fn save(&self, offer: Offer) -> Result<Offer, DomainError> {
        upsert_offer(&self.pool, &offer).await?;
        Ok(offer)
    }

    async fn get(&self, id: &OfferId) -> Result<Option<Offer>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM offers WHERE id = $1", OFFER_COLUMNS))
            .bind(id.to_persisted())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get offer: {}", e)))?;

        row.as_ref().map(row_to_offer).transpose()
    }

    async fn list(&self, paging: &PagingDto) -> Result<Page<Offer>, DomainError> {
        let (limit, offset) = limit_offset(paging.window());

        let rows = sqlx::query(&format!(
            "SELECT {} FROM offers ORDER BY created_at, id LIMIT $1 OFFSET $2",
            OFFER_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list offers: {}", e)))?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM offers")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count offers: {}", e)))?;

        let offers = rows.iter().map(row_to_offer).collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(offers, paging, total_to_u64(total)))
    }

    async fn list_by_publisher(
        &self,
        publisher: &UserId,
        paging: &PagingDto,
    ) -> Result<Page<Offer>, DomainError> {
        let (limit, offset) = limit_offset(paging.window());
        let publisher_id = publisher.to_persisted();

        let rows = sqlx::query(&format!(
            "SELECT {} FROM offers WHERE publisher_id = $1 \
             ORDER BY created_at, id LIMIT $2 OFFSET $3",
            OFFER_COLUMNS
        ))
        .bind(&publisher_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list offers: {}", e)))?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM offers WHERE publisher_id = $1")
            .bind(&publisher_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count offers: {}", e)))?;

        let offers = rows.iter().map(row_to_offer).collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(offers, paging, total_to_u64(total)))
    }
}

#[async_trait]
impl TransactionManager for PostgresStore {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, DomainError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        debug!("PostgreSQL transaction started");
        Ok(Box::new(PostgresUnitOfWork { tx }))
    }
}

/// Wraps a sqlx transaction, which rolls back when dropped uncommitted
struct PostgresUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl UnitOfWork for PostgresUnitOfWork {
    async fn find_user(&mut self, filter: &UserFilter) -> Result<Option<User>, DomainError> {
        fetch_user(&mut *self.tx, filter).await
    }

    async fn save_offer(&mut self, offer: Offer) -> Result<Offer, DomainError> {
        upsert_offer(&mut *self.tx, &offer).await?;
        Ok(offer)
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        self.tx
            .commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit transaction: {}", e)))
    }
}

async fn fetch_user<'e, E>(executor: E, filter: &UserFilter) -> Result<Option<User>, DomainError>
where
    E: PgExecutor<'e>,
{
    let (column, value) = match filter {
        UserFilter::IdEquals(id) => ("id", id.to_persisted()),
        UserFilter::UsernameEquals(username) => ("username", username.clone()),
    };

    let row = sqlx::query(&format!(
        "SELECT {} FROM users WHERE {} = $1",
        USER_COLUMNS, column
    ))
    .bind(value)
    .fetch_optional(executor)
    .await
    .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

    row.as_ref().map(row_to_user).transpose()
}

async fn upsert_offer<'e, E>(executor: E, offer: &Offer) -> Result<(), DomainError>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO offers (id, publisher_id, title, description, price_cents,
                            created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (id) DO UPDATE
        SET title = EXCLUDED.title,
            description = EXCLUDED.description,
            price_cents = EXCLUDED.price_cents,
            updated_at = EXCLUDED.updated_at
        "#,
    )
    .bind(offer.id().to_persisted())
    .bind(offer.publisher().to_persisted())
    .bind(offer.title())
    .bind(offer.description())
    .bind(offer.price_cents())
    .bind(offer.created_at())
    .bind(offer.updated_at())
    .execute(executor)
    .await
    .map_err(|e| DomainError::storage(format!("Failed to save offer: {}", e)))?;

    Ok(())
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let id: String = column(row, "id")?;
    let created_at: DateTime<Utc> = column(row, "created_at")?;
    let updated_at: DateTime<Utc> = column(row, "updated_at")?;

    let id = UserId::parse(&id)
        .map_err(|e| DomainError::storage(format!("Invalid user ID in database: {}", e)))?;

    Ok(User::restore(
        id,
        column(row, "username")?,
        column(row, "password_hash")?,
        column(row, "enabled")?,
        created_at,
        updated_at,
    ))
}

fn row_to_offer(row: &PgRow) -> Result<Offer, DomainError> {
    let id: String = column(row, "id")?;
    let publisher_id: String = column(row, "publisher_id")?;

    let id = OfferId::parse(&id)
        .map_err(|e| DomainError::storage(format!("Invalid offer ID in database: {}", e)))?;
    let publisher = UserId::parse(&publisher_id)
        .map_err(|e| DomainError::storage(format!("Invalid publisher ID in database: {}", e)))?;

    Ok(Offer::restore(
        id,
        publisher,
        column(row, "title")?,
        column(row, "description")?,
        column(row, "price_cents")?,
        column(row, "created_at")?,
        column(row, "updated_at")?,
    ))
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::storage(format!("Failed to read column '{}': {}", name, e)))
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

fn limit_offset(window: PageWindow) -> (i64, i64) {
    (
        i64::try_from(window.limit).unwrap_or(i64::MAX),
        i64::try_from(window.offset).unwrap_or(i64::MAX),
    )
}

fn total_to_u64(total: i64) -> u64 {
    u64::try_from(total).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = PostgresConfig::new("postgres://db/offers").with_max_connections(4);

        assert_eq!(config.url, "postgres://db/offers");
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.min_connections, 1);
    }

    #[test]
    fn test_limit_offset() {
        assert_eq!(limit_offset(PagingDto::new(3, 20).window()), (20, 60));
        assert_eq!(limit_offset(PagingDto::new(-1, -1).window()), (0, 0));
        assert_eq!(
            limit_offset(PageWindow {
                offset: u64::MAX,
                limit: 1
            }),
            (1, i64::MAX)
        );
    }

    #[test]
    fn test_total_to_u64() {
        assert_eq!(total_to_u64(12), 12);
        assert_eq!(total_to_u64(-1), 0);
    }
}
