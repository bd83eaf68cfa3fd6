//! Scoped store transactions
//!
//! A [`UnitOfWork`] sees a consistent view of the store and makes its writes
//! visible only on [`UnitOfWork::commit`]. Dropping it without committing,
//! including on an early `?` return or a cancelled future, rolls back.

use std::fmt::Debug;

use async_trait::async_trait;

use super::offer::Offer;
use super::user::{User, UserFilter};
use super::DomainError;

/// Operations available inside one transaction
#[async_trait]
pub trait UnitOfWork: Send {
    /// Find the user matching `filter` within this transaction
    async fn find_user(&mut self, filter: &UserFilter) -> Result<Option<User>, DomainError>;

    /// Stage an offer insert or overwrite
    async fn save_offer(&mut self, offer: Offer) -> Result<Offer, DomainError>;

    /// Make every staged write durable and visible
    async fn commit(self: Box<Self>) -> Result<(), DomainError>;
}

/// Source of transactions for a store
#[async_trait]
pub trait TransactionManager: Send + Sync + Debug {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, DomainError>;
}
