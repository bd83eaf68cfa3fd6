//! Offer repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{Offer, OfferId};
use crate::domain::paging::{Page, PagingDto};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Repository trait for offer storage
#[cfg_attr(test, automock)]
#[async_trait]
pub trait OfferRepository: Send + Sync {
    /// Insert or overwrite an offer
    async fn save(&self, offer: Offer) -> Result<Offer, DomainError>;

    /// Get an offer by its ID
    async fn get(&self, id: &OfferId) -> Result<Option<Offer>, DomainError>;

    /// All offers ordered by creation time
    async fn list(&self, paging: &PagingDto) -> Result<Page<Offer>, DomainError>;

    /// Offers published by `publisher`, ordered by creation time
    async fn list_by_publisher(
        &self,
        publisher: &UserId,
        paging: &PagingDto,
    ) -> Result<Page<Offer>, DomainError>;
}
