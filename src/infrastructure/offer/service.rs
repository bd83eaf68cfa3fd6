//! Offer service - publishing and querying offers

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{
    merge_create_into_offer, DomainError, Offer, OfferCreate, OfferId, OfferRepository, Page,
    PagingDto, TransactionManager, UserFilter, UserId,
};

/// Offer service
#[derive(Clone)]
pub struct OfferService {
    transactions: Arc<dyn TransactionManager>,
    offers: Arc<dyn OfferRepository>,
}

impl OfferService {
    pub fn new(transactions: Arc<dyn TransactionManager>, offers: Arc<dyn OfferRepository>) -> Self {
        Self {
            transactions,
            offers,
        }
    }

    /// Publish a new offer on behalf of `publisher_id`.
    ///
    /// The publisher lookup, the enablement check and the write share one
    /// transaction. Any error before commit leaves no offer behind.
    /// Enablement is not re-checked at commit time, so a concurrent disable
    /// may still let one offer through.
    pub async fn create_offer(
        &self,
        request: OfferCreate,
        publisher_id: UserId,
    ) -> Result<Offer, DomainError> {
        let mut tx = self.transactions.begin().await?;

        let publisher = tx
            .find_user(&UserFilter::IdEquals(publisher_id))
            .await?
            .ok_or_else(|| DomainError::user_not_found(publisher_id))?;

        if !publisher.is_enabled() {
            debug!(publisher_id = %publisher_id, "Publisher is disabled");
            return Err(DomainError::user_not_enabled(publisher_id));
        }

        let mut offer = Offer::new(*publisher.id());
        merge_create_into_offer(&mut offer, &request);

        let offer = tx.save_offer(offer).await?;
        tx.commit().await?;

        info!(offer_id = %offer.id(), publisher_id = %publisher_id, "Offer created");
        Ok(offer)
    }

    pub async fn get(&self, id: &OfferId) -> Result<Offer, DomainError> {
        self.offers
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Offer '{}' not found", id)))
    }

    pub async fn list(&self, paging: &PagingDto) -> Result<Page<Offer>, DomainError> {
        self.offers.list(paging).await
    }

    /// Offers of one publisher, oldest first
    pub async fn list_by_publisher(
        &self,
        publisher_id: &UserId,
        paging: &PagingDto,
    ) -> Result<Page<Offer>, DomainError> {
        self.offers.list_by_publisher(publisher_id, paging).await
    }
}
