//! Offer entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::identifier::persisted_id;
use crate::domain::user::UserId;

persisted_id!(
    /// Offer identifier, assigned at creation and never changed
    OfferId
);

/// Something a user published.
///
/// `id` and `publisher` are fixed at construction; only the fields an
/// [`OfferCreate`](super::OfferCreate) carries have setters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    id: OfferId,
    publisher: UserId,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    price_cents: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Offer {
    /// Create an empty offer with a fresh identifier, published by `publisher`
    pub fn new(publisher: UserId) -> Self {
        let now = Utc::now();

        Self {
            id: OfferId::new(),
            publisher,
            title: String::new(),
            description: None,
            price_cents: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild an offer from stored state
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: OfferId,
        publisher: UserId,
        title: String,
        description: Option<String>,
        price_cents: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            publisher,
            title,
            description,
            price_cents,
            created_at,
            updated_at,
        }
    }

    // Getters

    pub fn id(&self) -> &OfferId {
        &self.id
    }

    pub fn publisher(&self) -> &UserId {
        &self.publisher
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price_cents(&self) -> i64 {
        self.price_cents
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
        self.touch();
    }

    pub fn set_price_cents(&mut self, price_cents: i64) {
        self.price_cents = price_cents;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_offer() {
        let publisher = UserId::new();
        let offer = Offer::new(publisher);

        assert_eq!(offer.publisher(), &publisher);
        assert_eq!(offer.title(), "");
        assert!(offer.description().is_none());
        assert_eq!(offer.price_cents(), 0);
    }

    #[test]
    fn test_offers_get_distinct_ids() {
        let publisher = UserId::new();
        assert_ne!(Offer::new(publisher).id(), Offer::new(publisher).id());
    }

    #[test]
    fn test_setters_touch_updated_at() {
        let mut offer = Offer::new(UserId::new());
        let original = offer.updated_at();

        std::thread::sleep(std::time::Duration::from_millis(10));
        offer.set_title("Bike");

        assert_eq!(offer.title(), "Bike");
        assert!(offer.updated_at() > original);
        assert_eq!(offer.created_at(), original);
    }

    #[test]
    fn test_serialization() {
        let mut offer = Offer::new(UserId::new());
        offer.set_title("Bike");
        offer.set_price_cents(1500);

        let json = serde_json::to_value(&offer).unwrap();
        assert_eq!(json["id"], offer.id().to_persisted());
        assert_eq!(json["publisher"], offer.publisher().to_persisted());
        assert_eq!(json["price_cents"], 1500);
        assert!(json.get("description").is_none());
    }
}
