//! Mapping from creation requests onto offers

use super::create::OfferCreate;
use super::entity::Offer;

/// Copy every field of `source` onto `target`.
///
/// Identifier and publisher are never written. The destructuring is
/// exhaustive so a new request field fails to compile until it is mapped.
pub fn merge_create_into_offer(target: &mut Offer, source: &OfferCreate) {
    let OfferCreate {
        title,
        description,
        price_cents,
    } = source;

    target.set_title(title.clone());
    target.set_description(description.clone());
    target.set_price_cents(*price_cents);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserId;

    #[test]
    fn test_merge_copies_request_fields() {
        let publisher = UserId::new();
        let mut offer = Offer::new(publisher);
        let id = *offer.id();

        let request = OfferCreate::new("Desk", 4_200).with_description("Oak");
        merge_create_into_offer(&mut offer, &request);

        assert_eq!(offer.title(), "Desk");
        assert_eq!(offer.description(), Some("Oak"));
        assert_eq!(offer.price_cents(), 4_200);
        assert_eq!(offer.id(), &id);
        assert_eq!(offer.publisher(), &publisher);
    }

    #[test]
    fn test_merge_overwrites_previous_values() {
        let mut offer = Offer::new(UserId::new());
        merge_create_into_offer(&mut offer, &OfferCreate::new("First", 1).with_description("d"));
        merge_create_into_offer(&mut offer, &OfferCreate::new("Second", 2));

        assert_eq!(offer.title(), "Second");
        assert_eq!(offer.description(), None);
        assert_eq!(offer.price_cents(), 2);
    }

    #[test]
    fn test_merge_ignores_smuggled_fields() {
        let publisher = UserId::new();
        let mut offer = Offer::new(publisher);
        let id = *offer.id();

        let request: OfferCreate = serde_json::from_value(serde_json::json!({
            "title": "Chair",
            "id": UserId::new().to_persisted(),
            "publisher": UserId::new().to_persisted(),
        }))
        .unwrap();

        merge_create_into_offer(&mut offer, &request);

        assert_eq!(offer.id(), &id);
        assert_eq!(offer.publisher(), &publisher);
        assert_eq!(offer.title(), "Chair");
    }
}
