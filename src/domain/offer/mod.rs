//! Offer domain
//!
//! Offers published by users, the creation request and the allow-list
//! mapping between them.

mod create;
mod entity;
mod mapping;
mod repository;

pub use create::{OfferCreate, MAX_TITLE_LENGTH};
pub use entity::{Offer, OfferId};
pub use mapping::merge_create_into_offer;
pub use repository::OfferRepository;

#[cfg(test)]
pub use repository::MockOfferRepository;
