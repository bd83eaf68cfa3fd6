//! Offer infrastructure module

mod service;

pub use service::OfferService;
