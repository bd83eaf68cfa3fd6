//! Domain layer - Core business rules and entities

pub mod error;
pub mod identifier;
pub mod offer;
pub mod paging;
pub mod transaction;
pub mod user;
pub mod validation;

pub use error::DomainError;
pub use identifier::{from_persisted, to_persisted, IdParseError};
pub use offer::{merge_create_into_offer, Offer, OfferCreate, OfferId, OfferRepository};
pub use paging::{Page, PageWindow, PagingDto};
pub use transaction::{TransactionManager, UnitOfWork};
pub use user::{User, UserCreate, UserFilter, UserId, UserRepository};
pub use validation::{is_empty, Constraint, ValidationError, Violation};
