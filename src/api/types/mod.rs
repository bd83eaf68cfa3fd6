//! API request and response types

pub mod error;
pub mod json;
pub mod paging;

pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::Json;
pub use paging::PagingQuery;
