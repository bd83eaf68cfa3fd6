//! Paging query parameters

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::domain::PagingDto;

use super::error::ApiError;

pub const DEFAULT_PAGE_NUMBER: i32 = 0;
pub const DEFAULT_PAGE_SIZE: i32 = 20;

/// `?page_number=&page_size=` with defaults for missing values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PagingQuery {
    pub page_number: i32,
    pub page_size: i32,
}

impl Default for PagingQuery {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl From<PagingQuery> for PagingDto {
    fn from(query: PagingQuery) -> Self {
        PagingDto::new(query.page_number, query.page_size)
    }
}

impl<S> FromRequestParts<S> for PagingQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PagingQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()).with_code("invalid_paging"))?;

        Ok(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};

    async fn extract(uri: &str) -> Result<PagingQuery, ApiError> {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        PagingQuery::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_defaults() {
        assert_eq!(extract("/offers").await.unwrap(), PagingQuery::default());
    }

    #[tokio::test]
    async fn test_explicit_values() {
        let query = extract("/offers?page_number=3&page_size=-1").await.unwrap();
        let paging = PagingDto::from(query);

        assert_eq!(paging.page_number(), 3);
        assert_eq!(paging.page_size(), -1);
    }

    #[tokio::test]
    async fn test_non_numeric_rejected() {
        let err = extract("/offers?page_size=ten").await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
