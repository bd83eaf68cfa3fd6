//! Offer endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};

use crate::api::middleware::RequireUserId;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, PagingQuery};
use crate::domain::{DomainError, Offer, OfferCreate, OfferId, Page, PagingDto, UserId};

pub fn create_offers_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_offers).post(create_offer))
        .route("/{id}", get(get_offer))
}

/// POST /offers
///
/// Publishes an offer for the authenticated user. The body is validated
/// before the service runs.
pub async fn create_offer(
    State(state): State<AppState>,
    RequireUserId(publisher_id): RequireUserId,
    Json(request): Json<OfferCreate>,
) -> Result<(StatusCode, Json<Offer>), ApiError> {
    request.validate().map_err(DomainError::from)?;

    let offer = state
        .offer_service
        .create_offer(request, publisher_id)
        .await?;

    Ok((StatusCode::CREATED, Json(offer)))
}

/// GET /offers
pub async fn list_offers(
    State(state): State<AppState>,
    paging: PagingQuery,
) -> Result<Json<Page<Offer>>, ApiError> {
    let page = state.offer_service.list(&PagingDto::from(paging)).await?;
    Ok(Json(page))
}

/// GET /offers/{id}
pub async fn get_offer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Offer>, ApiError> {
    let id = OfferId::parse(&id)?;
    let offer = state.offer_service.get(&id).await?;

    Ok(Json(offer))
}

/// GET /users/{id}/offers
pub async fn list_publisher_offers(
    State(state): State<AppState>,
    Path(id): Path<String>,
    paging: PagingQuery,
) -> Result<Json<Page<Offer>>, ApiError> {
    let publisher_id = UserId::parse(&id)?;
    let page = state
        .offer_service
        .list_by_publisher(&publisher_id, &PagingDto::from(paging))
        .await?;

    Ok(Json(page))
}
