//! User endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::RequireAdmin;
use crate::api::offers;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, PagingQuery};
use crate::domain::{Page, PagingDto, User, UserCreate, UserId};

pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(register_user))
        .route("/{id}", get(get_user))
        .route("/{id}/enabled", put(set_enabled))
        .route("/{id}/offers", get(offers::list_publisher_offers))
}

/// User as exposed over the API, without the password hash
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub enabled: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_persisted(),
            username: user.username().to_string(),
            enabled: user.is_enabled(),
            created_at: user.created_at().to_rfc3339(),
            updated_at: user.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SetEnabledRequest {
    pub enabled: bool,
}

/// POST /users
pub async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<UserCreate>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state.user_service.register(request).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    paging: PagingQuery,
) -> Result<Json<Page<UserResponse>>, ApiError> {
    let page = state.user_service.list(&PagingDto::from(paging)).await?;
    Ok(Json(page.map(|user| UserResponse::from(&user))))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = UserId::parse(&id)?;
    let user = state.user_service.get(&id).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// PUT /users/{id}/enabled
///
/// Requires the admin key.
pub async fn set_enabled(
    State(state): State<AppState>,
    RequireAdmin: RequireAdmin,
    Path(id): Path<String>,
    Json(request): Json<SetEnabledRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = UserId::parse(&id)?;
    let user = state.user_service.set_enabled(&id, request.enabled).await?;

    Ok(Json(UserResponse::from(&user)))
}
