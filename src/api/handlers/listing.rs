use axum::{extract::{Path, State}, response::IntoResponse, Json};
use crate::api::dtos::requests::CreateListingRequest;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::listing::Listing;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

pub async fn list_listings(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let listings = state.listing_repo.list().await?;
    Ok(Json(listings))
}

pub async fn create_listing(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateListingRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.price <= 0 {
        return Err(AppError::Validation("Nightly price must be positive".into()));
    }
    let listing = Listing::new(user.id, payload.title, payload.location, payload.price);
    let created = state.listing_repo.create(&listing).await?;
    info!("Created listing: {} at {}/night", created.id, created.price);
    Ok(Json(created))
}

pub async fn get_listing(
    State(state): State<Arc<AppState>>,
    Path(listing_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let listing = state.listing_repo.find_by_id(&listing_id).await?
        .ok_or(AppError::NotFound("Listing not found".into()))?;
    Ok(Json(listing))
}
