//! Listings endpoints
//!
//! Creation, scans, deletes and updates are open; the single-listing and
//! listings-by-owner reads require a session but enforce no ownership.
//! That asymmetry is part of the contract, not an oversight to fix here.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{Map, Value};

use crate::api::parse_object_id;
use crate::domain::{DeleteResponse, InsertedResponse, ListingUpdate, UpdateResponse};
use crate::error::Result;
use crate::repository::listing::ListingRepository;
use crate::middleware::SessionUser;
use crate::state::HasMarketplace;

/// POST /addService
pub async fn create<S: HasMarketplace>(
    State(state): State<S>,
    Json(listing): Json<Map<String, Value>>,
) -> Result<Json<InsertedResponse>> {
    let result = state.listings().create(listing).await?;
    Ok(Json(result))
}

/// GET /services
pub async fn list<S: HasMarketplace>(State(state): State<S>) -> Result<Json<Vec<Value>>> {
    let listings = state.listings().list_all().await?;
    Ok(Json(listings))
}

/// GET /service/{id} — session required, no ownership check
///
/// Returns JSON null for an unknown id.
pub async fn get<S: HasMarketplace>(
    _session: SessionUser,
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<Json<Option<Value>>> {
    let id = parse_object_id(&id)?;
    let listing = state.listings().find_by_id(id).await?;
    Ok(Json(listing))
}

/// GET /services/{email} — session required, no ownership check
pub async fn list_by_owner<S: HasMarketplace>(
    _session: SessionUser,
    State(state): State<S>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Value>>> {
    let listings = state.listings().list_by_owner(&email).await?;
    Ok(Json(listings))
}

/// PATCH /update/{id}
///
/// Upsert: an unknown id creates a fresh document carrying exactly the
/// enumerated listing fields.
pub async fn update<S: HasMarketplace>(
    State(state): State<S>,
    Path(id): Path<String>,
    Json(fields): Json<ListingUpdate>,
) -> Result<Json<UpdateResponse>> {
    let id = parse_object_id(&id)?;
    let result = state.listings().update(id, fields).await?;
    Ok(Json(result))
}

/// DELETE /delete/{id}
pub async fn delete<S: HasMarketplace>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let id = parse_object_id(&id)?;
    let result = state.listings().delete_by_id(id).await?;
    Ok(Json(result))
}
