//! Orders endpoints
//!
//! The two owner-scoped scans are the only routes in the API where the
//! ownership guard runs: a customer may list their own orders, a provider
//! may list orders directed at their listings, and nobody else's.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{Map, Value};

use crate::api::parse_object_id;
use crate::domain::{DeleteResponse, InsertedResponse, OrderUpdate, UpdateResponse};
use crate::error::Result;
use crate::repository::order::OrderRepository;
use crate::middleware::SessionUser;
use crate::policy::require_owner;
use crate::state::HasMarketplace;

/// POST /addOrder
pub async fn create<S: HasMarketplace>(
    State(state): State<S>,
    Json(order): Json<Map<String, Value>>,
) -> Result<Json<InsertedResponse>> {
    let result = state.orders().create(order).await?;
    Ok(Json(result))
}

/// GET /orders — session required, no ownership check
pub async fn list<S: HasMarketplace>(
    _session: SessionUser,
    State(state): State<S>,
) -> Result<Json<Vec<Value>>> {
    let orders = state.orders().list_all().await?;
    Ok(Json(orders))
}

/// GET /orders/{email} — a customer's own orders
pub async fn list_by_customer<S: HasMarketplace>(
    session: SessionUser,
    State(state): State<S>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Value>>> {
    require_owner(session.email(), &email)?;
    let orders = state.orders().list_by_owner(&email).await?;
    Ok(Json(orders))
}

/// GET /serviceMail/{serviceEmail} — orders directed at a provider's listings
pub async fn list_by_provider<S: HasMarketplace>(
    session: SessionUser,
    State(state): State<S>,
    Path(service_email): Path<String>,
) -> Result<Json<Vec<Value>>> {
    require_owner(session.email(), &service_email)?;
    let orders = state.orders().list_by_provider(&service_email).await?;
    Ok(Json(orders))
}

/// PATCH /updateOrder/{id}
///
/// Only `status` is ever mutated post-creation; unknown ids upsert a
/// document containing just that field.
pub async fn update<S: HasMarketplace>(
    State(state): State<S>,
    Path(id): Path<String>,
    Json(fields): Json<OrderUpdate>,
) -> Result<Json<UpdateResponse>> {
    let id = parse_object_id(&id)?;
    let result = state.orders().update(id, fields).await?;
    Ok(Json(result))
}

/// DELETE /deleteOrder/{id}
pub async fn delete<S: HasMarketplace>(
    State(state): State<S>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let id = parse_object_id(&id)?;
    let result = state.orders().delete_by_id(id).await?;
    Ok(Json(result))
}
