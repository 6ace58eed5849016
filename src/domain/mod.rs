//! Wire-level domain types
//!
//! Documents themselves are free-form: the store accepts whatever JSON the
//! caller submits and hands it back unchanged, so listings and orders are
//! not modeled as rigid structs. The types here cover the pieces with an
//! actual contract: the signed identity, the enumerated update payloads,
//! and the driver-result mirrors the API returns verbatim.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Asserted identity carried inside a session credential.
///
/// Only `email` is interpreted; everything else the caller asserted at
/// login time rides along opaquely and comes back out on verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fields a listing update is allowed to touch.
///
/// The `$set` sent to the store always contains exactly this set: fields
/// absent from the request body default to JSON null rather than being
/// skipped, and anything else in the body is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingUpdate {
    #[serde(default)]
    pub name: Value,
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub description: Value,
    #[serde(default)]
    pub image: Value,
    #[serde(default)]
    pub service_area: Value,
    #[serde(default)]
    pub service_name: Value,
    #[serde(default)]
    pub owner_email: Value,
}

/// The only order field mutable after creation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderUpdate {
    #[serde(default)]
    pub status: Value,
}

/// Mirror of the driver's insert-one result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertedResponse {
    pub acknowledged: bool,
    pub inserted_id: String,
}

/// Mirror of the driver's update-one result.
///
/// `matched_count`/`upserted_id` let callers distinguish "updated existing"
/// from "created via upsert".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<String>,
}

/// Mirror of the driver's delete-one result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub acknowledged: bool,
    pub deleted_count: u64,
}
