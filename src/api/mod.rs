//! REST API handlers and shared response types

pub mod auth;
pub mod health;
pub mod listing;
pub mod order;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Minimal acknowledgement body used by the auth endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: bool,
}

/// Parse a path-supplied document id, rejecting malformed ids before any
/// store round trip
pub(crate) fn parse_object_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidId(format!("invalid id: {id}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id_accepts_hex() {
        assert!(parse_object_id("65f000000000000000000001").is_ok());
    }

    #[test]
    fn test_parse_object_id_rejects_malformed() {
        for bad in ["", "xyz", "65f0000000000000000000", "not-an-id-at-all!"] {
            assert!(matches!(
                parse_object_id(bad),
                Err(AppError::InvalidId(_))
            ));
        }
    }
}
