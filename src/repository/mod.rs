//! Data access layer (Repository pattern)
//!
//! Repositories are stateless pass-throughs to the document store: each
//! operation is a single store call, documents are opaque JSON, and the
//! store's single-document atomicity is the only consistency guarantee.

pub mod listing;
pub mod order;

pub use listing::{ListingRepository, ListingRepositoryImpl};
pub use order::{OrderRepository, OrderRepositoryImpl};

use mongodb::bson::{doc, Bson, Document};
use mongodb::{Client, Collection, Database};
use serde_json::Value;

use crate::config::StoreConfig;
use crate::error::Result;

/// Shared document store handle.
///
/// One handle is created at process start and cloned into each repository;
/// the driver multiplexes all request flows over it.
#[derive(Clone)]
pub struct Store {
    db: Database,
}

impl Store {
    /// Establish the store connection.
    ///
    /// The driver connects lazily, so this cannot fail on an unreachable
    /// server; use [`Store::ping`] to probe reachability.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let client = Client::with_uri_str(&config.url).await?;
        Ok(Self {
            db: client.database(&config.database),
        })
    }

    /// Get a raw-document collection handle
    pub fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection(name)
    }

    /// Round-trip to the server
    pub async fn ping(&self) -> Result<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

/// Convert a stored document to the JSON shape the API returns.
///
/// ObjectIds flatten to their hex form, the shape browser clients expect;
/// everything else follows relaxed extended JSON.
pub fn document_to_json(doc: Document) -> Value {
    Value::Object(
        doc.into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

/// Render a store-assigned id as the hex string clients see
pub(crate) fn id_string(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        other => other.to_string(),
    }
}
