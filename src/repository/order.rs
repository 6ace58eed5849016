//! Orders repository
//!
//! Orders reference a listing's provider by the denormalized
//! `serviceEmail` field, not by id, so provider-side lookups are plain
//! equality filters like everything else.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, to_bson, to_document, Document};
use mongodb::Collection;
use serde_json::{Map, Value};

use crate::domain::{DeleteResponse, InsertedResponse, OrderUpdate, UpdateResponse};
use crate::error::{AppError, Result};
use crate::repository::{document_to_json, id_string, Store};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert an order verbatim; the store assigns the id
    async fn create(&self, order: Map<String, Value>) -> Result<InsertedResponse>;

    /// Unfiltered full scan, natural order
    async fn list_all(&self) -> Result<Vec<Value>>;

    /// Equality filter on the customer's `ownerEmail`
    async fn list_by_owner(&self, owner_email: &str) -> Result<Vec<Value>>;

    /// Equality filter on the provider's `serviceEmail`
    async fn list_by_provider(&self, service_email: &str) -> Result<Vec<Value>>;

    /// Replace `status` only, creating the document if the id does not
    /// exist (upsert)
    async fn update(&self, id: ObjectId, fields: OrderUpdate) -> Result<UpdateResponse>;

    /// Delete by id; deleting a missing id is a no-op, not an error
    async fn delete_by_id(&self, id: ObjectId) -> Result<DeleteResponse>;
}

pub struct OrderRepositoryImpl {
    collection: Collection<Document>,
}

impl OrderRepositoryImpl {
    pub fn new(store: &Store) -> Self {
        Self {
            collection: store.collection("cart"),
        }
    }
}

#[async_trait]
impl OrderRepository for OrderRepositoryImpl {
    async fn create(&self, order: Map<String, Value>) -> Result<InsertedResponse> {
        let doc = to_document(&order)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("order not storable: {e}")))?;
        let result = self.collection.insert_one(doc).await?;

        Ok(InsertedResponse {
            acknowledged: true,
            inserted_id: id_string(result.inserted_id),
        })
    }

    async fn list_all(&self) -> Result<Vec<Value>> {
        let docs: Vec<Document> = self.collection.find(doc! {}).await?.try_collect().await?;
        Ok(docs.into_iter().map(document_to_json).collect())
    }

    async fn list_by_owner(&self, owner_email: &str) -> Result<Vec<Value>> {
        let docs: Vec<Document> = self
            .collection
            .find(doc! { "ownerEmail": owner_email })
            .await?
            .try_collect()
            .await?;
        Ok(docs.into_iter().map(document_to_json).collect())
    }

    async fn list_by_provider(&self, service_email: &str) -> Result<Vec<Value>> {
        let docs: Vec<Document> = self
            .collection
            .find(doc! { "serviceEmail": service_email })
            .await?
            .try_collect()
            .await?;
        Ok(docs.into_iter().map(document_to_json).collect())
    }

    async fn update(&self, id: ObjectId, fields: OrderUpdate) -> Result<UpdateResponse> {
        let status = to_bson(&fields.status)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("{e}")))?;

        let result = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": { "status": status } })
            .upsert(true)
            .await?;

        Ok(UpdateResponse {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_count: if result.upserted_id.is_some() { 1 } else { 0 },
            upserted_id: result.upserted_id.map(id_string),
        })
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<DeleteResponse> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        Ok(DeleteResponse {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }
}
