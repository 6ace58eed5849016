//! Listings repository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, to_bson, to_document, Document};
use mongodb::Collection;
use serde_json::{Map, Value};

use crate::domain::{DeleteResponse, InsertedResponse, ListingUpdate, UpdateResponse};
use crate::error::{AppError, Result};
use crate::repository::{document_to_json, id_string, Store};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Insert a listing verbatim; the store assigns the id
    async fn create(&self, listing: Map<String, Value>) -> Result<InsertedResponse>;

    /// Unfiltered full scan, natural order
    async fn list_all(&self) -> Result<Vec<Value>>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Value>>;

    /// Equality filter on the denormalized `ownerEmail` field
    async fn list_by_owner(&self, owner_email: &str) -> Result<Vec<Value>>;

    /// Replace the enumerated listing fields, creating the document if the
    /// id does not exist (upsert)
    async fn update(&self, id: ObjectId, fields: ListingUpdate) -> Result<UpdateResponse>;

    /// Delete by id; deleting a missing id is a no-op, not an error
    async fn delete_by_id(&self, id: ObjectId) -> Result<DeleteResponse>;
}

pub struct ListingRepositoryImpl {
    collection: Collection<Document>,
}

impl ListingRepositoryImpl {
    pub fn new(store: &Store) -> Self {
        Self {
            collection: store.collection("services"),
        }
    }
}

#[async_trait]
impl ListingRepository for ListingRepositoryImpl {
    async fn create(&self, listing: Map<String, Value>) -> Result<InsertedResponse> {
        let doc = to_document(&listing)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("listing not storable: {e}")))?;
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

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Value>> {
        let doc = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(doc.map(document_to_json))
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

    async fn update(&self, id: ObjectId, fields: ListingUpdate) -> Result<UpdateResponse> {
        let serialize =
            |v: &Value| to_bson(v).map_err(|e| AppError::Internal(anyhow::anyhow!("{e}")));

        // Always $set the full enumerated field set; missing input fields
        // land as null rather than being skipped.
        let update = doc! {
            "$set": {
                "name": serialize(&fields.name)?,
                "price": serialize(&fields.price)?,
                "description": serialize(&fields.description)?,
                "image": serialize(&fields.image)?,
                "serviceArea": serialize(&fields.service_area)?,
                "serviceName": serialize(&fields.service_name)?,
                "ownerEmail": serialize(&fields.owner_email)?,
            }
        };

        let result = self
            .collection
            .update_one(doc! { "_id": id }, update)
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
