//! Common test utilities
//!
//! The suite runs against `build_router` with in-memory repositories
//! standing in for the Mongo-backed ones, so no external daemon is
//! needed. The fakes reproduce the store semantics the API depends on:
//! store-assigned ids, equality filters on denormalized email fields,
//! upsert-on-update and no-op deletes.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use mongodb::bson::oid::ObjectId;
use serde_json::{Map, Value};
use souk_core::config::{Config, CorsConfig, Environment, JwtConfig, StoreConfig};
use souk_core::domain::{
    DeleteResponse, Identity, InsertedResponse, ListingUpdate, OrderUpdate, UpdateResponse,
};
use souk_core::error::Result;
use souk_core::jwt::JwtManager;
use souk_core::repository::{ListingRepository, OrderRepository};
use souk_core::server::build_router;
use souk_core::state::{HasMarketplace, HasSessions};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// In-memory document collection with the store semantics the API relies on
#[derive(Default)]
struct MemCollection {
    docs: Mutex<Vec<(ObjectId, Map<String, Value>)>>,
}

impl MemCollection {
    fn insert(&self, doc: Map<String, Value>) -> InsertedResponse {
        let id = ObjectId::new();
        self.docs.lock().unwrap().push((id, doc));
        InsertedResponse {
            acknowledged: true,
            inserted_id: id.to_hex(),
        }
    }

    fn render(id: ObjectId, doc: &Map<String, Value>) -> Value {
        let mut out = Map::new();
        out.insert("_id".to_string(), Value::String(id.to_hex()));
        out.extend(doc.clone());
        Value::Object(out)
    }

    fn all(&self) -> Vec<Value> {
        self.docs
            .lock()
            .unwrap()
            .iter()
            .map(|(id, doc)| Self::render(*id, doc))
            .collect()
    }

    fn find(&self, id: ObjectId) -> Option<Value> {
        self.docs
            .lock()
            .unwrap()
            .iter()
            .find(|(doc_id, _)| *doc_id == id)
            .map(|(id, doc)| Self::render(*id, doc))
    }

    fn filter_eq(&self, field: &str, value: &str) -> Vec<Value> {
        self.docs
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, doc)| doc.get(field) == Some(&Value::String(value.to_string())))
            .map(|(id, doc)| Self::render(*id, doc))
            .collect()
    }

    /// `$set` of the given fields with upsert: an unknown id creates a
    /// document holding exactly those fields, keyed by the filter id.
    fn set_fields(&self, id: ObjectId, fields: Vec<(&str, Value)>) -> UpdateResponse {
        let mut docs = self.docs.lock().unwrap();
        if let Some((_, doc)) = docs.iter_mut().find(|(doc_id, _)| *doc_id == id) {
            let before = doc.clone();
            for (key, value) in fields {
                doc.insert(key.to_string(), value);
            }
            let modified = *doc != before;
            UpdateResponse {
                acknowledged: true,
                matched_count: 1,
                modified_count: if modified { 1 } else { 0 },
                upserted_count: 0,
                upserted_id: None,
            }
        } else {
            let mut doc = Map::new();
            for (key, value) in fields {
                doc.insert(key.to_string(), value);
            }
            docs.push((id, doc));
            UpdateResponse {
                acknowledged: true,
                matched_count: 0,
                modified_count: 0,
                upserted_count: 1,
                upserted_id: Some(id.to_hex()),
            }
        }
    }

    fn delete(&self, id: ObjectId) -> DeleteResponse {
        let mut docs = self.docs.lock().unwrap();
        let before = docs.len();
        docs.retain(|(doc_id, _)| *doc_id != id);
        DeleteResponse {
            acknowledged: true,
            deleted_count: (before - docs.len()) as u64,
        }
    }
}

#[derive(Default)]
pub struct MemListingRepository {
    collection: MemCollection,
}

#[async_trait]
impl ListingRepository for MemListingRepository {
    async fn create(&self, listing: Map<String, Value>) -> Result<InsertedResponse> {
        Ok(self.collection.insert(listing))
    }

    async fn list_all(&self) -> Result<Vec<Value>> {
        Ok(self.collection.all())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Value>> {
        Ok(self.collection.find(id))
    }

    async fn list_by_owner(&self, owner_email: &str) -> Result<Vec<Value>> {
        Ok(self.collection.filter_eq("ownerEmail", owner_email))
    }

    async fn update(&self, id: ObjectId, fields: ListingUpdate) -> Result<UpdateResponse> {
        Ok(self.collection.set_fields(
            id,
            vec![
                ("name", fields.name),
                ("price", fields.price),
                ("description", fields.description),
                ("image", fields.image),
                ("serviceArea", fields.service_area),
                ("serviceName", fields.service_name),
                ("ownerEmail", fields.owner_email),
            ],
        ))
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<DeleteResponse> {
        Ok(self.collection.delete(id))
    }
}

#[derive(Default)]
pub struct MemOrderRepository {
    collection: MemCollection,
}

#[async_trait]
impl OrderRepository for MemOrderRepository {
    async fn create(&self, order: Map<String, Value>) -> Result<InsertedResponse> {
        Ok(self.collection.insert(order))
    }

    async fn list_all(&self) -> Result<Vec<Value>> {
        Ok(self.collection.all())
    }

    async fn list_by_owner(&self, owner_email: &str) -> Result<Vec<Value>> {
        Ok(self.collection.filter_eq("ownerEmail", owner_email))
    }

    async fn list_by_provider(&self, service_email: &str) -> Result<Vec<Value>> {
        Ok(self.collection.filter_eq("serviceEmail", service_email))
    }

    async fn update(&self, id: ObjectId, fields: OrderUpdate) -> Result<UpdateResponse> {
        Ok(self.collection.set_fields(id, vec![("status", fields.status)]))
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<DeleteResponse> {
        Ok(self.collection.delete(id))
    }
}

/// Test implementation of the state traits
#[derive(Clone)]
pub struct TestState {
    config: Arc<Config>,
    jwt_manager: JwtManager,
    listings: Arc<MemListingRepository>,
    orders: Arc<MemOrderRepository>,
}

impl HasSessions for TestState {
    fn config(&self) -> &Config {
        &self.config
    }

    fn jwt_manager(&self) -> &JwtManager {
        &self.jwt_manager
    }
}

impl HasMarketplace for TestState {
    type Listings = MemListingRepository;
    type Orders = MemOrderRepository;

    fn listings(&self) -> &Self::Listings {
        &self.listings
    }

    fn orders(&self) -> &Self::Orders {
        &self.orders
    }

    fn check_ready(&self) -> impl std::future::Future<Output = bool> + Send {
        std::future::ready(true)
    }
}

pub fn test_config(environment: Environment) -> Config {
    Config {
        http_host: "127.0.0.1".to_string(),
        http_port: 0,
        environment,
        store: StoreConfig {
            url: "mongodb://localhost:27017".to_string(),
            database: "souk-test".to_string(),
        },
        jwt: JwtConfig {
            secret: "test-secret-key-for-session-signing".to_string(),
            session_ttl_secs: 3600,
        },
        cors: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
    }
}

pub fn test_state(environment: Environment) -> TestState {
    let config = test_config(environment);
    let jwt_manager = JwtManager::new(config.jwt.clone());
    TestState {
        config: Arc::new(config),
        jwt_manager,
        listings: Arc::new(MemListingRepository::default()),
        orders: Arc::new(MemOrderRepository::default()),
    }
}

/// Router plus the state behind it, for tests that also poke repositories
pub fn test_app() -> (Router, TestState) {
    let state = test_state(Environment::Development);
    (build_router(state.clone()), state)
}

/// Mint a session cookie header value for the given email
pub fn session_cookie(state: &TestState, email: &str) -> String {
    let identity: Identity =
        serde_json::from_value(serde_json::json!({ "email": email })).unwrap();
    let token = state.jwt_manager().sign_session(&identity).unwrap();
    format!("token={token}")
}

/// Fire one request at the router and decode the JSON response body
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
