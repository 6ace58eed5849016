//! Souk Core - Service Marketplace Backend
//!
//! This crate provides the backend for a two-sided service marketplace:
//! session-token authentication, ownership-scoped authorization, and a
//! listings/orders REST API backed by a document store.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod policy;
pub mod repository;
pub mod server;
pub mod state;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
