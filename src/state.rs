//! Application state traits for dependency injection
//!
//! Handlers are written against these traits rather than the concrete
//! `AppState`, so the same routing and handler code serves production
//! (Mongo-backed repositories) and the test harness (in-memory ones).

use crate::config::Config;
use crate::jwt::JwtManager;
use crate::repository::{ListingRepository, OrderRepository};

/// State required by the session layer (issuing and verifying credentials)
pub trait HasSessions: Clone + Send + Sync + 'static {
    /// Get the application configuration
    fn config(&self) -> &Config;

    /// Get the JWT manager
    fn jwt_manager(&self) -> &JwtManager;
}

/// State required by the marketplace API (listings and orders)
pub trait HasMarketplace: HasSessions {
    /// The listings repository type
    type Listings: ListingRepository;
    /// The orders repository type
    type Orders: OrderRepository;

    /// Get the listings repository
    fn listings(&self) -> &Self::Listings;

    /// Get the orders repository
    fn orders(&self) -> &Self::Orders;

    /// Check whether the document store is reachable
    fn check_ready(&self) -> impl std::future::Future<Output = bool> + Send;
}
