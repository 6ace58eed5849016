//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::jwt::JwtManager;
use crate::repository::{ListingRepositoryImpl, OrderRepositoryImpl, Store};
use crate::state::{HasMarketplace, HasSessions};
use anyhow::Result;
use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Store,
    pub listings: Arc<ListingRepositoryImpl>,
    pub orders: Arc<OrderRepositoryImpl>,
    pub jwt_manager: JwtManager,
}

impl HasSessions for AppState {
    fn config(&self) -> &Config {
        &self.config
    }

    fn jwt_manager(&self) -> &JwtManager {
        &self.jwt_manager
    }
}

impl HasMarketplace for AppState {
    type Listings = ListingRepositoryImpl;
    type Orders = OrderRepositoryImpl;

    fn listings(&self) -> &Self::Listings {
        &self.listings
    }

    fn orders(&self) -> &Self::Orders {
        &self.orders
    }

    fn check_ready(&self) -> impl std::future::Future<Output = bool> + Send {
        let store = self.store.clone();
        async move { store.ping().await.is_ok() }
    }
}

/// Run the server
pub async fn run(config: Config) -> Result<()> {
    // Establish the shared store handle. An unreachable store is logged,
    // not fatal: the driver retries per operation, so the process keeps
    // serving and recovers when the store comes back.
    let store = Store::connect(&config.store).await?;
    match store.ping().await {
        Ok(()) => info!("Connected to document store"),
        Err(e) => error!("Document store unreachable at startup: {e}"),
    }

    // Create repositories
    let listings = Arc::new(ListingRepositoryImpl::new(&store));
    let orders = Arc::new(OrderRepositoryImpl::new(&store));

    // Create JWT manager
    let jwt_manager = JwtManager::new(config.jwt.clone());

    let state = AppState {
        config: Arc::new(config.clone()),
        store,
        listings,
        orders,
        jwt_manager,
    };

    let app = build_router(state);

    let http_addr = config.http_addr();
    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the HTTP router with generic state type
///
/// This function is generic over the state type, allowing it to work with
/// both production `AppState` and test implementations that implement
/// `HasMarketplace`.
pub fn build_router<S: HasMarketplace>(state: S) -> Router {
    // Browser clients send the session cookie cross-origin, so CORS runs
    // in credentials mode against an explicit origin allow-list.
    let origins: Vec<HeaderValue> = state
        .config()
        .cors
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        // Health endpoints
        .route("/", get(api::health::root))
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready::<S>))
        // Session endpoints
        .route("/jwt", post(api::auth::issue_token::<S>))
        .route("/logout", post(api::auth::logout::<S>))
        // Listings endpoints
        .route("/addService", post(api::listing::create::<S>))
        .route("/services", get(api::listing::list::<S>))
        .route("/service/{id}", get(api::listing::get::<S>))
        .route("/services/{email}", get(api::listing::list_by_owner::<S>))
        .route("/update/{id}", patch(api::listing::update::<S>))
        .route("/delete/{id}", delete(api::listing::delete::<S>))
        // Orders endpoints
        .route("/addOrder", post(api::order::create::<S>))
        .route("/orders", get(api::order::list::<S>))
        .route("/orders/{email}", get(api::order::list_by_customer::<S>))
        .route(
            "/serviceMail/{serviceEmail}",
            get(api::order::list_by_provider::<S>),
        )
        .route("/updateOrder/{id}", patch(api::order::update::<S>))
        .route("/deleteOrder/{id}", delete(api::order::delete::<S>))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
