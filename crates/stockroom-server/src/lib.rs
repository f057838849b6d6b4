// Stockroom server - Axum routes over a shared InventoryStore

pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use stockroom::InventoryStore;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InventoryStore>>,
}

impl AppState {
    pub fn new(store: InventoryStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}

/// All UI and JSON routes
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/inventory", get(handlers::inventory))
        .route("/inventory/rows", get(handlers::inventory_rows))
        .route("/products", post(handlers::submit_product))
        .route("/products/new", get(handlers::new_product))
        .route("/products/:id", axum::routing::delete(handlers::delete_product))
        .route("/products/:id/edit", get(handlers::edit_product))
        .route("/modal/close", get(handlers::close_modal))
        .route("/transactions", post(handlers::record_movement))
        .route("/api/products", get(handlers::api_products))
        .route("/api/transactions", get(handlers::api_transactions))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
