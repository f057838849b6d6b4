// File: src/handlers.rs
// Purpose: One handler per UI operation - pages, fragments, form submits, and JSON snapshots

use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;
use stockroom::views::{self, ids};
use stockroom::{
    Failure, FormContext, Fragment, InventoryStore, MovementForm, ProductForm, StoreError,
    ValidationResult,
};
use tracing::{error, warn};

/// `?q=&category=` on the inventory routes
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub q: String,
    pub category: String,
}

fn store_failure(err: StoreError) -> Response {
    error!("Inventory operation failed: {}", err);
    Failure::internal("Could not save inventory changes").into_response()
}

fn rows(store: &InventoryStore, params: &SearchParams) -> stockroom::Markup {
    views::inventory_rows(&store.search(&params.q, &params.category))
}

// ============================================================================
// PAGES
// ============================================================================

/// GET / - dashboard cards, recent ledger, movement form
pub async fn dashboard(State(state): State<AppState>) -> Html<String> {
    let store = state.store.read().await;
    let page = views::dashboard_page(&store.stats(), store.recent_transactions(), store.products());
    Html(page.into_string())
}

/// GET /inventory - full table page
pub async fn inventory(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let store = state.store.read().await;
    let page = views::inventory_page(
        &store.search(&params.q, &params.category),
        &store.categories(),
        &params.q,
        &params.category,
    );
    Html(page.into_string())
}

/// GET /inventory/rows - search and category filter
pub async fn inventory_rows(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Fragment {
    let store = state.store.read().await;
    Fragment::new(rows(&store, &params))
}

// ============================================================================
// MODAL
// ============================================================================

/// GET /products/new
pub async fn new_product() -> Fragment {
    Fragment::new(views::product_modal(&FormContext::empty()))
}

/// GET /products/:id/edit - unknown ids leave the modal closed
pub async fn edit_product(State(state): State<AppState>, Path(id): Path<u32>) -> Fragment {
    let store = state.store.read().await;
    match store.product(id) {
        Some(product) => Fragment::new(views::product_modal(&FormContext::for_product(product))),
        None => {
            warn!("Edit requested for missing product {}", id);
            Fragment::empty().status(StatusCode::NOT_FOUND)
        }
    }
}

/// GET /modal/close
pub async fn close_modal() -> Fragment {
    Fragment::empty()
}

fn rejected_product(form: &ProductForm, result: &ValidationResult) -> Response {
    let context = FormContext::rejected(form.values(), result);
    Fragment::new(views::product_modal(&context))
        .retarget(&format!("#{}", ids::MODAL))
        .status(StatusCode::UNPROCESSABLE_ENTITY)
        .into_response()
}

/// POST /products - create when `id` is empty, update otherwise.
/// The category dropdown is refreshed out of band alongside the rows.
pub async fn submit_product(State(state): State<AppState>, Form(form): Form<ProductForm>) -> Response {
    let submission = match form.parse() {
        Ok(submission) => submission,
        Err(result) => return rejected_product(&form, &result),
    };

    let mut store = state.store.write().await;
    let saved = match store.submit(submission) {
        Ok(saved) => saved,
        Err(err) => return store_failure(err),
    };

    let toast = match saved {
        Some(product) => format!("Saved {}", product.name),
        None => "Product no longer exists".to_string(),
    };
    Fragment::new(rows(&store, &SearchParams::default()))
        .oob(ids::CATEGORY_SLOT, views::category_filter(&store.categories(), ""))
        .toast(toast)
        .close_modal()
        .into_response()
}

/// DELETE /products/:id - the browser asks for confirmation before sending
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Query(params): Query<SearchParams>,
) -> Response {
    let mut store = state.store.write().await;
    let removed = match store.delete(id) {
        Ok(removed) => removed,
        Err(err) => return store_failure(err),
    };

    let fragment = Fragment::new(rows(&store, &params));
    if removed {
        fragment.toast("Product deleted").into_response()
    } else {
        fragment.into_response()
    }
}

// ============================================================================
// LEDGER
// ============================================================================

fn rejected_movement(store: &InventoryStore, form: &MovementForm, result: &ValidationResult) -> Response {
    let context = FormContext::rejected(form.values(), result);
    Fragment::new(views::movement_form(store.products(), &context))
        .retarget(&format!("#{}", ids::MOVEMENT_FORM))
        .header("HX-Reswap", "outerHTML")
        .status(StatusCode::UNPROCESSABLE_ENTITY)
        .into_response()
}

/// POST /transactions - append to the ledger, refresh the dashboard
pub async fn record_movement(State(state): State<AppState>, Form(form): Form<MovementForm>) -> Response {
    let mut store = state.store.write().await;

    let movement = match form.parse() {
        Ok(movement) => movement,
        Err(result) => return rejected_movement(&store, &form, &result),
    };

    let recorded = match store.record_movement(movement) {
        Ok(tx) => tx,
        Err(StoreError::UnknownProduct(sku)) => {
            let mut result = ValidationResult::success();
            result.add("sku", format!("No product with SKU {}", sku));
            return rejected_movement(&store, &form, &result);
        }
        Err(err) => return store_failure(err),
    };

    Fragment::new(views::transaction_table(store.recent_transactions()))
        .oob(ids::STATS, views::stats_cards(&store.stats()))
        .toast(format!("{} {} x{}", recorded.kind.label(), recorded.sku, recorded.qty))
        .into_response()
}

// ============================================================================
// JSON
// ============================================================================

/// GET /api/products - catalog snapshot
pub async fn api_products(State(state): State<AppState>) -> Json<Vec<stockroom::Product>> {
    Json(state.store.read().await.products().to_vec())
}

/// GET /api/transactions - ledger snapshot
pub async fn api_transactions(State(state): State<AppState>) -> Json<Vec<stockroom::Transaction>> {
    Json(state.store.read().await.transactions().to_vec())
}
