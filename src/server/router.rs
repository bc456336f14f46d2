//! Route table for the dashboard service

use super::{AppState, customers, dashboard, invoices};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/dashboard", get(dashboard::overview))
        .route(
            "/dashboard/invoices",
            get(invoices::list).post(invoices::create),
        )
        .route(
            "/dashboard/invoices/{id}",
            get(invoices::get_by_id)
                .put(invoices::update)
                .delete(invoices::remove),
        )
        .route("/dashboard/invoices/{id}/edit", get(invoices::edit_page))
        .route("/customers", get(customers::list))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint handler
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "factura"
    }))
}
