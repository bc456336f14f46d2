//! HTTP server: shared state, page handlers and the router
//!
//! Each page handler composes read-path fetch functions into the payload
//! its page renders; the mutation handlers hand the submitted field-value
//! mapping to the action pipeline and translate the outcome into a
//! response.

pub mod customers;
pub mod dashboard;
pub mod invoices;
pub mod router;

pub use router::build_router;

use crate::actions::DeleteBehavior;
use crate::config::ServerConfig;
use crate::core::service::{CustomerStore, InvoiceStore, RevenueStore};
use crate::views::ViewCache;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub invoices: Arc<dyn InvoiceStore>,
    pub customers: Arc<dyn CustomerStore>,
    pub revenue: Arc<dyn RevenueStore>,
    /// Cached listing payloads, invalidated by the action pipeline
    pub views: Arc<ViewCache>,
    /// Rows per page on the invoices listing
    pub page_size: usize,
    pub delete_behavior: DeleteBehavior,
}

impl AppState {
    /// Build state from one store implementing all three store traits.
    pub fn from_store<S>(store: S, config: &ServerConfig) -> Self
    where
        S: InvoiceStore + CustomerStore + RevenueStore + Clone + 'static,
    {
        Self {
            invoices: Arc::new(store.clone()),
            customers: Arc::new(store.clone()),
            revenue: Arc::new(store),
            views: Arc::new(ViewCache::new()),
            page_size: config.page_size,
            delete_behavior: DeleteBehavior {
                simulate_failure: config.simulate_delete_failure,
            },
        }
    }
}
