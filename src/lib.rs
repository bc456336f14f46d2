//! # Factura
//!
//! An invoicing dashboard service: customers, invoices, revenue cards and
//! paginated search over a relational store.
//!
//! ## Architecture
//!
//! - **Validation schema**: explicit create/update input structs parsed from
//!   an untyped field-value mapping, collecting per-field error messages
//! - **Action pipeline**: validate → persist → invalidate views → navigate,
//!   with recoverable [`FormState`](core::form::FormState) outcomes
//! - **Data access**: side-effect-free fetch functions over the store traits
//! - **Storage**: in-memory store for development and tests, PostgreSQL
//!   behind the `postgres` feature flag
//! - **Server**: axum router exposing the dashboard, invoice and customer
//!   page data plus the mutation endpoints
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use factura::prelude::*;
//!
//! let store = InMemoryStore::new();
//! let state = AppState::from_store(store, &ServerConfig::default());
//! let app = build_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod actions;
pub mod config;
pub mod core;
pub mod data;
pub mod model;
pub mod server;
pub mod storage;
pub mod validation;
pub mod views;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{AppError, AppResult, ErrorResponse},
        form::FormState,
        query::ListQuery,
        service::{CustomerStore, InvoiceStore, RevenueStore},
    };

    // === Domain model ===
    pub use crate::model::{
        CardData, Customer, Invoice, InvoiceChanges, InvoiceRow, InvoiceStatus, InvoiceTotals,
        LatestInvoice, NewInvoice, Revenue,
    };

    // === Actions ===
    pub use crate::actions::{
        ActionOutcome, DeleteBehavior, INVOICES_PATH, create_invoice, delete_invoice,
        update_invoice,
    };

    // === Views ===
    pub use crate::views::{RecordingInvalidator, ViewCache, ViewInvalidator};

    // === Storage ===
    pub use crate::storage::InMemoryStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::postgres::PostgresStore;

    // === Config ===
    pub use crate::config::ServerConfig;

    // === Server ===
    pub use crate::server::{AppState, build_router};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{NaiveDate, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
