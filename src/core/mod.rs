//! Core module containing fundamental types shared across the service

pub mod debounce;
pub mod error;
pub mod form;
pub mod format;
pub mod query;
pub mod service;

pub use debounce::QueryDebouncer;
pub use error::{AppError, AppResult, ErrorResponse};
pub use form::FormState;
pub use format::format_currency;
pub use query::ListQuery;
pub use service::{CustomerStore, InvoiceStore, RevenueStore};
