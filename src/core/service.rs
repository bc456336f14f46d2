//! Store traits for the relational backends
//!
//! Implementations provide the parameterized read queries and the three
//! mutation statements the action pipeline issues. The service is agnostic
//! to the underlying storage mechanism; each backend decides how the
//! filtered listing and the aggregate figures are computed.

use crate::model::{Customer, Invoice, InvoiceChanges, InvoiceRow, InvoiceTotals, NewInvoice, Revenue};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Invoice reads and the three mutation statements.
///
/// Mutations report rows affected so callers can distinguish a missing
/// record from a successful write. The customer reference in
/// [`NewInvoice`]/[`InvoiceChanges`] is validated against the customers
/// table at persistence time; an unknown or malformed reference is an error.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Insert a new invoice; the store assigns the id.
    async fn insert(&self, invoice: NewInvoice) -> Result<Invoice>;

    /// Get an invoice by id. Absence is not an error.
    async fn get(&self, id: &Uuid) -> Result<Option<Invoice>>;

    /// Update customer reference, amount and status by id.
    /// Returns the number of rows affected (0 when the id is unknown).
    async fn update(&self, id: &Uuid, changes: InvoiceChanges) -> Result<u64>;

    /// Delete by id. Returns the number of rows affected.
    async fn delete(&self, id: &Uuid) -> Result<u64>;

    /// One page of joined invoice+customer rows matching the free-text
    /// query, ordered by date descending.
    async fn list_filtered(&self, query: &str, limit: usize, offset: usize)
    -> Result<Vec<InvoiceRow>>;

    /// Total number of rows matching the free-text query.
    async fn count_filtered(&self, query: &str) -> Result<u64>;

    /// The most recent invoices by date descending, joined with customers.
    async fn latest(&self, limit: usize) -> Result<Vec<InvoiceRow>>;

    /// Invoice count plus paid/pending sums in one pass.
    async fn totals(&self) -> Result<InvoiceTotals>;
}

/// Read-only customer lookups.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// All customers ordered by name, for form population.
    async fn list(&self) -> Result<Vec<Customer>>;

    /// Total number of customers.
    async fn count(&self) -> Result<u64>;
}

/// Read-only revenue series for the chart.
#[async_trait]
pub trait RevenueStore: Send + Sync {
    /// The fixed set of time-bucketed revenue figures, in stored order.
    async fn monthly(&self) -> Result<Vec<Revenue>>;
}
