//! Read-path data access
//!
//! Each function issues parameterized queries through the store traits and
//! returns a typed projection. All of them are side-effect-free and safe to
//! invoke repeatedly; the page handlers compose them into view payloads.

use crate::core::format::format_currency;
use crate::core::service::{CustomerStore, InvoiceStore, RevenueStore};
use crate::model::{CardData, Customer, Invoice, InvoiceRow, LatestInvoice, Revenue};
use anyhow::Result;
use uuid::Uuid;

/// How many of the most recent invoices the dashboard shows.
const LATEST_INVOICES: usize = 5;

/// Fetch a single invoice. An unknown id yields `None`, not an error; the
/// rendering layer turns that into its not-found presentation.
pub async fn fetch_invoice_by_id(store: &dyn InvoiceStore, id: Uuid) -> Result<Option<Invoice>> {
    store.get(&id).await
}

/// Fetch the full customer list for selection controls, ordered by name.
pub async fn fetch_customers(store: &dyn CustomerStore) -> Result<Vec<Customer>> {
    store.list().await
}

/// Fetch one page of the filtered invoices listing.
///
/// The query matches customer name/email and invoice status, amount and
/// date; rows come back joined with their customer, newest first. The page
/// number is 1-based and clamped to at least 1.
pub async fn fetch_filtered_invoices(
    store: &dyn InvoiceStore,
    query: &str,
    page: usize,
    page_size: usize,
) -> Result<Vec<InvoiceRow>> {
    let page = page.max(1);
    let offset = (page - 1) * page_size;
    store.list_filtered(query, page_size, offset).await
}

/// Fetch the total number of listing pages for a query:
/// `ceil(matching rows / page size)`.
pub async fn fetch_invoices_pages(
    store: &dyn InvoiceStore,
    query: &str,
    page_size: usize,
) -> Result<usize> {
    let total = store.count_filtered(query).await?;
    Ok((total as usize).div_ceil(page_size.max(1)))
}

/// Fetch the four dashboard card figures.
///
/// The customer count and the invoice aggregates are independent queries,
/// issued concurrently; the monetary sums come back pre-formatted.
pub async fn fetch_card_data(
    invoices: &dyn InvoiceStore,
    customers: &dyn CustomerStore,
) -> Result<CardData> {
    let (totals, number_of_customers) = tokio::try_join!(invoices.totals(), customers.count())?;

    Ok(CardData {
        number_of_customers,
        number_of_invoices: totals.count,
        total_paid_invoices: format_currency(totals.paid),
        total_pending_invoices: format_currency(totals.pending),
    })
}

/// Fetch the time-bucketed revenue series for the chart.
pub async fn fetch_revenue(store: &dyn RevenueStore) -> Result<Vec<Revenue>> {
    store.monthly().await
}

/// Fetch the five most recent invoices, newest first, with customer fields
/// and a formatted amount.
pub async fn fetch_latest_invoices(store: &dyn InvoiceStore) -> Result<Vec<LatestInvoice>> {
    let rows = store.latest(LATEST_INVOICES).await?;
    Ok(rows
        .into_iter()
        .map(|row| LatestInvoice {
            id: row.id,
            name: row.name,
            image_url: row.image_url,
            email: row.email,
            amount: format_currency(row.amount),
        })
        .collect())
}
