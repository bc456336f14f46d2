//! Projections backing the dashboard overview page

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One time bucket of the revenue chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revenue {
    pub month: String,
    /// Revenue in whole currency units for the bucket
    pub revenue: i64,
}

/// Aggregate invoice figures computed in a single pass over the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InvoiceTotals {
    pub count: u64,
    /// Sum of paid amounts, in cents
    pub paid: i64,
    /// Sum of pending amounts, in cents
    pub pending: i64,
}

/// The four summary cards at the top of the dashboard.
///
/// The monetary totals are pre-formatted currency strings, matching what the
/// cards display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardData {
    pub number_of_customers: u64,
    pub number_of_invoices: u64,
    pub total_paid_invoices: String,
    pub total_pending_invoices: String,
}

/// One of the five most recent invoices shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestInvoice {
    pub id: Uuid,
    pub name: String,
    pub image_url: String,
    pub email: String,
    /// Pre-formatted currency string
    pub amount: String,
}
