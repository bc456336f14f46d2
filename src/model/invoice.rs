//! Invoice record and its write-side companions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Invoice payment status.
///
/// Stored lowercase in the `status` column and on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }

    /// Parse a stored/submitted status value. Anything outside the fixed
    /// enumeration is rejected, not defaulted.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(InvoiceStatus::Pending),
            "paid" => Some(InvoiceStatus::Paid),
            _ => None,
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A billable record tying a customer, amount, status and date.
///
/// The amount is stored in minor currency units (cents) to avoid
/// floating-point drift. The id and date are server-assigned at creation
/// and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub customer_id: Uuid,
    /// Amount in cents
    pub amount: i64,
    pub status: InvoiceStatus,
    /// Creation date, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
}

/// Field set for a single insert statement. The id is assigned by the store.
///
/// The customer reference is kept as the submitted string; the store parses
/// it and enforces that it names an existing customer at persistence time.
#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub customer_id: String,
    /// Amount in cents
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Field set for an update-by-id statement.
///
/// Only the customer reference, amount and status are mutable; id and date
/// are never touched after creation.
#[derive(Debug, Clone)]
pub struct InvoiceChanges {
    pub customer_id: String,
    /// Amount in cents
    pub amount: i64,
    pub status: InvoiceStatus,
}

/// One row of the invoices listing: an invoice joined with its customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub date: NaiveDate,
    /// Amount in cents
    pub amount: i64,
    pub status: InvoiceStatus,
}
