//! Form validation for invoice submissions
//!
//! The form boundary delivers an untyped field-value mapping with string
//! keys `customerId`, `amount` and `status`. Parsing produces either a
//! typed input struct or the full set of per-field failure messages; it
//! never panics and never stops at the first failure.
//!
//! Create and update use separately declared input structs rather than a
//! derivation chain, so their constraints can drift independently. The id
//! and date never appear here: both are server-assigned on create and
//! immutable on update.

use crate::core::form::FieldErrors;
use crate::model::InvoiceStatus;
use serde_json::Value;

/// Failure message when the customer reference is absent or not a string.
pub const CUSTOMER_REQUIRED: &str = "Please select a customer.";
/// Failure message when the amount is missing, non-numeric or not > 0.
pub const AMOUNT_TOO_SMALL: &str = "Please enter an amount greater than $0.";
/// Failure message when the status is outside the fixed enumeration.
pub const STATUS_REQUIRED: &str = "Please select an invoice status.";

/// Validated fields for the create action.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateInvoiceInput {
    pub customer_id: String,
    /// Amount in whole currency units, as submitted
    pub amount: f64,
    pub status: InvoiceStatus,
}

/// Validated fields for the update action. The target id travels
/// out-of-band in the request path.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateInvoiceInput {
    pub customer_id: String,
    /// Amount in whole currency units, as submitted
    pub amount: f64,
    pub status: InvoiceStatus,
}

/// Parse a create submission. All field failures are collected.
pub fn parse_create(payload: &Value) -> Result<CreateInvoiceInput, FieldErrors> {
    let (customer_id, amount, status) = parse_fields(payload)?;
    Ok(CreateInvoiceInput {
        customer_id,
        amount,
        status,
    })
}

/// Parse an update submission. Same field constraints as create.
pub fn parse_update(payload: &Value) -> Result<UpdateInvoiceInput, FieldErrors> {
    let (customer_id, amount, status) = parse_fields(payload)?;
    Ok(UpdateInvoiceInput {
        customer_id,
        amount,
        status,
    })
}

fn parse_fields(payload: &Value) -> Result<(String, f64, InvoiceStatus), FieldErrors> {
    let mut errors = FieldErrors::new();

    let customer_id = match payload.get("customerId").and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Some(s.to_string()),
        _ => {
            errors
                .entry("customerId".to_string())
                .or_default()
                .push(CUSTOMER_REQUIRED.to_string());
            None
        }
    };

    let amount = match coerce_amount(payload.get("amount")) {
        Some(n) if n > 0.0 => Some(n),
        _ => {
            errors
                .entry("amount".to_string())
                .or_default()
                .push(AMOUNT_TOO_SMALL.to_string());
            None
        }
    };

    let status = match payload
        .get("status")
        .and_then(Value::as_str)
        .and_then(InvoiceStatus::parse)
    {
        Some(s) => Some(s),
        None => {
            errors
                .entry("status".to_string())
                .or_default()
                .push(STATUS_REQUIRED.to_string());
            None
        }
    };

    if errors.is_empty() {
        // All three are Some when no errors were recorded
        Ok((customer_id.unwrap(), amount.unwrap(), status.unwrap()))
    } else {
        Err(errors)
    }
}

/// Coerce the submitted amount to a number.
///
/// Form inputs deliver the amount as a string; an empty string coerces to
/// zero (and then fails the > 0 check). JSON numbers are accepted as-is.
/// Anything non-numeric or non-finite yields None.
fn coerce_amount(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64().filter(|n| n.is_finite()),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
            }
        }
        _ => None,
    }
}
