//! Mutation pipeline for invoices
//!
//! The three entry points here are the only places that write to the store.
//! Each runs as one logical unit: validate, persist, invalidate the cached
//! invoices listing, navigate. Every failure is recovered into structured
//! data for the rendering layer; nothing here retries, and a failed
//! submission requires a new user action.

use crate::core::form::FormState;
use crate::core::service::InvoiceStore;
use crate::model::{InvoiceChanges, NewInvoice};
use crate::validation;
use crate::views::ViewInvalidator;
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

/// The listing path mutations redirect to and invalidate.
pub const INVOICES_PATH: &str = "/dashboard/invoices";

/// What an action entry point resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// Successful mutation; navigate to the given path
    Redirect(String),

    /// Successful mutation without navigation; message for the caller
    Completed { message: String },

    /// Submission rejected with field errors and/or a summary message
    Rejected(FormState),

    /// The targeted invoice does not exist; nothing was mutated
    NotFound { id: Uuid },
}

/// Demo-fault toggle for the delete action.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteBehavior {
    /// Fail unconditionally before any deletion logic runs. A fault
    /// demonstration for the page-level error display, never the default.
    pub simulate_failure: bool,
}

/// Validate a create submission, persist it and refresh the listing.
///
/// Server-generated fields: the id (assigned by the store) and the creation
/// date, stamped with the current UTC calendar date. The submitted amount is
/// converted to integer cents before the insert.
pub async fn create_invoice(
    store: &dyn InvoiceStore,
    views: &dyn ViewInvalidator,
    payload: &Value,
) -> ActionOutcome {
    let input = match validation::parse_create(payload) {
        Ok(input) => input,
        Err(errors) => {
            return ActionOutcome::Rejected(FormState::rejected(
                errors,
                "Missing Fields. Failed to Create Invoice.",
            ));
        }
    };

    let invoice = NewInvoice {
        customer_id: input.customer_id,
        amount: to_cents(input.amount),
        status: input.status,
        date: Utc::now().date_naive(),
    };

    match store.insert(invoice).await {
        Ok(created) => {
            tracing::info!(invoice_id = %created.id, "invoice created");
            views.invalidate(INVOICES_PATH);
            ActionOutcome::Redirect(INVOICES_PATH.to_string())
        }
        Err(err) => {
            tracing::warn!(error = %err, "invoice insert failed");
            ActionOutcome::Rejected(FormState::with_message(
                "Database Error: Failed to Create Invoice.",
            ))
        }
    }
}

/// Validate an update submission and persist it against an existing id.
///
/// Only the customer reference, amount and status change; the id and date
/// are immutable after creation.
pub async fn update_invoice(
    store: &dyn InvoiceStore,
    views: &dyn ViewInvalidator,
    id: Uuid,
    payload: &Value,
) -> ActionOutcome {
    let input = match validation::parse_update(payload) {
        Ok(input) => input,
        Err(errors) => {
            return ActionOutcome::Rejected(FormState::rejected(
                errors,
                "Missing Fields. Failed to Update Invoice.",
            ));
        }
    };

    let changes = InvoiceChanges {
        customer_id: input.customer_id,
        amount: to_cents(input.amount),
        status: input.status,
    };

    match store.update(&id, changes).await {
        Ok(0) => ActionOutcome::NotFound { id },
        Ok(_) => {
            tracing::info!(invoice_id = %id, "invoice updated");
            views.invalidate(INVOICES_PATH);
            ActionOutcome::Redirect(INVOICES_PATH.to_string())
        }
        Err(err) => {
            tracing::warn!(invoice_id = %id, error = %err, "invoice update failed");
            ActionOutcome::Rejected(FormState::with_message(
                "Database Error: Failed to Update Invoice.",
            ))
        }
    }
}

/// Delete an invoice by id and refresh the listing.
///
/// Deleting an unknown id is reported explicitly; the listing is only
/// invalidated when a row was actually removed.
pub async fn delete_invoice(
    store: &dyn InvoiceStore,
    views: &dyn ViewInvalidator,
    id: Uuid,
    behavior: DeleteBehavior,
) -> ActionOutcome {
    if behavior.simulate_failure {
        return ActionOutcome::Rejected(FormState::with_message("Failed to Delete Invoice."));
    }

    match store.delete(&id).await {
        Ok(0) => ActionOutcome::NotFound { id },
        Ok(_) => {
            tracing::info!(invoice_id = %id, "invoice deleted");
            views.invalidate(INVOICES_PATH);
            ActionOutcome::Completed {
                message: "Deleted Invoice.".to_string(),
            }
        }
        Err(err) => {
            tracing::warn!(invoice_id = %id, error = %err, "invoice delete failed");
            ActionOutcome::Rejected(FormState::with_message(
                "Database Error: Failed to Delete Invoice.",
            ))
        }
    }
}

/// Convert a submitted amount in whole currency units to integer cents,
/// truncating toward zero.
fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).trunc() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_cents_whole_amount() {
        assert_eq!(to_cents(100.0), 10_000);
    }

    #[test]
    fn test_to_cents_truncates_sub_cent_precision() {
        assert_eq!(to_cents(10.509), 1_050);
        assert_eq!(to_cents(0.999), 99);
    }

    #[test]
    fn test_to_cents_fractional_amount() {
        assert_eq!(to_cents(15.5), 1_550);
    }
}
