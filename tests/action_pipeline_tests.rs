//! Tests for the invoice action pipeline
//!
//! These tests verify that:
//! - Validation failures are recovered into field-level form state and
//!   never reach the store
//! - Valid submissions persist with cents conversion and a server-stamped
//!   date
//! - The cached listing is invalidated after every successful mutation and
//!   only then
//! - Missing targets are reported explicitly

use chrono::Utc;
use factura::actions::{
    ActionOutcome, DeleteBehavior, INVOICES_PATH, create_invoice, delete_invoice, update_invoice,
};
use factura::model::{Customer, InvoiceStatus, NewInvoice};
use factura::storage::InMemoryStore;
use factura::prelude::InvoiceStore;
use factura::views::RecordingInvalidator;
use serde_json::json;
use uuid::Uuid;

fn seeded_store() -> (InMemoryStore, Customer) {
    let store = InMemoryStore::new();
    let customer = Customer {
        id: Uuid::new_v4(),
        name: "Lee Robinson".to_string(),
        email: "lee@robinson.com".to_string(),
        image_url: "/customers/lee-robinson.png".to_string(),
    };
    store.insert_customer(customer.clone()).unwrap();
    (store, customer)
}

async fn existing_invoice(store: &InMemoryStore, customer: &Customer) -> Uuid {
    store
        .insert(NewInvoice {
            customer_id: customer.id.to_string(),
            amount: 5_000,
            status: InvoiceStatus::Pending,
            date: Utc::now().date_naive(),
        })
        .await
        .unwrap()
        .id
}

// =============================================================================
// Create
// =============================================================================

mod create {
    use super::*;

    #[tokio::test]
    async fn test_valid_submission_persists_cents_and_redirects() {
        let (store, customer) = seeded_store();
        let views = RecordingInvalidator::new();

        let outcome = create_invoice(
            &store,
            &views,
            &json!({
                "customerId": customer.id.to_string(),
                "amount": "100",
                "status": "pending"
            }),
        )
        .await;

        assert_eq!(outcome, ActionOutcome::Redirect(INVOICES_PATH.to_string()));
        assert_eq!(views.invalidated(), vec![INVOICES_PATH]);

        let rows = store.list_filtered("", 10, 0).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].amount, 10_000);
        assert_eq!(rows[0].status, InvoiceStatus::Pending);
        assert_eq!(rows[0].customer_id, customer.id);
        assert_eq!(rows[0].date, Utc::now().date_naive());
    }

    #[tokio::test]
    async fn test_empty_submission_returns_all_three_field_errors() {
        let (store, _customer) = seeded_store();
        let views = RecordingInvalidator::new();

        let outcome = create_invoice(
            &store,
            &views,
            &json!({ "customerId": "", "amount": "0", "status": "" }),
        )
        .await;

        let ActionOutcome::Rejected(form) = outcome else {
            panic!("expected rejection, got {outcome:?}");
        };
        assert_eq!(
            form.message.as_deref(),
            Some("Missing Fields. Failed to Create Invoice.")
        );
        assert_eq!(form.errors.len(), 3);
        assert_eq!(
            form.field("customerId").unwrap(),
            ["Please select a customer."]
        );
        assert_eq!(
            form.field("amount").unwrap(),
            ["Please enter an amount greater than $0."]
        );
        assert_eq!(
            form.field("status").unwrap(),
            ["Please select an invoice status."]
        );

        // No persistence attempt, no invalidation
        assert_eq!(store.count_filtered("").await.unwrap(), 0);
        assert!(views.invalidated().is_empty());
    }

    #[tokio::test]
    async fn test_non_numeric_amount_never_reaches_the_store() {
        let (store, customer) = seeded_store();
        let views = RecordingInvalidator::new();

        let outcome = create_invoice(
            &store,
            &views,
            &json!({
                "customerId": customer.id.to_string(),
                "amount": "ten dollars",
                "status": "paid"
            }),
        )
        .await;

        let ActionOutcome::Rejected(form) = outcome else {
            panic!("expected rejection, got {outcome:?}");
        };
        assert_eq!(
            form.field("amount").unwrap(),
            ["Please enter an amount greater than $0."]
        );
        assert_eq!(store.count_filtered("").await.unwrap(), 0);
        assert!(views.invalidated().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_customer_reference_is_a_database_error() {
        let (store, _customer) = seeded_store();
        let views = RecordingInvalidator::new();

        let outcome = create_invoice(
            &store,
            &views,
            &json!({
                "customerId": Uuid::new_v4().to_string(),
                "amount": "50",
                "status": "paid"
            }),
        )
        .await;

        let ActionOutcome::Rejected(form) = outcome else {
            panic!("expected rejection, got {outcome:?}");
        };
        assert!(!form.has_field_errors());
        assert_eq!(
            form.message.as_deref(),
            Some("Database Error: Failed to Create Invoice.")
        );
        assert!(views.invalidated().is_empty());
    }

    #[tokio::test]
    async fn test_fractional_amount_truncates_to_cents() {
        let (store, customer) = seeded_store();
        let views = RecordingInvalidator::new();

        create_invoice(
            &store,
            &views,
            &json!({
                "customerId": customer.id.to_string(),
                "amount": "10.509",
                "status": "paid"
            }),
        )
        .await;

        let rows = store.list_filtered("", 10, 0).await.unwrap();
        assert_eq!(rows[0].amount, 1_050);
    }
}

// =============================================================================
// Update
// =============================================================================

mod update {
    use super::*;

    #[tokio::test]
    async fn test_update_changes_fields_and_redirects() {
        let (store, customer) = seeded_store();
        let views = RecordingInvalidator::new();
        let id = existing_invoice(&store, &customer).await;

        let outcome = update_invoice(
            &store,
            &views,
            id,
            &json!({
                "customerId": customer.id.to_string(),
                "amount": "250",
                "status": "paid"
            }),
        )
        .await;

        assert_eq!(outcome, ActionOutcome::Redirect(INVOICES_PATH.to_string()));
        assert_eq!(views.invalidated(), vec![INVOICES_PATH]);

        let updated = store.get(&id).await.unwrap().unwrap();
        assert_eq!(updated.amount, 25_000);
        assert_eq!(updated.status, InvoiceStatus::Paid);
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_date_immutable() {
        let (store, customer) = seeded_store();
        let views = RecordingInvalidator::new();
        let id = existing_invoice(&store, &customer).await;
        let before = store.get(&id).await.unwrap().unwrap();

        update_invoice(
            &store,
            &views,
            id,
            &json!({
                "customerId": customer.id.to_string(),
                "amount": "1",
                "status": "paid"
            }),
        )
        .await;

        let after = store.get(&id).await.unwrap().unwrap();
        assert_eq!(after.id, before.id);
        assert_eq!(after.date, before.date);
    }

    #[tokio::test]
    async fn test_update_validation_failure_reports_fields() {
        let (store, customer) = seeded_store();
        let views = RecordingInvalidator::new();
        let id = existing_invoice(&store, &customer).await;

        let outcome = update_invoice(
            &store,
            &views,
            id,
            &json!({ "customerId": "", "amount": "-3", "status": "unknown" }),
        )
        .await;

        let ActionOutcome::Rejected(form) = outcome else {
            panic!("expected rejection, got {outcome:?}");
        };
        assert_eq!(
            form.message.as_deref(),
            Some("Missing Fields. Failed to Update Invoice.")
        );
        assert_eq!(form.errors.len(), 3);

        // Original row untouched
        let unchanged = store.get(&id).await.unwrap().unwrap();
        assert_eq!(unchanged.amount, 5_000);
        assert!(views.invalidated().is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let (store, customer) = seeded_store();
        let views = RecordingInvalidator::new();
        let missing = Uuid::new_v4();

        let outcome = update_invoice(
            &store,
            &views,
            missing,
            &json!({
                "customerId": customer.id.to_string(),
                "amount": "10",
                "status": "paid"
            }),
        )
        .await;

        assert_eq!(outcome, ActionOutcome::NotFound { id: missing });
        assert!(views.invalidated().is_empty());
    }
}

// =============================================================================
// Delete
// =============================================================================

mod delete {
    use super::*;

    #[tokio::test]
    async fn test_delete_removes_row_and_confirms() {
        let (store, customer) = seeded_store();
        let views = RecordingInvalidator::new();
        let id = existing_invoice(&store, &customer).await;

        let outcome = delete_invoice(&store, &views, id, DeleteBehavior::default()).await;

        assert_eq!(
            outcome,
            ActionOutcome::Completed {
                message: "Deleted Invoice.".to_string()
            }
        );
        assert_eq!(views.invalidated(), vec![INVOICES_PATH]);
        assert!(store.get(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_explicit_and_removes_nothing() {
        let (store, customer) = seeded_store();
        let views = RecordingInvalidator::new();
        let id = existing_invoice(&store, &customer).await;
        let missing = Uuid::new_v4();

        let outcome = delete_invoice(&store, &views, missing, DeleteBehavior::default()).await;

        assert_eq!(outcome, ActionOutcome::NotFound { id: missing });
        assert!(views.invalidated().is_empty());
        assert!(store.get(&id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_simulated_failure_fires_before_any_deletion() {
        let (store, customer) = seeded_store();
        let views = RecordingInvalidator::new();
        let id = existing_invoice(&store, &customer).await;

        let outcome = delete_invoice(
            &store,
            &views,
            id,
            DeleteBehavior {
                simulate_failure: true,
            },
        )
        .await;

        let ActionOutcome::Rejected(form) = outcome else {
            panic!("expected rejection, got {outcome:?}");
        };
        assert_eq!(form.message.as_deref(), Some("Failed to Delete Invoice."));
        assert!(!form.has_field_errors());

        // The row survived and nothing was invalidated
        assert!(store.get(&id).await.unwrap().is_some());
        assert!(views.invalidated().is_empty());
    }
}

// =============================================================================
// Read path
// =============================================================================

mod read_path {
    use super::*;
    use factura::data;

    #[tokio::test]
    async fn test_fetch_unknown_invoice_is_none_not_an_error() {
        let (store, _customer) = seeded_store();
        let fetched = data::fetch_invoice_by_id(&store, Uuid::new_v4()).await.unwrap();
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn test_page_count_is_ceiling_of_matches_over_page_size() {
        let (store, customer) = seeded_store();
        for _ in 0..13 {
            existing_invoice(&store, &customer).await;
        }

        assert_eq!(data::fetch_invoices_pages(&store, "", 6).await.unwrap(), 3);
        assert_eq!(data::fetch_invoices_pages(&store, "", 13).await.unwrap(), 1);
        assert_eq!(
            data::fetch_invoices_pages(&store, "no-such-customer", 6)
                .await
                .unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_filtered_page_never_exceeds_page_size() {
        let (store, customer) = seeded_store();
        for _ in 0..13 {
            existing_invoice(&store, &customer).await;
        }

        let page1 = data::fetch_filtered_invoices(&store, "", 1, 6).await.unwrap();
        let page3 = data::fetch_filtered_invoices(&store, "", 3, 6).await.unwrap();
        assert_eq!(page1.len(), 6);
        assert_eq!(page3.len(), 1);
    }

    #[tokio::test]
    async fn test_card_data_formats_totals() {
        let (store, customer) = seeded_store();
        store
            .insert(NewInvoice {
                customer_id: customer.id.to_string(),
                amount: 123_456,
                status: InvoiceStatus::Paid,
                date: Utc::now().date_naive(),
            })
            .await
            .unwrap();
        store
            .insert(NewInvoice {
                customer_id: customer.id.to_string(),
                amount: 500,
                status: InvoiceStatus::Pending,
                date: Utc::now().date_naive(),
            })
            .await
            .unwrap();

        let cards = data::fetch_card_data(&store, &store).await.unwrap();
        assert_eq!(cards.number_of_customers, 1);
        assert_eq!(cards.number_of_invoices, 2);
        assert_eq!(cards.total_paid_invoices, "$1,234.56");
        assert_eq!(cards.total_pending_invoices, "$5.00");
    }

    #[tokio::test]
    async fn test_latest_invoices_are_newest_five_with_formatted_amounts() {
        let (store, customer) = seeded_store();
        for (i, amount) in [100i64, 200, 300, 400, 500, 600, 700].iter().enumerate() {
            store
                .insert(NewInvoice {
                    customer_id: customer.id.to_string(),
                    amount: *amount,
                    status: InvoiceStatus::Paid,
                    date: chrono::NaiveDate::from_ymd_opt(2024, 1, (i + 1) as u32).unwrap(),
                })
                .await
                .unwrap();
        }

        let latest = data::fetch_latest_invoices(&store).await.unwrap();
        assert_eq!(latest.len(), 5);
        assert_eq!(latest[0].amount, "$7.00");
        assert_eq!(latest[0].name, "Lee Robinson");
    }
}
