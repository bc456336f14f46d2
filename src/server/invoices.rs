//! Invoice listing, lookup and mutation endpoints

use super::AppState;
use crate::actions::{self, ActionOutcome};
use crate::core::error::AppError;
use crate::core::query::ListQuery;
use crate::data;
use crate::model::{Customer, Invoice, InvoiceRow};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// One page of the invoices listing.
#[derive(Debug, Serialize)]
pub struct InvoicesPage {
    pub invoices: Vec<InvoiceRow>,
    pub total_pages: usize,
    pub query: String,
    pub page: usize,
}

/// Payload for the edit form: the invoice under edit plus the customer
/// list for the selection control.
#[derive(Debug, Serialize)]
pub struct EditInvoicePage {
    pub invoice: Invoice,
    pub customers: Vec<Customer>,
}

/// GET /dashboard/invoices?query=&page=
///
/// Served through the view cache: a hit skips the store entirely, and the
/// action pipeline evicts the whole listing family on every successful
/// mutation.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Value>, AppError> {
    let page = params.page();
    let key = format!(
        "{}?query={}&page={}",
        actions::INVOICES_PATH,
        params.query,
        page
    );

    if let Some(cached) = state.views.get(&key) {
        return Ok(Json(cached));
    }

    let (invoices, total_pages) = tokio::try_join!(
        data::fetch_filtered_invoices(
            state.invoices.as_ref(),
            &params.query,
            page,
            state.page_size
        ),
        data::fetch_invoices_pages(state.invoices.as_ref(), &params.query, state.page_size),
    )?;

    let payload = serde_json::to_value(InvoicesPage {
        invoices,
        total_pages,
        query: params.query,
        page,
    })
    .map_err(|e| AppError::Internal(e.to_string()))?;

    state.views.put(key, payload.clone());
    Ok(Json(payload))
}

/// GET /dashboard/invoices/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Invoice>, AppError> {
    let invoice = data::fetch_invoice_by_id(state.invoices.as_ref(), id).await?;
    invoice.map(Json).ok_or(AppError::NotFound {
        resource: "invoice",
        id,
    })
}

/// GET /dashboard/invoices/{id}/edit
///
/// The invoice and the customer list are independent reads and run
/// concurrently.
pub async fn edit_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EditInvoicePage>, AppError> {
    let (invoice, customers) = tokio::try_join!(
        data::fetch_invoice_by_id(state.invoices.as_ref(), id),
        data::fetch_customers(state.customers.as_ref()),
    )?;

    let invoice = invoice.ok_or(AppError::NotFound {
        resource: "invoice",
        id,
    })?;

    Ok(Json(EditInvoicePage { invoice, customers }))
}

/// POST /dashboard/invoices
pub async fn create(State(state): State<AppState>, Json(payload): Json<Value>) -> Response {
    let outcome =
        actions::create_invoice(state.invoices.as_ref(), state.views.as_ref(), &payload).await;
    outcome_response(outcome)
}

/// PUT /dashboard/invoices/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<Value>,
) -> Response {
    let outcome =
        actions::update_invoice(state.invoices.as_ref(), state.views.as_ref(), id, &payload).await;
    outcome_response(outcome)
}

/// DELETE /dashboard/invoices/{id}
pub async fn remove(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let outcome = actions::delete_invoice(
        state.invoices.as_ref(),
        state.views.as_ref(),
        id,
        state.delete_behavior,
    )
    .await;
    outcome_response(outcome)
}

/// Translate an action outcome into a response.
///
/// Successful create/update navigate with 303 so the client re-fetches the
/// listing with GET. Rejections with field errors are the submitter's to
/// fix (422); rejections without field errors are persistence failures
/// (500). A missing mutation target is the not-found signal (404).
fn outcome_response(outcome: ActionOutcome) -> Response {
    match outcome {
        ActionOutcome::Redirect(path) => Redirect::to(&path).into_response(),
        ActionOutcome::Completed { message } => {
            (StatusCode::OK, Json(serde_json::json!({ "message": message }))).into_response()
        }
        ActionOutcome::Rejected(form) => {
            let status = if form.has_field_errors() {
                StatusCode::UNPROCESSABLE_ENTITY
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, Json(form)).into_response()
        }
        ActionOutcome::NotFound { id } => AppError::NotFound {
            resource: "invoice",
            id,
        }
        .into_response(),
    }
}
