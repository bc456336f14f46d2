//! Customer lookup endpoint

use super::AppState;
use crate::core::error::AppError;
use crate::data;
use crate::model::Customer;
use axum::Json;
use axum::extract::State;
use serde::Serialize;

/// Response for the customer list endpoint
#[derive(Debug, Serialize)]
pub struct CustomersResponse {
    pub customers: Vec<Customer>,
    pub count: usize,
}

/// GET /customers
pub async fn list(State(state): State<AppState>) -> Result<Json<CustomersResponse>, AppError> {
    let customers = data::fetch_customers(state.customers.as_ref()).await?;

    Ok(Json(CustomersResponse {
        count: customers.len(),
        customers,
    }))
}
