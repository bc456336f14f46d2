//! Dashboard overview page data

use super::AppState;
use crate::core::error::AppError;
use crate::data;
use crate::model::{CardData, LatestInvoice, Revenue};
use axum::Json;
use axum::extract::State;
use serde::Serialize;

/// Payload for the dashboard overview: the four cards, the revenue chart
/// series and the five most recent invoices.
#[derive(Debug, Serialize)]
pub struct DashboardPage {
    pub cards: CardData,
    pub revenue: Vec<Revenue>,
    pub latest_invoices: Vec<LatestInvoice>,
}

/// GET /dashboard
///
/// The three fetches are independent reads and run concurrently.
pub async fn overview(State(state): State<AppState>) -> Result<Json<DashboardPage>, AppError> {
    let (cards, revenue, latest_invoices) = tokio::try_join!(
        data::fetch_card_data(state.invoices.as_ref(), state.customers.as_ref()),
        data::fetch_revenue(state.revenue.as_ref()),
        data::fetch_latest_invoices(state.invoices.as_ref()),
    )?;

    Ok(Json(DashboardPage {
        cards,
        revenue,
        latest_invoices,
    }))
}
