//! Insight and dashboard handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};

use super::bad_query;
use super::reports::{resolve_as_of, AsOfQuery};
use crate::{AppError, AppState};
use tally_core::insights::{
    budget_comparison, current_month_category_totals, derive_insights, DashboardSummary, Insight,
};

/// GET /api/insights - Status messages for the current month
pub async fn list_insights(
    State(state): State<Arc<AppState>>,
    query: Result<Query<AsOfQuery>, QueryRejection>,
) -> Result<Json<Vec<Insight>>, AppError> {
    let Query(params) = query.map_err(bad_query)?;
    let as_of = resolve_as_of(params.as_of.as_deref())?;
    let transactions = state.db.list_transactions()?;
    let budgets = state.db.list_budgets()?;

    let comparison = budget_comparison(&transactions, &budgets, as_of);
    let current_month = current_month_category_totals(&transactions, as_of);
    Ok(Json(derive_insights(&comparison, &current_month)))
}

/// GET /api/dashboard - Everything the dashboard renders
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    query: Result<Query<AsOfQuery>, QueryRejection>,
) -> Result<Json<DashboardSummary>, AppError> {
    let Query(params) = query.map_err(bad_query)?;
    let as_of = resolve_as_of(params.as_of.as_deref())?;
    let transactions = state.db.list_transactions()?;
    let budgets = state.db.list_budgets()?;

    Ok(Json(DashboardSummary::build(&transactions, &budgets, as_of)))
}
