//! Budget handlers

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use super::read_json;
use crate::{AppError, AppState};
use tally_core::insights::EffectiveBudget;
use tally_core::models::{first_of_month, parse_month, Budget, Category, NewBudget};

/// Request body for setting a budget
#[derive(Debug, Deserialize)]
pub struct BudgetRequest {
    pub category: String,
    pub amount: f64,
    /// `YYYY-MM` or a date within the month (defaults to the current month)
    pub month: Option<String>,
}

/// GET /api/budgets - Every budget record, oldest first
pub async fn list_budgets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Budget>>, AppError> {
    Ok(Json(state.db.list_budgets()?))
}

/// POST /api/budgets - Set a monthly cap for a category
///
/// Earlier caps for the same category are kept as history; the new one applies.
pub async fn create_budget(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Budget>, AppError> {
    let req: BudgetRequest = read_json(request).await?;

    let category: Category = req
        .category
        .parse()
        .map_err(|e: String| AppError::bad_request(&e))?;
    let month = match req.month.as_deref() {
        Some(s) => parse_month(s).map_err(AppError::from_core)?,
        None => first_of_month(Utc::now().date_naive()),
    };

    let budget = NewBudget {
        category,
        amount: req.amount,
        month,
    };
    let id = state
        .db
        .insert_budget(&budget)
        .map_err(AppError::from_core)?;
    info!(id, category = %category, amount = budget.amount, "Set budget");

    let stored = state
        .db
        .get_budget(id)?
        .ok_or_else(|| AppError::internal("Budget not found after creation"))?;
    Ok(Json(stored))
}

/// GET /api/budgets/effective - The cap that applies to each budgeted category
pub async fn list_effective_budgets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<EffectiveBudget>>, AppError> {
    Ok(Json(state.db.list_effective_budgets()?))
}
