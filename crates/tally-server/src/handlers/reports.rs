//! Report handlers
//!
//! Every report is computed over the full stored history for a reference date.
//! `as_of` defaults to today's UTC date.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::bad_query;
use crate::{AppError, AppState};
use tally_core::insights::{
    all_time_category_totals, budget_comparison, current_month_category_totals, monthly_totals,
    BudgetComparison, CategoryTotals, MonthlyTotal, DEFAULT_MONTH_WINDOW, MAX_MONTH_WINDOW,
};
use tally_core::models::parse_date;

/// Resolve the reference date for a report
pub fn resolve_as_of(as_of: Option<&str>) -> Result<NaiveDate, AppError> {
    match as_of {
        Some(s) => parse_date(s)
            .map_err(|_| AppError::bad_request("Invalid as_of date format (use YYYY-MM-DD)")),
        None => Ok(Utc::now().date_naive()),
    }
}

/// Query parameters shared by reports that only need a reference date
#[derive(Debug, Deserialize)]
pub struct AsOfQuery {
    pub as_of: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryReportQuery {
    /// `all` (default) or `month`
    pub scope: Option<String>,
    pub as_of: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoryReport {
    pub scope: &'static str,
    pub as_of: NaiveDate,
    pub total: f64,
    pub categories: CategoryTotals,
}

/// GET /api/reports/categories - Spending per category (all time or current month)
pub async fn report_categories(
    State(state): State<Arc<AppState>>,
    query: Result<Query<CategoryReportQuery>, QueryRejection>,
) -> Result<Json<CategoryReport>, AppError> {
    let Query(params) = query.map_err(bad_query)?;
    let as_of = resolve_as_of(params.as_of.as_deref())?;
    let transactions = state.db.list_transactions()?;

    let (scope, categories) = match params.scope.as_deref().unwrap_or("all") {
        "all" => ("all", all_time_category_totals(&transactions)),
        "month" => ("month", current_month_category_totals(&transactions, as_of)),
        other => {
            return Err(AppError::bad_request(&format!(
                "Invalid scope: {} (use all or month)",
                other
            )))
        }
    };

    Ok(Json(CategoryReport {
        scope,
        as_of,
        total: categories.total(),
        categories,
    }))
}

#[derive(Debug, Deserialize)]
pub struct MonthlyReportQuery {
    pub months: Option<usize>,
    pub as_of: Option<String>,
}

/// GET /api/reports/monthly - Zero-filled spending per month, oldest first
pub async fn report_monthly(
    State(state): State<Arc<AppState>>,
    query: Result<Query<MonthlyReportQuery>, QueryRejection>,
) -> Result<Json<Vec<MonthlyTotal>>, AppError> {
    let Query(params) = query.map_err(bad_query)?;
    let as_of = resolve_as_of(params.as_of.as_deref())?;
    let months = params.months.unwrap_or(DEFAULT_MONTH_WINDOW);
    if !(1..=MAX_MONTH_WINDOW).contains(&months) {
        return Err(AppError::bad_request(&format!(
            "months must be between 1 and {}",
            MAX_MONTH_WINDOW
        )));
    }

    let transactions = state.db.list_transactions()?;
    Ok(Json(monthly_totals(&transactions, as_of, months)))
}

/// GET /api/reports/budget-comparison - Budget vs. actual for the current month
pub async fn report_budget_comparison(
    State(state): State<Arc<AppState>>,
    query: Result<Query<AsOfQuery>, QueryRejection>,
) -> Result<Json<Vec<BudgetComparison>>, AppError> {
    let Query(params) = query.map_err(bad_query)?;
    let as_of = resolve_as_of(params.as_of.as_deref())?;
    let transactions = state.db.list_transactions()?;
    let budgets = state.db.list_budgets()?;

    Ok(Json(budget_comparison(&transactions, &budgets, as_of)))
}
