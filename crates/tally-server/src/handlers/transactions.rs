//! Transaction handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, Request, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use super::{bad_path, read_json};
use crate::{AppError, AppState, SuccessResponse};
use tally_core::models::{parse_date, Category, NewTransaction, Transaction};

/// Request body for creating or replacing a transaction
#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    pub amount: f64,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp
    pub date: String,
    pub description: String,
    pub category: String,
}

impl TransactionRequest {
    fn into_new_transaction(self) -> Result<NewTransaction, AppError> {
        let category: Category = self
            .category
            .parse()
            .map_err(|e: String| AppError::bad_request(&e))?;
        let date = parse_date(&self.date).map_err(AppError::from_core)?;

        let tx = NewTransaction {
            amount: self.amount,
            date,
            description: self.description,
            category,
        };
        tx.validate().map_err(AppError::from_core)?;
        Ok(tx)
    }
}

/// GET /api/transactions - List all transactions, newest first
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    Ok(Json(state.db.list_transactions()?))
}

/// POST /api/transactions - Record a transaction
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Transaction>, AppError> {
    let req: TransactionRequest = read_json(request).await?;
    let tx = req.into_new_transaction()?;

    let id = state
        .db
        .insert_transaction(&tx)
        .map_err(AppError::from_core)?;
    info!(id, category = %tx.category, amount = tx.amount, "Created transaction");

    let stored = state
        .db
        .get_transaction(id)?
        .ok_or_else(|| AppError::internal("Transaction not found after creation"))?;
    Ok(Json(stored))
}

/// GET /api/transactions/:id - Get a single transaction
pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Transaction>, AppError> {
    let Path(id) = path.map_err(bad_path)?;
    let tx = state
        .db
        .get_transaction(id)?
        .ok_or_else(|| AppError::not_found(&format!("Transaction {} not found", id)))?;
    Ok(Json(tx))
}

/// PUT /api/transactions/:id - Replace every field of a transaction
pub async fn update_transaction(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    request: Request,
) -> Result<Json<Transaction>, AppError> {
    let Path(id) = path.map_err(bad_path)?;
    let req: TransactionRequest = read_json(request).await?;
    let tx = req.into_new_transaction()?;

    let updated = state
        .db
        .update_transaction(id, &tx)
        .map_err(AppError::from_core)?;
    if !updated {
        return Err(AppError::not_found(&format!(
            "Transaction {} not found",
            id
        )));
    }
    info!(id, "Updated transaction");

    let stored = state.db.require_transaction(id).map_err(AppError::from_core)?;
    Ok(Json(stored))
}

/// DELETE /api/transactions/:id - Delete a transaction
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let Path(id) = path.map_err(bad_path)?;
    if !state.db.delete_transaction(id)? {
        return Err(AppError::not_found(&format!(
            "Transaction {} not found",
            id
        )));
    }
    info!(id, "Deleted transaction");

    Ok(Json(SuccessResponse { success: true }))
}
