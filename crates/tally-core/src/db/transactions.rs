//! Transaction operations

use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::{category_from_sql, date_from_sql, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction};

const TRANSACTION_COLUMNS: &str = "id, amount, date, description, category, created_at";

impl Database {
    /// Insert a transaction, returning its new ID
    pub fn insert_transaction(&self, tx: &NewTransaction) -> Result<i64> {
        tx.validate()?;
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO transactions (amount, date, description, category) VALUES (?, ?, ?, ?)",
            params![
                tx.amount,
                tx.date.to_string(),
                tx.description.trim(),
                tx.category.as_str(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!(id, category = %tx.category, amount = tx.amount, "Inserted transaction");
        Ok(id)
    }

    /// List all transactions, newest first
    pub fn list_transactions(&self) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM transactions ORDER BY date DESC, id DESC",
            TRANSACTION_COLUMNS
        ))?;

        let transactions = stmt
            .query_map([], |row| Self::row_to_transaction(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Get a single transaction by ID
    pub fn get_transaction(&self, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let transaction = conn
            .query_row(
                &format!("SELECT {} FROM transactions WHERE id = ?", TRANSACTION_COLUMNS),
                params![id],
                |row| Self::row_to_transaction(row),
            )
            .optional()?;

        Ok(transaction)
    }

    /// Get a transaction that must exist
    pub fn require_transaction(&self, id: i64) -> Result<Transaction> {
        self.get_transaction(id)?
            .ok_or_else(|| Error::NotFound(format!("Transaction {}", id)))
    }

    /// Replace every editable field of a transaction
    ///
    /// Returns false if no transaction has that ID.
    pub fn update_transaction(&self, id: i64, tx: &NewTransaction) -> Result<bool> {
        tx.validate()?;
        let conn = self.conn()?;

        let updated = conn.execute(
            "UPDATE transactions SET amount = ?, date = ?, description = ?, category = ? WHERE id = ?",
            params![
                tx.amount,
                tx.date.to_string(),
                tx.description.trim(),
                tx.category.as_str(),
                id,
            ],
        )?;

        Ok(updated > 0)
    }

    /// Delete a transaction
    ///
    /// Returns false if no transaction has that ID.
    pub fn delete_transaction(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM transactions WHERE id = ?", params![id])?;
        Ok(deleted > 0)
    }

    /// Count total transactions
    pub fn count_transactions(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Helper to convert a row to Transaction
    /// Column order: id, amount, date, description, category, created_at
    pub(crate) fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
        let date_str: String = row.get(2)?;
        let category_str: String = row.get(4)?;
        let created_at_str: String = row.get(5)?;
        Ok(Transaction {
            id: row.get(0)?,
            amount: row.get(1)?,
            date: date_from_sql(2, date_str)?,
            description: row.get(3)?,
            category: category_from_sql(4, category_str)?,
            created_at: parse_datetime(&created_at_str),
        })
    }
}
