//! Budget operations
//!
//! Budgets are append-only: setting a new cap inserts a new record, and the most
//! recent record per category is the one that applies.

use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::{category_from_sql, date_from_sql, parse_datetime, Database};
use crate::error::Result;
use crate::insights::{effective_budgets, EffectiveBudget};
use crate::models::{Budget, NewBudget};

impl Database {
    /// Insert a budget record, returning its new ID
    pub fn insert_budget(&self, budget: &NewBudget) -> Result<i64> {
        budget.validate()?;
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO budgets (category, amount, month) VALUES (?, ?, ?)",
            params![
                budget.category.as_str(),
                budget.amount,
                budget.month.to_string(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!(id, category = %budget.category, amount = budget.amount, "Inserted budget");
        Ok(id)
    }

    /// Get a single budget record by ID
    pub fn get_budget(&self, id: i64) -> Result<Option<Budget>> {
        let conn = self.conn()?;
        let budget = conn
            .query_row(
                "SELECT id, category, amount, month, created_at FROM budgets WHERE id = ?",
                params![id],
                |row| Self::row_to_budget(row),
            )
            .optional()?;

        Ok(budget)
    }

    /// List every budget record in insertion order
    pub fn list_budgets(&self) -> Result<Vec<Budget>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT id, category, amount, month, created_at FROM budgets ORDER BY id")?;

        let budgets = stmt
            .query_map([], |row| Self::row_to_budget(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(budgets)
    }

    /// The cap that currently applies to each budgeted category
    pub fn list_effective_budgets(&self) -> Result<Vec<EffectiveBudget>> {
        Ok(effective_budgets(&self.list_budgets()?))
    }

    fn row_to_budget(row: &rusqlite::Row) -> rusqlite::Result<Budget> {
        let category_str: String = row.get(1)?;
        let month_str: String = row.get(3)?;
        let created_at_str: String = row.get(4)?;
        Ok(Budget {
            id: row.get(0)?,
            category: category_from_sql(1, category_str)?,
            amount: row.get(2)?,
            month: date_from_sql(3, month_str)?,
            created_at: parse_datetime(&created_at_str),
        })
    }
}
