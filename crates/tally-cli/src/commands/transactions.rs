//! Transaction command implementations

use anyhow::{Context, Result};
use chrono::Utc;
use tally_core::db::Database;
use tally_core::models::{parse_date, NewTransaction};
use tracing::info;

use super::{parse_category, truncate};

/// Fields to change on an existing transaction (unset fields keep their value)
#[derive(Debug, Default)]
pub struct TransactionEdit<'a> {
    pub amount: Option<f64>,
    pub category: Option<&'a str>,
    pub description: Option<&'a str>,
    pub date: Option<&'a str>,
}

pub fn cmd_transactions_list(db: &Database, limit: usize) -> Result<()> {
    let transactions = db.list_transactions()?;

    if transactions.is_empty() {
        println!("No transactions found. Record one with:");
        println!("  tally transactions add -a 12.50 -c Food -d Lunch");
        return Ok(());
    }

    println!();
    println!("📝 Recent Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions.iter().take(limit) {
        println!(
            "   [{}] {} │ {:>10} │ {:<14} │ {}",
            tx.id,
            tx.date,
            format!("${:.2}", tx.amount),
            tx.category.as_str(),
            truncate(&tx.description, 35)
        );
    }

    if transactions.len() > limit {
        println!();
        println!(
            "   Showing {} of {}. Use --limit to see more.",
            limit,
            transactions.len()
        );
    }

    Ok(())
}

pub fn cmd_transactions_add(
    db: &Database,
    amount: f64,
    category: &str,
    description: &str,
    date: Option<&str>,
) -> Result<()> {
    let tx = NewTransaction {
        amount,
        date: match date {
            Some(s) => parse_date(s)?,
            None => Utc::now().date_naive(),
        },
        description: description.to_string(),
        category: parse_category(category)?,
    };

    let id = db
        .insert_transaction(&tx)
        .context("Failed to record transaction")?;
    info!(id, "Recorded transaction");

    println!(
        "✅ Recorded ${:.2} for {} on {} (ID: {})",
        tx.amount, tx.category, tx.date, id
    );
    Ok(())
}

pub fn cmd_transactions_edit(db: &Database, id: i64, edit: TransactionEdit<'_>) -> Result<()> {
    let existing = db
        .get_transaction(id)?
        .ok_or_else(|| anyhow::anyhow!("Transaction {} not found", id))?;

    let tx = NewTransaction {
        amount: edit.amount.unwrap_or(existing.amount),
        date: match edit.date {
            Some(s) => parse_date(s)?,
            None => existing.date,
        },
        description: edit
            .description
            .map(String::from)
            .unwrap_or(existing.description),
        category: match edit.category {
            Some(s) => parse_category(s)?,
            None => existing.category,
        },
    };

    if !db
        .update_transaction(id, &tx)
        .context("Failed to update transaction")?
    {
        anyhow::bail!("Transaction {} not found", id);
    }
    info!(id, "Updated transaction");

    println!(
        "✅ Updated transaction {}: ${:.2} │ {} │ {} │ {}",
        id, tx.amount, tx.date, tx.category, tx.description
    );
    Ok(())
}

pub fn cmd_transactions_delete(db: &Database, id: i64) -> Result<()> {
    let tx = db
        .get_transaction(id)?
        .ok_or_else(|| anyhow::anyhow!("Transaction {} not found", id))?;

    if !db.delete_transaction(id)? {
        anyhow::bail!("Transaction {} not found", id);
    }
    info!(id, "Deleted transaction");

    println!(
        "🗑️  Deleted transaction {}: {} (${:.2})",
        id,
        truncate(&tx.description, 40),
        tx.amount
    );
    Ok(())
}
