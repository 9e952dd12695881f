//! Budget command implementations

use anyhow::{Context, Result};
use chrono::Utc;
use tally_core::db::Database;
use tally_core::models::{first_of_month, parse_month, NewBudget};
use tracing::info;

use super::parse_category;

pub fn cmd_budgets_list(db: &Database) -> Result<()> {
    let budgets = db.list_budgets()?;

    if budgets.is_empty() {
        println!("No budgets set. Add one with:");
        println!("  tally budgets set Food 300");
        return Ok(());
    }

    println!();
    println!("📋 Budget History");
    println!("   ─────────────────────────────────────────────");

    for budget in budgets {
        println!(
            "   [{}] {:<14} │ {:>10} │ {}",
            budget.id,
            budget.category.as_str(),
            format!("${:.2}", budget.amount),
            budget.month.format("%b %Y")
        );
    }

    Ok(())
}

pub fn cmd_budgets_set(
    db: &Database,
    category: &str,
    amount: f64,
    month: Option<&str>,
) -> Result<()> {
    let budget = NewBudget {
        category: parse_category(category)?,
        amount,
        month: match month {
            Some(s) => parse_month(s)?,
            None => first_of_month(Utc::now().date_naive()),
        },
    };

    let id = db.insert_budget(&budget).context("Failed to set budget")?;
    info!(id, category = %budget.category, "Set budget");

    println!(
        "✅ {} budget set to ${:.2} per month (ID: {})",
        budget.category, budget.amount, id
    );
    Ok(())
}

pub fn cmd_budgets_effective(db: &Database) -> Result<()> {
    let budgets = db.list_effective_budgets()?;

    if budgets.is_empty() {
        println!("No budgets set.");
        return Ok(());
    }

    println!();
    println!("📋 Current Budgets");
    println!("   ─────────────────────────────");

    for budget in budgets {
        println!(
            "   {:<14} │ {:>10}",
            budget.category.as_str(),
            format!("${:.2}", budget.amount)
        );
    }

    Ok(())
}
