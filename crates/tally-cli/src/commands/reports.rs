//! Dashboard, insight and report command implementations

use anyhow::Result;
use chrono::NaiveDate;
use tally_core::db::Database;
use tally_core::insights::{
    all_time_category_totals, budget_comparison, current_month_category_totals, derive_insights,
    monthly_totals, DashboardSummary, Insight, Severity, MAX_MONTH_WINDOW,
};

use super::truncate;

/// Width of the longest bar in text charts
const BAR_WIDTH: usize = 30;

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Alert => "🚨",
        Severity::Warning => "⚠️ ",
        Severity::Attention => "💡",
        Severity::Info => "✅",
    }
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return String::new();
    }
    let width = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(width.min(BAR_WIDTH))
}

fn print_insights(insights: &[Insight]) {
    for insight in insights {
        println!(
            "   {} {}",
            severity_icon(insight.severity()),
            insight.message
        );
    }
}

pub fn cmd_dashboard(db: &Database, as_of: NaiveDate, json: bool) -> Result<()> {
    let transactions = db.list_transactions()?;
    let budgets = db.list_budgets()?;
    let summary = DashboardSummary::build(&transactions, &budgets, as_of);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│           💰 Tally Dashboard            │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  As of:           {}", summary.as_of);
    println!("  Total expenses:  ${:.2}", summary.total_expenses);
    println!("  Transactions:    {}", summary.transaction_count);
    println!("  Top category:    {}", summary.top_category_label());
    println!(
        "  Latest:          {}",
        summary
            .latest_transaction_date
            .map_or_else(|| "N/A".to_string(), |d| d.to_string())
    );

    if !summary.recent_transactions.is_empty() {
        println!();
        println!("  📝 Recent");
        for tx in &summary.recent_transactions {
            println!(
                "   {} │ {:>10} │ {}",
                tx.date,
                format!("${:.2}", tx.amount),
                truncate(&tx.description, 30)
            );
        }
    }

    if !summary.insights.is_empty() {
        println!();
        println!("  🔎 Insights");
        print_insights(&summary.insights);
    }
    println!();

    Ok(())
}

pub fn cmd_insights(db: &Database, as_of: NaiveDate) -> Result<()> {
    let transactions = db.list_transactions()?;
    let budgets = db.list_budgets()?;

    let comparison = budget_comparison(&transactions, &budgets, as_of);
    let current_month = current_month_category_totals(&transactions, as_of);
    let insights = derive_insights(&comparison, &current_month);

    if insights.is_empty() {
        println!("Nothing to report for {}.", as_of.format("%B %Y"));
        return Ok(());
    }

    println!();
    println!("🔎 Insights for {}", as_of.format("%B %Y"));
    println!("   ─────────────────────────────────────────────");
    print_insights(&insights);

    Ok(())
}

pub fn cmd_report_categories(db: &Database, month_only: bool, as_of: NaiveDate) -> Result<()> {
    let transactions = db.list_transactions()?;
    let (title, totals) = if month_only {
        (
            format!("Spending by Category ({})", as_of.format("%B %Y")),
            current_month_category_totals(&transactions, as_of),
        )
    } else {
        (
            "Spending by Category (all time)".to_string(),
            all_time_category_totals(&transactions),
        )
    };

    if totals.is_empty() {
        println!("No spending recorded.");
        return Ok(());
    }

    let grand_total = totals.total();
    let max = totals.iter().map(|e| e.amount).fold(0.0, f64::max);

    println!();
    println!("📊 {}", title);
    println!("   ─────────────────────────────────────────────────────────────");
    for entry in totals.iter() {
        let share = if grand_total > 0.0 {
            entry.amount / grand_total * 100.0
        } else {
            0.0
        };
        println!(
            "   {:<14} │ {:>10} │ {:>5.1}% │ {}",
            entry.category.as_str(),
            format!("${:.2}", entry.amount),
            share,
            bar(entry.amount, max)
        );
    }
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   {:<14} │ {:>10}", "Total", format!("${:.2}", grand_total));

    Ok(())
}

pub fn cmd_report_monthly(db: &Database, months: usize, as_of: NaiveDate) -> Result<()> {
    if !(1..=MAX_MONTH_WINDOW).contains(&months) {
        anyhow::bail!("--months must be between 1 and {}", MAX_MONTH_WINDOW);
    }

    let transactions = db.list_transactions()?;
    let totals = monthly_totals(&transactions, as_of, months);
    let max = totals.iter().map(|m| m.total).fold(0.0, f64::max);

    println!();
    println!("📅 Monthly Spending");
    println!("   ─────────────────────────────────────────────────────────────");
    for month in &totals {
        println!(
            "   {:<8} │ {:>10} │ {}",
            month.month,
            format!("${:.2}", month.total),
            bar(month.total, max)
        );
    }

    Ok(())
}

pub fn cmd_report_budgets(db: &Database, as_of: NaiveDate) -> Result<()> {
    let transactions = db.list_transactions()?;
    let budgets = db.list_budgets()?;
    let rows = budget_comparison(&transactions, &budgets, as_of);

    if rows.is_empty() {
        println!("No budgets set. Add one with:");
        println!("  tally budgets set Food 300");
        return Ok(());
    }

    println!();
    println!("📋 Budget vs. Actual ({})", as_of.format("%B %Y"));
    println!("   ─────────────────────────────────────────────────────────────");
    for row in &rows {
        let used = if row.budget_amount > 0.0 {
            row.spent_amount / row.budget_amount * 100.0
        } else {
            0.0
        };
        println!(
            "   {:<14} │ {:>10} of {:>10} │ {:>4.0}%",
            row.category.as_str(),
            format!("${:.2}", row.spent_amount),
            format!("${:.2}", row.budget_amount),
            used
        );
    }

    Ok(())
}
