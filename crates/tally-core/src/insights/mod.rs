//! Spending aggregation and insights
//!
//! Everything in here is a pure function of already-loaded transactions and budgets.
//! Nothing reads the clock: callers pass the reference date (`as_of`) that decides
//! which calendar month counts as "current".
//!
//! - **Aggregate** - category totals, monthly buckets, budget vs. actual
//! - **Engine** - threshold-based status messages per budgeted category
//! - **Summary** - everything the dashboard shows, in one value
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_core::insights::DashboardSummary;
//!
//! let summary = DashboardSummary::build(&db.list_transactions()?, &db.list_budgets()?, today);
//! for insight in &summary.insights {
//!     println!("{}", insight.message);
//! }
//! ```

pub mod aggregate;
pub mod engine;
pub mod summary;
pub mod types;

pub use aggregate::{
    all_time_category_totals, budget_comparison, current_month_category_totals,
    effective_budgets, latest_transaction, month_bounds, monthly_totals, recent_transactions,
    top_category, total_expenses, BudgetComparison, CategoryTotal, CategoryTotals,
    EffectiveBudget, MonthlyTotal, DEFAULT_MONTH_WINDOW, MAX_MONTH_WINDOW,
};
pub use engine::{derive_insights, NEAR_BUDGET_THRESHOLD, OVER_BUDGET_THRESHOLD};
pub use summary::{DashboardSummary, RECENT_TRANSACTION_LIMIT};
pub use types::{Insight, InsightKind, Severity};
