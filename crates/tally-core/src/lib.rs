//! Tally Core Library
//!
//! Shared functionality for the Tally personal finance tracker:
//! - Domain models (transactions, budgets, the closed category set)
//! - Database access and migrations
//! - Spending aggregation (category totals, monthly buckets, budget vs. actual)
//! - Insight engine (threshold-based budget status messages)

pub mod db;
pub mod error;
pub mod insights;
pub mod models;

pub use db::Database;
pub use error::{Error, Result};
pub use insights::{DashboardSummary, Insight, InsightKind};
pub use models::{Budget, Category, NewBudget, NewTransaction, Transaction};
