//! Dashboard summary
//!
//! One value carrying everything the dashboard renders, computed from the full
//! transaction and budget lists for a given reference date.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::aggregate::{
    all_time_category_totals, budget_comparison, current_month_category_totals,
    effective_budgets, latest_transaction, monthly_totals, recent_transactions, top_category,
    total_expenses, BudgetComparison, CategoryTotals, EffectiveBudget, MonthlyTotal,
    DEFAULT_MONTH_WINDOW,
};
use super::engine::derive_insights;
use super::types::Insight;
use crate::models::{Budget, Category, Transaction};

/// How many transactions the dashboard lists
pub const RECENT_TRANSACTION_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Reference date that decided the current month
    pub as_of: NaiveDate,
    pub total_expenses: f64,
    pub transaction_count: usize,
    /// `None` when there are no transactions
    pub top_category: Option<Category>,
    pub latest_transaction_date: Option<NaiveDate>,
    pub recent_transactions: Vec<Transaction>,
    /// All-time spending per category
    pub category_totals: CategoryTotals,
    /// Zero-filled spending for the last [`DEFAULT_MONTH_WINDOW`] months
    pub monthly_totals: Vec<MonthlyTotal>,
    pub budget_comparison: Vec<BudgetComparison>,
    pub effective_budgets: Vec<EffectiveBudget>,
    pub insights: Vec<Insight>,
}

impl DashboardSummary {
    pub fn build(transactions: &[Transaction], budgets: &[Budget], as_of: NaiveDate) -> Self {
        let comparison = budget_comparison(transactions, budgets, as_of);
        let current_month = current_month_category_totals(transactions, as_of);
        let insights = derive_insights(&comparison, &current_month);

        let summary = Self {
            as_of,
            total_expenses: total_expenses(transactions),
            transaction_count: transactions.len(),
            top_category: top_category(transactions),
            latest_transaction_date: latest_transaction(transactions).map(|t| t.date),
            recent_transactions: recent_transactions(transactions, RECENT_TRANSACTION_LIMIT),
            category_totals: all_time_category_totals(transactions),
            monthly_totals: monthly_totals(transactions, as_of, DEFAULT_MONTH_WINDOW),
            budget_comparison: comparison,
            effective_budgets: effective_budgets(budgets),
            insights,
        };

        debug!(
            %as_of,
            transactions = summary.transaction_count,
            insights = summary.insights.len(),
            "Built dashboard summary"
        );
        summary
    }

    /// Top category name for display ("N/A" when there is no data)
    pub fn top_category_label(&self) -> &'static str {
        self.top_category.map_or("N/A", |c| c.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::aggregate::tests::{budget, date, tx};
    use crate::insights::InsightKind;

    #[test]
    fn test_empty_summary() {
        let summary = DashboardSummary::build(&[], &[], date("2024-01-20"));
        assert_eq!(summary.total_expenses, 0.0);
        assert_eq!(summary.transaction_count, 0);
        assert_eq!(summary.top_category, None);
        assert_eq!(summary.top_category_label(), "N/A");
        assert_eq!(summary.latest_transaction_date, None);
        assert!(summary.recent_transactions.is_empty());
        assert!(summary.category_totals.is_empty());
        assert_eq!(summary.monthly_totals.len(), DEFAULT_MONTH_WINDOW);
        assert!(summary.budget_comparison.is_empty());
        assert!(summary.insights.is_empty());
    }

    #[test]
    fn test_summary_combines_aggregates_and_insights() {
        let transactions = vec![
            tx(1, 100.0, Category::Food, "2024-01-05"),
            tx(2, 40.0, Category::Shopping, "2024-01-06"),
            tx(3, 500.0, Category::Housing, "2023-12-01"),
            tx(4, 5.0, Category::Food, "2023-12-15"),
            tx(5, 7.0, Category::Other, "2023-12-20"),
            tx(6, 3.0, Category::Other, "2023-12-21"),
        ];
        let budgets = vec![
            budget(1, Category::Food, 50.0),
            budget(2, Category::Food, 80.0),
        ];

        let summary = DashboardSummary::build(&transactions, &budgets, date("2024-01-20"));

        assert_eq!(summary.total_expenses, 655.0);
        assert_eq!(summary.transaction_count, 6);
        assert_eq!(summary.top_category, Some(Category::Housing));
        assert_eq!(summary.top_category_label(), "Housing");
        assert_eq!(summary.latest_transaction_date, Some(date("2024-01-06")));

        let recent: Vec<i64> = summary.recent_transactions.iter().map(|t| t.id).collect();
        assert_eq!(recent, vec![2, 1, 6, 5, 4]);

        assert_eq!(summary.effective_budgets.len(), 1);
        assert_eq!(summary.budget_comparison[0].budget_amount, 80.0);
        assert_eq!(summary.budget_comparison[0].spent_amount, 100.0);

        let messages: Vec<&str> = summary.insights.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Food budget exceeded by 25%",
                "Consider setting a budget for Shopping",
            ]
        );
        assert_eq!(summary.insights[1].kind, InsightKind::UnbudgetedCategory);

        let last = summary.monthly_totals.last().unwrap();
        assert_eq!(last.month, "Jan 2024");
        assert_eq!(last.total, 140.0);
    }

    #[test]
    fn test_summary_serializes_top_category_as_null_when_empty() {
        let summary = DashboardSummary::build(&[], &[], date("2024-01-20"));
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["top_category"].is_null());
        assert_eq!(json["as_of"], "2024-01-20");
        assert_eq!(json["monthly_totals"].as_array().unwrap().len(), 6);
    }
}
