//! Threshold-based insight generation
//!
//! Two passes over the current month:
//! 1. Every budgeted category with a positive cap is classified by how much of the
//!    cap has been spent (over, near, on track, or silent when nothing was spent).
//! 2. Every category with spending but no budget row gets a nudge to set one.

use tracing::debug;

use super::aggregate::{BudgetComparison, CategoryTotals};
use super::types::{Insight, InsightKind};

/// Percent of budget at which a category counts as over budget
pub const OVER_BUDGET_THRESHOLD: f64 = 100.0;

/// Percent of budget at which a category counts as nearly exhausted
pub const NEAR_BUDGET_THRESHOLD: f64 = 80.0;

/// Round to a whole percent, halves away from zero
fn whole_percent(value: f64) -> i64 {
    value.round() as i64
}

fn classify(row: &BudgetComparison) -> Option<Insight> {
    if row.budget_amount <= 0.0 {
        return None;
    }

    let percentage = row.spent_amount / row.budget_amount * 100.0;
    let category = row.category;

    if percentage >= OVER_BUDGET_THRESHOLD {
        let over = whole_percent(percentage - 100.0);
        Some(
            Insight::new(
                InsightKind::OverBudget,
                category,
                format!("{} budget exceeded by {}%", category, over),
            )
            .with_percent(over),
        )
    } else if percentage >= NEAR_BUDGET_THRESHOLD {
        let used = whole_percent(percentage);
        Some(
            Insight::new(
                InsightKind::NearBudget,
                category,
                format!("{} budget at {}%", category, used),
            )
            .with_percent(used),
        )
    } else if row.spent_amount > 0.0 {
        let used = whole_percent(percentage);
        Some(
            Insight::new(
                InsightKind::OnTrack,
                category,
                format!("{} spending on track ({}% of budget)", category, used),
            )
            .with_percent(used),
        )
    } else {
        None
    }
}

/// Derive insights from a budget comparison and the current month's category totals
///
/// Budget-driven insights come first, in comparison order, followed by unbudgeted
/// categories in the order the totals list them.
pub fn derive_insights(
    comparison: &[BudgetComparison],
    current_month_totals: &CategoryTotals,
) -> Vec<Insight> {
    let mut insights: Vec<Insight> = comparison.iter().filter_map(classify).collect();

    for entry in current_month_totals.iter() {
        let has_budget = comparison.iter().any(|row| row.category == entry.category);
        if !has_budget {
            insights.push(Insight::new(
                InsightKind::UnbudgetedCategory,
                entry.category,
                format!("Consider setting a budget for {}", entry.category),
            ));
        }
    }

    debug!(count = insights.len(), "Derived insights");
    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn row(category: Category, budget_amount: f64, spent_amount: f64) -> BudgetComparison {
        BudgetComparison {
            category,
            budget_amount,
            spent_amount,
        }
    }

    fn totals(entries: &[(Category, f64)]) -> CategoryTotals {
        let mut totals = CategoryTotals::new();
        for (category, amount) in entries {
            totals.add(*category, *amount);
        }
        totals
    }

    fn messages(insights: &[Insight]) -> Vec<&str> {
        insights.iter().map(|i| i.message.as_str()).collect()
    }

    #[test]
    fn test_over_budget() {
        let insights = derive_insights(
            &[row(Category::Food, 80.0, 100.0)],
            &totals(&[(Category::Food, 100.0)]),
        );
        assert_eq!(messages(&insights), vec!["Food budget exceeded by 25%"]);
        assert_eq!(insights[0].kind, InsightKind::OverBudget);
        assert_eq!(insights[0].percent, Some(25));
    }

    #[test]
    fn test_exactly_at_budget_is_over_by_zero() {
        let insights = derive_insights(&[row(Category::Housing, 1200.0, 1200.0)], &totals(&[]));
        assert_eq!(messages(&insights), vec!["Housing budget exceeded by 0%"]);
    }

    #[test]
    fn test_on_track_rounds_to_nearest_percent() {
        let insights = derive_insights(
            &[row(Category::Food, 150.0, 100.0)],
            &totals(&[(Category::Food, 100.0)]),
        );
        assert_eq!(
            messages(&insights),
            vec!["Food spending on track (67% of budget)"]
        );
        assert_eq!(insights[0].kind, InsightKind::OnTrack);
    }

    #[test]
    fn test_near_budget() {
        let insights = derive_insights(&[row(Category::Utilities, 200.0, 170.0)], &totals(&[]));
        assert_eq!(messages(&insights), vec!["Utilities budget at 85%"]);
        assert_eq!(insights[0].kind, InsightKind::NearBudget);

        let boundary = derive_insights(&[row(Category::Utilities, 100.0, 80.0)], &totals(&[]));
        assert_eq!(boundary[0].kind, InsightKind::NearBudget);
    }

    #[test]
    fn test_half_percent_rounds_away_from_zero() {
        // 37.5%
        let insights = derive_insights(&[row(Category::Education, 8.0, 3.0)], &totals(&[]));
        assert_eq!(
            messages(&insights),
            vec!["Education spending on track (38% of budget)"]
        );
    }

    #[test]
    fn test_empty_inputs() {
        assert!(derive_insights(&[], &totals(&[])).is_empty());
    }

    #[test]
    fn test_unbudgeted_category() {
        let insights = derive_insights(&[], &totals(&[(Category::Shopping, 40.0)]));
        assert_eq!(
            messages(&insights),
            vec!["Consider setting a budget for Shopping"]
        );
        assert_eq!(insights[0].kind, InsightKind::UnbudgetedCategory);
        assert_eq!(insights[0].percent, None);
    }

    #[test]
    fn test_budget_without_spending_is_silent() {
        let insights = derive_insights(&[row(Category::Insurance, 300.0, 0.0)], &totals(&[]));
        assert!(insights.is_empty());
    }

    #[test]
    fn test_zero_budget_is_skipped_and_not_reported_as_unbudgeted() {
        let insights = derive_insights(
            &[row(Category::Food, 0.0, 50.0)],
            &totals(&[(Category::Food, 50.0)]),
        );
        assert!(insights.is_empty());
    }

    #[test]
    fn test_budgeted_insights_precede_unbudgeted() {
        let insights = derive_insights(
            &[
                row(Category::Food, 80.0, 100.0),
                row(Category::Transportation, 100.0, 10.0),
            ],
            &totals(&[
                (Category::Entertainment, 15.0),
                (Category::Food, 100.0),
                (Category::Healthcare, 60.0),
                (Category::Transportation, 10.0),
            ]),
        );
        assert_eq!(
            messages(&insights),
            vec![
                "Food budget exceeded by 25%",
                "Transportation spending on track (10% of budget)",
                "Consider setting a budget for Entertainment",
                "Consider setting a budget for Healthcare",
            ]
        );
    }

    #[test]
    fn test_over_budget_percent_is_never_negative() {
        let rows: Vec<BudgetComparison> = [100.0, 100.0001, 150.0, 999.99]
            .iter()
            .map(|spent| row(Category::Other, 100.0, *spent))
            .collect();
        for insight in derive_insights(&rows, &totals(&[])) {
            assert_eq!(insight.kind, InsightKind::OverBudget);
            assert!(insight.percent.unwrap_or(-1) >= 0);
        }
    }

    #[test]
    fn test_at_most_one_budget_insight_per_category() {
        let rows = vec![
            row(Category::Food, 100.0, 120.0),
            row(Category::Housing, 100.0, 85.0),
            row(Category::Shopping, 100.0, 5.0),
        ];
        let insights = derive_insights(&rows, &totals(&[]));
        for r in &rows {
            let count = insights.iter().filter(|i| i.category == r.category).count();
            assert!(count <= 1);
        }
    }

    #[test]
    fn test_derive_is_idempotent() {
        let rows = vec![row(Category::Food, 80.0, 100.0)];
        let current = totals(&[(Category::Food, 100.0), (Category::Shopping, 40.0)]);
        assert_eq!(derive_insights(&rows, &current), derive_insights(&rows, &current));
    }
}
