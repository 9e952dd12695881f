//! Spending aggregation
//!
//! Category totals, month bucketing and budget vs. actual over in-memory lists.
//! Category groupings keep the order in which categories were first encountered
//! and never zero-fill; monthly buckets always zero-fill so chart axes stay complete.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::Serialize;

use crate::models::{Budget, Category, Transaction};

/// Number of months shown by the monthly spending chart
pub const DEFAULT_MONTH_WINDOW: usize = 6;

/// Largest monthly window the API and CLI accept
pub const MAX_MONTH_WINDOW: usize = 36;

/// Summed spending for one category
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: f64,
}

/// Category → amount, in first-encountered order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategoryTotals {
    entries: Vec<CategoryTotal>,
}

impl CategoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to a category, appending it if not seen yet
    pub fn add(&mut self, category: Category, amount: f64) {
        match self.entries.iter_mut().find(|e| e.category == category) {
            Some(entry) => entry.amount += amount,
            None => self.entries.push(CategoryTotal { category, amount }),
        }
    }

    pub fn get(&self, category: Category) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.amount)
    }

    pub fn contains(&self, category: Category) -> bool {
        self.get(category).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum across all categories
    pub fn total(&self) -> f64 {
        self.entries.iter().fold(0.0, |acc, e| acc + e.amount)
    }
}

impl<'a> FromIterator<&'a Transaction> for CategoryTotals {
    fn from_iter<I: IntoIterator<Item = &'a Transaction>>(iter: I) -> Self {
        let mut totals = Self::new();
        for tx in iter {
            totals.add(tx.category, tx.amount);
        }
        totals
    }
}

/// Spending for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotal {
    /// Display label, e.g. "Jan 2024"
    pub month: String,
    /// First day of the month
    pub start: NaiveDate,
    pub total: f64,
}

/// Budget vs. actual for one budgeted category in the current month
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetComparison {
    pub category: Category,
    pub budget_amount: f64,
    pub spent_amount: f64,
}

/// The budget record that applies to a category
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffectiveBudget {
    pub category: Category,
    pub amount: f64,
    pub month: NaiveDate,
    /// ID of the record that won
    pub budget_id: i64,
}

/// First and last day of the month containing `date` (both inclusive)
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = date - Duration::days(i64::from(date.day0()));
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX);
    (start, end)
}

fn in_month(tx: &Transaction, (start, end): (NaiveDate, NaiveDate)) -> bool {
    tx.date >= start && tx.date <= end
}

/// Sum of every transaction amount
pub fn total_expenses(transactions: &[Transaction]) -> f64 {
    transactions.iter().fold(0.0, |acc, t| acc + t.amount)
}

/// Spending per category over the whole history
pub fn all_time_category_totals(transactions: &[Transaction]) -> CategoryTotals {
    transactions.iter().collect()
}

/// Spending per category within the month containing `reference`
pub fn current_month_category_totals(
    transactions: &[Transaction],
    reference: NaiveDate,
) -> CategoryTotals {
    let bounds = month_bounds(reference);
    transactions.iter().filter(|t| in_month(t, bounds)).collect()
}

/// Spending per month for the `month_count` months ending with the month of `reference`
///
/// Oldest month first. Months without transactions report a total of 0.
pub fn monthly_totals(
    transactions: &[Transaction],
    reference: NaiveDate,
    month_count: usize,
) -> Vec<MonthlyTotal> {
    let (current_start, _) = month_bounds(reference);

    (0..month_count)
        .rev()
        .filter_map(|months_back| {
            let months_back = u32::try_from(months_back).ok()?;
            current_start.checked_sub_months(Months::new(months_back))
        })
        .map(|start| {
            let bounds = month_bounds(start);
            let total = transactions
                .iter()
                .filter(|t| in_month(t, bounds))
                .fold(0.0, |acc, t| acc + t.amount);
            MonthlyTotal {
                month: start.format("%b %Y").to_string(),
                start,
                total,
            }
        })
        .collect()
}

/// Category with the highest all-time spending
///
/// Ties go to the category encountered first. `None` when there is no data.
pub fn top_category(transactions: &[Transaction]) -> Option<Category> {
    let totals = all_time_category_totals(transactions);
    let mut best: Option<&CategoryTotal> = None;
    for entry in totals.iter() {
        if best.map_or(true, |b| entry.amount > b.amount) {
            best = Some(entry);
        }
    }
    best.map(|b| b.category)
}

/// Most recent transaction by date (latest ID on the same day)
pub fn latest_transaction(transactions: &[Transaction]) -> Option<&Transaction> {
    transactions.iter().max_by_key(|t| (t.date, t.id))
}

/// Up to `limit` transactions, newest first
pub fn recent_transactions(transactions: &[Transaction], limit: usize) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    sorted.truncate(limit);
    sorted
}

/// Resolve duplicate budget records to one cap per category
///
/// The record with the highest ID (the most recently created) wins. Categories are
/// listed in the order they first appear in `budgets`.
pub fn effective_budgets(budgets: &[Budget]) -> Vec<EffectiveBudget> {
    let mut resolved: Vec<EffectiveBudget> = Vec::new();
    for budget in budgets {
        let candidate = EffectiveBudget {
            category: budget.category,
            amount: budget.amount,
            month: budget.month,
            budget_id: budget.id,
        };
        match resolved.iter_mut().find(|e| e.category == budget.category) {
            Some(existing) if budget.id >= existing.budget_id => *existing = candidate,
            Some(_) => {}
            None => resolved.push(candidate),
        }
    }
    resolved
}

/// Budget vs. actual for every budgeted category in the month of `reference`
///
/// Categories without a budget are left out; the insight engine reports them.
pub fn budget_comparison(
    transactions: &[Transaction],
    budgets: &[Budget],
    reference: NaiveDate,
) -> Vec<BudgetComparison> {
    let spent = current_month_category_totals(transactions, reference);
    effective_budgets(budgets)
        .into_iter()
        .map(|budget| BudgetComparison {
            category: budget.category,
            budget_amount: budget.amount,
            spent_amount: spent.get(budget.category).unwrap_or(0.0),
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    pub(crate) fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    pub(crate) fn tx(id: i64, amount: f64, category: Category, on: &str) -> Transaction {
        Transaction {
            id,
            amount,
            date: date(on),
            description: format!("tx {}", id),
            category,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    pub(crate) fn budget(id: i64, category: Category, amount: f64) -> Budget {
        Budget {
            id,
            category,
            amount,
            month: date("2024-01-01"),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx(1, 100.0, Category::Food, "2024-01-15"),
            tx(2, 40.0, Category::Shopping, "2024-01-02"),
            tx(3, 25.5, Category::Food, "2023-12-31"),
            tx(4, 900.0, Category::Housing, "2023-11-01"),
            tx(5, 10.0, Category::Entertainment, "2024-01-31"),
        ]
    }

    #[test]
    fn test_all_time_totals_conserve_sum() {
        let transactions = sample();
        let totals = all_time_category_totals(&transactions);
        assert_eq!(totals.len(), 4);
        assert_eq!(totals.get(Category::Food), Some(125.5));
        assert_eq!(totals.total(), total_expenses(&transactions));
        assert_eq!(totals.total(), 1075.5);
    }

    #[test]
    fn test_all_time_totals_keep_first_encountered_order() {
        let totals = all_time_category_totals(&sample());
        let order: Vec<Category> = totals.iter().map(|e| e.category).collect();
        assert_eq!(
            order,
            vec![
                Category::Food,
                Category::Shopping,
                Category::Housing,
                Category::Entertainment
            ]
        );
    }

    #[test]
    fn test_empty_inputs_give_empty_totals() {
        assert!(all_time_category_totals(&[]).is_empty());
        assert!(current_month_category_totals(&[], date("2024-01-20")).is_empty());
        assert_eq!(total_expenses(&[]), 0.0);
        assert!(budget_comparison(&[], &[], date("2024-01-20")).is_empty());
    }

    #[test]
    fn test_current_month_totals_include_both_month_edges() {
        let totals = current_month_category_totals(&sample(), date("2024-01-20"));
        assert_eq!(totals.get(Category::Food), Some(100.0));
        assert_eq!(totals.get(Category::Shopping), Some(40.0));
        assert_eq!(totals.get(Category::Entertainment), Some(10.0));
        assert!(!totals.contains(Category::Housing));
        assert_eq!(totals.total(), 150.0);
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(
            month_bounds(date("2024-02-10")),
            (date("2024-02-01"), date("2024-02-29"))
        );
        assert_eq!(
            month_bounds(date("2023-12-31")),
            (date("2023-12-01"), date("2023-12-31"))
        );
        assert_eq!(
            month_bounds(date("2023-04-01")),
            (date("2023-04-01"), date("2023-04-30"))
        );
    }

    #[test]
    fn test_monthly_totals_window_is_zero_filled_and_chronological() {
        let months = monthly_totals(&sample(), date("2024-01-20"), DEFAULT_MONTH_WINDOW);
        let labels: Vec<&str> = months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Aug 2023", "Sep 2023", "Oct 2023", "Nov 2023", "Dec 2023", "Jan 2024"]
        );
        let totals: Vec<f64> = months.iter().map(|m| m.total).collect();
        assert_eq!(totals, vec![0.0, 0.0, 0.0, 900.0, 25.5, 150.0]);
        assert!(months.windows(2).all(|w| w[0].start < w[1].start));
    }

    #[test]
    fn test_monthly_totals_always_has_requested_length() {
        let months = monthly_totals(&[], date("2024-03-31"), 6);
        assert_eq!(months.len(), 6);
        assert!(months.iter().all(|m| m.total == 0.0));
        assert_eq!(months[0].start, date("2023-10-01"));
        assert_eq!(months[5].month, "Mar 2024");

        assert!(monthly_totals(&sample(), date("2024-01-20"), 0).is_empty());
        assert_eq!(monthly_totals(&sample(), date("2024-01-20"), 1).len(), 1);
    }

    #[test]
    fn test_top_category() {
        assert_eq!(top_category(&sample()), Some(Category::Housing));
        assert_eq!(top_category(&[]), None);
    }

    #[test]
    fn test_top_category_tie_goes_to_first_encountered() {
        let transactions = vec![
            tx(1, 50.0, Category::Utilities, "2024-01-01"),
            tx(2, 50.0, Category::Food, "2024-01-02"),
        ];
        assert_eq!(top_category(&transactions), Some(Category::Utilities));
    }

    #[test]
    fn test_latest_and_recent_transactions() {
        let transactions = sample();
        assert_eq!(latest_transaction(&transactions).map(|t| t.id), Some(5));
        assert!(latest_transaction(&[]).is_none());

        let recent = recent_transactions(&transactions, 3);
        let ids: Vec<i64> = recent.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![5, 1, 2]);
        assert_eq!(recent_transactions(&transactions, 50).len(), 5);
    }

    #[test]
    fn test_effective_budgets_latest_record_wins() {
        let budgets = vec![
            budget(1, Category::Food, 200.0),
            budget(2, Category::Housing, 1500.0),
            budget(3, Category::Food, 250.0),
        ];
        let resolved = effective_budgets(&budgets);
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].category, Category::Food);
        assert_eq!(resolved[0].amount, 250.0);
        assert_eq!(resolved[0].budget_id, 3);
        assert_eq!(resolved[1].category, Category::Housing);
    }

    #[test]
    fn test_effective_budgets_ignores_slice_order_for_recency() {
        let budgets = vec![
            budget(7, Category::Food, 300.0),
            budget(4, Category::Food, 100.0),
        ];
        let resolved = effective_budgets(&budgets);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].amount, 300.0);
    }

    #[test]
    fn test_budget_comparison_uses_current_month_only() {
        let budgets = vec![
            budget(1, Category::Food, 80.0),
            budget(2, Category::Housing, 1000.0),
        ];
        let rows = budget_comparison(&sample(), &budgets, date("2024-01-20"));
        assert_eq!(
            rows,
            vec![
                BudgetComparison {
                    category: Category::Food,
                    budget_amount: 80.0,
                    spent_amount: 100.0,
                },
                BudgetComparison {
                    category: Category::Housing,
                    budget_amount: 1000.0,
                    spent_amount: 0.0,
                },
            ]
        );
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let transactions = sample();
        let budgets = vec![budget(1, Category::Food, 80.0)];
        let now = date("2024-01-20");
        assert_eq!(
            all_time_category_totals(&transactions),
            all_time_category_totals(&transactions)
        );
        assert_eq!(
            monthly_totals(&transactions, now, 6),
            monthly_totals(&transactions, now, 6)
        );
        assert_eq!(
            budget_comparison(&transactions, &budgets, now),
            budget_comparison(&transactions, &budgets, now)
        );
    }

    #[test]
    fn test_category_totals_serialize_as_list() {
        let totals = all_time_category_totals(&[tx(1, 12.0, Category::Food, "2024-01-01")]);
        let json = serde_json::to_value(&totals).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "category": "Food", "amount": 12.0 }])
        );
    }
}
