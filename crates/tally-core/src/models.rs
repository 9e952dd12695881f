//! Domain models for Tally

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Spending category
///
/// The set is closed: every transaction and budget carries exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Housing,
    Transportation,
    Food,
    Utilities,
    Insurance,
    Healthcare,
    Entertainment,
    Shopping,
    Education,
    Other,
}

impl Category {
    /// All categories in canonical display order
    pub const ALL: [Category; 10] = [
        Self::Housing,
        Self::Transportation,
        Self::Food,
        Self::Utilities,
        Self::Insurance,
        Self::Healthcare,
        Self::Entertainment,
        Self::Shopping,
        Self::Education,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Housing => "Housing",
            Self::Transportation => "Transportation",
            Self::Food => "Food",
            Self::Utilities => "Utilities",
            Self::Insurance => "Insurance",
            Self::Healthcare => "Healthcare",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Education => "Education",
            Self::Other => "Other",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    /// Non-negative, currency-agnostic
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
    pub category: Category,
    pub created_at: DateTime<Utc>,
}

/// A transaction before it is stored (also used for full-record edits)
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
    pub category: Category,
}

impl NewTransaction {
    /// Reject values that must never reach the aggregator
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() {
            return Err(Error::InvalidData("Amount must be a finite number".into()));
        }
        if self.amount < 0.0 {
            return Err(Error::InvalidData("Amount must not be negative".into()));
        }
        if self.description.trim().is_empty() {
            return Err(Error::InvalidData("Description is required".into()));
        }
        Ok(())
    }
}

/// A monthly spending cap for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub category: Category,
    /// Strictly positive monthly cap
    pub amount: f64,
    /// First day of the month the cap was declared for (informational)
    pub month: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// A budget before it is stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    pub category: Category,
    pub amount: f64,
    pub month: NaiveDate,
}

impl NewBudget {
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() {
            return Err(Error::InvalidData("Amount must be a finite number".into()));
        }
        if self.amount <= 0.0 {
            return Err(Error::InvalidData("Amount must be greater than 0".into()));
        }
        Ok(())
    }
}

/// Parse a calendar date from `YYYY-MM-DD` or an RFC 3339 timestamp
///
/// Timestamps keep only their date part (in the offset they were written in).
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.date_naive())
        .map_err(|_| Error::InvalidData(format!("Invalid date: {} (use YYYY-MM-DD)", s)))
}

/// Parse a budget month from `YYYY-MM` or any date [`parse_date`] accepts
///
/// Always returns the first day of that month.
pub fn parse_month(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    let date = match NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => parse_date(s)
            .map_err(|_| Error::InvalidData(format!("Invalid month: {} (use YYYY-MM)", s)))?,
    };
    Ok(first_of_month(date))
}

/// First day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - chrono::Duration::days(i64::from(date.day0()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!("food".parse::<Category>().unwrap(), Category::Food);
        assert_eq!(" Shopping ".parse::<Category>().unwrap(), Category::Shopping);
        assert_eq!("HEALTHCARE".parse::<Category>().unwrap(), Category::Healthcare);
        assert!("Groceries".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_round_trips_through_display() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>().unwrap(), category);
        }
        assert_eq!(Category::ALL.len(), 10);
    }

    #[test]
    fn test_category_serializes_as_display_name() {
        let json = serde_json::to_string(&Category::Transportation).unwrap();
        assert_eq!(json, "\"Transportation\"");
    }

    #[test]
    fn test_new_transaction_validation() {
        let mut tx = NewTransaction {
            amount: 12.5,
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            description: "Lunch".to_string(),
            category: Category::Food,
        };
        assert!(tx.validate().is_ok());

        tx.amount = 0.0;
        assert!(tx.validate().is_ok(), "zero-amount transactions are allowed");

        tx.amount = -1.0;
        assert!(matches!(tx.validate(), Err(Error::InvalidData(_))));

        tx.amount = f64::NAN;
        assert!(matches!(tx.validate(), Err(Error::InvalidData(_))));

        tx.amount = 5.0;
        tx.description = "   ".to_string();
        assert!(matches!(tx.validate(), Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_new_budget_requires_positive_amount() {
        let month = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let budget = NewBudget {
            category: Category::Food,
            amount: 0.0,
            month,
        };
        assert!(budget.validate().is_err());

        let budget = NewBudget {
            amount: 0.01,
            ..budget
        };
        assert!(budget.validate().is_ok());

        let budget = NewBudget {
            amount: f64::INFINITY,
            ..budget
        };
        assert!(budget.validate().is_err());
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_date("2024-01-15").unwrap(), expected);
        assert_eq!(parse_date("2024-01-15T10:30:00Z").unwrap(), expected);
        assert_eq!(parse_date("2024-01-15T00:00:00.000Z").unwrap(), expected);
        assert!(parse_date("01/15/2024").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_parse_month_normalizes_to_first_day() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(parse_month("2024-03").unwrap(), expected);
        assert_eq!(parse_month("2024-03-17").unwrap(), expected);
        assert!(parse_month("2024-13").is_err());
    }

    #[test]
    fn test_first_of_month() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(
            first_of_month(date),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
    }
}
