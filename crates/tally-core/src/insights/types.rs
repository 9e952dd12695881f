//! Core types for the insight engine

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Category;

/// Kinds of insight the engine can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Spending reached or passed the budget
    OverBudget,
    /// Spending is close to the budget
    NearBudget,
    /// Spending is comfortably under the budget
    OnTrack,
    /// Money was spent in a category that has no budget
    UnbudgetedCategory,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::OverBudget => "over_budget",
            InsightKind::NearBudget => "near_budget",
            InsightKind::OnTrack => "on_track",
            InsightKind::UnbudgetedCategory => "unbudgeted_category",
        }
    }

    /// Presentation severity for this kind
    pub fn severity(&self) -> Severity {
        match self {
            InsightKind::OverBudget => Severity::Alert,
            InsightKind::NearBudget => Severity::Warning,
            InsightKind::OnTrack => Severity::Info,
            InsightKind::UnbudgetedCategory => Severity::Attention,
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity level of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational - no action needed
    Info,
    /// Worth attention but not urgent
    Attention,
    /// Should be addressed soon
    Warning,
    /// Requires immediate attention
    Alert,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Attention => "attention",
            Severity::Warning => "warning",
            Severity::Alert => "alert",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A human-readable statement about one category's spending
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub category: Category,
    /// Display text, e.g. "Food budget exceeded by 25%"
    pub message: String,
    /// The rounded percentage shown in the message, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<i64>,
}

impl Insight {
    pub fn new(kind: InsightKind, category: Category, message: impl Into<String>) -> Self {
        Self {
            kind,
            category,
            message: message.into(),
            percent: None,
        }
    }

    /// Attach the displayed percentage
    pub fn with_percent(mut self, percent: i64) -> Self {
        self.percent = Some(percent);
        self
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insight_kind_strings() {
        // Display text matches the serialized form
        for kind in [
            InsightKind::OverBudget,
            InsightKind::NearBudget,
            InsightKind::OnTrack,
            InsightKind::UnbudgetedCategory,
        ] {
            assert_eq!(
                serde_json::to_value(kind).unwrap(),
                serde_json::Value::from(kind.as_str())
            );
        }
        assert_eq!(InsightKind::UnbudgetedCategory.to_string(), "unbudgeted_category");
        assert_eq!(Severity::Attention.to_string(), "attention");
    }

    #[test]
    fn test_kind_severity_mapping() {
        assert_eq!(InsightKind::OverBudget.severity(), Severity::Alert);
        assert_eq!(InsightKind::NearBudget.severity(), Severity::Warning);
        assert_eq!(InsightKind::OnTrack.severity(), Severity::Info);
        assert_eq!(InsightKind::UnbudgetedCategory.severity(), Severity::Attention);
    }

    #[test]
    fn test_insight_serialization() {
        let insight = Insight::new(InsightKind::NearBudget, Category::Food, "Food budget at 85%")
            .with_percent(85);
        let json = serde_json::to_value(&insight).unwrap();
        assert_eq!(json["kind"], "near_budget");
        assert_eq!(json["category"], "Food");
        assert_eq!(json["percent"], 85);

        let unbudgeted = Insight::new(
            InsightKind::UnbudgetedCategory,
            Category::Shopping,
            "Consider setting a budget for Shopping",
        );
        let json = serde_json::to_value(&unbudgeted).unwrap();
        assert!(json.get("percent").is_none());
    }
}
