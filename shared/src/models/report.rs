//! Sales Report Model (销售报表)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::order::Order;

/// Reporting window that was actually applied to a request
///
/// Unsupported or unknown period tokens degrade to [`ReportPeriod::Day`],
/// so this can differ from what the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    Day,
    Week,
    Month,
    Year,
    All,
}

impl ReportPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
            Self::All => "all",
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sales report response
///
/// `count == items.len()` and `total_amount` is the sum of every item's
/// coerced total. Items are ordered most recent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub period: ReportPeriod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
    /// Window start (Unix millis, inclusive)
    pub start: i64,
    /// Window end (Unix millis, inclusive)
    pub end: i64,
    pub count: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub items: Vec<Order>,
}
