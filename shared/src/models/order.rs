//! Order Model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Order entity as read back from the order store
///
/// `total_amount` keeps whatever was stored: a number, a numeric string,
/// garbage text or nothing at all. Consumers must go through a coercion
/// step before doing arithmetic with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub receipt_number: String,
    /// Branch (store location) the order belongs to
    pub branch_id: Option<String>,
    /// Creation time (Unix millis)
    pub created_at: i64,
    /// Raw stored total
    #[serde(default)]
    pub total_amount: Option<Value>,
}

impl Order {
    pub fn new(id: i64, receipt_number: impl Into<String>, created_at: i64) -> Self {
        Self {
            id,
            receipt_number: receipt_number.into(),
            branch_id: None,
            created_at,
            total_amount: None,
        }
    }

    pub fn with_branch(mut self, branch_id: impl Into<String>) -> Self {
        self.branch_id = Some(branch_id.into());
        self
    }

    pub fn with_total(mut self, total: impl Into<Value>) -> Self {
        self.total_amount = Some(total.into());
        self
    }
}
