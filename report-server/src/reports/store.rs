//! Order store port
//!
//! The report engine only needs one read: orders created inside a closed
//! millis range, optionally for one branch, newest first. SQLite provides the
//! production implementation ([`crate::db::repository::OrderRepository`]);
//! [`MemoryOrderStore`] backs tests and local tooling.

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::models::Order;
use std::sync::Arc;

use crate::db::repository::RepoResult;

/// Closed creation-time range in Unix millis (`gte <= created_at <= lte`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedRange {
    pub gte: i64,
    pub lte: i64,
}

impl CreatedRange {
    pub fn contains(&self, millis: i64) -> bool {
        self.gte <= millis && millis <= self.lte
    }
}

/// Read-only order query used by the aggregator
///
/// Implementations must return orders sorted by `created_at` descending and
/// must support concurrent calls. Failures are returned as-is; retrying is
/// the implementation's own business.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn query_orders(
        &self,
        range: CreatedRange,
        branch_id: Option<&str>,
    ) -> RepoResult<Vec<Order>>;
}

/// In-memory order store
#[derive(Debug, Default, Clone)]
pub struct MemoryOrderStore {
    orders: Arc<RwLock<Vec<Order>>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orders(orders: impl IntoIterator<Item = Order>) -> Self {
        let store = Self::new();
        store.orders.write().extend(orders);
        store
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn query_orders(
        &self,
        range: CreatedRange,
        branch_id: Option<&str>,
    ) -> RepoResult<Vec<Order>> {
        let mut matched: Vec<Order> = self
            .orders
            .read()
            .iter()
            .filter(|o| range.contains(o.created_at))
            .filter(|o| branch_id.is_none_or(|b| o.branch_id.as_deref() == Some(b)))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_contains_is_inclusive() {
        let range = CreatedRange { gte: 10, lte: 20 };
        assert!(range.contains(10));
        assert!(range.contains(20));
        assert!(!range.contains(9));
        assert!(!range.contains(21));
    }

    #[tokio::test]
    async fn test_memory_store_filters_and_sorts() {
        let store = MemoryOrderStore::with_orders([
            Order::new(1, "R-1", 100).with_branch("north"),
            Order::new(2, "R-2", 300).with_branch("south"),
            Order::new(3, "R-3", 200).with_branch("north"),
            Order::new(4, "R-4", 999),
        ]);
        let range = CreatedRange { gte: 100, lte: 300 };
        let all = store.query_orders(range, None).await.unwrap();
        assert_eq!(all.iter().map(|o| o.id).collect::<Vec<_>>(), vec![2, 3, 1]);

        let north = store.query_orders(range, Some("north")).await.unwrap();
        assert_eq!(north.iter().map(|o| o.id).collect::<Vec<_>>(), vec![3, 1]);
    }
}
