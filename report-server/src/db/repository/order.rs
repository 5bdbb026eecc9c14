//! Order Repository
//!
//! Read access to orders for the report engine, plus `insert` for seeding
//! and ingestion tooling. `total_amount` is stored without a declared type,
//! so reads carry the SQLite storage class along with a text rendering and
//! rebuild the raw JSON value from both.

use async_trait::async_trait;
use serde_json::Value;
use shared::models::Order;
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::reports::{CreatedRange, OrderStore};

const SELECT_IN_RANGE: &str = r#"
    SELECT
        id,
        receipt_number,
        branch_id,
        created_at,
        typeof(total_amount) AS total_type,
        CAST(total_amount AS TEXT) AS total_text
    FROM orders
    WHERE created_at >= ?1
      AND created_at <= ?2
      AND (?3 IS NULL OR branch_id = ?3)
    ORDER BY created_at DESC, id DESC
"#;

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    receipt_number: String,
    branch_id: Option<String>,
    created_at: i64,
    total_type: String,
    total_text: Option<String>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Order {
            id: row.id,
            receipt_number: row.receipt_number,
            branch_id: row.branch_id,
            created_at: row.created_at,
            total_amount: stored_total(&row.total_type, row.total_text),
        }
    }
}

/// Rebuild the raw total from SQLite's storage class + text rendering
fn stored_total(storage_class: &str, text: Option<String>) -> Option<Value> {
    let text = text?;
    match storage_class {
        "integer" | "real" => match serde_json::from_str::<Value>(&text) {
            Ok(number @ Value::Number(_)) => Some(number),
            _ => Some(Value::String(text)),
        },
        _ => Some(Value::String(text)),
    }
}

#[derive(Clone, Debug)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert an order, keeping `total_amount` as given
    ///
    /// Numbers are stored as INTEGER/REAL, strings as TEXT, JSON null or a
    /// missing total as NULL. Any other JSON value is stored as its JSON text.
    pub async fn insert(&self, order: &Order) -> RepoResult<()> {
        if order.receipt_number.trim().is_empty() {
            return Err(RepoError::Validation(format!(
                "Order {} has an empty receipt number",
                order.id
            )));
        }

        let query = sqlx::query(
            "INSERT INTO orders (id, receipt_number, branch_id, created_at, total_amount) VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(order.id)
        .bind(order.receipt_number.as_str())
        .bind(order.branch_id.as_deref())
        .bind(order.created_at);

        let query = match &order.total_amount {
            None | Some(Value::Null) => query.bind(None::<String>),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(i) => query.bind(i),
                None => query.bind(n.as_f64()),
            },
            Some(Value::String(s)) => query.bind(s.clone()),
            Some(other) => query.bind(other.to_string()),
        };

        query.execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl OrderStore for OrderRepository {
    async fn query_orders(
        &self,
        range: CreatedRange,
        branch_id: Option<&str>,
    ) -> RepoResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(SELECT_IN_RANGE)
            .bind(range.gte)
            .bind(range.lte)
            .bind(branch_id)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(
            gte = range.gte,
            lte = range.lte,
            branch_id = branch_id.unwrap_or("*"),
            rows = rows.len(),
            "Orders fetched"
        );

        Ok(rows.into_iter().map(Order::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use serde_json::json;

    async fn repo() -> OrderRepository {
        let db = DbService::in_memory().await.unwrap();
        OrderRepository::new(db.pool)
    }

    #[test]
    fn test_stored_total() {
        assert_eq!(stored_total("integer", Some("10".into())), Some(json!(10)));
        assert_eq!(stored_total("real", Some("12.5".into())), Some(json!(12.5)));
        assert_eq!(stored_total("text", Some("20".into())), Some(json!("20")));
        assert_eq!(stored_total("real", Some("Inf".into())), Some(json!("Inf")));
        assert_eq!(stored_total("null", None), None);
    }

    #[tokio::test]
    async fn test_insert_and_query_preserves_raw_totals() {
        let repo = repo().await;
        repo.insert(&Order::new(1, "R-1", 1_000).with_total(10)).await.unwrap();
        repo.insert(&Order::new(2, "R-2", 2_000)).await.unwrap();
        repo.insert(&Order::new(3, "R-3", 3_000).with_total("20")).await.unwrap();
        repo.insert(&Order::new(4, "R-4", 4_000).with_total(2.25)).await.unwrap();
        repo.insert(&Order::new(5, "R-5", 5_000).with_total(json!({"amount": 1})))
            .await
            .unwrap();

        let orders = repo
            .query_orders(CreatedRange { gte: 0, lte: 10_000 }, None)
            .await
            .unwrap();

        let totals: Vec<_> = orders.iter().map(|o| o.total_amount.clone()).collect();
        assert_eq!(
            totals,
            vec![
                Some(json!("{\"amount\":1}")),
                Some(json!(2.25)),
                Some(json!("20")),
                None,
                Some(json!(10)),
            ]
        );
    }

    #[tokio::test]
    async fn test_query_bounds_are_inclusive_and_sorted_desc() {
        let repo = repo().await;
        for (id, ts) in [(1, 999), (2, 1_000), (3, 1_500), (4, 2_000), (5, 2_001)] {
            repo.insert(&Order::new(id, format!("R-{id}"), ts)).await.unwrap();
        }

        let orders = repo
            .query_orders(CreatedRange { gte: 1_000, lte: 2_000 }, None)
            .await
            .unwrap();
        let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![4, 3, 2]);
    }

    #[tokio::test]
    async fn test_query_filters_by_branch() {
        let repo = repo().await;
        repo.insert(&Order::new(1, "R-1", 100).with_branch("north")).await.unwrap();
        repo.insert(&Order::new(2, "R-2", 200).with_branch("south")).await.unwrap();
        repo.insert(&Order::new(3, "R-3", 300)).await.unwrap();

        let range = CreatedRange { gte: 0, lte: 1_000 };
        let north = repo.query_orders(range, Some("north")).await.unwrap();
        assert_eq!(north.len(), 1);
        assert_eq!(north[0].id, 1);

        let all = repo.query_orders(range, None).await.unwrap();
        assert_eq!(all.len(), 3);

        let unknown = repo.query_orders(range, Some("east")).await.unwrap();
        assert!(unknown.is_empty());
    }

    #[tokio::test]
    async fn test_insert_rejects_blank_receipt_number() {
        let repo = repo().await;
        let err = repo.insert(&Order::new(1, "  ", 0)).await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[tokio::test]
    async fn test_closed_pool_propagates_database_error() {
        let db = DbService::in_memory().await.unwrap();
        let repo = OrderRepository::new(db.pool.clone());
        db.pool.close().await;

        let err = repo
            .query_orders(CreatedRange { gte: 0, lte: 1 }, None)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Database(_)));
    }
}
