//! Sales aggregation
//!
//! One store query per report; counting and summing happen in memory.

use shared::models::{Order, SalesReport};
use std::sync::Arc;

use super::amount::sum_amounts;
use super::store::OrderStore;
use super::window::ReportWindow;
use super::ReportResult;

/// Fetches orders for a window and reduces them into a [`SalesReport`]
#[derive(Clone)]
pub struct SalesAggregator {
    store: Arc<dyn OrderStore>,
}

impl std::fmt::Debug for SalesAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesAggregator").finish_non_exhaustive()
    }
}

impl SalesAggregator {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }

    /// Query the store once and summarize the result
    ///
    /// Store errors are returned unchanged; no partial report is produced.
    pub async fn aggregate(
        &self,
        window: &ReportWindow,
        branch_id: Option<&str>,
    ) -> ReportResult<SalesReport> {
        let items = self
            .store
            .query_orders(window.created_range(), branch_id)
            .await?;
        Ok(summarize(window, branch_id, items))
    }
}

/// Build the report for already-fetched orders
pub fn summarize(window: &ReportWindow, branch_id: Option<&str>, items: Vec<Order>) -> SalesReport {
    let total_amount = sum_amounts(items.iter().map(|o| o.total_amount.as_ref()));

    SalesReport {
        period: window.period,
        branch_id: branch_id.map(str::to_owned),
        start: window.start_millis(),
        end: window.end_millis(),
        count: items.len() as u64,
        total_amount,
        items,
    }
}
