//! 销售报表核心
//!
//! # 流程
//!
//! ```text
//! (period, branch_id?) ─► WindowResolver ─► ReportWindow
//!                                              │
//!                            OrderStore::query_orders (1 次)
//!                                              │
//!                         SalesAggregator ─► SalesReport
//! ```
//!
//! - [`window`] - 周期 token → 闭区间 `[start, end]`
//! - [`amount`] - 金额容错转换 (`Decimal`)
//! - [`store`] - 订单存储抽象
//! - [`aggregator`] - 计数 + 求和
//! - [`service`] - 对外入口

pub mod aggregator;
pub mod amount;
pub mod service;
pub mod store;
pub mod window;

pub use aggregator::{SalesAggregator, summarize};
pub use amount::{coerce_amount, sum_amounts};
pub use service::ReportService;
pub use store::{CreatedRange, MemoryOrderStore, OrderStore};
pub use window::{ReportWindow, ResolverProfile, WindowResolver, WindowRule};

use crate::db::repository::RepoError;
use thiserror::Error;

/// Report errors
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Order store query failed: {0}")]
    Store(#[from] RepoError),
}

pub type ReportResult<T> = Result<T, ReportError>;
