//! Reports API 模块 (销售报表)
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/reports/sales?period= | GET | 全部门店销售报表 |
//! | /api/reports/branches/{branch_id}/sales?period= | GET | 单门店销售报表 |
//!
//! `period`: `day` | `week` | `month` | `year` | `all`，门店报表只支持
//! `day` / `month` / `year`。缺省或不支持的值按 `day` 处理。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/sales", get(handler::get_sales_report))
        .route(
            "/branches/{branch_id}/sales",
            get(handler::get_branch_sales_report),
        )
}
