//! Reports API Handlers

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use shared::models::SalesReport;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Query parameters for sales reports
#[derive(Debug, Deserialize)]
pub struct SalesReportQuery {
    /// Period token; absent behaves like an unknown token
    pub period: Option<String>,
}

fn period_query(
    query: Result<Query<SalesReportQuery>, QueryRejection>,
) -> AppResult<Option<String>> {
    let Query(query) = query.map_err(|e| AppError::invalid_request(e.body_text()))?;
    Ok(query.period)
}

/// GET /api/reports/sales - 全部门店销售报表
pub async fn get_sales_report(
    State(state): State<ServerState>,
    query: Result<Query<SalesReportQuery>, QueryRejection>,
) -> AppResult<Json<SalesReport>> {
    let period = period_query(query)?;
    let report = state.reports.get_sales_report(period.as_deref()).await?;
    Ok(Json(report))
}

/// GET /api/reports/branches/{branch_id}/sales - 单门店销售报表
pub async fn get_branch_sales_report(
    State(state): State<ServerState>,
    Path(branch_id): Path<String>,
    query: Result<Query<SalesReportQuery>, QueryRejection>,
) -> AppResult<Json<SalesReport>> {
    if branch_id.trim().is_empty() {
        return Err(AppError::invalid_branch_id(branch_id));
    }
    let period = period_query(query)?;
    let report = state
        .reports
        .get_branch_sales_report(&branch_id, period.as_deref())
        .await?;
    Ok(Json(report))
}
