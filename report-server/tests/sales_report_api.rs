//! HTTP API tests through the fully layered router

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use chrono::Utc;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use report_server::db::repository::{RepoError, RepoResult};
use report_server::reports::{CreatedRange, OrderStore};
use report_server::{Config, DbService, ServerState, api};
use serde_json::{Value, json};
use shared::models::Order;
use tower::ServiceExt;

async fn state() -> ServerState {
    let db = DbService::in_memory().await.unwrap();
    ServerState::with_db(Config::for_tests(), db)
}

async fn get(state: &ServerState, uri: &str) -> (StatusCode, http::HeaderMap, Value) {
    let app = api::build_app(state).with_state(state.clone());
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, body)
}

async fn seed(state: &ServerState, orders: impl IntoIterator<Item = Order>) {
    let repo = state.orders();
    for order in orders {
        repo.insert(&order).await.unwrap();
    }
}

#[tokio::test]
async fn test_sales_report_sums_mixed_totals() {
    let state = state().await;
    let now = Utc::now().timestamp_millis();
    seed(
        &state,
        [
            Order::new(1, "R-1", now).with_total(10),
            Order::new(2, "R-2", now).with_total(json!(null)),
            Order::new(3, "R-3", now).with_total("20"),
        ],
    )
    .await;

    let (status, _, body) = get(&state, "/api/reports/sales?period=all").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["period"], "all");
    assert_eq!(body["count"], 3);
    assert_eq!(body["totalAmount"], 30.0);
    assert_eq!(body["items"].as_array().unwrap().len(), 3);
    assert_eq!(body["items"][0]["receiptNumber"], "R-3");
    assert!(body.get("branchId").is_none());
}

#[tokio::test]
async fn test_missing_or_unknown_period_is_day() {
    let state = state().await;

    let (status, _, body) = get(&state, "/api/reports/sales").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["period"], "day");

    let (_, _, unknown) = get(&state, "/api/reports/sales?period=quarter").await;
    assert_eq!(unknown["period"], "day");
    assert_eq!(unknown["start"], body["start"]);
}

#[tokio::test]
async fn test_branch_report_degrades_week_to_day() {
    let state = state().await;
    let now = Utc::now().timestamp_millis();
    seed(
        &state,
        [
            Order::new(1, "R-1", now).with_branch("north").with_total("7.5"),
            Order::new(2, "R-2", now).with_branch("south").with_total(3),
        ],
    )
    .await;

    let (status, _, body) = get(&state, "/api/reports/branches/north/sales?period=week").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["period"], "day");
    assert_eq!(body["branchId"], "north");

    let (_, _, year) = get(&state, "/api/reports/branches/north/sales?period=year").await;
    assert_eq!(year["period"], "year");
    assert_eq!(year["count"], 1);
    assert_eq!(year["totalAmount"], 7.5);
}

#[tokio::test]
async fn test_blank_branch_id_is_rejected() {
    let state = state().await;
    let (status, _, body) = get(&state, "/api/reports/branches/%20/sales").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4101);
}

struct UnavailableStore;

#[async_trait]
impl OrderStore for UnavailableStore {
    async fn query_orders(&self, _: CreatedRange, _: Option<&str>) -> RepoResult<Vec<Order>> {
        Err(RepoError::Database("database is locked".into()))
    }
}

#[tokio::test]
async fn test_store_failure_returns_database_error() {
    let db = DbService::in_memory().await.unwrap();
    let state = ServerState::with_store(Config::for_tests(), db, Arc::new(UnavailableStore));

    let (status, _, body) = get(&state, "/api/reports/sales?period=week").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 9002);
    assert_eq!(body["message"], "database is locked");
}

struct SlowStore;

#[async_trait]
impl OrderStore for SlowStore {
    async fn query_orders(&self, _: CreatedRange, _: Option<&str>) -> RepoResult<Vec<Order>> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_slow_store_times_out_with_error_body() {
    let db = DbService::in_memory().await.unwrap();
    let config = Config {
        request_timeout_ms: 50,
        ..Config::for_tests()
    };
    let state = ServerState::with_store(config, db, Arc::new(SlowStore));

    let (status, headers, body) = get(&state, "/api/reports/sales?period=day").await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(body["code"], 6);
    assert_eq!(body["details"]["timeout_ms"], 50);
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_health_and_request_id() {
    let state = state().await;
    let (status, headers, body) = get(&state, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "ok");
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let state = state().await;
    let (status, _, body) = get(&state, "/api/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3);
}
