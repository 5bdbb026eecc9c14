//! Shared types for the sales report service
//!
//! Wire models and the unified error system used by the server and by
//! anything that consumes its HTTP API.

pub mod error;
pub mod models;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{Order, ReportPeriod, SalesReport};
