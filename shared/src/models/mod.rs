//! Data models shared between the server and API consumers

pub mod order;
pub mod report;

pub use order::Order;
pub use report::{ReportPeriod, SalesReport};
