//! Report Server - 门店销售报表服务
//!
//! # 架构概述
//!
//! - **报表核心** (`reports`): 周期解析 → 订单查询 → 计数/求和
//! - **数据库** (`db`): SQLite (sqlx) 订单存储
//! - **HTTP API** (`api`): axum 路由和处理器
//!
//! # 模块结构
//!
//! ```text
//! report-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── reports/       # 时间窗口、金额转换、聚合
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 日志、时间、错误转换
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod reports;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerError, ServerState};
pub use db::DbService;
pub use reports::{OrderStore, ReportError, ReportService};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 加载 `.env` 并初始化日志
///
/// 日志参数直接读取环境变量 (`LOG_LEVEL` / `LOG_JSON` / `LOG_DIR`)，
/// 在 [`Config::from_env`] 之前调用，配置解析的 warn 日志才能输出。
pub fn setup_environment() {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let level = std::env::var("LOG_LEVEL").ok();
    let json = std::env::var("LOG_JSON").ok().and_then(|v| v.parse().ok());
    let dir = std::env::var("LOG_DIR").ok().filter(|v| !v.trim().is_empty());
    init_logger_with_file(level.as_deref(), json, dir.as_deref());

    if dotenv_loaded {
        tracing::debug!(".env loaded");
    }
}

pub fn print_banner() {
    println!(
        r#"
    ____                        __
   / __ \___  ____  ____  _____/ /_
  / /_/ / _ \/ __ \/ __ \/ ___/ __/
 / _, _/  __/ /_/ / /_/ / /  / /_
/_/ |_|\___/ .___/\____/_/   \__/
          /_/
    "#
    );
}
