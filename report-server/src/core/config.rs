use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

use crate::reports::window::DEFAULT_EPOCH_FLOOR_MILLIS;
use crate::utils::time::parse_instant;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖 (非法值回退到默认值并输出 warn 日志)：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATABASE_URL | sqlite:reports.db | SQLite 数据库 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | TIMEZONE | UTC | 业务时区 (IANA) |
/// | REPORT_EPOCH_FLOOR | 2000-01-01T00:00:00Z | `all` 报表起点 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 日志 |
/// | LOG_DIR | (未设置) | 滚动日志目录 |
///
/// # 示例
///
/// ```ignore
/// TIMEZONE=Europe/Madrid HTTP_PORT=8080 cargo run -p report-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub http_port: u16,
    /// 业务时区，决定日界线
    pub timezone: Tz,
    /// `all` 周期的下界
    pub epoch_floor: DateTime<Utc>,
    pub request_timeout_ms: u64,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意 key → value 来源加载配置，测试时不必修改进程环境
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default_values();
        Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            http_port: parse_or("HTTP_PORT", lookup("HTTP_PORT"), defaults.http_port, |v| {
                v.parse().ok()
            }),
            timezone: parse_or("TIMEZONE", lookup("TIMEZONE"), defaults.timezone, |v| {
                Tz::from_str(v).ok()
            }),
            epoch_floor: parse_or(
                "REPORT_EPOCH_FLOOR",
                lookup("REPORT_EPOCH_FLOOR"),
                defaults.epoch_floor,
                parse_instant,
            ),
            request_timeout_ms: parse_or(
                "REQUEST_TIMEOUT_MS",
                lookup("REQUEST_TIMEOUT_MS"),
                defaults.request_timeout_ms,
                |v| v.parse::<u64>().ok().filter(|ms| *ms > 0),
            ),
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_json: parse_or("LOG_JSON", lookup("LOG_JSON"), defaults.log_json, |v| {
                v.parse().ok()
            }),
            log_dir: lookup("LOG_DIR").filter(|v| !v.trim().is_empty()),
        }
    }

    fn default_values() -> Self {
        Self {
            database_url: "sqlite:reports.db".into(),
            http_port: 3000,
            timezone: Tz::UTC,
            epoch_floor: DateTime::from_timestamp_millis(DEFAULT_EPOCH_FLOOR_MILLIS)
                .unwrap_or_default(),
            request_timeout_ms: 30_000,
            environment: "development".into(),
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
        }
    }

    /// 测试用配置: 内存数据库 + 随机端口
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            http_port: 0,
            ..Self::default_values()
        }
    }
}

fn parse_or<T: std::fmt::Debug>(
    key: &str,
    raw: Option<String>,
    default: T,
    parse: impl FnOnce(&str) -> Option<T>,
) -> T {
    let Some(raw) = raw else {
        return default;
    };
    match parse(raw.trim()) {
        Some(value) => value,
        None => {
            tracing::warn!(key, value = %raw, default = ?default, "Invalid config value, using default");
            default
        }
    }
}
