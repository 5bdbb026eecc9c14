//! 时间工具函数: 业务时区转换
//!
//! 日界线 (00:00:00.000 / 23:59:59.999) 在业务时区计算，结果统一转换为 UTC，
//! repository 层只接收 `i64` Unix millis。

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// 本地时间 → UTC (取最早的合法时刻)
///
/// DST gap: 本地时间不存在时 (夏令时跳跃，如 America/Santiago 的零点)，
/// 取跳跃结束后的第一个合法时刻。
fn local_to_utc<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz) -> DateTime<Utc> {
    // gaps start and end on whole minutes and never exceed a day
    (0..=MAX_GAP_MINUTES)
        .map_while(|minutes| naive.checked_add_signed(Duration::minutes(minutes)))
        .find_map(|candidate| candidate.and_local_timezone(tz.clone()).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}

const MAX_GAP_MINUTES: i64 = 24 * 60;

/// 日期开始 (00:00:00.000, 业务时区)
pub fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    local_to_utc(date.and_time(NaiveTime::MIN), tz)
}

/// 日期结束 (23:59:59.999, 业务时区)
///
/// 取次日零点前 1 毫秒，闭区间 `<= end` 语义。
pub fn end_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    match date.succ_opt() {
        Some(next_day) => start_of_day(next_day, tz) - Duration::milliseconds(1),
        None => DateTime::<Utc>::MAX_UTC,
    }
}

/// 解析时间点: RFC 3339 或 `YYYY-MM-DD` (UTC 零点)
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}
