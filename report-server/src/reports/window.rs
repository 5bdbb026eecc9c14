//! Report window resolution
//!
//! A period token (`day`, `week`, `month`, `year`, `all`) plus "now" becomes a
//! closed `[start, end]` range. Which tokens are honoured depends on the
//! [`ResolverProfile`]: the global report knows all five, the branch report
//! only `day`, `month` and `year`. Anything a profile does not list resolves
//! as `day`; resolution never fails.

use chrono::{DateTime, Days, Months, NaiveDate, TimeZone, Utc};
use shared::models::ReportPeriod;

use super::store::CreatedRange;
use crate::utils::time::{end_of_day, start_of_day};

/// Default lower bound for `all`: 2000-01-01T00:00:00Z
pub const DEFAULT_EPOCH_FLOOR_MILLIS: i64 = 946_684_800_000;

/// How a window start is derived from "today"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowRule {
    /// Start of today
    Today,
    /// Start of the day `n` calendar days back
    TrailingDays(u64),
    /// Start of the day `n` calendar months back (day clamped to month end)
    TrailingMonths(u32),
    /// Configured "beginning of time"
    EpochFloor,
}

/// Token → rule table for one report entry point
#[derive(Debug)]
pub struct ResolverProfile {
    pub name: &'static str,
    rules: &'static [(&'static str, ReportPeriod, WindowRule)],
}

const DAY: (&str, ReportPeriod, WindowRule) = ("day", ReportPeriod::Day, WindowRule::Today);
const WEEK: (&str, ReportPeriod, WindowRule) =
    ("week", ReportPeriod::Week, WindowRule::TrailingDays(6));
const MONTH: (&str, ReportPeriod, WindowRule) =
    ("month", ReportPeriod::Month, WindowRule::TrailingMonths(1));
const YEAR: (&str, ReportPeriod, WindowRule) =
    ("year", ReportPeriod::Year, WindowRule::TrailingMonths(12));
const ALL: (&str, ReportPeriod, WindowRule) = ("all", ReportPeriod::All, WindowRule::EpochFloor);

impl ResolverProfile {
    /// Unscoped sales report
    pub const GLOBAL: ResolverProfile = ResolverProfile {
        name: "global",
        rules: &[DAY, WEEK, MONTH, YEAR, ALL],
    };

    /// Branch-scoped sales report (no `week`, no `all`)
    pub const BRANCH: ResolverProfile = ResolverProfile {
        name: "branch",
        rules: &[DAY, MONTH, YEAR],
    };

    /// Exact, case-sensitive lookup; unknown or absent tokens fall back to `day`
    pub fn rule_for(&self, token: Option<&str>) -> (ReportPeriod, WindowRule) {
        token
            .and_then(|t| self.rules.iter().find(|(name, _, _)| *name == t))
            .map(|&(_, period, rule)| (period, rule))
            .unwrap_or((DAY.1, DAY.2))
    }

    pub fn supports(&self, token: &str) -> bool {
        self.rules.iter().any(|(name, _, _)| *name == token)
    }
}

/// Concrete report window, `start <= end`, both inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub period: ReportPeriod,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReportWindow {
    pub fn start_millis(&self) -> i64 {
        self.start.timestamp_millis()
    }

    pub fn end_millis(&self) -> i64 {
        self.end.timestamp_millis()
    }

    /// Range handed to the order store
    pub fn created_range(&self) -> CreatedRange {
        CreatedRange {
            gte: self.start_millis(),
            lte: self.end_millis(),
        }
    }
}

/// Resolves period tokens against a fixed `all` floor
#[derive(Debug, Clone, Copy)]
pub struct WindowResolver {
    epoch_floor: DateTime<Utc>,
}

impl Default for WindowResolver {
    fn default() -> Self {
        Self {
            epoch_floor: DateTime::from_timestamp_millis(DEFAULT_EPOCH_FLOOR_MILLIS)
                .unwrap_or_default(),
        }
    }
}

impl WindowResolver {
    pub fn new(epoch_floor: DateTime<Utc>) -> Self {
        Self { epoch_floor }
    }

    /// Resolve `token` at `now`; day boundaries follow `now`'s time zone
    pub fn resolve<Tz: TimeZone>(
        &self,
        profile: &ResolverProfile,
        token: Option<&str>,
        now: &DateTime<Tz>,
    ) -> ReportWindow {
        let tz = now.timezone();
        let today = now.date_naive();
        let (period, rule) = profile.rule_for(token);

        let end = end_of_day(today, &tz);
        let start = match rule {
            WindowRule::Today => start_of_day(today, &tz),
            WindowRule::TrailingDays(n) => start_of_day(days_back(today, n), &tz),
            WindowRule::TrailingMonths(n) => start_of_day(months_back(today, n), &tz),
            WindowRule::EpochFloor => self.epoch_floor,
        };

        ReportWindow {
            period,
            // start <= end even when the floor is configured in the future
            start: start.min(end),
            end,
        }
    }
}

fn days_back(date: NaiveDate, n: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(n)).unwrap_or(NaiveDate::MIN)
}

fn months_back(date: NaiveDate, n: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(n)).unwrap_or(NaiveDate::MIN)
}
