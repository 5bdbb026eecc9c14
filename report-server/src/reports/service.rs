//! Report Service
//!
//! Entry points used by the HTTP layer. The plain variants read the clock
//! once in the business time zone and delegate to the `*_at` variants.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use shared::models::SalesReport;
use std::sync::Arc;

use super::aggregator::SalesAggregator;
use super::store::OrderStore;
use super::window::{ResolverProfile, WindowResolver};
use super::ReportResult;

#[derive(Debug, Clone)]
pub struct ReportService {
    resolver: WindowResolver,
    aggregator: SalesAggregator,
    /// 业务时区
    tz: Tz,
}

impl ReportService {
    pub fn new(store: Arc<dyn OrderStore>, tz: Tz, epoch_floor: DateTime<Utc>) -> Self {
        Self {
            resolver: WindowResolver::new(epoch_floor),
            aggregator: SalesAggregator::new(store),
            tz,
        }
    }

    /// Sales across all branches
    pub async fn get_sales_report(&self, period: Option<&str>) -> ReportResult<SalesReport> {
        self.get_sales_report_at(period, Utc::now()).await
    }

    pub async fn get_sales_report_at(
        &self,
        period: Option<&str>,
        now: DateTime<Utc>,
    ) -> ReportResult<SalesReport> {
        self.run(&ResolverProfile::GLOBAL, period, None, now).await
    }

    /// Sales for a single branch; only `day`, `month` and `year` are honoured
    pub async fn get_branch_sales_report(
        &self,
        branch_id: &str,
        period: Option<&str>,
    ) -> ReportResult<SalesReport> {
        self.get_branch_sales_report_at(branch_id, period, Utc::now())
            .await
    }

    pub async fn get_branch_sales_report_at(
        &self,
        branch_id: &str,
        period: Option<&str>,
        now: DateTime<Utc>,
    ) -> ReportResult<SalesReport> {
        self.run(&ResolverProfile::BRANCH, period, Some(branch_id), now)
            .await
    }

    async fn run(
        &self,
        profile: &ResolverProfile,
        period: Option<&str>,
        branch_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> ReportResult<SalesReport> {
        let window = self
            .resolver
            .resolve(profile, period, &now.with_timezone(&self.tz));

        if let Some(token) = period.filter(|t| !profile.supports(t)) {
            tracing::debug!(
                profile = profile.name,
                requested = token,
                applied = %window.period,
                "Unsupported period token, using day window"
            );
        }

        let report = self.aggregator.aggregate(&window, branch_id).await?;

        tracing::debug!(
            profile = profile.name,
            period = %report.period,
            branch_id = branch_id.unwrap_or("*"),
            start = report.start,
            end = report.end,
            count = report.count,
            total = %report.total_amount,
            "Sales report built"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::window::DEFAULT_EPOCH_FLOOR_MILLIS;
    use crate::reports::MemoryOrderStore;
    use rust_decimal::Decimal;
    use shared::models::{Order, ReportPeriod};

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn floor() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(DEFAULT_EPOCH_FLOOR_MILLIS).unwrap()
    }

    fn service(store: MemoryOrderStore, tz: Tz) -> ReportService {
        ReportService::new(Arc::new(store), tz, floor())
    }

    fn seeded() -> MemoryOrderStore {
        MemoryOrderStore::with_orders([
            Order::new(1, "R-1", utc("2024-03-15T09:00:00Z").timestamp_millis())
                .with_branch("north")
                .with_total(10),
            Order::new(2, "R-2", utc("2024-03-11T12:00:00Z").timestamp_millis())
                .with_branch("north")
                .with_total("4"),
            Order::new(3, "R-3", utc("2024-03-15T08:00:00Z").timestamp_millis())
                .with_branch("south")
                .with_total(1),
            Order::new(4, "R-4", utc("2001-06-01T00:00:00Z").timestamp_millis())
                .with_branch("north")
                .with_total(100),
        ])
    }

    const NOW: &str = "2024-03-15T10:00:00Z";

    #[tokio::test]
    async fn test_global_week_report() {
        let svc = service(seeded(), Tz::UTC);
        let report = svc.get_sales_report_at(Some("week"), utc(NOW)).await.unwrap();

        assert_eq!(report.period, ReportPeriod::Week);
        assert_eq!(report.start, utc("2024-03-09T00:00:00Z").timestamp_millis());
        assert_eq!(report.end, utc("2024-03-15T23:59:59.999Z").timestamp_millis());
        assert_eq!(report.count, 3);
        assert_eq!(report.total_amount, Decimal::from(15));
        assert!(report.branch_id.is_none());
    }

    #[tokio::test]
    async fn test_global_all_report_starts_at_floor() {
        let svc = service(seeded(), Tz::UTC);
        let report = svc.get_sales_report_at(Some("all"), utc(NOW)).await.unwrap();

        assert_eq!(report.start, DEFAULT_EPOCH_FLOOR_MILLIS);
        assert_eq!(report.count, 4);
        assert_eq!(report.total_amount, Decimal::from(115));
    }

    #[tokio::test]
    async fn test_branch_week_falls_back_to_day() {
        let svc = service(seeded(), Tz::UTC);
        let week = svc
            .get_branch_sales_report_at("north", Some("week"), utc(NOW))
            .await
            .unwrap();
        let day = svc
            .get_branch_sales_report_at("north", Some("day"), utc(NOW))
            .await
            .unwrap();

        assert_eq!(week, day);
        assert_eq!(week.period, ReportPeriod::Day);
        assert_eq!(week.branch_id.as_deref(), Some("north"));
        assert_eq!(week.count, 1);
        assert_eq!(week.total_amount, Decimal::from(10));
    }

    #[tokio::test]
    async fn test_branch_month_report() {
        let svc = service(seeded(), Tz::UTC);
        let report = svc
            .get_branch_sales_report_at("north", Some("month"), utc(NOW))
            .await
            .unwrap();
        assert_eq!(report.period, ReportPeriod::Month);
        assert_eq!(report.count, 2);
        assert_eq!(report.total_amount, Decimal::from(14));
    }

    #[tokio::test]
    async fn test_missing_period_is_day() {
        let svc = service(seeded(), Tz::UTC);
        let report = svc.get_sales_report_at(None, utc(NOW)).await.unwrap();
        assert_eq!(report.period, ReportPeriod::Day);
        assert_eq!(report.count, 2);
    }

    #[tokio::test]
    async fn test_business_timezone_shifts_day_window() {
        // 10:00 UTC is 19:00 in Tokyo; the Tokyo day started at 15:00 UTC the day before
        let svc = service(seeded(), chrono_tz::Asia::Tokyo);
        let report = svc.get_sales_report_at(Some("day"), utc(NOW)).await.unwrap();
        assert_eq!(report.start, utc("2024-03-14T15:00:00Z").timestamp_millis());
        assert_eq!(report.end, utc("2024-03-15T14:59:59.999Z").timestamp_millis());
    }

    #[tokio::test]
    async fn test_plain_variant_uses_current_clock() {
        let svc = service(MemoryOrderStore::new(), Tz::UTC);
        let before = Utc::now().timestamp_millis();
        let report = svc.get_sales_report(Some("day")).await.unwrap();
        assert!(report.start <= before);
        assert!(report.end >= before);
    }
}
