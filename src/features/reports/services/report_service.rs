use tokio::sync::RwLock;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{Report, ReportStatus};
use crate::features::reports::services::filtering::{distinct_categories, filter_reports, ReportFilter};
use crate::features::reports::services::ranking::{sort_reports, SortDirection, SortKey};
use crate::features::reports::services::statistics::{
    derive_statistics, summary, timeline_days, ReportStatistics, ReportSummary, StatisticsOptions,
};
use crate::shared::constants::MAX_TIMELINE_DAYS;
use crate::shared::seed::{self, find_duplicate, SeedError};

/// Checks the store invariants: unique ids and parseable timestamps
pub fn validate_reports(reports: &[Report]) -> std::result::Result<(), SeedError> {
    if let Some(id) = find_duplicate(reports.iter().map(|r| r.id.as_str())) {
        return Err(SeedError::DuplicateId {
            kind: "report",
            id: id.to_string(),
        });
    }

    for report in reports {
        report
            .reported_at()
            .map_err(|e| SeedError::InvalidTimestamp {
                id: report.id.clone(),
                reason: e.to_string(),
            })?;
    }
    Ok(())
}

/// The report store.
///
/// Readers clone a snapshot and run the engine outside the lock. The only
/// writer is [`ReportService::start_work`], called by dispatch.
pub struct ReportService {
    reports: RwLock<Vec<Report>>,
}

impl ReportService {
    pub fn new(reports: Vec<Report>) -> std::result::Result<Self, SeedError> {
        validate_reports(&reports)?;
        Ok(Self {
            reports: RwLock::new(reports),
        })
    }

    pub fn from_seed() -> std::result::Result<Self, SeedError> {
        let reports: Vec<Report> = seed::parse("reports.json", seed::REPORTS_JSON)?;
        let service = Self::new(reports)?;
        tracing::info!("Report store seeded");
        Ok(service)
    }

    pub async fn snapshot(&self) -> Vec<Report> {
        self.reports.read().await.clone()
    }

    /// Filtered, then ordered view of the store
    pub async fn list(
        &self,
        filter: &ReportFilter,
        sort_by: SortKey,
        order: SortDirection,
    ) -> Vec<Report> {
        tracing::debug!(?filter, ?sort_by, ?order, "Listing reports");
        let filtered = filter_reports(&self.reports.read().await, filter);
        sort_reports(filtered, sort_by, order)
    }

    pub async fn get(&self, id: &str) -> Result<Report> {
        self.reports
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Report not found".to_string()))
    }

    pub async fn categories(&self) -> Vec<String> {
        distinct_categories(&self.reports.read().await)
    }

    pub async fn summary(&self) -> ReportSummary {
        summary(&self.reports.read().await)
    }

    /// Derives statistics, refusing timelines longer than [`MAX_TIMELINE_DAYS`]
    pub async fn statistics(&self, options: &StatisticsOptions) -> Result<ReportStatistics> {
        let reports = self.snapshot().await;
        let days = timeline_days(&reports, options);
        if days > MAX_TIMELINE_DAYS {
            return Err(AppError::Validation(format!(
                "Timeline would span {} days; at most {} are allowed",
                days, MAX_TIMELINE_DAYS
            )));
        }
        Ok(derive_statistics(&reports, options))
    }

    /// Moves a report into `in-process`; completed reports are left alone
    pub async fn start_work(&self, id: &str) -> Result<Report> {
        let mut reports = self.reports.write().await;
        let report = reports
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound("Report not found".to_string()))?;

        if report.status == ReportStatus::Completed {
            tracing::warn!("Refusing to reopen completed report {}", report.request_id);
            return Err(AppError::Conflict(format!(
                "Report {} is already completed",
                report.request_id
            )));
        }

        if report.status != ReportStatus::InProcess {
            tracing::info!(
                "Report {} moved from {} to {}",
                report.request_id,
                report.status,
                ReportStatus::InProcess
            );
            report.status = ReportStatus::InProcess;
        }
        Ok(report.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::Urgency;
    use crate::features::reports::services::filtering::Constraint;
    use crate::features::reports::services::statistics::TimeWindow;
    use chrono::NaiveDate;
    use crate::shared::test_helpers::report;

    #[test]
    fn test_seed_loads() {
        assert!(ReportService::from_seed().is_ok());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let reports = vec![
            report("1", "15/03/2025", "10:30 AM", None),
            report("1", "16/03/2025", "10:30 AM", None),
        ];
        let err = ReportService::new(reports).err().unwrap();
        assert!(matches!(err, SeedError::DuplicateId { ref id, .. } if id == "1"));
    }

    #[test]
    fn test_rejects_unparseable_timestamps() {
        let reports = vec![report("1", "31/02/2025", "10:30 AM", None)];
        let err = ReportService::new(reports).err().unwrap();
        assert!(matches!(err, SeedError::InvalidTimestamp { ref id, .. } if id == "1"));
    }

    #[tokio::test]
    async fn test_list_filters_then_sorts() {
        let service = ReportService::from_seed().unwrap();
        let filter = ReportFilter {
            category: Constraint::Exactly("Road Maintenance".to_string()),
            ..ReportFilter::default()
        };

        let listed = service
            .list(&filter, SortKey::DateTime, SortDirection::Desc)
            .await;
        let ids: Vec<&str> = listed.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["14", "10", "6", "1"]);
    }

    #[tokio::test]
    async fn test_get_unknown_report() {
        let service = ReportService::from_seed().unwrap();
        assert!(matches!(service.get("404").await, Err(AppError::NotFound(_))));
        assert_eq!(service.get("3").await.unwrap().urgency, Some(Urgency::Critical));
    }

    #[tokio::test]
    async fn test_start_work_transitions_pending() {
        let service = ReportService::from_seed().unwrap();
        let updated = service.start_work("1").await.unwrap();
        assert_eq!(updated.status, ReportStatus::InProcess);
        assert_eq!(service.get("1").await.unwrap().status, ReportStatus::InProcess);
    }

    #[tokio::test]
    async fn test_statistics_rejects_oversized_timeline() {
        let service = ReportService::from_seed().unwrap();
        let options = StatisticsOptions {
            window: TimeWindow::AllTime,
            anchor: NaiveDate::from_ymd_opt(9999, 12, 31),
            ..StatisticsOptions::default()
        };
        assert!(matches!(
            service.statistics(&options).await,
            Err(AppError::Validation(_))
        ));

        let options = StatisticsOptions {
            window: TimeWindow::SevenDays,
            ..options
        };
        let stats = service.statistics(&options).await.unwrap();
        assert_eq!(stats.timeline.len(), 7);
    }

    #[tokio::test]
    async fn test_start_work_refuses_completed() {
        let service = ReportService::from_seed().unwrap();
        let result = service.start_work("2").await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(service.get("2").await.unwrap().status, ReportStatus::Completed);
    }
}
