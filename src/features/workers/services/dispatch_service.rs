use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use utoipa::ToSchema;

use crate::core::config::DispatchConfig;
use crate::core::error::{AppError, Result};
use crate::features::reports::models::timestamp::format_display;
use crate::features::reports::models::Report;
use crate::features::reports::services::ReportService;
use crate::features::workers::models::{
    DispatchStatus, DispatchedWorker, ReportSnapshot, Worker, WorkerSnapshot,
};
use crate::features::workers::services::eligibility::is_eligible;
use crate::features::workers::services::WorkerService;
use crate::shared::constants::DISPATCH_INITIAL_PROGRESS;
use crate::shared::seed::{self, find_duplicate, SeedError};

pub const EMPTY_SELECTION_MESSAGE: &str = "Please select at least one worker to dispatch.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DispatchCounts {
    pub active: usize,
    pub completed: usize,
    pub delayed: usize,
}

impl DispatchCounts {
    pub fn of(records: &[DispatchedWorker]) -> Self {
        let mut counts = Self::default();
        for record in records {
            match record.status {
                DispatchStatus::Active => counts.active += 1,
                DispatchStatus::Completed => counts.completed += 1,
                DispatchStatus::Delayed => counts.delayed += 1,
            }
        }
        counts
    }
}

/// Result of a successful dispatch
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub message: String,
    pub report: Report,
    pub dispatched: Vec<DispatchedWorker>,
}

/// Owns the dispatched-worker ledger and performs dispatches.
///
/// A dispatch holds the ledger write lock for its whole duration and only then
/// touches the report store, so concurrent dispatches are serialised and
/// readers never see a report moved without its ledger records.
pub struct DispatchService {
    reports: Arc<ReportService>,
    workers: Arc<WorkerService>,
    ledger: RwLock<Vec<DispatchedWorker>>,
    config: DispatchConfig,
}

impl DispatchService {
    pub async fn new(
        reports: Arc<ReportService>,
        workers: Arc<WorkerService>,
        ledger: Vec<DispatchedWorker>,
        config: DispatchConfig,
    ) -> std::result::Result<Self, SeedError> {
        if let Some(id) = find_duplicate(ledger.iter().map(|d| d.id.as_str())) {
            return Err(SeedError::DuplicateId {
                kind: "dispatched worker",
                id: id.to_string(),
            });
        }

        for record in &ledger {
            if workers.get(&record.worker_id).is_err() {
                return Err(SeedError::DanglingReference {
                    kind: "dispatched worker",
                    id: record.id.clone(),
                    target: "worker",
                    target_id: record.worker_id.clone(),
                });
            }
            if reports.get(&record.report_id).await.is_err() {
                return Err(SeedError::DanglingReference {
                    kind: "dispatched worker",
                    id: record.id.clone(),
                    target: "report",
                    target_id: record.report_id.clone(),
                });
            }
        }

        Ok(Self {
            reports,
            workers,
            ledger: RwLock::new(ledger),
            config,
        })
    }

    pub async fn from_seed(
        reports: Arc<ReportService>,
        workers: Arc<WorkerService>,
        config: DispatchConfig,
    ) -> std::result::Result<Self, SeedError> {
        let ledger: Vec<DispatchedWorker> =
            seed::parse("dispatched_workers.json", seed::DISPATCHED_WORKERS_JSON)?;
        let service = Self::new(reports, workers, ledger, config).await?;
        tracing::info!("Dispatch ledger seeded");
        Ok(service)
    }

    pub async fn list(&self) -> Vec<DispatchedWorker> {
        self.ledger.read().await.clone()
    }

    pub async fn eligible_workers(&self, report_id: &str) -> Result<Vec<Worker>> {
        let report = self.reports.get(report_id).await?;
        Ok(self.workers.eligible_for(&report))
    }

    /// Assigns the selected workers to a report.
    ///
    /// Either every check passes and the report moves to in-process with one
    /// ledger record per worker, or nothing changes.
    pub async fn dispatch(
        &self,
        report_id: &str,
        worker_ids: &[String],
        now: NaiveDateTime,
    ) -> Result<DispatchOutcome> {
        let selection = dedup_selection(worker_ids);
        if selection.is_empty() {
            return Err(AppError::Validation(EMPTY_SELECTION_MESSAGE.to_string()));
        }

        let mut ledger = self.ledger.write().await;
        let report = self.reports.get(report_id).await?;

        let mut selected: Vec<&Worker> = Vec::with_capacity(selection.len());
        for worker_id in &selection {
            let worker = self.workers.get(worker_id)?;
            if !is_eligible(worker, &report) {
                tracing::warn!(
                    "Worker {} is not eligible for report {}",
                    worker.id,
                    report.request_id
                );
                return Err(AppError::BadRequest(format!(
                    "Worker {} is not eligible for report {}",
                    worker.name, report.request_id
                )));
            }
            selected.push(worker);
        }

        // Resolved before the report changes so an overflow leaves no trace
        let completion = Duration::try_hours(self.config.estimate_hours)
            .and_then(|estimate| now.checked_add_signed(estimate))
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "Completion estimate of {} hours is out of range",
                    self.config.estimate_hours
                ))
            })?;
        let dispatched_at = format_display(now);
        let estimated_completion = format_display(completion);

        let report = self.reports.start_work(report_id).await?;
        let mut next_id = next_dispatch_number(&ledger);

        let records: Vec<DispatchedWorker> = selected
            .into_iter()
            .map(|worker| {
                let record = DispatchedWorker {
                    id: format!("dw{}", next_id),
                    worker_id: worker.id.clone(),
                    worker: WorkerSnapshot::from(worker),
                    report_id: report.id.clone(),
                    report: ReportSnapshot::from(&report),
                    dispatched_at: dispatched_at.clone(),
                    estimated_completion: estimated_completion.clone(),
                    status: DispatchStatus::Active,
                    progress: DISPATCH_INITIAL_PROGRESS.to_string(),
                };
                next_id += 1;
                record
            })
            .collect();

        ledger.extend(records.iter().cloned());
        tracing::info!(
            "Dispatched {} worker(s) to report {}",
            records.len(),
            report.request_id
        );

        Ok(DispatchOutcome {
            message: format!("{} worker(s) assigned to resolve the issue.", records.len()),
            report,
            dispatched: records,
        })
    }
}

/// Drops repeated ids, keeping the first occurrence
fn dedup_selection(worker_ids: &[String]) -> Vec<String> {
    let mut selection: Vec<String> = Vec::with_capacity(worker_ids.len());
    for id in worker_ids {
        let id = id.trim();
        if !id.is_empty() && !selection.iter().any(|s| s == id) {
            selection.push(id.to_string());
        }
    }
    selection
}

fn next_dispatch_number(ledger: &[DispatchedWorker]) -> u64 {
    ledger
        .iter()
        .filter_map(|d| d.id.strip_prefix("dw")?.parse::<u64>().ok())
        .max()
        .unwrap_or(0)
        + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::ReportStatus;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 26)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    async fn setup() -> (Arc<ReportService>, DispatchService) {
        let reports = Arc::new(ReportService::from_seed().unwrap());
        let workers = Arc::new(WorkerService::from_seed().unwrap());
        let dispatch = DispatchService::from_seed(reports.clone(), workers, DispatchConfig::default())
            .await
            .unwrap();
        (reports, dispatch)
    }

    #[tokio::test]
    async fn test_out_of_range_estimate_changes_nothing() {
        let reports = Arc::new(ReportService::from_seed().unwrap());
        let workers = Arc::new(WorkerService::from_seed().unwrap());
        let config = DispatchConfig {
            estimate_hours: 5_000_000_000,
        };
        let dispatch = DispatchService::from_seed(reports.clone(), workers, config)
            .await
            .unwrap();

        let result = dispatch.dispatch("6", &ids(&["w1"]), now()).await;

        assert!(matches!(result, Err(AppError::Internal(_))));
        assert_eq!(reports.get("6").await.unwrap().status, ReportStatus::Pending);
        assert_eq!(dispatch.list().await.len(), 5);
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_dispatch_moves_report_and_appends_records() {
        let (reports, dispatch) = setup().await;

        let outcome = dispatch
            .dispatch("6", &ids(&["w1", "w2"]), now())
            .await
            .unwrap();

        assert_eq!(outcome.message, "2 worker(s) assigned to resolve the issue.");
        assert_eq!(outcome.report.status, ReportStatus::InProcess);
        assert_eq!(reports.get("6").await.unwrap().status, ReportStatus::InProcess);

        let created: Vec<&str> = outcome.dispatched.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(created, vec!["dw6", "dw7"]);

        let first = &outcome.dispatched[0];
        assert_eq!(first.status, DispatchStatus::Active);
        assert_eq!(first.progress, DISPATCH_INITIAL_PROGRESS);
        assert_eq!(first.dispatched_at, "26/03/2025 09:00 AM");
        assert_eq!(first.estimated_completion, "26/03/2025 05:00 PM");
        assert_eq!(first.report.request_id, "JH2024006");

        assert_eq!(dispatch.list().await.len(), 7);
    }

    #[tokio::test]
    async fn test_empty_selection_changes_nothing() {
        let (reports, dispatch) = setup().await;

        let result = dispatch.dispatch("6", &[], now()).await;
        match result {
            Err(AppError::Validation(msg)) => assert_eq!(msg, EMPTY_SELECTION_MESSAGE),
            other => panic!("expected validation error, got {:?}", other.map(|o| o.message)),
        }

        let blank = dispatch.dispatch("6", &ids(&["", "  "]), now()).await;
        assert!(matches!(blank, Err(AppError::Validation(_))));

        assert_eq!(reports.get("6").await.unwrap().status, ReportStatus::Pending);
        assert_eq!(dispatch.list().await.len(), 5);
    }

    #[tokio::test]
    async fn test_unknown_report() {
        let (_, dispatch) = setup().await;
        let result = dispatch.dispatch("404", &ids(&["w1"]), now()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_ineligible_worker_changes_nothing() {
        let (reports, dispatch) = setup().await;

        // w5 is an electrician, report 6 is a road report
        let result = dispatch.dispatch("6", &ids(&["w1", "w5"]), now()).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        // w3 matches street cleaning but is unavailable
        let result = dispatch.dispatch("9", &ids(&["w3"]), now()).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        assert_eq!(reports.get("6").await.unwrap().status, ReportStatus::Pending);
        assert_eq!(dispatch.list().await.len(), 5);
    }

    #[tokio::test]
    async fn test_completed_report_is_a_conflict() {
        let (_, dispatch) = setup().await;
        // Report 5 is completed waste management; w6 is the waste worker
        let result = dispatch.dispatch("5", &ids(&["w6"]), now()).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(dispatch.list().await.len(), 5);
    }

    #[tokio::test]
    async fn test_repeated_ids_dispatch_once() {
        let (_, dispatch) = setup().await;
        let outcome = dispatch
            .dispatch("11", &ids(&["w4", "w4"]), now())
            .await
            .unwrap();
        assert_eq!(outcome.dispatched.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_dispatches_get_distinct_ids() {
        let (_, dispatch) = setup().await;
        let dispatch = Arc::new(dispatch);

        let a = {
            let dispatch = dispatch.clone();
            tokio::spawn(async move { dispatch.dispatch("1", &ids(&["w1"]), now()).await })
        };
        let b = {
            let dispatch = dispatch.clone();
            tokio::spawn(async move { dispatch.dispatch("6", &ids(&["w2"]), now()).await })
        };
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        let ledger = dispatch.list().await;
        let mut record_ids: Vec<&str> = ledger.iter().map(|d| d.id.as_str()).collect();
        record_ids.sort();
        record_ids.dedup();
        assert_eq!(record_ids.len(), 7);
    }

    #[tokio::test]
    async fn test_seed_counts() {
        let (_, dispatch) = setup().await;
        assert_eq!(
            DispatchCounts::of(&dispatch.list().await),
            DispatchCounts {
                active: 3,
                completed: 2,
                delayed: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_dangling_ledger_reference_is_rejected() {
        let reports = Arc::new(ReportService::from_seed().unwrap());
        let workers = Arc::new(WorkerService::from_seed().unwrap());
        let mut ledger: Vec<DispatchedWorker> =
            seed::parse("dispatched_workers.json", seed::DISPATCHED_WORKERS_JSON).unwrap();
        ledger[0].worker_id = "w42".to_string();

        let result = DispatchService::new(reports, workers, ledger, DispatchConfig::default()).await;
        assert!(matches!(
            result,
            Err(SeedError::DanglingReference { target: "worker", .. })
        ));
    }
}
