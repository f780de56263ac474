use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::reports::models::{Report, Urgency};
use crate::features::workers::models::Worker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DispatchStatus {
    Active,
    Completed,
    Delayed,
}

impl DispatchStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DispatchStatus::Active => "Active",
            DispatchStatus::Completed => "Completed",
            DispatchStatus::Delayed => "Delayed",
        }
    }

    /// Badge color on the dispatch board
    pub fn color(&self) -> &'static str {
        match self {
            DispatchStatus::Active => "#1e40af",
            DispatchStatus::Completed => "#166534",
            DispatchStatus::Delayed => "#991b1b",
        }
    }
}

/// Worker details copied at dispatch time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WorkerSnapshot {
    pub name: String,
    pub category: String,
    pub contact: String,
    pub area: String,
}

impl From<&Worker> for WorkerSnapshot {
    fn from(worker: &Worker) -> Self {
        Self {
            name: worker.name.clone(),
            category: worker.category.clone(),
            contact: worker.contact.clone(),
            area: worker.area.clone(),
        }
    }
}

/// Report details copied at dispatch time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReportSnapshot {
    pub request_id: String,
    pub category: String,
    pub area: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
    pub description: String,
}

impl From<&Report> for ReportSnapshot {
    fn from(report: &Report) -> Self {
        Self {
            request_id: report.request_id.clone(),
            category: report.category.clone(),
            area: report.area.clone(),
            urgency: report.urgency,
            description: report.description.clone(),
        }
    }
}

/// An assignment of a worker to a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DispatchedWorker {
    pub id: String,
    pub worker_id: String,
    pub worker: WorkerSnapshot,
    pub report_id: String,
    pub report: ReportSnapshot,
    /// "DD/MM/YYYY HH:MM AM|PM"
    pub dispatched_at: String,
    pub estimated_completion: String,
    pub status: DispatchStatus,
    pub progress: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&DispatchStatus::Delayed).unwrap(),
            "\"delayed\""
        );
        assert_eq!(DispatchStatus::Active.label(), "Active");
    }
}
