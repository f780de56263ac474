use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::reports::dtos::ReportResponseDto;
use crate::features::workers::models::DispatchedWorker;
use crate::features::workers::services::{DispatchCounts, DispatchOutcome};

/// Request DTO for dispatching workers to a report
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct DispatchRequestDto {
    /// Selected worker ids; an empty list is rejected
    #[validate(length(max = 50, message = "At most 50 workers can be dispatched at once"))]
    #[serde(default)]
    pub worker_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DispatchResponseDto {
    pub report: ReportResponseDto,
    pub dispatched: Vec<DispatchedWorker>,
}

impl From<DispatchOutcome> for DispatchResponseDto {
    fn from(outcome: DispatchOutcome) -> Self {
        Self {
            report: outcome.report.into(),
            dispatched: outcome.dispatched,
        }
    }
}

/// The dispatch board: every ledger record plus status counts
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DispatchedListDto {
    pub workers: Vec<DispatchedWorker>,
    pub counts: DispatchCounts,
}

impl DispatchedListDto {
    pub fn new(workers: Vec<DispatchedWorker>) -> Self {
        Self {
            counts: DispatchCounts::of(&workers),
            workers,
        }
    }
}
