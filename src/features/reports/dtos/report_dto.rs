use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::reports::models::{
    urgency_color, urgency_label, Report, ReportStatus, Urgency,
};
use crate::features::reports::services::statistics::StatusCounts;
use crate::features::reports::services::{Constraint, ReportFilter, SortDirection, SortKey};

/// Query parameters for the report table
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportListQuery {
    /// none, date-time or urgency
    #[serde(default)]
    #[param(value_type = Option<SortKey>)]
    pub sort_by: SortKey,

    /// asc or desc
    #[serde(default)]
    #[param(value_type = Option<SortDirection>)]
    pub order: SortDirection,

    /// "all" or one of low, medium, high, critical
    #[serde(default)]
    #[param(value_type = Option<String>)]
    pub urgency: Constraint<Urgency>,

    /// "all" or an exact category name
    #[serde(default)]
    #[param(value_type = Option<String>)]
    pub category: Constraint<String>,

    /// "all" or one of pending, in-process, completed
    #[serde(default)]
    #[param(value_type = Option<String>)]
    pub status: Constraint<ReportStatus>,
}

impl ReportListQuery {
    pub fn filter(&self) -> ReportFilter {
        ReportFilter {
            urgency: self.urgency.clone(),
            category: self.category.clone(),
            status: self.status.clone(),
        }
    }
}

/// Response DTO for report, with display fields resolved
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportResponseDto {
    #[serde(flatten)]
    pub report: Report,
    pub status_label: String,
    pub urgency_label: String,
    pub urgency_color: String,
    /// Parsed filing instant; absent when the stored strings do not parse
    pub reported_at: Option<NaiveDateTime>,
}

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        Self {
            status_label: r.status.label().to_string(),
            urgency_label: urgency_label(r.urgency).to_string(),
            urgency_color: urgency_color(r.urgency).to_string(),
            reported_at: r.reported_at().ok(),
            report: r,
        }
    }
}

/// Report table plus the status counts of the rows it contains
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportListDto {
    pub reports: Vec<ReportResponseDto>,
    pub counts: StatusCounts,
}

impl ReportListDto {
    pub fn new(reports: Vec<Report>) -> Self {
        let counts = StatusCounts::of(&reports);
        Self {
            reports: reports.into_iter().map(ReportResponseDto::from).collect(),
            counts,
        }
    }
}
