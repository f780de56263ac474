use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::features::reports::models::{ReportStatus, Urgency};
use crate::features::reports::services::{Constraint, ReportFilter, StatisticsOptions, TimeWindow};
use crate::shared::constants::{DEFAULT_TOP_AREAS, MAX_TOP_AREAS};

// ============================================================================
// Statistics
// ============================================================================

/// Query parameters for the analytics charts
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatisticsQuery {
    /// 7days, 30days or all
    #[serde(default)]
    #[param(value_type = Option<TimeWindow>)]
    pub window: TimeWindow,

    /// Last day of the timeline (YYYY-MM-DD); defaults to the latest report date
    pub as_of: Option<NaiveDate>,

    /// Number of areas in the area analysis
    #[param(minimum = 1, maximum = 100)]
    pub top_areas: Option<usize>,
}

impl StatisticsQuery {
    pub fn options(&self) -> StatisticsOptions {
        StatisticsOptions {
            window: self.window,
            anchor: self.as_of,
            top_areas: self
                .top_areas
                .unwrap_or(DEFAULT_TOP_AREAS)
                .clamp(1, MAX_TOP_AREAS),
        }
    }
}

// ============================================================================
// Map
// ============================================================================

/// Filters for the live map
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MapQuery {
    #[serde(default)]
    #[param(value_type = Option<String>)]
    pub urgency: Constraint<Urgency>,

    #[serde(default)]
    #[param(value_type = Option<String>)]
    pub category: Constraint<String>,

    #[serde(default)]
    #[param(value_type = Option<String>)]
    pub status: Constraint<ReportStatus>,
}

impl MapQuery {
    pub fn filter(&self) -> ReportFilter {
        ReportFilter {
            urgency: self.urgency.clone(),
            category: self.category.clone(),
            status: self.status.clone(),
        }
    }
}
