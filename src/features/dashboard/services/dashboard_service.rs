use std::sync::Arc;

use crate::core::error::Result;
use crate::features::dashboard::services::heatmap::{heat_points, HeatPoint};
use crate::features::dashboard::services::markers::{map_view, MapView};
use crate::features::reports::services::{
    ReportFilter, ReportService, ReportStatistics, ReportSummary, StatisticsOptions,
};

/// Read-only analytics over the report store
pub struct DashboardService {
    reports: Arc<ReportService>,
}

impl DashboardService {
    pub fn new(reports: Arc<ReportService>) -> Self {
        Self { reports }
    }

    // ========================================================================
    // Summary (header cards)
    // ========================================================================

    pub async fn get_summary(&self) -> ReportSummary {
        self.reports.summary().await
    }

    // ========================================================================
    // Statistics (charts)
    // ========================================================================

    pub async fn get_statistics(&self, options: &StatisticsOptions) -> Result<ReportStatistics> {
        tracing::debug!(?options, "Deriving statistics");
        self.reports.statistics(options).await
    }

    // ========================================================================
    // Map
    // ========================================================================

    pub async fn get_map(&self, filter: &ReportFilter) -> MapView {
        map_view(&self.reports.snapshot().await, filter)
    }

    pub async fn get_heatmap(&self) -> Vec<HeatPoint> {
        heat_points(&self.reports.snapshot().await)
    }
}
