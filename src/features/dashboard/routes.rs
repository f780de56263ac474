use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::dashboard::handlers;
use crate::features::dashboard::services::DashboardService;

/// Create dashboard routes; all require authentication
pub fn routes(dashboard_service: Arc<DashboardService>) -> Router {
    Router::new()
        // Summary
        .route("/api/dashboard/summary", get(handlers::get_summary))
        // Charts
        .route("/api/dashboard/statistics", get(handlers::get_statistics))
        // Map layers
        .route("/api/dashboard/map", get(handlers::get_map))
        .route("/api/dashboard/heatmap", get(handlers::get_heatmap))
        .with_state(dashboard_service)
}
