use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::reports::handlers;
use crate::features::reports::services::ReportService;

/// Create routes for the reports feature
///
/// All routes require the auth middleware to be applied by the caller
pub fn routes(report_service: Arc<ReportService>) -> Router {
    Router::new()
        .route("/api/reports", get(handlers::list_reports))
        .route("/api/reports/categories", get(handlers::list_categories))
        .route("/api/reports/{id}", get(handlers::get_report))
        .with_state(report_service)
}
