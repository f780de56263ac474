use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::core::extractor::AppQuery;
use crate::features::dashboard::dtos::*;
use crate::features::dashboard::services::{DashboardService, HeatPoint, MapView};
use crate::features::reports::services::{ReportStatistics, ReportSummary};
use crate::shared::types::{ApiResponse, Meta};

// ============================================================================
// Summary
// ============================================================================

/// Header card counts
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = ApiResponse<ReportSummary>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_summary(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<ReportSummary>>, AppError> {
    let summary = service.get_summary().await;
    Ok(Json(ApiResponse::success(Some(summary), None, None)))
}

// ============================================================================
// Statistics
// ============================================================================

/// Status, urgency, category and area breakdowns plus the daily timeline
#[utoipa::path(
    get,
    path = "/api/dashboard/statistics",
    tag = "Dashboard",
    params(StatisticsQuery),
    responses(
        (status = 200, description = "Report statistics", body = ApiResponse<ReportStatistics>),
        (status = 400, description = "Invalid window or date, or timeline too long"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_statistics(
    State(service): State<Arc<DashboardService>>,
    AppQuery(query): AppQuery<StatisticsQuery>,
) -> Result<Json<ApiResponse<ReportStatistics>>, AppError> {
    let stats = service.get_statistics(&query.options()).await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

// ============================================================================
// Map
// ============================================================================

/// Report markers for the live map
#[utoipa::path(
    get,
    path = "/api/dashboard/map",
    tag = "Dashboard",
    params(MapQuery),
    responses(
        (status = 200, description = "Filtered map markers", body = ApiResponse<MapView>),
        (status = 400, description = "Unknown filter value"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_map(
    State(service): State<Arc<DashboardService>>,
    AppQuery(query): AppQuery<MapQuery>,
) -> Result<Json<ApiResponse<MapView>>, AppError> {
    let view = service.get_map(&query.filter()).await;
    let meta = Meta::of_len(view.markers.len());
    Ok(Json(ApiResponse::success(Some(view), None, Some(meta))))
}

/// Heat-map intensity points
#[utoipa::path(
    get,
    path = "/api/dashboard/heatmap",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Heat-map points", body = ApiResponse<Vec<HeatPoint>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_heatmap(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<Vec<HeatPoint>>>, AppError> {
    let points = service.get_heatmap().await;
    let meta = Meta::of_len(points.len());
    Ok(Json(ApiResponse::success(Some(points), None, Some(meta))))
}
