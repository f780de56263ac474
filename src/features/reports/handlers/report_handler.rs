use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::reports::dtos::{ReportListDto, ReportListQuery, ReportResponseDto};
use crate::features::reports::services::ReportService;
use crate::shared::types::{ApiResponse, Meta};

/// List reports, filtered then sorted
#[utoipa::path(
    get,
    path = "/api/reports",
    params(ReportListQuery),
    responses(
        (status = 200, description = "Filtered and sorted reports", body = ApiResponse<ReportListDto>),
        (status = 400, description = "Unknown filter or sort value"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn list_reports(
    State(service): State<Arc<ReportService>>,
    AppQuery(query): AppQuery<ReportListQuery>,
) -> Result<Json<ApiResponse<ReportListDto>>> {
    let reports = service
        .list(&query.filter(), query.sort_by, query.order)
        .await;
    let meta = Meta::of_len(reports.len());
    Ok(Json(ApiResponse::success(
        Some(ReportListDto::new(reports)),
        None,
        Some(meta),
    )))
}

/// Distinct report categories, for the category filter
#[utoipa::path(
    get,
    path = "/api/reports/categories",
    responses(
        (status = 200, description = "Categories in order of first appearance", body = ApiResponse<Vec<String>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn list_categories(
    State(service): State<Arc<ReportService>>,
) -> Result<Json<ApiResponse<Vec<String>>>> {
    let categories = service.categories().await;
    let meta = Meta::of_len(categories.len());
    Ok(Json(ApiResponse::success(Some(categories), None, Some(meta))))
}

/// Get report by ID
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    params(
        ("id" = String, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<ReportResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn get_report(
    State(service): State<Arc<ReportService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = service.get(&id).await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}
