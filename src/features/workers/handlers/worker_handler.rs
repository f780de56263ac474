use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::workers::dtos::{DispatchRequestDto, DispatchResponseDto, DispatchedListDto};
use crate::features::workers::models::Worker;
use crate::features::workers::services::{DispatchService, WorkerService};
use crate::shared::types::{ApiResponse, Meta};

/// State for worker handlers
#[derive(Clone)]
pub struct WorkerState {
    pub worker_service: Arc<WorkerService>,
    pub dispatch_service: Arc<DispatchService>,
}

/// List all registered workers
#[utoipa::path(
    get,
    path = "/api/workers",
    responses(
        (status = 200, description = "All workers", body = ApiResponse<Vec<Worker>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "workers"
)]
pub async fn list_workers(
    State(state): State<WorkerState>,
) -> Result<Json<ApiResponse<Vec<Worker>>>> {
    let workers = state.worker_service.all().to_vec();
    let meta = Meta::of_len(workers.len());
    Ok(Json(ApiResponse::success(Some(workers), None, Some(meta))))
}

/// List dispatched workers with status counts
#[utoipa::path(
    get,
    path = "/api/workers/dispatched",
    responses(
        (status = 200, description = "Dispatch board", body = ApiResponse<DispatchedListDto>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "workers"
)]
pub async fn list_dispatched(
    State(state): State<WorkerState>,
) -> Result<Json<ApiResponse<DispatchedListDto>>> {
    let records = state.dispatch_service.list().await;
    let meta = Meta::of_len(records.len());
    Ok(Json(ApiResponse::success(
        Some(DispatchedListDto::new(records)),
        None,
        Some(meta),
    )))
}

/// Workers that can be dispatched to a report
#[utoipa::path(
    get,
    path = "/api/reports/{id}/eligible-workers",
    params(
        ("id" = String, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Available workers of the report's category", body = ApiResponse<Vec<Worker>>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = [])),
    tag = "workers"
)]
pub async fn list_eligible_workers(
    State(state): State<WorkerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Worker>>>> {
    let workers = state.dispatch_service.eligible_workers(&id).await?;
    let meta = Meta::of_len(workers.len());
    Ok(Json(ApiResponse::success(Some(workers), None, Some(meta))))
}

/// Dispatch workers to a report
#[utoipa::path(
    post,
    path = "/api/reports/{id}/dispatch",
    params(
        ("id" = String, Path, description = "Report ID")
    ),
    request_body = DispatchRequestDto,
    responses(
        (status = 200, description = "Workers dispatched", body = ApiResponse<DispatchResponseDto>),
        (status = 400, description = "Empty selection or ineligible worker"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Report or worker not found"),
        (status = 409, description = "Report already completed")
    ),
    security(("bearer_auth" = [])),
    tag = "workers"
)]
pub async fn dispatch_workers(
    user: AuthenticatedUser,
    State(state): State<WorkerState>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<DispatchRequestDto>,
) -> Result<Json<ApiResponse<DispatchResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    tracing::debug!("{} dispatching {:?} to report {}", user.username, dto.worker_ids, id);
    let now = chrono::Local::now().naive_local();
    let outcome = state
        .dispatch_service
        .dispatch(&id, &dto.worker_ids, now)
        .await?;

    let message = outcome.message.clone();
    Ok(Json(ApiResponse::success(
        Some(outcome.into()),
        Some(message),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use super::WorkerState;
    use crate::core::config::DispatchConfig;
    use crate::features::reports::models::ReportStatus;
    use crate::features::reports::services::ReportService;
    use crate::features::workers::dtos::{DispatchResponseDto, DispatchedListDto};
    use crate::features::workers::models::Worker;
    use crate::features::workers::services::{DispatchService, WorkerService, EMPTY_SELECTION_MESSAGE};
    use crate::shared::test_helpers::with_admin_session;
    use crate::shared::types::ApiResponse;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;
    use std::sync::Arc;

    async fn server() -> (Arc<ReportService>, TestServer) {
        let reports = Arc::new(ReportService::from_seed().unwrap());
        let workers = Arc::new(WorkerService::from_seed().unwrap());
        let dispatch = DispatchService::from_seed(
            reports.clone(),
            workers.clone(),
            DispatchConfig::default(),
        )
        .await
        .unwrap();
        let state = WorkerState {
            worker_service: workers,
            dispatch_service: Arc::new(dispatch),
        };
        let app = with_admin_session(crate::features::workers::routes(state));
        (reports, TestServer::new(app).unwrap())
    }

    #[tokio::test]
    async fn test_eligible_workers_for_water_report() {
        let (_, server) = server().await;
        let response = server.get("/api/reports/3/eligible-workers").await;

        response.assert_status_ok();
        let workers = response.json::<ApiResponse<Vec<Worker>>>().data.unwrap();
        let ids: Vec<&str> = workers.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["w4"]);
    }

    #[tokio::test]
    async fn test_no_eligible_workers_is_not_an_error() {
        let (_, server) = server().await;
        let response = server.get("/api/reports/16/eligible-workers").await;

        response.assert_status_ok();
        let workers = response.json::<ApiResponse<Vec<Worker>>>().data.unwrap();
        assert!(workers.is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_empty_selection() {
        let (reports, server) = server().await;
        let response = server
            .post("/api/reports/6/dispatch")
            .json(&json!({ "worker_ids": [] }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<ApiResponse<()>>();
        assert_eq!(body.message.as_deref(), Some(EMPTY_SELECTION_MESSAGE));
        assert_eq!(reports.get("6").await.unwrap().status, ReportStatus::Pending);
    }

    #[tokio::test]
    async fn test_dispatch_success() {
        let (reports, server) = server().await;
        let response = server
            .post("/api/reports/6/dispatch")
            .json(&json!({ "worker_ids": ["w1"] }))
            .await;

        response.assert_status_ok();
        let body = response.json::<ApiResponse<DispatchResponseDto>>();
        assert_eq!(
            body.message.as_deref(),
            Some("1 worker(s) assigned to resolve the issue.")
        );
        let data = body.data.unwrap();
        assert_eq!(data.report.report.status, ReportStatus::InProcess);
        assert_eq!(data.dispatched.len(), 1);
        assert_eq!(reports.get("6").await.unwrap().status, ReportStatus::InProcess);

        let board = server.get("/api/workers/dispatched").await;
        let board = board.json::<ApiResponse<DispatchedListDto>>().data.unwrap();
        assert_eq!(board.workers.len(), 6);
        assert_eq!(board.counts.active, 4);
    }

    #[tokio::test]
    async fn test_dispatch_to_completed_report() {
        let (_, server) = server().await;
        let response = server
            .post("/api/reports/5/dispatch")
            .json(&json!({ "worker_ids": ["w6"] }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_dispatch_malformed_body() {
        let (_, server) = server().await;
        let response = server
            .post("/api/reports/6/dispatch")
            .json(&json!({ "worker_ids": "w1" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_workers() {
        let (_, server) = server().await;
        let response = server.get("/api/workers").await;

        response.assert_status_ok();
        let body = response.json::<ApiResponse<Vec<Worker>>>();
        assert_eq!(body.meta.unwrap().total, 6);
    }
}
