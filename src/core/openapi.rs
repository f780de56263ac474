use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::dashboard::{handlers as dashboard_handlers, services as dashboard_services};
use crate::features::reports::services::statistics as report_statistics;
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
    services as reports_services,
};
use crate::features::users::{dtos as users_dtos, handlers::profile_handler};
use crate::features::workers::{
    dtos as workers_dtos, handlers as workers_handlers, models as workers_models,
    services as workers_services,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::login,
        auth::handlers::logout,
        auth::handlers::get_me,
        // Users
        profile_handler::get_profile,
        // Reports
        reports_handlers::report_handler::list_reports,
        reports_handlers::report_handler::list_categories,
        reports_handlers::report_handler::get_report,
        // Workers and dispatch
        workers_handlers::worker_handler::list_workers,
        workers_handlers::worker_handler::list_dispatched,
        workers_handlers::worker_handler::list_eligible_workers,
        workers_handlers::worker_handler::dispatch_workers,
        // Dashboard
        dashboard_handlers::dashboard_handler::get_summary,
        dashboard_handlers::dashboard_handler::get_statistics,
        dashboard_handlers::dashboard_handler::get_map,
        dashboard_handlers::dashboard_handler::get_heatmap,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::model::AuthenticatedUser,
            auth::dtos::LoginRequestDto,
            auth::dtos::LoginResponseDto,
            ApiResponse<auth::model::AuthenticatedUser>,
            ApiResponse<auth::dtos::LoginResponseDto>,
            // Users
            users_dtos::UserProfile,
            users_dtos::UserProfileResponseDto,
            ApiResponse<users_dtos::UserProfileResponseDto>,
            // Reports
            reports_models::Report,
            reports_models::ReportStatus,
            reports_models::Urgency,
            reports_models::Geolocation,
            reports_services::SortKey,
            reports_services::SortDirection,
            reports_services::TimeWindow,
            reports_dtos::ReportResponseDto,
            reports_dtos::ReportListDto,
            ApiResponse<reports_dtos::ReportListDto>,
            ApiResponse<reports_dtos::ReportResponseDto>,
            ApiResponse<Vec<String>>,
            // Workers
            workers_models::Worker,
            workers_models::DispatchStatus,
            workers_models::DispatchedWorker,
            workers_models::WorkerSnapshot,
            workers_models::ReportSnapshot,
            workers_services::DispatchCounts,
            workers_dtos::DispatchRequestDto,
            workers_dtos::DispatchResponseDto,
            workers_dtos::DispatchedListDto,
            ApiResponse<Vec<workers_models::Worker>>,
            ApiResponse<workers_dtos::DispatchResponseDto>,
            ApiResponse<workers_dtos::DispatchedListDto>,
            // Dashboard
            reports_services::ReportSummary,
            reports_services::ReportStatistics,
            report_statistics::StatusCounts,
            report_statistics::UrgencyCounts,
            report_statistics::CategoryCount,
            report_statistics::AreaCount,
            report_statistics::DailyCount,
            dashboard_services::MapView,
            dashboard_services::MapMarker,
            dashboard_services::MapCenter,
            dashboard_services::HeatPoint,
            ApiResponse<reports_services::ReportSummary>,
            ApiResponse<reports_services::ReportStatistics>,
            ApiResponse<dashboard_services::MapView>,
            ApiResponse<Vec<dashboard_services::HeatPoint>>,
        )
    ),
    tags(
        (name = "auth", description = "Admin login sessions"),
        (name = "users", description = "Administrator profile"),
        (name = "reports", description = "Citizen reports: ranking, filtering and detail"),
        (name = "workers", description = "Worker registry, eligibility and dispatch"),
        (name = "Dashboard", description = "Analytics, live map and heat map"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Sahayak API",
        version = "0.1.0",
        description = "Civic issue tracking admin API",
    )
)]
pub struct ApiDoc;

/// Adds the bearer session token scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
