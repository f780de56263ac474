use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::core::middleware::bearer_token;
use crate::features::auth::dtos::{LoginRequestDto, LoginResponseDto};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::SessionService;
use crate::shared::types::ApiResponse;
use axum::{
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

/// Login with the admin credentials
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<SessionService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<LoginResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let session = service.login(&dto.username, &dto.password).await?;
    let response = LoginResponseDto {
        access_token: session.token.clone(),
        token_type: "Bearer".to_string(),
        expires_in: session.remaining_secs(Utc::now()),
        user: session.user(),
    };
    Ok(Json(ApiResponse::success(
        Some(response),
        Some("Login successful".to_string()),
        None,
    )))
}

/// End the current session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn logout(
    user: AuthenticatedUser,
    State(service): State<Arc<SessionService>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<()>>> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    service.logout(token).await;
    Ok(Json(ApiResponse::success(
        None,
        Some(format!("Signed out {}", user.username)),
        None,
    )))
}

/// Get current authenticated admin
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user retrieved successfully", body = ApiResponse<AuthenticatedUser>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(user: AuthenticatedUser) -> Result<Json<ApiResponse<AuthenticatedUser>>> {
    Ok(Json(ApiResponse::success(Some(user), None, None)))
}
