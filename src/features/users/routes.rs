use crate::features::users::handlers::profile_handler;
use crate::features::users::services::UserProfileService;
use axum::{routing::get, Router};
use std::sync::Arc;

pub fn routes(service: Arc<UserProfileService>) -> Router {
    Router::new()
        .route("/api/users/me/profile", get(profile_handler::get_profile))
        .with_state(service)
}
