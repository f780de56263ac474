use axum::{
    routing::{get, post},
    Router,
};

use crate::features::workers::handlers::{self, WorkerState};

/// Worker registry and dispatch routes; all require authentication
pub fn routes(state: WorkerState) -> Router {
    Router::new()
        .route("/api/workers", get(handlers::list_workers))
        .route("/api/workers/dispatched", get(handlers::list_dispatched))
        .route(
            "/api/reports/{id}/eligible-workers",
            get(handlers::list_eligible_workers),
        )
        .route(
            "/api/reports/{id}/dispatch",
            post(handlers::dispatch_workers),
        )
        .with_state(state)
}
