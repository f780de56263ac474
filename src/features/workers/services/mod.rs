mod dispatch_service;
pub mod eligibility;
mod worker_service;

pub use dispatch_service::{DispatchCounts, DispatchOutcome, DispatchService, EMPTY_SELECTION_MESSAGE};
pub use eligibility::eligible_workers;
pub use worker_service::WorkerService;
