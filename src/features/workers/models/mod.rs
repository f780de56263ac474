mod dispatched_worker;
mod worker;

pub use dispatched_worker::{DispatchStatus, DispatchedWorker, ReportSnapshot, WorkerSnapshot};
pub use worker::Worker;
