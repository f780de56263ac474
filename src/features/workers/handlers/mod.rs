pub mod worker_handler;

pub use worker_handler::{
    __path_dispatch_workers, __path_list_dispatched, __path_list_eligible_workers,
    __path_list_workers, dispatch_workers, list_dispatched, list_eligible_workers, list_workers,
    WorkerState,
};
