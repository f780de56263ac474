use crate::core::error::{AppError, Result};
use crate::features::reports::models::Report;
use crate::features::workers::models::Worker;
use crate::features::workers::services::eligibility::eligible_workers;
use crate::shared::seed::{self, find_duplicate, SeedError};

/// The worker registry; workers never change after startup
pub struct WorkerService {
    workers: Vec<Worker>,
}

impl WorkerService {
    pub fn new(workers: Vec<Worker>) -> std::result::Result<Self, SeedError> {
        if let Some(id) = find_duplicate(workers.iter().map(|w| w.id.as_str())) {
            return Err(SeedError::DuplicateId {
                kind: "worker",
                id: id.to_string(),
            });
        }
        Ok(Self { workers })
    }

    pub fn from_seed() -> std::result::Result<Self, SeedError> {
        let workers: Vec<Worker> = seed::parse("workers.json", seed::WORKERS_JSON)?;
        let service = Self::new(workers)?;
        tracing::info!("Worker registry seeded with {} workers", service.workers.len());
        Ok(service)
    }

    pub fn all(&self) -> &[Worker] {
        &self.workers
    }

    pub fn get(&self, id: &str) -> Result<&Worker> {
        self.workers
            .iter()
            .find(|w| w.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Worker {} not found", id)))
    }

    pub fn eligible_for(&self, report: &Report) -> Vec<Worker> {
        eligible_workers(report, &self.workers)
    }
}
