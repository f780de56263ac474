//! Compiled-in seed data.
//!
//! The dashboard runs entirely on the records under `data/`. They are embedded
//! at build time and parsed once at startup; any malformed record aborts the
//! boot with a [`SeedError`] naming the offending file and record.

use serde::de::DeserializeOwned;
use thiserror::Error;

pub const REPORTS_JSON: &str = include_str!("../../data/reports.json");
pub const WORKERS_JSON: &str = include_str!("../../data/workers.json");
pub const DISPATCHED_WORKERS_JSON: &str = include_str!("../../data/dispatched_workers.json");
pub const PROFILE_JSON: &str = include_str!("../../data/profile.json");

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to parse seed file {file}: {source}")]
    Parse {
        file: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate {kind} id '{id}' in seed data")]
    DuplicateId { kind: &'static str, id: String },

    #[error("report '{id}' has an unusable timestamp: {reason}")]
    InvalidTimestamp { id: String, reason: String },

    #[error("{kind} '{id}' references unknown {target} '{target_id}'")]
    DanglingReference {
        kind: &'static str,
        id: String,
        target: &'static str,
        target_id: String,
    },
}

pub fn parse<T: DeserializeOwned>(file: &'static str, raw: &str) -> Result<T, SeedError> {
    serde_json::from_str(raw).map_err(|source| SeedError::Parse { file, source })
}

/// Returns the first id that occurs more than once
pub fn find_duplicate<'a, I>(ids: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().find(|id| !seen.insert(*id))
}
