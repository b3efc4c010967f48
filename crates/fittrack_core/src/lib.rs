//! Core domain logic for the fitness journal.
//! This crate is the single source of truth for business invariants.

pub mod logging;
pub mod metrics;
pub mod model;
pub mod repo;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use metrics::{ProgressReport, CALORIE_FACTOR};
pub use model::athlete::{Athlete, ExerciseHistory, HistoryEntries, HistoryIter};
pub use model::exercise::{ExerciseRecord, TIMESTAMP_FORMAT};
pub use model::goal::{GoalError, GoalKind};
pub use repo::progress_repo::{
    ExerciseSnapshot, JsonFileProgressRepository, PersistenceError, PersistenceResult,
    ProgressRepository, ProgressSnapshot, DEFAULT_PROGRESS_FILE,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
