//! Core data layer for the gradebook dashboard apps.
//! This crate is the single source of truth for business invariants.

pub mod analytics;
pub mod assist;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use analytics::performance::{
    band_distribution, class_average, grade_percentage, score_trend, student_average,
    PerformanceBand, Trend,
};
pub use analytics::timeline::{monthly_activity, MonthBucket};
pub use assist::{
    parse_reply, AssistResult, ExtractError, ExtractedReply, RequestGuard, RequestToken,
    TextExtractor,
};
pub use export::{csv_document, export_filename, grades_csv, json_document, students_csv};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::record::{Assignment, EntityId, Grade, RecordValidationError, Student};
pub use repo::collection_repo::{
    LoadReport, LoadSource, RepoError, RepoResult, ASSIGNMENTS_KEY, GRADES_KEY, STUDENTS_KEY,
};
pub use service::gradebook::{Gradebook, GradebookError};
pub use service::preferences::Preferences;
pub use store::{
    open_store, open_store_in_memory, MemoryStore, SqliteStore, Store, StoreError, StoreResult,
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
