//! gp-report: report records, text rendering, run log and report storage.

pub mod format;
pub mod hash;
pub mod log;
pub mod store;
pub mod types;

pub use format::render_report;
pub use hash::compute_run_id;
pub use log::{LogEntry, LogStatus, RunLog};
pub use store::ReportStore;
pub use types::*;

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Run not found: {run_id}")]
    RunNotFound { run_id: String },
}
