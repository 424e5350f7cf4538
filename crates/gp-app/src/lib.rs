//! Shared application service layer for gasketpost.
//!
//! Loads a run configuration and an extracted-result dataset, drives every
//! post-processing stage in order, and persists the reports. The CLI is a thin
//! front end over these functions.

pub mod error;
pub mod input_service;
pub mod progress;
pub mod run_service;

pub use error::{AppError, AppResult};
pub use input_service::{
    DatasetSummary, InspectSummary, inspect, load_config, load_dataset, summarize_dataset,
};
pub use progress::{RunProgressEvent, RunStage};
pub use run_service::{
    RunOptions, RunRequest, RunResponse, RunTimingSummary, ensure_run, ensure_run_with_progress,
    list_runs, load_run, post_process,
};
