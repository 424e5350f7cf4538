//! Error types for the gp-app service layer.

use std::path::PathBuf;

/// Application error wrapping the backend crates' errors as text.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Input error: {0}")]
    Input(String),

    #[error("Failed to read input file: {path}: {message}")]
    InputFile { path: PathBuf, message: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Calculation error: {0}")]
    Calc(String),

    #[error("Distortion error: {0}")]
    Distortion(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<gp_input::InputError> for AppError {
    fn from(err: gp_input::InputError) -> Self {
        match err {
            gp_input::InputError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Input(other.to_string()),
        }
    }
}

impl From<gp_input::ValidationError> for AppError {
    fn from(err: gp_input::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<gp_model::ModelError> for AppError {
    fn from(err: gp_model::ModelError) -> Self {
        AppError::Model(err.to_string())
    }
}

impl From<gp_calc::CalcError> for AppError {
    fn from(err: gp_calc::CalcError) -> Self {
        AppError::Calc(err.to_string())
    }
}

impl From<gp_distortion::DistortionError> for AppError {
    fn from(err: gp_distortion::DistortionError) -> Self {
        AppError::Distortion(err.to_string())
    }
}

impl From<gp_report::ReportError> for AppError {
    fn from(err: gp_report::ReportError) -> Self {
        match err {
            gp_report::ReportError::RunNotFound { run_id } => AppError::RunNotFound(run_id),
            other => AppError::Report(other.to_string()),
        }
    }
}
