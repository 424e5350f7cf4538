//! Error types for bore and cam distortion.

use gp_calc::CalcError;
use gp_input::LabelListError;
use gp_model::ModelError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistortionError {
    #[error("Circle fit is singular ({points} points)")]
    SingularFit { points: usize },

    #[error("Manual bore distortion requires a bore node set")]
    MissingBoreNodes,

    #[error(
        "No interpolation radius found for cylinder {cylinder} layer {layer} after {iterations} iterations"
    )]
    RadiusSearchExhausted {
        cylinder: usize,
        layer: usize,
        iterations: usize,
    },

    #[error(
        "No start angle found for cylinder {cylinder} layer {layer} after {iterations} iterations"
    )]
    StartAngleSearchExhausted {
        cylinder: usize,
        layer: usize,
        iterations: usize,
    },

    #[error("Path interpolation failed at step {step} for cylinder {cylinder} layer {layer}")]
    InterpolationFailed {
        cylinder: usize,
        layer: usize,
        step: usize,
    },

    #[error("Cam line {line} end nodes share the same x coordinate")]
    DegenerateCamLine { line: usize },

    #[error("Cam line {line} needs at least two nodes")]
    ShortCamLine { line: usize },

    #[error("Invalid node list: {0}")]
    Labels(#[from] LabelListError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Calculation error: {0}")]
    Calc(#[from] CalcError),
}

pub type DistortionResult<T> = Result<T, DistortionError>;
