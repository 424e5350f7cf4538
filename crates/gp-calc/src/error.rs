//! Error types for gasket calculations.

use gp_core::Label;
use gp_model::ModelError;
use thiserror::Error;

/// Structural failures. These abort the run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("Invalid geometry of element {element}: {what}")]
    InvalidGeometry { element: Label, what: &'static str },

    #[error("No cylinder defined")]
    NoCylinder,

    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}

pub type CalcResult<T> = Result<T, CalcError>;

/// Lookup failures of one node's one cycle. Caught and turned into the
/// all-safe sentinel.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FatigueError {
    #[error("Empty fatigue table axis: {what}")]
    EmptyAxis { what: &'static str },

    #[error("Missing fatigue table cell (load {load}, ratio {ratio})")]
    MissingCell { load: usize, ratio: usize },

    #[error("Fatigue cell holds {found} values, expected {expected}")]
    CriteriaMismatch { expected: usize, found: usize },

    #[error("Non-finite value for {what}")]
    NonFinite { what: &'static str },

    #[error("No stress samples in the cycle window")]
    NoSamples,
}

pub type FatigueResult<T> = Result<T, FatigueError>;
