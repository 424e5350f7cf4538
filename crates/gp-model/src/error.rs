//! Model construction errors.

use gp_core::Label;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Unknown node label {0}")]
    UnknownNode(Label),

    #[error("Unknown element label {0}")]
    UnknownElement(Label),

    #[error("Element {element} references unknown section {section}")]
    UnknownSection { element: Label, section: String },

    #[error("Section {section} references unknown material {material}")]
    UnknownMaterial { section: String, material: String },

    #[error("Element {element} has {count} nodes (expected 3 or 4)")]
    InvalidConnectivity { element: Label, count: usize },

    #[error("Step {step} out of range ({count} steps)")]
    StepOutOfRange { step: usize, count: usize },

    #[error("Missing {what} for label {label} at step {step}")]
    MissingSample {
        what: &'static str,
        label: Label,
        step: usize,
    },

    #[error("No elements selected for post-processing")]
    NoElements,

    #[error("Provider error: {0}")]
    Provider(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
