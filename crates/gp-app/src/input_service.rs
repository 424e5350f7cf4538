//! Configuration and dataset loading, validation, and introspection.

use std::path::Path;

use gp_input::{InputError, ResultDataset, RunConfig};
use gp_model::{InMemoryProvider, ModelBuilder};

use crate::error::{AppError, AppResult};

fn file_error(path: &Path, err: InputError) -> AppError {
    match err {
        InputError::Io(e) => AppError::InputFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        },
        other => other.into(),
    }
}

/// Load and validate a run configuration.
pub fn load_config(path: &Path) -> AppResult<RunConfig> {
    gp_input::load_config(path).map_err(|e| file_error(path, e))
}

/// Load and validate an extracted-result dataset.
pub fn load_dataset(path: &Path) -> AppResult<ResultDataset> {
    gp_input::load_dataset(path).map_err(|e| file_error(path, e))
}

/// Counts describing a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub steps: Vec<String>,
    pub node_count: usize,
    pub element_count: usize,
    pub element_sets: Vec<String>,
    pub node_sets: Vec<String>,
    pub has_relative: bool,
    pub has_free_body_report: bool,
}

pub fn summarize_dataset(dataset: &ResultDataset) -> DatasetSummary {
    DatasetSummary {
        steps: dataset.steps.clone(),
        node_count: dataset.nodes.len(),
        element_count: dataset.elements.len(),
        element_sets: dataset.element_sets.iter().map(|s| s.name.clone()).collect(),
        node_sets: dataset.node_sets.iter().map(|s| s.name.clone()).collect(),
        has_relative: dataset.nodes.iter().any(|n| !n.relative.is_empty()),
        has_free_body_report: dataset.free_body_report.is_some(),
    }
}

/// What a run over this configuration and dataset would process.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectSummary {
    pub dataset: DatasetSummary,
    pub selected_elements: usize,
    pub selected_nodes: usize,
    pub fatigue_elements: usize,
    pub element_sets: Vec<String>,
    /// Non-fatal problems met while reading the model.
    pub issues: Vec<String>,
}

/// Load both files and build the model without running any calculation.
pub fn inspect(config_path: &Path, dataset_path: &Path) -> AppResult<InspectSummary> {
    let config = load_config(config_path)?;
    let dataset = load_dataset(dataset_path)?;
    gp_input::validate_steps(&config, dataset.step_count())?;

    let summary = summarize_dataset(&dataset);
    let provider = InMemoryProvider::new(dataset);
    let (model, issues) = ModelBuilder::new(&config).build(&provider)?;

    Ok(InspectSummary {
        dataset: summary,
        selected_elements: model.elements().len(),
        selected_nodes: model.nodes().len(),
        fatigue_elements: model.fatigue_elements().len(),
        element_sets: model.element_sets().keys().cloned().collect(),
        issues: issues
            .iter()
            .map(|i| format!("{}: {}", i.context, i.message))
            .collect(),
    })
}
