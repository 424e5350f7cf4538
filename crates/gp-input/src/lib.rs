//! gp-input: run configuration and extracted-result dataset formats.

pub mod dataset;
pub mod labels;
pub mod schema;
pub mod validate;

pub use dataset::*;
pub use labels::{LabelListError, parse_label_list};
pub use schema::*;
pub use validate::{ValidationError, validate_config, validate_dataset, validate_steps};

pub type InputResult<T> = Result<T, InputError>;

#[derive(thiserror::Error, Debug)]
pub enum InputError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn is_json(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Load a run configuration from YAML or JSON (chosen by extension) and validate it.
pub fn load_config(path: &std::path::Path) -> InputResult<RunConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: RunConfig = if is_json(path) {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    validate_config(&config)?;
    Ok(config)
}

pub fn save_config(path: &std::path::Path, config: &RunConfig) -> InputResult<()> {
    validate_config(config)?;
    let content = if is_json(path) {
        serde_json::to_string_pretty(config)?
    } else {
        serde_yaml::to_string(config)?
    };
    std::fs::write(path, content)?;
    Ok(())
}

/// Load an extracted-result dataset from YAML or JSON and check its internal consistency.
pub fn load_dataset(path: &std::path::Path) -> InputResult<ResultDataset> {
    let content = std::fs::read_to_string(path)?;
    let dataset: ResultDataset = if is_json(path) {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    validate_dataset(&dataset)?;
    Ok(dataset)
}

pub fn save_dataset(path: &std::path::Path, dataset: &ResultDataset) -> InputResult<()> {
    let content = if is_json(path) {
        serde_json::to_string_pretty(dataset)?
    } else {
        serde_yaml::to_string(dataset)?
    };
    std::fs::write(path, content)?;
    Ok(())
}
