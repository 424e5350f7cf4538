//! Content-based hashing for run IDs.

use gp_input::RunConfig;
use sha2::{Digest, Sha256};

/// Hash of the configuration, the dataset's step names and entity counts, and
/// the engine version.
pub fn compute_run_id(
    config: &RunConfig,
    steps: &[String],
    entity_counts: (usize, usize),
    engine_version: &str,
) -> String {
    let mut hasher = Sha256::new();

    let config_json = serde_json::to_string(config).unwrap_or_default();
    hasher.update(config_json.as_bytes());

    for step in steps {
        hasher.update(step.as_bytes());
        hasher.update([0u8]);
    }
    hasher.update(entity_counts.0.to_le_bytes());
    hasher.update(entity_counts.1.to_le_bytes());

    hasher.update(engine_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}
