//! gp-distortion: bore and cam distortion.
//!
//! Bore layers come from a manual node set or from automatic ring paths; each
//! layer is fitted per step (nominal or least-squares circle), decomposed into
//! Fourier harmonics and resampled at a fixed angular step. Cam lines report
//! the perpendicular distance of every node to the line through its ends.

pub mod acquisition;
pub mod cam;
pub mod circle;
pub mod error;
pub mod fourier;
pub mod layer;

pub use acquisition::{AutoRing, automatic_layers, layer_depths, manual_layers, ring_points};
pub use cam::{CamDistortion, CamLine, CamNode, CamStep, cam_lines, line_distance};
pub use circle::{Circle, fit_circle};
pub use error::{DistortionError, DistortionResult};
pub use fourier::{Harmonic, PolarSample, decompose, polar_samples, reconstruct, resample};
pub use layer::{BoreNodeLayer, LayerDistortion, LayerNode, LayerOptions, LayerStep};

use gp_input::{BoreConfig, BoreModeDef, RunConfig};
use gp_model::ResultProvider;

/// 0-based steps to report: the configured 1-based list, or every step.
pub fn report_steps(configured: &[usize], step_count: usize) -> Vec<usize> {
    if configured.is_empty() {
        (0..step_count).collect()
    } else {
        configured.iter().map(|s| s.saturating_sub(1)).collect()
    }
}

/// Acquire the bore layers and analyse them at the report steps.
pub fn bore_distortion(
    provider: &dyn ResultProvider,
    config: &RunConfig,
    bore: &BoreConfig,
) -> DistortionResult<Vec<LayerDistortion>> {
    let layers = match &bore.mode {
        BoreModeDef::Manual { node_labels } => {
            manual_layers(provider, config, node_labels, bore.radius)?
        }
        BoreModeDef::Automatic {
            points,
            layers,
            z_start,
            z_end,
            region,
        } => automatic_layers(
            provider,
            config,
            &AutoRing {
                points: *points,
                layers: *layers,
                z_start: *z_start,
                z_end: *z_end,
                region: region.as_deref(),
                radius: bore.radius,
            },
        )?,
    };
    let options = LayerOptions {
        unique_center: bore.unique_center,
        order: bore.order.unwrap_or(config.limits.fourier_order),
        angle_step_deg: config.limits.angle_step_deg,
    };
    let steps = report_steps(&bore.report_steps, provider.step_names().len());
    layers.iter().map(|l| l.analyze(&steps, &options)).collect()
}
