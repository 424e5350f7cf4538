//! Bore node layers and their per-step distortion.

use crate::circle::{Circle, fit_circle};
use crate::error::DistortionResult;
use crate::fourier::{Harmonic, PolarSample, decompose, polar_samples, resample};
use gp_core::Label;
use serde::{Deserialize, Serialize};

/// A bore-surface point: a mesh node, or a ring point sampled by path interpolation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerNode {
    pub label: Option<Label>,
    pub coord: [f64; 3],
    /// `[u1, u2, u3]` per step.
    pub displacements: Vec<[f64; 3]>,
}

impl LayerNode {
    fn planar_position(&self, step: usize) -> [f64; 2] {
        let u = self.displacements.get(step).copied().unwrap_or([0.0; 3]);
        [self.coord[0] + u[0], self.coord[1] + u[1]]
    }
}

/// Bore nodes of one cylinder at one axial depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoreNodeLayer {
    pub cylinder: usize,
    pub layer: usize,
    pub z: f64,
    pub nominal: Circle,
    pub nodes: Vec<LayerNode>,
}

/// Options shared by every layer of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerOptions {
    /// Use the nominal circle at every step instead of fitting one.
    pub unique_center: bool,
    pub order: usize,
    pub angle_step_deg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerStep {
    pub step: usize,
    pub circle: Circle,
    pub samples: Vec<PolarSample>,
    pub harmonics: Vec<Harmonic>,
    /// `[angle_deg, delta_r_mm]` pairs.
    pub profile: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDistortion {
    pub cylinder: usize,
    pub layer: usize,
    pub z: f64,
    pub steps: Vec<LayerStep>,
}

impl BoreNodeLayer {
    /// Displaced in-plane positions at a step.
    pub fn positions(&self, step: usize) -> Vec<[f64; 2]> {
        self.nodes.iter().map(|n| n.planar_position(step)).collect()
    }

    pub fn analyze_step(&self, step: usize, options: &LayerOptions) -> DistortionResult<LayerStep> {
        let points = self.positions(step);
        let circle = if options.unique_center {
            self.nominal
        } else {
            fit_circle(&points)?
        };
        let samples = polar_samples(&points, circle.center, circle.radius);
        let harmonics = decompose(&samples, options.order);
        let profile = resample(&harmonics, options.angle_step_deg);
        Ok(LayerStep {
            step,
            circle,
            samples,
            harmonics,
            profile,
        })
    }

    pub fn analyze(&self, steps: &[usize], options: &LayerOptions) -> DistortionResult<LayerDistortion> {
        let steps = steps
            .iter()
            .map(|&s| self.analyze_step(s, options))
            .collect::<DistortionResult<Vec<_>>>()?;
        Ok(LayerDistortion {
            cylinder: self.cylinder,
            layer: self.layer,
            z: self.z,
            steps,
        })
    }
}
