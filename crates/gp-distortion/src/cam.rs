//! Cam journal line distortion.
//!
//! Per step the reference line runs through the two nodes with the extreme
//! initial x, in the (x, u3) plane. Every node reports its perpendicular
//! distance to that line in µm.

use crate::error::{DistortionError, DistortionResult};
use gp_core::{Label, mm_to_um};
use gp_input::parse_label_list;
use gp_model::ResultProvider;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CamNode {
    pub label: Label,
    pub coord: [f64; 3],
    pub displacements: Vec<[f64; 3]>,
}

/// Nodes of one cam line, sorted by initial x.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CamLine {
    pub line: usize,
    pub nodes: Vec<CamNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CamStep {
    pub step: usize,
    pub slope: f64,
    pub intercept: f64,
    /// One distance per node, in node order.
    pub distances: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CamDistortion {
    pub line: usize,
    pub labels: Vec<Label>,
    pub x: Vec<f64>,
    pub steps: Vec<CamStep>,
}

/// Signed distance of `(x, z)` from `z = slope·x + intercept`, µm.
pub fn line_distance(x: f64, z: f64, slope: f64, intercept: f64) -> f64 {
    mm_to_um(x * slope + intercept - z) / (slope * slope + 1.0).sqrt()
}

impl CamLine {
    pub fn new(line: usize, mut nodes: Vec<CamNode>) -> DistortionResult<Self> {
        if nodes.len() < 2 {
            return Err(DistortionError::ShortCamLine { line });
        }
        nodes.sort_by(|a, b| a.coord[0].total_cmp(&b.coord[0]));
        Ok(Self { line, nodes })
    }

    fn u3(node: &CamNode, step: usize) -> f64 {
        node.displacements.get(step).map(|u| u[2]).unwrap_or(0.0)
    }

    pub fn analyze_step(&self, step: usize) -> DistortionResult<CamStep> {
        let (first, last) = match (self.nodes.first(), self.nodes.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return Err(DistortionError::ShortCamLine { line: self.line }),
        };
        let (x0, x1) = (first.coord[0], last.coord[0]);
        if x1 == x0 {
            return Err(DistortionError::DegenerateCamLine { line: self.line });
        }
        let (z0, z1) = (Self::u3(first, step), Self::u3(last, step));
        let slope = (z1 - z0) / (x1 - x0);
        let intercept = z0 - slope * x0;
        let distances = self
            .nodes
            .iter()
            .map(|n| line_distance(n.coord[0], Self::u3(n, step), slope, intercept))
            .collect();
        Ok(CamStep {
            step,
            slope,
            intercept,
            distances,
        })
    }

    pub fn analyze(&self, steps: &[usize]) -> DistortionResult<CamDistortion> {
        let steps = steps
            .iter()
            .map(|&s| self.analyze_step(s))
            .collect::<DistortionResult<Vec<_>>>()?;
        Ok(CamDistortion {
            line: self.line,
            labels: self.nodes.iter().map(|n| n.label).collect(),
            x: self.nodes.iter().map(|n| n.coord[0]).collect(),
            steps,
        })
    }
}

/// Read the cam lines, one comma separated label list each.
pub fn cam_lines(provider: &dyn ResultProvider, lines: &[String]) -> DistortionResult<Vec<CamLine>> {
    let step_count = provider.step_names().len();
    lines
        .iter()
        .enumerate()
        .map(|(line, text)| {
            let labels = parse_label_list(text)?;
            let coords = provider.node_coordinates(&labels)?;
            let mut per_step = Vec::with_capacity(step_count);
            for step in 0..step_count {
                per_step.push(provider.node_displacements(step, &labels)?);
            }
            let nodes = labels
                .iter()
                .zip(coords)
                .enumerate()
                .map(|(i, (&label, coord))| CamNode {
                    label,
                    coord,
                    displacements: per_step.iter().map(|u| u[i]).collect(),
                })
                .collect();
            CamLine::new(line, nodes)
        })
        .collect()
}
