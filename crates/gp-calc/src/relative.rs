//! Relative motion between two steps: resultant lateral motion (RLM, µm) and
//! the frictional dissipated-power proxy (FDP, MPa·µm).

use gp_core::{Label, mm_to_um};
use gp_input::RunConfig;
use gp_model::{Model, Node, RelativeSample};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativeMotion {
    pub rlm: f64,
    pub fdp: f64,
}

/// Combine the shear/slip samples of two steps.
pub fn relative_motion(a: &RelativeSample, b: &RelativeSample) -> RelativeMotion {
    let slip_dx = mm_to_um((a.cslip1 - b.cslip1).abs());
    let slip_dy = mm_to_um((a.cslip2 - b.cslip2).abs());
    let shear_x = (a.cshear1.abs() + b.cshear1.abs()) / 2.0;
    let shear_y = (a.cshear2.abs() + b.cshear2.abs()) / 2.0;
    RelativeMotion {
        rlm: (slip_dx * slip_dx + slip_dy * slip_dy).sqrt(),
        fdp: shear_x * slip_dx + shear_y * slip_dy,
    }
}

/// Summary over every step pair of one firing window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RelativeSummary {
    pub max_rlm: f64,
    pub max_fdp: f64,
    pub sum_rlm: f64,
    pub sum_fdp: f64,
}

impl RelativeSummary {
    pub fn as_array(&self) -> [f64; 4] {
        [self.max_rlm, self.max_fdp, self.sum_rlm, self.sum_fdp]
    }
}

/// All unordered step pairs of the window `start..=start + cylinder_count`.
/// `None` when the node has no samples for the whole window.
pub fn window_summary(
    samples: &[RelativeSample],
    start: usize,
    cylinder_count: usize,
) -> Option<RelativeSummary> {
    let window = samples.get(start..=start + cylinder_count)?;
    let mut summary = RelativeSummary::default();
    for (i, a) in window.iter().enumerate() {
        for b in &window[i + 1..] {
            let m = relative_motion(a, b);
            summary.max_rlm = summary.max_rlm.max(m.rlm);
            summary.max_fdp = summary.max_fdp.max(m.fdp);
            summary.sum_rlm += m.rlm;
            summary.sum_fdp += m.fdp;
        }
    }
    Some(summary)
}

/// Relative-motion results of one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRelative {
    pub node: Label,
    /// One summary per fixed step, in configuration order.
    pub cycles: Vec<RelativeSummary>,
    /// Motion between the initial and hot assembly steps.
    pub thermal: Option<RelativeMotion>,
}

pub fn node_relative(node: &Node, config: &RunConfig) -> Option<NodeRelative> {
    let samples = node.relative();
    if samples.is_empty() {
        return None;
    }
    let cycles = config
        .fixed_step_indices()
        .into_iter()
        .map(|start| window_summary(samples, start, config.cylinder_count).unwrap_or_default())
        .collect();
    let thermal = match (
        samples.get(config.initial_assembly_index()),
        samples.get(config.hot_assembly_index()),
    ) {
        (Some(a), Some(b)) => Some(relative_motion(a, b)),
        _ => None,
    };
    Some(NodeRelative {
        node: node.label,
        cycles,
        thermal,
    })
}

/// Relative motion of every node carrying samples, indexed like `Model::nodes`.
pub fn compute_relative(model: &Model, config: &RunConfig) -> Vec<Option<NodeRelative>> {
    model
        .nodes()
        .iter()
        .map(|n| node_relative(n, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(shear: [f64; 2], slip: [f64; 2]) -> RelativeSample {
        RelativeSample {
            cshear1: shear[0],
            cshear2: shear[1],
            cslip1: slip[0],
            cslip2: slip[1],
        }
    }

    #[test]
    fn slip_difference_in_micrometres() {
        let a = sample([2.0, 4.0], [0.003, 0.0]);
        let b = sample([-4.0, 0.0], [0.0, 0.004]);
        let m = relative_motion(&a, &b);
        assert!((m.rlm - 5.0).abs() < 1e-9);
        // 3·3 + 2·4
        assert!((m.fdp - 17.0).abs() < 1e-9);
    }

    #[test]
    fn window_covers_all_pairs() {
        let samples = vec![
            sample([0.0, 0.0], [0.0, 0.0]),
            sample([1.0, 1.0], [0.001, 0.0]),
            sample([1.0, 1.0], [0.002, 0.0]),
            sample([1.0, 1.0], [0.004, 0.0]),
        ];
        // window 1..=3: pairs (1,2)=1, (1,3)=3, (2,3)=2
        let s = window_summary(&samples, 1, 2).unwrap();
        assert!((s.max_rlm - 3.0).abs() < 1e-9);
        assert!((s.sum_rlm - 6.0).abs() < 1e-9);
        assert!(window_summary(&samples, 2, 2).is_none());
    }
}
