//! Per-node final summary: line loads, head lift, fatigue safety, thermal
//! motion and wear, one record per element node.

use crate::fatigue::ElementFatigue;
use crate::geometry::ElementGeometry;
use crate::relative::NodeRelative;
use gp_core::{Label, max_of, min_of, mm_to_um};
use gp_input::RunConfig;
use gp_model::Model;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleSummary {
    pub cycle: usize,
    pub name: String,
    pub line_load_max: f64,
    pub line_load_min: f64,
    pub line_load_range: f64,
    /// Range of E11 over the window, µm.
    pub head_lift_um: f64,
    /// Empty when the element has no fatigue evaluation.
    pub safety: Vec<f64>,
    /// Summed FDP of the window.
    pub wear: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSummary {
    pub element: Label,
    pub node: Label,
    /// S11 times element width at the initial assembly step.
    pub assembly_line_load: f64,
    /// S11 times element width at the hot assembly step.
    pub hot_line_load: f64,
    /// RLM between the initial and hot assembly steps.
    pub thermal_motion: Option<f64>,
    pub cycles: Vec<CycleSummary>,
    /// Largest cycle wear.
    pub wear: f64,
}

impl NodeSummary {
    /// Smallest safety factor over every cycle and criterion.
    pub fn min_safety(&self) -> Option<f64> {
        min_of(self.cycles.iter().flat_map(|c| c.safety.iter().copied()))
    }
}

fn finite(values: impl Iterator<Item = f64>) -> Vec<f64> {
    values.filter(|v| v.is_finite()).collect()
}

/// Build the summaries of every element node.
///
/// `geometry` is indexed like `Model::elements`, `relative` like `Model::nodes`.
pub fn build_summaries(
    model: &Model,
    geometry: &[ElementGeometry],
    relative: &[Option<NodeRelative>],
    fatigue: &[ElementFatigue],
    config: &RunConfig,
) -> Vec<NodeSummary> {
    let fatigue_by_element: HashMap<Label, &ElementFatigue> =
        fatigue.iter().map(|f| (f.element, f)).collect();
    let fixed = config.fixed_step_indices();
    let initial = config.initial_assembly_index();
    let hot = config.hot_assembly_index();

    let mut out = Vec::new();
    for (element, geom) in model.elements().iter().zip(geometry) {
        let element_fatigue = fatigue_by_element.get(&element.label);
        for (local, (&node_id, &node)) in element.nodes.iter().zip(&element.node_labels).enumerate() {
            let samples = element.samples(local);
            let line_load = |step: usize| {
                samples
                    .get(step)
                    .map(|s| s.s11 * geom.width)
                    .filter(|v| v.is_finite())
                    .unwrap_or(0.0)
            };
            let node_relative = relative.get(node_id.slot()).and_then(Option::as_ref);
            let node_fatigue = element_fatigue.and_then(|f| f.node(node));

            let cycles: Vec<CycleSummary> = fixed
                .iter()
                .enumerate()
                .map(|(cycle, &start)| {
                    let end = (start + config.cylinder_count + 1).min(samples.len());
                    let window = samples.get(start..end).unwrap_or(&[]);
                    let loads = finite(window.iter().map(|s| s.s11 * geom.width));
                    let strains = finite(window.iter().map(|s| s.e11));
                    let max = max_of(loads.iter().copied()).unwrap_or(0.0);
                    let min = min_of(loads.iter().copied()).unwrap_or(0.0);
                    let lift = match (max_of(strains.iter().copied()), min_of(strains)) {
                        (Some(hi), Some(lo)) => mm_to_um(hi - lo),
                        _ => 0.0,
                    };
                    CycleSummary {
                        cycle,
                        name: config.cycle_name(cycle),
                        line_load_max: max,
                        line_load_min: min,
                        line_load_range: max - min,
                        head_lift_um: lift,
                        safety: node_fatigue
                            .and_then(|f| f.cycles.get(cycle))
                            .map(|c| c.safety.clone())
                            .unwrap_or_default(),
                        wear: node_relative
                            .and_then(|r| r.cycles.get(cycle))
                            .map(|s| s.sum_fdp)
                            .unwrap_or(0.0),
                    }
                })
                .collect();

            let wear = max_of(cycles.iter().map(|c| c.wear)).unwrap_or(0.0);
            out.push(NodeSummary {
                element: element.label,
                node,
                assembly_line_load: line_load(initial),
                hot_line_load: line_load(hot),
                thermal_motion: node_relative.and_then(|r| r.thermal).map(|m| m.rlm),
                cycles,
                wear,
            });
        }
    }
    out
}
