//! Gasket fatigue evaluation.
//!
//! For every element node and every firing cycle the S11 history over the
//! cycle window gives a fixed load, a firing load and a preload. The unload
//! ratio is compared with the allowable ratio read from the material's fatigue
//! table by bilinear interpolation over (fixed load, preload ratio).

use crate::error::{FatigueError, FatigueResult};
use crate::interp::{bracket, lerp_vec};
use gp_core::{Label, max_of, min_of};
use gp_input::RunConfig;
use gp_model::{Element, FatigueData, Model};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Loads of one node over one firing window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CycleLoads {
    pub fix_load: f64,
    pub firing_load: f64,
    pub preload: f64,
    pub preload_ratio: f64,
    pub unload_ratio: f64,
}

/// Derive the cycle loads from an S11 series.
///
/// The window is `start..=start + cylinder_count`; the preload also looks at
/// every step before `first_fixed`.
pub fn cycle_loads(
    s11: &[f64],
    start: usize,
    cylinder_count: usize,
    first_fixed: usize,
) -> FatigueResult<CycleLoads> {
    let window = s11
        .get(start..=start + cylinder_count)
        .ok_or(FatigueError::NoSamples)?;
    if window.iter().any(|v| !v.is_finite()) {
        return Err(FatigueError::NonFinite { what: "S11" });
    }
    let fix_load = max_of(window.iter().copied()).ok_or(FatigueError::NoSamples)?;
    let firing_load = min_of(window.iter().copied()).ok_or(FatigueError::NoSamples)?;

    let before = &s11[..first_fixed.min(s11.len())];
    let preload = match max_of(before.iter().copied()) {
        Some(p) if p.is_finite() => p.max(fix_load),
        Some(_) => return Err(FatigueError::NonFinite { what: "preload" }),
        None => fix_load,
    };
    let preload_ratio = if preload > 0.0 {
        (preload - fix_load) / preload
    } else {
        0.0
    };
    let unload_ratio = if fix_load > 0.0 {
        (fix_load - firing_load) / fix_load
    } else {
        0.0
    };
    Ok(CycleLoads {
        fix_load,
        firing_load,
        preload,
        preload_ratio,
        unload_ratio,
    })
}

/// The four interpolation stages, each a vector over the fatigue criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatigueInterpolation {
    /// Across load at the left ratio.
    pub left_ratio: Vec<f64>,
    /// Across load at the right ratio.
    pub right_ratio: Vec<f64>,
    /// Across ratio at the preload ratio: the allowable cyclic ratio.
    pub allowable: Vec<f64>,
    /// Across load at ratio 0: the allowable ratio without preload.
    pub no_preload: Vec<f64>,
}

fn cell(table: &FatigueData, load: usize, ratio: usize) -> FatigueResult<&[f64]> {
    let values = table
        .cell(load, ratio)
        .ok_or(FatigueError::MissingCell { load, ratio })?;
    if values.len() != table.criteria_count() {
        return Err(FatigueError::CriteriaMismatch {
            expected: table.criteria_count(),
            found: values.len(),
        });
    }
    Ok(values)
}

fn across_load(
    table: &FatigueData,
    fix_load: f64,
    (l0, l1): (usize, usize),
    ratio: usize,
) -> FatigueResult<Vec<f64>> {
    lerp_vec(
        fix_load,
        table.loads[l0],
        table.loads[l1],
        cell(table, l0, ratio)?,
        cell(table, l1, ratio)?,
    )
}

/// Bilinear lookup of the allowable ratios at `(fix_load, preload_ratio)`.
pub fn interpolate(
    table: &FatigueData,
    fix_load: f64,
    preload_ratio: f64,
) -> FatigueResult<FatigueInterpolation> {
    let loads = bracket(&table.loads, fix_load, "load")?;
    let (r0, r1) = bracket(&table.ratios, preload_ratio, "ratio")?;

    let left_ratio = across_load(table, fix_load, loads, r0)?;
    let right_ratio = across_load(table, fix_load, loads, r1)?;
    let allowable = lerp_vec(
        preload_ratio,
        table.ratios[r0],
        table.ratios[r1],
        &left_ratio,
        &right_ratio,
    )?;
    let (z, _) = bracket(&table.ratios, 0.0, "ratio")?;
    let no_preload = across_load(table, fix_load, loads, z)?;

    Ok(FatigueInterpolation {
        left_ratio,
        right_ratio,
        allowable,
        no_preload,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FatigueStatus {
    /// The material carries no fatigue table.
    Abandon,
    Succeed,
    /// At least one cycle fell back to the all-safe sentinel.
    Failed,
}

impl FatigueStatus {
    pub fn label(&self) -> &'static str {
        match self {
            FatigueStatus::Abandon => "Abandon",
            FatigueStatus::Succeed => "Succeed",
            FatigueStatus::Failed => "Failed",
        }
    }
}

/// Fatigue result of one node in one firing cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleFatigue {
    pub cycle: usize,
    pub loads: Option<CycleLoads>,
    pub interpolation: Option<FatigueInterpolation>,
    /// Allowable ratio over unload ratio, per criterion.
    pub safety: Vec<f64>,
    /// No-preload allowable minus allowable plus unload ratio, per criterion.
    pub adjust: Vec<f64>,
    pub failed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeFatigue {
    pub node: Label,
    pub status: FatigueStatus,
    pub cycles: Vec<CycleFatigue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementFatigue {
    pub element: Label,
    pub status: FatigueStatus,
    pub nodes: Vec<NodeFatigue>,
}

impl ElementFatigue {
    pub fn node(&self, label: Label) -> Option<&NodeFatigue> {
        self.nodes.iter().find(|n| n.node == label)
    }
}

fn evaluate_cycle(
    table: &FatigueData,
    s11: &[f64],
    start: usize,
    cycle: usize,
    config: &RunConfig,
    first_fixed: usize,
) -> FatigueResult<CycleFatigue> {
    let loads = cycle_loads(s11, start, config.cylinder_count, first_fixed)?;
    let interpolation = interpolate(table, loads.fix_load, loads.preload_ratio)?;
    let safety: Vec<f64> = if loads.unload_ratio > 0.0 {
        interpolation
            .allowable
            .iter()
            .map(|a| a / loads.unload_ratio)
            .collect()
    } else {
        vec![config.limits.safe_factor; table.criteria_count()]
    };
    let adjust: Vec<f64> = interpolation
        .no_preload
        .iter()
        .zip(&interpolation.allowable)
        .map(|(np, a)| np - a + loads.unload_ratio)
        .collect();
    if safety.iter().chain(&adjust).any(|v| !v.is_finite()) {
        return Err(FatigueError::NonFinite {
            what: "safety factor",
        });
    }
    Ok(CycleFatigue {
        cycle,
        loads: Some(loads),
        interpolation: Some(interpolation),
        safety,
        adjust,
        failed: false,
    })
}

/// Evaluate every node of an element over every firing cycle.
///
/// A failed lookup substitutes the all-safe sentinel for that cycle and marks
/// the node `Failed`; it never aborts.
pub fn evaluate_element(
    element: &Element,
    table: Option<&FatigueData>,
    config: &RunConfig,
) -> ElementFatigue {
    let fixed = config.fixed_step_indices();
    let first_fixed = fixed.iter().copied().min().unwrap_or(0);

    let nodes: Vec<NodeFatigue> = element
        .node_labels
        .iter()
        .enumerate()
        .map(|(local, &node)| {
            let Some(table) = table else {
                return NodeFatigue {
                    node,
                    status: FatigueStatus::Abandon,
                    cycles: Vec::new(),
                };
            };
            let s11 = element.s11_series(local);
            let mut status = FatigueStatus::Succeed;
            let cycles = fixed
                .iter()
                .enumerate()
                .map(|(cycle, &start)| {
                    match evaluate_cycle(table, &s11, start, cycle, config, first_fixed) {
                        Ok(result) => result,
                        Err(e) => {
                            warn!(
                                element = element.label,
                                node,
                                cycle = %config.cycle_name(cycle),
                                "fatigue interpolation failed: {e}"
                            );
                            status = FatigueStatus::Failed;
                            let n = table.criteria_count();
                            CycleFatigue {
                                cycle,
                                loads: cycle_loads(&s11, start, config.cylinder_count, first_fixed)
                                    .ok(),
                                interpolation: None,
                                safety: vec![config.limits.safe_factor; n],
                                adjust: vec![0.0; n],
                                failed: true,
                            }
                        }
                    }
                })
                .collect();
            NodeFatigue {
                node,
                status,
                cycles,
            }
        })
        .collect();

    let status = nodes
        .iter()
        .map(|n| n.status)
        .max()
        .unwrap_or(FatigueStatus::Abandon);
    ElementFatigue {
        element: element.label,
        status,
        nodes,
    }
}

/// Fatigue results of the model's fatigue elements.
pub fn evaluate_fatigue(model: &Model, config: &RunConfig) -> Vec<ElementFatigue> {
    let results: Vec<ElementFatigue> = model
        .fatigue_elements()
        .iter()
        .map(|&id| {
            let element = model.element(id);
            let table = model.element_material(element).and_then(|m| m.fatigue());
            evaluate_element(element, table, config)
        })
        .collect();
    debug!(
        elements = results.len(),
        failed = results
            .iter()
            .filter(|r| r.status == FatigueStatus::Failed)
            .count(),
        "fatigue evaluated"
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use gp_core::{ElementId, NodeId};
    use gp_input::{Limits, default_fatigue_criteria};

    fn table() -> FatigueData {
        FatigueData::new(
            vec!["A".to_string()],
            vec![100.0, 200.0],
            vec![0.0, 0.5],
            vec![vec![vec![1.0], vec![2.0]], vec![vec![3.0], vec![4.0]]],
        )
    }

    #[test]
    fn bilinear_midpoint() {
        let r = interpolate(&table(), 150.0, 0.25).unwrap();
        assert!((r.left_ratio[0] - 2.0).abs() < 1e-12);
        assert!((r.right_ratio[0] - 3.0).abs() < 1e-12);
        assert!((r.allowable[0] - 2.5).abs() < 1e-12);
        assert!((r.no_preload[0] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_queries_clamp() {
        let r = interpolate(&table(), 500.0, 0.9).unwrap();
        assert_eq!(r.allowable, vec![4.0]);
        let r = interpolate(&table(), 10.0, -0.2).unwrap();
        assert_eq!(r.allowable, vec![1.0]);
    }

    #[test]
    fn table_entries_are_reproduced() {
        let r = interpolate(&table(), 200.0, 0.0).unwrap();
        assert_eq!(r.allowable, vec![3.0]);
        let r = interpolate(&table(), 100.0, 0.5).unwrap();
        assert_eq!(r.allowable, vec![2.0]);
    }

    #[test]
    fn short_cell_is_reported() {
        let bad = FatigueData::new(
            vec!["A".to_string(), "B".to_string()],
            vec![100.0],
            vec![0.0],
            vec![vec![vec![1.0]]],
        );
        assert_eq!(
            interpolate(&bad, 100.0, 0.0).unwrap_err(),
            FatigueError::CriteriaMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn loads_over_window_and_preload() {
        // steps: assembly 120, hot 110, fire window 100, 80, 90
        let s11 = [120.0, 110.0, 100.0, 80.0, 90.0];
        let loads = cycle_loads(&s11, 2, 2, 2).unwrap();
        assert_eq!(loads.fix_load, 100.0);
        assert_eq!(loads.firing_load, 80.0);
        assert_eq!(loads.preload, 120.0);
        assert!((loads.preload_ratio - 20.0 / 120.0).abs() < 1e-12);
        assert!((loads.unload_ratio - 0.2).abs() < 1e-12);
    }

    #[test]
    fn open_joint_has_zero_ratios() {
        let s11 = [-5.0, -3.0, -1.0];
        let loads = cycle_loads(&s11, 1, 1, 1).unwrap();
        assert_eq!(loads.preload_ratio, 0.0);
        assert_eq!(loads.unload_ratio, 0.0);
    }

    #[test]
    fn window_past_the_end_is_an_error() {
        assert_eq!(
            cycle_loads(&[1.0, 2.0], 1, 1, 1).unwrap_err(),
            FatigueError::NoSamples
        );
    }

    #[test]
    fn status_ordering_puts_failed_last() {
        assert!(FatigueStatus::Failed > FatigueStatus::Succeed);
        assert!(FatigueStatus::Succeed > FatigueStatus::Abandon);
    }

    fn two_cycle_config() -> RunConfig {
        RunConfig {
            name: "fatigue".to_string(),
            cylinder_count: 1,
            cylinders: vec![],
            bore_center_y: 0.0,
            initial_assembly_step: 1,
            hot_assembly_step: 2,
            fixed_steps: vec![3, 5],
            firing_names: vec![],
            relative_motion: false,
            fatigue_criteria: default_fatigue_criteria(),
            materials: vec![],
            sections: vec![],
            report_sets: vec![],
            fatigue_sets: vec![],
            added_element_sets: vec![],
            bore: None,
            cam: None,
            bolt_nodes: vec![],
            limits: Limits::default(),
        }
    }

    fn element_with(series: &[[f64; 6]; 3]) -> Element {
        let mut e = Element::new(
            ElementId::from_index(0),
            7,
            (0..3).map(NodeId::from_index).collect(),
            vec![1, 2, 3],
            "GASKET_BEAD".to_string(),
            "BEAD".to_string(),
        );
        for (local, s11) in series.iter().enumerate() {
            for &v in s11 {
                e.push_sample(local, [v, 0.0].into());
            }
        }
        e
    }

    #[test]
    fn nan_in_one_window_fails_only_that_cycle() {
        let config = two_cycle_config();
        let table = table();
        let element = element_with(&[
            [120.0, 110.0, 100.0, 80.0, 90.0, f64::NAN],
            [100.0; 6],
            [100.0; 6],
        ]);
        let result = evaluate_element(&element, Some(&table), &config);

        assert_eq!(result.status, FatigueStatus::Failed);
        let node = result.node(1).unwrap();
        assert_eq!(node.status, FatigueStatus::Failed);

        let first = &node.cycles[0];
        assert!(!first.failed);
        // allowable 4/3 at (100, 1/6) over an unload ratio of 0.2
        assert!((first.safety[0] - 20.0 / 3.0).abs() < 1e-9);

        let second = &node.cycles[1];
        assert!(second.failed);
        assert_eq!(second.safety, vec![config.limits.safe_factor; 1]);
        assert_eq!(second.adjust, vec![0.0]);
        assert!(second.interpolation.is_none());
        assert!(second.loads.is_none());

        assert_eq!(result.node(2).unwrap().status, FatigueStatus::Succeed);
    }

    #[test]
    fn constant_load_is_trivially_safe() {
        let config = two_cycle_config();
        let table = table();
        let element = element_with(&[[150.0; 6], [150.0; 6], [150.0; 6]]);
        let result = evaluate_element(&element, Some(&table), &config);

        assert_eq!(result.status, FatigueStatus::Succeed);
        for node in &result.nodes {
            for cycle in &node.cycles {
                let loads = cycle.loads.unwrap();
                assert_eq!(loads.unload_ratio, 0.0);
                assert!(!cycle.failed);
                assert_eq!(cycle.safety, vec![3.0]);
            }
        }
    }

    #[test]
    fn missing_table_abandons_every_node() {
        let config = two_cycle_config();
        let element = element_with(&[[150.0; 6], [150.0; 6], [150.0; 6]]);
        let result = evaluate_element(&element, None, &config);
        assert_eq!(result.status, FatigueStatus::Abandon);
        assert!(result.nodes.iter().all(|n| n.cycles.is_empty()));
    }
}
