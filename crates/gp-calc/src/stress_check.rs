//! Data-quality check on the spread of S11 across an element's nodes.

use gp_core::{Label, max_of, min_of};
use gp_model::Model;
use serde::{Deserialize, Serialize};

/// Magnitudes below this count as an unloaded node. The ratio divides by this
/// floor instead, so an unloaded node next to a loaded one reads as a very
/// large, finite spread.
const MIN_STRESS: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressRatioWarning {
    pub element: Label,
    pub step: usize,
    pub ratio: f64,
}

/// Ratio of the largest to the smallest |S11| of an element at one step.
/// `None` when no node carries load.
pub fn stress_ratio(values: &[f64]) -> Option<f64> {
    let magnitudes: Vec<f64> = values
        .iter()
        .filter(|v| v.is_finite())
        .map(|v| v.abs())
        .collect();
    let hi = max_of(magnitudes.iter().copied())?;
    let lo = min_of(magnitudes)?;
    if hi < MIN_STRESS {
        return None;
    }
    Some(hi / lo.max(MIN_STRESS))
}

/// Elements whose nodal stresses differ by more than `threshold` at any step.
pub fn check_stress_ratio(model: &Model, threshold: f64) -> Vec<StressRatioWarning> {
    let mut warnings = Vec::new();
    for element in model.elements() {
        for step in 0..model.step_count() {
            let values: Vec<f64> = (0..element.nodes.len())
                .filter_map(|local| element.samples(local).get(step).map(|s| s.s11))
                .collect();
            if let Some(ratio) = stress_ratio(&values) {
                if ratio > threshold {
                    warnings.push(StressRatioWarning {
                        element: element.label,
                        step,
                        ratio,
                    });
                }
            }
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_of_magnitudes() {
        assert_eq!(stress_ratio(&[-200.0, 1.0, 50.0]), Some(200.0));
        assert_eq!(stress_ratio(&[10.0, 10.0]), Some(1.0));
    }

    #[test]
    fn unloaded_node_beside_loaded_one_is_capped() {
        let ratio = stress_ratio(&[0.0, 50.0]).unwrap();
        assert!(ratio.is_finite());
        assert!((ratio - 50.0 / MIN_STRESS).abs() < 1e-3);
        assert!(ratio > 100.0);
    }

    #[test]
    fn unloaded_element_has_no_ratio() {
        assert_eq!(stress_ratio(&[0.0, -1e-9]), None);
        assert_eq!(stress_ratio(&[]), None);
    }
}
