//! `ResultProvider` backed by an extracted-result dataset held in memory.

use crate::error::{ModelError, ModelResult};
use crate::provider::{ElementInfo, ElementNodalSample, ResultProvider};
use gp_core::Label;
use gp_input::{ElementRecord, NodeRecord, ResultDataset};
use std::collections::HashMap;

/// Default reach of the displacement interpolation around a path point (mm).
pub const DEFAULT_SEARCH_RADIUS: f64 = 2.0;

pub struct InMemoryProvider {
    dataset: ResultDataset,
    node_index: HashMap<Label, usize>,
    element_index: HashMap<Label, usize>,
    search_radius: f64,
}

impl InMemoryProvider {
    pub fn new(dataset: ResultDataset) -> Self {
        let node_index = dataset
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.label, i))
            .collect();
        let element_index = dataset
            .elements
            .iter()
            .enumerate()
            .map(|(i, e)| (e.label, i))
            .collect();
        Self {
            dataset,
            node_index,
            element_index,
            search_radius: DEFAULT_SEARCH_RADIUS,
        }
    }

    /// Set how far from a path point nodes still contribute to its interpolated value.
    pub fn with_search_radius(mut self, radius: f64) -> Self {
        self.search_radius = radius;
        self
    }

    pub fn dataset(&self) -> &ResultDataset {
        &self.dataset
    }

    fn node(&self, label: Label) -> ModelResult<&NodeRecord> {
        self.node_index
            .get(&label)
            .map(|&i| &self.dataset.nodes[i])
            .ok_or(ModelError::UnknownNode(label))
    }

    fn element(&self, label: Label) -> ModelResult<&ElementRecord> {
        self.element_index
            .get(&label)
            .map(|&i| &self.dataset.elements[i])
            .ok_or(ModelError::UnknownElement(label))
    }

    fn check_step(&self, step: usize) -> ModelResult<()> {
        let count = self.dataset.step_count();
        if step >= count {
            return Err(ModelError::StepOutOfRange { step, count });
        }
        Ok(())
    }

    /// Inverse-distance weighted displacement of the region nodes around a point.
    fn interpolate_at(
        &self,
        step: usize,
        candidates: &[&NodeRecord],
        point: [f64; 3],
    ) -> Option<[f64; 3]> {
        let mut weight_sum = 0.0;
        let mut acc = [0.0; 3];
        for node in candidates {
            let d = ((node.coord[0] - point[0]).powi(2)
                + (node.coord[1] - point[1]).powi(2)
                + (node.coord[2] - point[2]).powi(2))
            .sqrt();
            if d > self.search_radius {
                continue;
            }
            let u = node.displacements.get(step)?;
            if d < 1e-12 {
                return Some(*u);
            }
            let w = 1.0 / d;
            weight_sum += w;
            for (a, v) in acc.iter_mut().zip(u) {
                *a += w * v;
            }
        }
        if weight_sum == 0.0 {
            return None;
        }
        Some([acc[0] / weight_sum, acc[1] / weight_sum, acc[2] / weight_sum])
    }
}

impl ResultProvider for InMemoryProvider {
    fn step_names(&self) -> Vec<String> {
        self.dataset.steps.clone()
    }

    fn element_set(&self, name: &str) -> Option<Vec<Label>> {
        self.dataset.element_set(name).map(|s| s.labels.clone())
    }

    fn node_set(&self, name: &str) -> Option<Vec<Label>> {
        self.dataset.node_set(name).map(|s| s.labels.clone())
    }

    fn all_elements(&self) -> Vec<Label> {
        self.dataset.elements.iter().map(|e| e.label).collect()
    }

    fn element_info(&self, element: Label) -> ModelResult<ElementInfo> {
        let record = self.element(element)?;
        Ok(ElementInfo {
            connectivity: record.connectivity.clone(),
            section: record.section.clone(),
        })
    }

    fn node_coordinates(&self, nodes: &[Label]) -> ModelResult<Vec<[f64; 3]>> {
        nodes.iter().map(|&l| self.node(l).map(|n| n.coord)).collect()
    }

    fn node_displacements(&self, step: usize, nodes: &[Label]) -> ModelResult<Vec<[f64; 3]>> {
        self.check_step(step)?;
        nodes
            .iter()
            .map(|&label| {
                self.node(label)?
                    .displacements
                    .get(step)
                    .copied()
                    .ok_or(ModelError::MissingSample {
                        what: "displacement",
                        label,
                        step,
                    })
            })
            .collect()
    }

    fn relative_motion(
        &self,
        step: usize,
        nodes: &[Label],
    ) -> ModelResult<Option<Vec<Option<[f64; 4]>>>> {
        self.check_step(step)?;
        let records = nodes
            .iter()
            .map(|&l| self.node(l))
            .collect::<ModelResult<Vec<_>>>()?;
        if records.iter().all(|n| n.relative.is_empty()) {
            return Ok(None);
        }
        records
            .iter()
            .map(|n| {
                if n.relative.is_empty() {
                    return Ok(None);
                }
                n.relative
                    .get(step)
                    .copied()
                    .map(Some)
                    .ok_or(ModelError::MissingSample {
                        what: "relative motion",
                        label: n.label,
                        step,
                    })
            })
            .collect::<ModelResult<Vec<_>>>()
            .map(Some)
    }

    fn element_nodal_samples(
        &self,
        step: usize,
        elements: &[Label],
    ) -> ModelResult<Vec<ElementNodalSample>> {
        self.check_step(step)?;
        let mut out = Vec::new();
        for &label in elements {
            let record = self.element(label)?;
            for sample in &record.samples {
                let v = sample.values.get(step).ok_or(ModelError::MissingSample {
                    what: "stress",
                    label,
                    step,
                })?;
                out.push(ElementNodalSample {
                    element: label,
                    node: sample.node,
                    s11: v[0],
                    e11: v[1],
                });
            }
        }
        Ok(out)
    }

    fn interpolate_displacements(
        &self,
        step: usize,
        region: Option<&str>,
        points: &[[f64; 3]],
    ) -> ModelResult<Vec<Option<[f64; 3]>>> {
        self.check_step(step)?;
        let candidates: Vec<&NodeRecord> = match region {
            Some(name) => {
                let set = self
                    .dataset
                    .node_set(name)
                    .ok_or_else(|| ModelError::Provider(format!("unknown node set {name}")))?;
                set.labels
                    .iter()
                    .map(|&l| self.node(l))
                    .collect::<ModelResult<Vec<_>>>()?
            }
            None => self.dataset.nodes.iter().collect(),
        };
        Ok(points
            .iter()
            .map(|&p| self.interpolate_at(step, &candidates, p))
            .collect())
    }

    fn bolt_forces(&self, step: usize, bolts: &[Label]) -> ModelResult<Vec<f64>> {
        self.check_step(step)?;
        bolts
            .iter()
            .map(|&label| {
                self.dataset
                    .bolt_forces
                    .iter()
                    .find(|b| b.node == label)
                    .and_then(|b| b.values.get(step).copied())
                    .ok_or(ModelError::MissingSample {
                        what: "bolt force",
                        label,
                        step,
                    })
            })
            .collect()
    }

    fn free_body_report(&self) -> Option<String> {
        self.dataset.free_body_report.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> ResultDataset {
        ResultDataset {
            steps: vec!["S1".to_string(), "S2".to_string()],
            nodes: vec![
                NodeRecord {
                    label: 1,
                    coord: [0.0, 0.0, 0.0],
                    displacements: vec![[0.0; 3], [1.0, 0.0, 0.0]],
                    relative: vec![],
                },
                NodeRecord {
                    label: 2,
                    coord: [1.0, 0.0, 0.0],
                    displacements: vec![[0.0; 3], [3.0, 0.0, 0.0]],
                    relative: vec![],
                },
            ],
            ..ResultDataset::default()
        }
    }

    #[test]
    fn interpolation_weights_by_inverse_distance() {
        let p = InMemoryProvider::new(dataset());
        let u = p
            .interpolate_displacements(1, None, &[[0.5, 0.0, 0.0], [0.0, 0.0, 0.0], [9.0, 9.0, 0.0]])
            .unwrap();
        assert!((u[0].unwrap()[0] - 2.0).abs() < 1e-12);
        assert_eq!(u[1], Some([1.0, 0.0, 0.0]));
        assert_eq!(u[2], None);
    }

    #[test]
    fn relative_motion_absent_when_not_requested() {
        let p = InMemoryProvider::new(dataset());
        assert_eq!(p.relative_motion(0, &[1, 2]).unwrap(), None);
    }

    #[test]
    fn relative_motion_skips_nodes_outside_contact() {
        let mut data = dataset();
        data.nodes[0].relative = vec![[1.0, 2.0, 0.1, 0.2], [0.0; 4]];
        let p = InMemoryProvider::new(data);
        assert_eq!(
            p.relative_motion(0, &[1, 2]).unwrap(),
            Some(vec![Some([1.0, 2.0, 0.1, 0.2]), None])
        );
    }

    #[test]
    fn step_bounds_are_checked() {
        let p = InMemoryProvider::new(dataset());
        assert_eq!(
            p.node_displacements(2, &[1]).unwrap_err(),
            ModelError::StepOutOfRange { step: 2, count: 2 }
        );
    }
}
