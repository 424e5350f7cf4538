//! Gasket elements.

use gp_core::{ElementId, Label, NodeId};

/// Primary normal stress/strain pair sampled at an element node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StressSample {
    pub s11: f64,
    pub e11: f64,
}

impl From<[f64; 2]> for StressSample {
    fn from(v: [f64; 2]) -> Self {
        Self { s11: v[0], e11: v[1] }
    }
}

/// A gasket element.
///
/// Nodes are referenced by arena id: one node is shared by many elements.
/// `samples[k][step]` is the sample at the k-th connectivity node.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: ElementId,
    pub label: Label,
    pub nodes: Vec<NodeId>,
    pub node_labels: Vec<Label>,
    pub section: String,
    pub material: String,
    samples: Vec<Vec<StressSample>>,
}

impl Element {
    pub fn new(
        id: ElementId,
        label: Label,
        nodes: Vec<NodeId>,
        node_labels: Vec<Label>,
        section: String,
        material: String,
    ) -> Self {
        let samples = vec![Vec::new(); nodes.len()];
        Self {
            id,
            label,
            nodes,
            node_labels,
            section,
            material,
            samples,
        }
    }

    /// Position of a node label in the connectivity.
    pub fn local_index(&self, node: Label) -> Option<usize> {
        self.node_labels.iter().position(|&l| l == node)
    }

    pub fn push_sample(&mut self, local: usize, sample: StressSample) {
        if let Some(series) = self.samples.get_mut(local) {
            series.push(sample);
        }
    }

    /// Sample series at the k-th connectivity node.
    pub fn samples(&self, local: usize) -> &[StressSample] {
        self.samples.get(local).map(Vec::as_slice).unwrap_or(&[])
    }

    /// S11 series at the k-th connectivity node.
    pub fn s11_series(&self, local: usize) -> Vec<f64> {
        self.samples(local).iter().map(|s| s.s11).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_are_kept_per_node() {
        let mut e = Element::new(
            ElementId::from_index(0),
            100,
            vec![NodeId::from_index(0), NodeId::from_index(1), NodeId::from_index(2)],
            vec![1, 2, 3],
            "FB".to_string(),
            "STEEL".to_string(),
        );
        let k = e.local_index(2).unwrap();
        e.push_sample(k, [10.0, 0.1].into());
        e.push_sample(k, [12.0, 0.2].into());
        assert_eq!(e.s11_series(1), vec![10.0, 12.0]);
        assert!(e.samples(0).is_empty());
        assert!(e.samples(9).is_empty());
    }
}
