//! Extracted-result dataset.
//!
//! Plain arrays pulled out of a solver result database: one record per node and
//! element, every per-step series in step order.

use gp_core::Label;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResultDataset {
    /// Step names in analysis order.
    pub steps: Vec<String>,
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub elements: Vec<ElementRecord>,
    #[serde(default)]
    pub element_sets: Vec<NamedLabelSet>,
    #[serde(default)]
    pub node_sets: Vec<NamedLabelSet>,
    #[serde(default)]
    pub bolt_forces: Vec<BoltForceRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_body_report: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeRecord {
    pub label: Label,
    pub coord: [f64; 3],
    /// `[u1, u2, u3]` per step.
    #[serde(default)]
    pub displacements: Vec<[f64; 3]>,
    /// `[cshear1, cshear2, cslip1, cslip2]` per step, empty when not requested.
    #[serde(default)]
    pub relative: Vec<[f64; 4]>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementRecord {
    pub label: Label,
    pub connectivity: Vec<Label>,
    pub section: String,
    #[serde(default)]
    pub samples: Vec<NodalSampleRecord>,
}

/// `[S11, E11]` per step at one element node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodalSampleRecord {
    pub node: Label,
    pub values: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NamedLabelSet {
    pub name: String,
    pub labels: Vec<Label>,
}

/// Bolt axial force (TF1) history of one bolt node, one value per step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoltForceRecord {
    pub node: Label,
    pub values: Vec<f64>,
}

impl ResultDataset {
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn element_set(&self, name: &str) -> Option<&NamedLabelSet> {
        self.element_sets
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn node_set(&self, name: &str) -> Option<&NamedLabelSet> {
        self.node_sets
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }
}
