//! Report data types.

use gp_calc::{
    BoltForceTable, ElementFatigue, ElementGeometry, NodeRelative, NodeSummary,
    SectionForceTable, StressRatioWarning,
};
use gp_core::Label;
use gp_distortion::{CamDistortion, LayerDistortion};
use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: RunId,
    pub name: String,
    pub timestamp: String,
    pub engine_version: String,
    pub step_count: usize,
    pub element_count: usize,
    pub node_count: usize,
    /// `Failed` entries of the run log.
    #[serde(default)]
    pub failures: usize,
    /// `Warning` entries of the run log.
    #[serde(default)]
    pub warnings: usize,
}

/// Per-element facts the text report needs next to the results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementReport {
    pub element: Label,
    pub section: String,
    pub material: String,
    pub line_load_decimals: usize,
}

/// Everything one run produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub name: String,
    pub steps: Vec<String>,
    pub cycles: Vec<String>,
    pub criteria: Vec<String>,
    pub elements: Vec<ElementReport>,
    pub geometry: Vec<ElementGeometry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relative: Vec<NodeRelative>,
    pub fatigue: Vec<ElementFatigue>,
    pub summaries: Vec<NodeSummary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stress_warnings: Vec<StressRatioWarning>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bore: Vec<LayerDistortion>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cam: Vec<CamDistortion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_forces: Option<SectionForceTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bolt_forces: Option<BoltForceTable>,
}

impl RunReport {
    pub fn element(&self, label: Label) -> Option<&ElementReport> {
        self.elements.iter().find(|e| e.element == label)
    }
}
