//! Run configuration schema.
//!
//! One `RunConfig` describes a single post-processing run: the engine layout
//! (cylinders, firing steps), the material and section tables, which element
//! sets to process, and the optional bore/cam distortion requests.

use gp_core::Label;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    pub name: String,
    pub cylinder_count: usize,
    #[serde(default)]
    pub cylinders: Vec<CylinderDef>,
    #[serde(default)]
    pub bore_center_y: f64,
    /// 1-based step number of the initial (cold) bolt-up.
    pub initial_assembly_step: usize,
    /// 1-based step number of the hot assembly.
    pub hot_assembly_step: usize,
    /// 1-based step numbers of the firing conditions. Each is followed by
    /// `cylinder_count` steps covering the other cylinders' firing.
    pub fixed_steps: Vec<usize>,
    #[serde(default)]
    pub firing_names: Vec<String>,
    #[serde(default = "default_true")]
    pub relative_motion: bool,
    #[serde(default = "default_fatigue_criteria")]
    pub fatigue_criteria: Vec<String>,
    #[serde(default)]
    pub materials: Vec<MaterialDef>,
    #[serde(default)]
    pub sections: Vec<SectionDef>,
    /// Element sets of the result dataset to post-process.
    #[serde(default)]
    pub report_sets: Vec<String>,
    /// Subset of sets that get a fatigue evaluation. Empty means every processed element.
    #[serde(default)]
    pub fatigue_sets: Vec<String>,
    #[serde(default)]
    pub added_element_sets: Vec<LabelListSetDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bore: Option<BoreConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cam: Option<CamConfig>,
    #[serde(default)]
    pub bolt_nodes: Vec<Label>,
    #[serde(default)]
    pub limits: Limits,
}

impl RunConfig {
    /// 0-based indices of the fixed (firing) steps.
    pub fn fixed_step_indices(&self) -> Vec<usize> {
        self.fixed_steps
            .iter()
            .map(|s| s.saturating_sub(1))
            .collect()
    }

    pub fn initial_assembly_index(&self) -> usize {
        self.initial_assembly_step.saturating_sub(1)
    }

    pub fn hot_assembly_index(&self) -> usize {
        self.hot_assembly_step.saturating_sub(1)
    }

    /// Display name of the i-th firing cycle.
    pub fn cycle_name(&self, cycle: usize) -> String {
        self.firing_names
            .get(cycle)
            .cloned()
            .unwrap_or_else(|| format!("Cycle_{}", cycle + 1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CylinderDef {
    pub name: String,
    pub center_x: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_max: Option<f64>,
}

/// Element set assembled from a comma separated label list, e.g. `"9001, 9002"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabelListSetDef {
    pub name: String,
    pub labels: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    /// Thermal expansion table, `[coefficient, temperature]` rows.
    #[serde(default)]
    pub expansion: Vec<[f64; 2]>,
    pub behavior: MaterialBehaviorDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum MaterialBehaviorDef {
    Solid {
        /// `[youngs_modulus, poisson_ratio]` rows.
        #[serde(default)]
        elastic: Vec<[f64; 2]>,
        /// `[yield_stress, plastic_strain]` rows.
        #[serde(default)]
        plastic: Vec<[f64; 2]>,
    },
    Gasket {
        /// `[pressure, closure]` points of the loading curve.
        #[serde(default)]
        loading: Vec<[f64; 2]>,
        /// One `[pressure, closure]` curve per unloading branch.
        #[serde(default)]
        unloading: Vec<Vec<[f64; 2]>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        membrane_modulus: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transverse_modulus: Option<f64>,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum SectionKind {
    Solid,
    Gasket,
    Beam,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionDef {
    pub name: String,
    pub kind: SectionKind,
    pub material: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fatigue: Option<FatigueTableDef>,
}

/// Allowable cyclic-ratio table of a gasket material.
///
/// `values[load][ratio]` holds one allowable ratio per fatigue criterion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FatigueTableDef {
    pub loads: Vec<f64>,
    pub ratios: Vec<f64>,
    pub values: Vec<Vec<Vec<f64>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoreConfig {
    pub mode: BoreModeDef,
    /// Nominal bore radius (mm).
    pub radius: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<usize>,
    #[serde(default = "default_true")]
    pub unique_center: bool,
    /// 1-based steps to report. Empty reports every step.
    #[serde(default)]
    pub report_steps: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum BoreModeDef {
    Manual {
        #[serde(default)]
        node_labels: Vec<Label>,
    },
    Automatic {
        points: usize,
        layers: usize,
        z_start: f64,
        z_end: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        region: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CamConfig {
    /// One comma separated node label list per cam journal line.
    pub lines: Vec<String>,
    #[serde(default)]
    pub report_steps: Vec<usize>,
}

/// Tunable constants of the post-processor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Limits {
    pub fourier_order: usize,
    pub max_path_iteration: usize,
    pub radius_search_increment: f64,
    pub layer_spacing: f64,
    pub angle_step_deg: f64,
    pub interpolation_done: usize,
    pub start_angle_shift_deg: f64,
    pub gasket_decimals: usize,
    pub stress_differ_ratio: f64,
    /// Safety factor reported when a cycle has no unloading or its lookup fails.
    pub safe_factor: f64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            fourier_order: 12,
            max_path_iteration: 10,
            radius_search_increment: 0.01,
            layer_spacing: 0.1,
            angle_step_deg: 5.0,
            interpolation_done: 5,
            start_angle_shift_deg: 0.5,
            gasket_decimals: 3,
            stress_differ_ratio: 100.0,
            safe_factor: 3.0,
        }
    }
}

fn default_true() -> bool {
    true
}

pub fn default_fatigue_criteria() -> Vec<String> {
    ["GOODMAN", "GERBER", "AVERAGE", "DANGVON", "SWT"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
