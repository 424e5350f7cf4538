//! Configuration and dataset validation logic.

use crate::dataset::ResultDataset;
use crate::schema::{BoreModeDef, FatigueTableDef, RunConfig, SectionKind};
use std::collections::{HashMap, HashSet};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Manual bore distortion requires a bore node set")]
    MissingBoreNodes,

    #[error("Step window of fixed step {step} ends at {end}, dataset has {available} steps")]
    StepWindowOutOfRange {
        step: usize,
        end: usize,
        available: usize,
    },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_config(config: &RunConfig) -> Result<(), ValidationError> {
    if config.cylinder_count == 0 {
        return Err(invalid("cylinder_count", 0, "at least one cylinder"));
    }
    if config.cylinders.len() != config.cylinder_count {
        return Err(invalid(
            "cylinders",
            config.cylinders.len(),
            "one entry per cylinder",
        ));
    }
    for cylinder in &config.cylinders {
        if let (Some(lo), Some(hi)) = (cylinder.x_min, cylinder.x_max) {
            if lo >= hi {
                return Err(invalid(
                    &format!("cylinders.{}.x_min", cylinder.name),
                    lo,
                    "x_min must be below x_max",
                ));
            }
        }
    }

    for (field, step) in [
        ("initial_assembly_step", config.initial_assembly_step),
        ("hot_assembly_step", config.hot_assembly_step),
    ] {
        if step == 0 {
            return Err(invalid(field, step, "steps are numbered from 1"));
        }
    }
    if config.fixed_steps.is_empty() {
        return Err(invalid("fixed_steps", "[]", "at least one firing step"));
    }
    if config.fixed_steps.iter().any(|&s| s == 0) {
        return Err(invalid("fixed_steps", 0, "steps are numbered from 1"));
    }
    if !config.firing_names.is_empty() && config.firing_names.len() != config.fixed_steps.len() {
        return Err(invalid(
            "firing_names",
            config.firing_names.len(),
            "one name per fixed step",
        ));
    }
    if config.fatigue_criteria.is_empty() {
        return Err(invalid("fatigue_criteria", "[]", "at least one criterion"));
    }

    let mut material_names = HashSet::new();
    for material in &config.materials {
        if !material_names.insert(material.name.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: material.name.clone(),
                context: "materials".to_string(),
            });
        }
    }

    let mut section_names = HashSet::new();
    let mut fatigue_by_material: HashMap<&str, &FatigueTableDef> = HashMap::new();
    for section in &config.sections {
        if !section_names.insert(section.name.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: section.name.clone(),
                context: "sections".to_string(),
            });
        }
        if !material_names.contains(section.material.as_str()) {
            return Err(ValidationError::MissingReference {
                id: section.material.clone(),
                context: format!("section {} material", section.name),
            });
        }
        if let Some(table) = &section.fatigue {
            if section.kind != SectionKind::Gasket {
                return Err(invalid(
                    &format!("sections.{}.fatigue", section.name),
                    format!("{:?}", section.kind),
                    "fatigue tables belong to gasket sections",
                ));
            }
            validate_fatigue_table(&section.name, table, config.fatigue_criteria.len())?;
            if let Some(previous) = fatigue_by_material.insert(section.material.as_str(), table) {
                if previous != table {
                    return Err(invalid(
                        &format!("sections.{}.fatigue", section.name),
                        &section.material,
                        "conflicting fatigue tables for one material",
                    ));
                }
            }
        }
    }

    let limits = &config.limits;
    if limits.angle_step_deg <= 0.0 || limits.angle_step_deg > 360.0 {
        return Err(invalid(
            "limits.angle_step_deg",
            limits.angle_step_deg,
            "must be in (0, 360]",
        ));
    }
    if limits.layer_spacing <= 0.0 {
        return Err(invalid(
            "limits.layer_spacing",
            limits.layer_spacing,
            "must be positive",
        ));
    }
    if limits.max_path_iteration == 0 {
        return Err(invalid("limits.max_path_iteration", 0, "must be positive"));
    }

    if let Some(bore) = &config.bore {
        if bore.radius <= 0.0 {
            return Err(invalid("bore.radius", bore.radius, "must be positive"));
        }
        if bore.order == Some(0) {
            return Err(invalid("bore.order", 0, "at least the first harmonic"));
        }
        match &bore.mode {
            BoreModeDef::Manual { node_labels } => {
                if node_labels.is_empty() {
                    return Err(ValidationError::MissingBoreNodes);
                }
            }
            BoreModeDef::Automatic { points, layers, .. } => {
                if *points < 3 {
                    return Err(invalid("bore.mode.points", points, "need at least 3 points"));
                }
                if *layers == 0 {
                    return Err(invalid("bore.mode.layers", 0, "need at least one layer"));
                }
            }
        }
    }

    Ok(())
}

fn validate_fatigue_table(
    section: &str,
    table: &FatigueTableDef,
    criteria: usize,
) -> Result<(), ValidationError> {
    let field = format!("sections.{section}.fatigue");
    if table.loads.is_empty() || table.ratios.is_empty() {
        return Err(invalid(&field, "[]", "loads and ratios must not be empty"));
    }
    if table.loads.windows(2).any(|w| w[0] > w[1]) {
        return Err(invalid(&field, "loads", "must be ascending"));
    }
    if table.ratios.windows(2).any(|w| w[0] > w[1]) {
        return Err(invalid(&field, "ratios", "must be ascending"));
    }
    if table.values.len() != table.loads.len() {
        return Err(invalid(&field, table.values.len(), "one row per load"));
    }
    for row in &table.values {
        if row.len() != table.ratios.len() {
            return Err(invalid(&field, row.len(), "one entry per ratio"));
        }
        if let Some(cell) = row.iter().find(|cell| cell.len() != criteria) {
            return Err(invalid(&field, cell.len(), "one value per fatigue criterion"));
        }
    }
    Ok(())
}

pub fn validate_dataset(dataset: &ResultDataset) -> Result<(), ValidationError> {
    let steps = dataset.step_count();
    if steps == 0 {
        return Err(invalid("steps", "[]", "at least one step"));
    }

    let mut node_labels = HashSet::new();
    for node in &dataset.nodes {
        if !node_labels.insert(node.label) {
            return Err(ValidationError::DuplicateId {
                id: node.label.to_string(),
                context: "nodes".to_string(),
            });
        }
        if node.displacements.len() != steps {
            return Err(invalid(
                &format!("nodes.{}.displacements", node.label),
                node.displacements.len(),
                "one entry per step",
            ));
        }
        if !node.relative.is_empty() && node.relative.len() != steps {
            return Err(invalid(
                &format!("nodes.{}.relative", node.label),
                node.relative.len(),
                "one entry per step",
            ));
        }
    }

    let mut element_labels = HashSet::new();
    for element in &dataset.elements {
        if !element_labels.insert(element.label) {
            return Err(ValidationError::DuplicateId {
                id: element.label.to_string(),
                context: "elements".to_string(),
            });
        }
        let n = element.connectivity.len();
        if n != 3 && n != 4 {
            return Err(invalid(
                &format!("elements.{}.connectivity", element.label),
                n,
                "triangles (3) or quadrilaterals (4) only",
            ));
        }
        for node in &element.connectivity {
            if !node_labels.contains(node) {
                return Err(ValidationError::MissingReference {
                    id: node.to_string(),
                    context: format!("element {} connectivity", element.label),
                });
            }
        }
        for sample in &element.samples {
            if !element.connectivity.contains(&sample.node) {
                return Err(ValidationError::MissingReference {
                    id: sample.node.to_string(),
                    context: format!("element {} samples", element.label),
                });
            }
            if sample.values.len() != steps {
                return Err(invalid(
                    &format!("elements.{}.samples.{}", element.label, sample.node),
                    sample.values.len(),
                    "one entry per step",
                ));
            }
        }
    }

    for bolt in &dataset.bolt_forces {
        if bolt.values.len() != steps {
            return Err(invalid(
                &format!("bolt_forces.{}", bolt.node),
                bolt.values.len(),
                "one entry per step",
            ));
        }
    }

    Ok(())
}

/// Cross-check the step numbers of a configuration against a dataset's step count.
pub fn validate_steps(config: &RunConfig, step_count: usize) -> Result<(), ValidationError> {
    for (field, step) in [
        ("initial_assembly_step", config.initial_assembly_step),
        ("hot_assembly_step", config.hot_assembly_step),
    ] {
        if step > step_count {
            return Err(invalid(field, step, "beyond the last step"));
        }
    }
    for &step in &config.fixed_steps {
        // window is the fixed step plus cylinder_count following steps
        let end = step + config.cylinder_count;
        if end > step_count {
            return Err(ValidationError::StepWindowOutOfRange {
                step,
                end,
                available: step_count,
            });
        }
    }
    let report_steps = config
        .bore
        .iter()
        .flat_map(|b| b.report_steps.iter())
        .chain(config.cam.iter().flat_map(|c| c.report_steps.iter()));
    for &step in report_steps {
        if step == 0 || step > step_count {
            return Err(invalid("report_steps", step, "no such step"));
        }
    }
    Ok(())
}
