//! Reads one run's entities and step series from a `ResultProvider`.

use crate::element::{Element, StressSample};
use crate::error::{ModelError, ModelResult};
use crate::fatigue::FatigueData;
use crate::material::{Material, Section};
use crate::model::Model;
use crate::node::{Node, RelativeSample};
use crate::provider::ResultProvider;
use gp_core::{ElementId, Label, NodeId};
use gp_input::{RunConfig, parse_label_list};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{info, warn};

/// Name of the implicit set used when no element set of any kind is configured.
pub const ALL_ELEMENTS_SET: &str = "ALL";

/// A non-fatal problem met while reading the model. The run continues.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildIssue {
    pub context: String,
    pub message: String,
}

impl BuildIssue {
    fn new(context: impl Into<String>, message: impl Into<String>) -> Self {
        let issue = Self {
            context: context.into(),
            message: message.into(),
        };
        warn!(context = %issue.context, "{}", issue.message);
        issue
    }
}

pub struct ModelBuilder<'a> {
    config: &'a RunConfig,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(config: &'a RunConfig) -> Self {
        Self { config }
    }

    /// Build the model: resolve element sets, create elements and their unique
    /// nodes, then read coordinates and every step series.
    pub fn build(&self, provider: &dyn ResultProvider) -> ModelResult<(Model, Vec<BuildIssue>)> {
        let mut issues = Vec::new();
        let mut model = Model {
            step_names: provider.step_names(),
            ..Model::default()
        };

        self.load_properties(&mut model);

        let sets = self.resolve_sets(provider, &mut issues);
        let mut element_labels = Vec::new();
        let mut seen = HashSet::new();
        for (_, labels) in &sets {
            for &label in labels {
                if seen.insert(label) {
                    element_labels.push(label);
                }
            }
        }
        if element_labels.is_empty() {
            return Err(ModelError::NoElements);
        }

        self.create_entities(provider, &mut model, &element_labels)?;

        for (name, labels) in &sets {
            let ids = labels
                .iter()
                .filter_map(|l| model.element_index.get(l).copied())
                .collect();
            model.element_sets.insert(name.clone(), ids);
        }
        model.fatigue_elements = self.fatigue_selection(&model, &mut issues);

        info!(
            elements = model.elements.len(),
            nodes = model.nodes.len(),
            steps = model.step_count(),
            "model entities created"
        );

        self.read_series(provider, &mut model, &element_labels, &mut issues)?;
        Ok((model, issues))
    }

    fn load_properties(&self, model: &mut Model) {
        let mut materials: HashMap<String, Material> = self
            .config
            .materials
            .iter()
            .map(|def| (def.name.clone(), Material::from_def(def)))
            .collect();
        for def in &self.config.sections {
            if let (Some(table), Some(Material::Gasket(gasket))) =
                (&def.fatigue, materials.get_mut(&def.material))
            {
                gasket.fatigue = Some(FatigueData::from_def(table, &self.config.fatigue_criteria));
            }
            model.sections.insert(def.name.clone(), Section::from(def));
        }
        model.materials = materials;
    }

    fn resolve_sets(
        &self,
        provider: &dyn ResultProvider,
        issues: &mut Vec<BuildIssue>,
    ) -> Vec<(String, Vec<Label>)> {
        let mut sets = Vec::new();
        for name in &self.config.report_sets {
            match provider.element_set(name) {
                Some(labels) => sets.push((name.clone(), labels)),
                None => issues.push(BuildIssue::new(name.as_str(), "element set not found")),
            }
        }
        for name in &self.config.fatigue_sets {
            if self.config.report_sets.contains(name) {
                continue;
            }
            // an unknown fatigue set is reported by the fatigue selection
            if let Some(labels) = provider.element_set(name) {
                sets.push((name.clone(), labels));
            }
        }
        for added in &self.config.added_element_sets {
            match parse_label_list(&added.labels) {
                Ok(labels) => sets.push((added.name.clone(), labels)),
                Err(e) => issues.push(BuildIssue::new(added.name.as_str(), e.to_string())),
            }
        }
        if self.config.report_sets.is_empty()
            && self.config.fatigue_sets.is_empty()
            && self.config.added_element_sets.is_empty()
        {
            sets.push((ALL_ELEMENTS_SET.to_string(), provider.all_elements()));
        }
        sets
    }

    fn create_entities(
        &self,
        provider: &dyn ResultProvider,
        model: &mut Model,
        element_labels: &[Label],
    ) -> ModelResult<()> {
        let mut infos = Vec::with_capacity(element_labels.len());
        let mut node_labels = Vec::new();
        for &label in element_labels {
            let info = provider.element_info(label)?;
            let count = info.connectivity.len();
            if count != 3 && count != 4 {
                return Err(ModelError::InvalidConnectivity {
                    element: label,
                    count,
                });
            }
            for &node in &info.connectivity {
                if !model.node_index.contains_key(&node) {
                    let id = NodeId::from_index(node_labels.len() as u32);
                    model.node_index.insert(node, id);
                    node_labels.push(node);
                }
            }
            infos.push(info);
        }

        let coords = provider.node_coordinates(&node_labels)?;
        model.nodes = node_labels
            .iter()
            .zip(coords)
            .enumerate()
            .map(|(i, (&label, coord))| Node::new(NodeId::from_index(i as u32), label, coord))
            .collect();

        for (i, (&label, info)) in element_labels.iter().zip(infos).enumerate() {
            let section =
                model
                    .sections
                    .get(&info.section)
                    .ok_or_else(|| ModelError::UnknownSection {
                        element: label,
                        section: info.section.clone(),
                    })?;
            if !model.materials.contains_key(&section.material) {
                return Err(ModelError::UnknownMaterial {
                    section: section.name.clone(),
                    material: section.material.clone(),
                });
            }
            let material = section.material.clone();
            let nodes = info
                .connectivity
                .iter()
                .map(|l| model.node_index[l])
                .collect();
            let id = ElementId::from_index(i as u32);
            model.element_index.insert(label, id);
            model.elements.push(Element::new(
                id,
                label,
                nodes,
                info.connectivity,
                info.section,
                material,
            ));
        }
        Ok(())
    }

    fn fatigue_selection(&self, model: &Model, issues: &mut Vec<BuildIssue>) -> Vec<ElementId> {
        if self.config.fatigue_sets.is_empty() {
            return model.elements.iter().map(|e| e.id).collect();
        }
        let mut selected = BTreeMap::new();
        for name in &self.config.fatigue_sets {
            match model.element_sets.get(name) {
                Some(ids) => {
                    for &id in ids {
                        selected.insert(id.index(), id);
                    }
                }
                None => issues.push(BuildIssue::new(
                    name.as_str(),
                    "fatigue set is not a processed element set",
                )),
            }
        }
        selected.into_values().collect()
    }

    fn read_series(
        &self,
        provider: &dyn ResultProvider,
        model: &mut Model,
        element_labels: &[Label],
        issues: &mut Vec<BuildIssue>,
    ) -> ModelResult<()> {
        let node_labels: Vec<Label> = model.nodes.iter().map(|n| n.label).collect();
        let mut read_relative = self.config.relative_motion;

        for step in 0..model.step_count() {
            let step_name = model.step_names[step].clone();
            info!(step = %step_name, "reading step results");

            let displacements = provider.node_displacements(step, &node_labels)?;
            for (node, u) in model.nodes.iter_mut().zip(displacements) {
                node.push_displacement(u);
            }

            if read_relative {
                match provider.relative_motion(step, &node_labels)? {
                    Some(values) => {
                        for (node, v) in model.nodes.iter_mut().zip(values) {
                            if let Some(v) = v {
                                node.push_relative(RelativeSample::from(v));
                            }
                        }
                    }
                    None => {
                        issues.push(BuildIssue::new(
                            step_name.as_str(),
                            "no relative motion output, relative motion skipped",
                        ));
                        read_relative = false;
                    }
                }
            }

            let mut filled: Vec<Vec<Option<StressSample>>> = model
                .elements
                .iter()
                .map(|e| vec![None; e.nodes.len()])
                .collect();
            for sample in provider.element_nodal_samples(step, element_labels)? {
                let Some(id) = model.element_index.get(&sample.element) else {
                    continue;
                };
                let element = &model.elements[id.slot()];
                if let Some(local) = element.local_index(sample.node) {
                    filled[id.slot()][local] = Some(StressSample {
                        s11: sample.s11,
                        e11: sample.e11,
                    });
                }
            }
            for (element, samples) in model.elements.iter_mut().zip(filled) {
                for (local, sample) in samples.into_iter().enumerate() {
                    let sample = match sample {
                        Some(s) => s,
                        None => {
                            issues.push(BuildIssue::new(
                                format!("element {}", element.label),
                                format!(
                                    "no S11/E11 at node {} in step {step_name}",
                                    element.node_labels[local]
                                ),
                            ));
                            StressSample {
                                s11: f64::NAN,
                                e11: f64::NAN,
                            }
                        }
                    };
                    element.push_sample(local, sample);
                }
            }
        }
        Ok(())
    }
}
