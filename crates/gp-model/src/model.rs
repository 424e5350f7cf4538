//! The run model: arenas of nodes and elements plus property tables.

use crate::element::Element;
use crate::error::{ModelError, ModelResult};
use crate::material::{Material, Section};
use crate::node::Node;
use gp_core::{ElementId, Label, NodeId};
use std::collections::{BTreeMap, HashMap};

/// Everything read for one run.
///
/// Nodes and elements live in vectors indexed by their `Id`s; labels map to ids
/// through the index maps. Once built, the model is only read.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub(crate) step_names: Vec<String>,
    pub(crate) nodes: Vec<Node>,
    pub(crate) elements: Vec<Element>,
    pub(crate) node_index: HashMap<Label, NodeId>,
    pub(crate) element_index: HashMap<Label, ElementId>,
    pub(crate) materials: HashMap<String, Material>,
    pub(crate) sections: HashMap<String, Section>,
    pub(crate) element_sets: BTreeMap<String, Vec<ElementId>>,
    pub(crate) fatigue_elements: Vec<ElementId>,
}

impl Model {
    pub fn step_names(&self) -> &[String] {
        &self.step_names
    }

    pub fn step_count(&self) -> usize {
        self.step_names.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.slot()]
    }

    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.slot()]
    }

    pub fn node_by_label(&self, label: Label) -> ModelResult<&Node> {
        self.node_index
            .get(&label)
            .map(|id| self.node(*id))
            .ok_or(ModelError::UnknownNode(label))
    }

    pub fn element_by_label(&self, label: Label) -> ModelResult<&Element> {
        self.element_index
            .get(&label)
            .map(|id| self.element(*id))
            .ok_or(ModelError::UnknownElement(label))
    }

    /// Nodes of an element, in connectivity order.
    pub fn element_nodes<'a>(&'a self, element: &'a Element) -> impl Iterator<Item = &'a Node> + 'a {
        element.nodes.iter().map(move |id| self.node(*id))
    }

    /// Material of an element.
    pub fn element_material(&self, element: &Element) -> Option<&Material> {
        self.materials.get(&element.material)
    }

    pub fn element_sets(&self) -> &BTreeMap<String, Vec<ElementId>> {
        &self.element_sets
    }

    /// Elements selected for the fatigue evaluation.
    pub fn fatigue_elements(&self) -> &[ElementId] {
        &self.fatigue_elements
    }
}
