//! The result-provider seam.
//!
//! Whatever sits on top of the solver result database implements
//! `ResultProvider`. Every call blocks until the complete array for the request
//! is in memory; the engine never streams.

use crate::error::ModelResult;
use gp_core::Label;

/// Connectivity and section of an element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementInfo {
    pub connectivity: Vec<Label>,
    pub section: String,
}

/// One element-nodal stress/strain sample at one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementNodalSample {
    pub element: Label,
    pub node: Label,
    pub s11: f64,
    pub e11: f64,
}

pub trait ResultProvider {
    /// Names of the analysis steps, in order.
    fn step_names(&self) -> Vec<String>;

    /// Element labels of a named element set.
    fn element_set(&self, name: &str) -> Option<Vec<Label>>;

    /// Node labels of a named node set.
    fn node_set(&self, name: &str) -> Option<Vec<Label>>;

    /// Every element label the provider knows.
    fn all_elements(&self) -> Vec<Label>;

    fn element_info(&self, element: Label) -> ModelResult<ElementInfo>;

    /// Initial coordinates, one per requested label.
    fn node_coordinates(&self, nodes: &[Label]) -> ModelResult<Vec<[f64; 3]>>;

    /// Displacements `[u1, u2, u3]` at a step, one per requested label.
    fn node_displacements(&self, step: usize, nodes: &[Label]) -> ModelResult<Vec<[f64; 3]>>;

    /// Relative-motion quadruples `[cshear1, cshear2, cslip1, cslip2]` at a step.
    /// `None` when the result database carries no contact output at all; a
    /// `None` entry marks a node outside the contact.
    fn relative_motion(
        &self,
        step: usize,
        nodes: &[Label],
    ) -> ModelResult<Option<Vec<Option<[f64; 4]>>>>;

    /// S11/E11 at every node of the requested elements at a step.
    fn element_nodal_samples(
        &self,
        step: usize,
        elements: &[Label],
    ) -> ModelResult<Vec<ElementNodalSample>>;

    /// Displacement interpolated along a path of points at a step, restricted
    /// to a region when given. `None` marks a point the path could not reach.
    fn interpolate_displacements(
        &self,
        step: usize,
        region: Option<&str>,
        points: &[[f64; 3]],
    ) -> ModelResult<Vec<Option<[f64; 3]>>>;

    /// Bolt axial forces at a step, one per requested bolt node.
    fn bolt_forces(&self, step: usize, bolts: &[Label]) -> ModelResult<Vec<f64>>;

    /// Free-body cut report text, when the viewer produced one.
    fn free_body_report(&self) -> Option<String>;
}
