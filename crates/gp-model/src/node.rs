//! Mesh nodes and their per-step series.

use gp_core::{Label, NodeId};

/// One relative-motion sample: contact shear stresses and slips in the two
/// tangential directions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RelativeSample {
    pub cshear1: f64,
    pub cshear2: f64,
    pub cslip1: f64,
    pub cslip2: f64,
}

impl From<[f64; 4]> for RelativeSample {
    fn from(v: [f64; 4]) -> Self {
        Self {
            cshear1: v[0],
            cshear2: v[1],
            cslip1: v[2],
            cslip2: v[3],
        }
    }
}

/// A mesh node.
///
/// Created once per unique label met while enumerating element connectivity;
/// step series are appended in step order and never rewritten.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub label: Label,
    pub coord: [f64; 3],
    displacements: Vec<[f64; 3]>,
    relative: Vec<RelativeSample>,
}

impl Node {
    pub fn new(id: NodeId, label: Label, coord: [f64; 3]) -> Self {
        Self {
            id,
            label,
            coord,
            displacements: Vec::new(),
            relative: Vec::new(),
        }
    }

    pub fn push_displacement(&mut self, u: [f64; 3]) {
        self.displacements.push(u);
    }

    pub fn push_relative(&mut self, sample: RelativeSample) {
        self.relative.push(sample);
    }

    pub fn displacements(&self) -> &[[f64; 3]] {
        &self.displacements
    }

    pub fn displacement(&self, step: usize) -> Option<[f64; 3]> {
        self.displacements.get(step).copied()
    }

    pub fn relative(&self) -> &[RelativeSample] {
        &self.relative
    }

    pub fn has_relative(&self) -> bool {
        !self.relative.is_empty()
    }

    /// Number of steps read so far.
    pub fn step_count(&self) -> usize {
        self.displacements.len()
    }

    /// Deformed position at a step (initial coordinate plus displacement).
    /// Falls back to the initial coordinate for steps not read.
    pub fn position(&self, step: usize) -> [f64; 3] {
        let u = self.displacement(step).unwrap_or([0.0; 3]);
        [
            self.coord[0] + u[0],
            self.coord[1] + u[1],
            self.coord[2] + u[2],
        ]
    }
}
