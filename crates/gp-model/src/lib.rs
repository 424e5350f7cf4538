//! gp-model: arena data model for gasketpost.
//!
//! Provides:
//! - Nodes and elements stored in arenas, addressed by stable `Id`s
//! - Materials (solid or gasket) and sections, with per-material fatigue tables
//! - The `ResultProvider` collaborator seam and an in-memory provider
//! - `ModelBuilder`, which reads one run's entities and step series from a provider
//!
//! # Example
//!
//! ```
//! use gp_model::{Node, RelativeSample};
//!
//! let mut node = Node::new(gp_core::NodeId::from_index(0), 7, [1.0, 2.0, 0.0]);
//! node.push_displacement([0.5, 0.0, 0.0]);
//! assert_eq!(node.position(0), [1.5, 2.0, 0.0]);
//! assert_eq!(node.step_count(), 1);
//! let _ = RelativeSample::default();
//! ```

pub mod builder;
pub mod element;
pub mod error;
pub mod fatigue;
pub mod material;
pub mod memory;
pub mod model;
pub mod node;
pub mod provider;

// Re-exports for ergonomics
pub use builder::{BuildIssue, ModelBuilder};
pub use element::{Element, StressSample};
pub use error::{ModelError, ModelResult};
pub use fatigue::FatigueData;
pub use material::{GasketMaterial, Material, Section, SolidMaterial, ThermalData};
pub use memory::InMemoryProvider;
pub use model::Model;
pub use node::{Node, RelativeSample};
pub use provider::{ElementInfo, ElementNodalSample, ResultProvider};
