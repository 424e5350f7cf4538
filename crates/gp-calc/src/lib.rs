//! gp-calc: gasket calculations over a built model.
//!
//! Provides:
//! - Element geometry (area, equivalent width, polar angle, cylinder assignment)
//! - Relative motion (RLM/FDP) per firing window
//! - Fatigue evaluation with bracket-clamped bilinear table interpolation
//! - Per-node final summaries
//! - The stress-ratio data-quality check
//! - Section force and bolt force tables
//!
//! # Example
//!
//! ```
//! use gp_calc::geometry::{element_area, element_width};
//!
//! let square = [
//!     [0.0, 0.0, 0.0],
//!     [1.0, 0.0, 0.0],
//!     [1.0, 1.0, 0.0],
//!     [0.0, 1.0, 0.0],
//! ];
//! assert!((element_area(&square) - 1.0).abs() < 1e-12);
//! assert!((element_width(1, &square).unwrap() - 1.0).abs() < 1e-12);
//! ```

pub mod error;
pub mod fatigue;
pub mod forces;
pub mod geometry;
pub mod interp;
pub mod relative;
pub mod stress_check;
pub mod summary;

pub use error::{CalcError, CalcResult, FatigueError, FatigueResult};
pub use fatigue::{
    CycleFatigue, CycleLoads, ElementFatigue, FatigueInterpolation, FatigueStatus, NodeFatigue,
    cycle_loads, evaluate_element, evaluate_fatigue, interpolate,
};
pub use forces::{
    BoltForceTable, COMBINED_FORCE_SET, FreeBodyBlock, MissingForce, SectionForceTable,
    bolt_force_table, parse_free_body_report, section_forces,
};
pub use geometry::{ElementGeometry, compute_geometry};
pub use relative::{
    NodeRelative, RelativeMotion, RelativeSummary, compute_relative, relative_motion,
};
pub use stress_check::{StressRatioWarning, check_stress_ratio};
pub use summary::{CycleSummary, NodeSummary, build_summaries};
