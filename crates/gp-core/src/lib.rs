//! gp-core: stable foundation for gasketpost.
//!
//! Contains:
//! - units (uom-backed length/angle conversions used by the report scales)
//! - numeric (series extremes, clamped acos)
//! - ids (stable compact arena IDs for nodes and elements)

pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use ids::*;
pub use numeric::*;
pub use units::*;
