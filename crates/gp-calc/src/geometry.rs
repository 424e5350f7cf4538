//! Element geometry: area, equivalent width, polar angle about the bore
//! center, cylinder assignment and per-step centroids.
//!
//! Quadrilaterals are split along the 0-2 diagonal into triangles (0,1,2) and
//! (0,2,3). Lengths are measured in the gasket (x, y) plane.

use crate::error::{CalcError, CalcResult};
use gp_core::{Label, acos_clamped, rad_to_deg};
use gp_input::{CylinderDef, RunConfig};
use gp_model::{Element, Model};
use serde::{Deserialize, Serialize};

/// Derived geometry of one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementGeometry {
    pub element: Label,
    pub area: f64,
    pub width: f64,
    /// Polar angle of the 0-2 midpoint about the cylinder's bore center, degrees in [0, 360).
    pub angle_deg: f64,
    /// Index into `RunConfig::cylinders`.
    pub cylinder: usize,
    /// Mean of the displaced node positions, one per step.
    pub centroids: Vec<[f64; 3]>,
}

fn planar_length(a: [f64; 3], b: [f64; 3]) -> f64 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt()
}

/// Heron's formula. Round-off on slivers can push the product negative; it is clamped to zero.
pub fn triangle_area(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> f64 {
    let ab = planar_length(a, b);
    let bc = planar_length(b, c);
    let ca = planar_length(c, a);
    let s = (ab + bc + ca) / 2.0;
    (s * (s - ab) * (s - bc) * (s - ca)).max(0.0).sqrt()
}

/// Area of a triangle (3 coords) or quadrilateral (4 coords).
pub fn element_area(coords: &[[f64; 3]]) -> f64 {
    let mut area = triangle_area(coords[0], coords[1], coords[2]);
    if coords.len() == 4 {
        area += triangle_area(coords[0], coords[2], coords[3]);
    }
    area
}

/// Width of the rectangle with the element's area and diagonal.
///
/// A triangle uses `2A / |0-2|`. A quadrilateral solves `w·h = A`,
/// `w² + h² = L²` with `L` the mean of both diagonals and keeps the smaller root.
pub fn element_width(element: Label, coords: &[[f64; 3]]) -> CalcResult<f64> {
    let area = element_area(coords);
    let d02 = planar_length(coords[0], coords[2]);
    if coords.len() == 4 {
        let d13 = planar_length(coords[1], coords[3]);
        let l = (d02 + d13) / 2.0;
        if l == 0.0 {
            return Err(CalcError::InvalidGeometry {
                element,
                what: "zero diagonal",
            });
        }
        let l2 = l * l;
        Ok(((l2 + 2.0 * area).sqrt() - (l2 - 2.0 * area).max(0.0).sqrt()) / 2.0)
    } else {
        if d02 == 0.0 {
            return Err(CalcError::InvalidGeometry {
                element,
                what: "zero diagonal",
            });
        }
        Ok(2.0 * area / d02)
    }
}

/// Midpoint of the 0-2 diagonal in the (x, y) plane.
pub fn diagonal_midpoint(coords: &[[f64; 3]]) -> [f64; 2] {
    [
        (coords[0][0] + coords[2][0]) / 2.0,
        (coords[0][1] + coords[2][1]) / 2.0,
    ]
}

/// Polar angle in degrees, [0, 360), of the 0-2 midpoint about `center`.
pub fn element_angle(element: Label, coords: &[[f64; 3]], center: [f64; 2]) -> CalcResult<f64> {
    let [x, y] = diagonal_midpoint(coords);
    let r = ((x - center[0]).powi(2) + (y - center[1]).powi(2)).sqrt();
    if r == 0.0 {
        return Err(CalcError::InvalidGeometry {
            element,
            what: "midpoint coincides with bore center",
        });
    }
    let theta = rad_to_deg(acos_clamped((x - center[0]) / r));
    if y >= center[1] {
        Ok(theta)
    } else {
        Ok(360.0 - theta)
    }
}

/// Cylinder whose `[x_min, x_max)` band holds `x`, else the one with the nearest center.
pub fn assign_cylinder(x: f64, cylinders: &[CylinderDef]) -> CalcResult<usize> {
    let banded = cylinders.iter().position(|c| match (c.x_min, c.x_max) {
        (Some(lo), Some(hi)) => x >= lo && x < hi,
        _ => false,
    });
    if let Some(i) = banded {
        return Ok(i);
    }
    cylinders
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (a.center_x - x).abs().total_cmp(&(b.center_x - x).abs()))
        .map(|(i, _)| i)
        .ok_or(CalcError::NoCylinder)
}

fn element_coords(model: &Model, element: &Element) -> Vec<[f64; 3]> {
    model.element_nodes(element).map(|n| n.coord).collect()
}

fn centroids(model: &Model, element: &Element) -> Vec<[f64; 3]> {
    let count = element.nodes.len() as f64;
    (0..model.step_count())
        .map(|step| {
            let mut c = [0.0; 3];
            for node in model.element_nodes(element) {
                for (ck, pk) in c.iter_mut().zip(node.position(step)) {
                    *ck += pk;
                }
            }
            c.map(|v| v / count)
        })
        .collect()
}

/// Geometry of every model element, indexed like `Model::elements`.
pub fn compute_geometry(model: &Model, config: &RunConfig) -> CalcResult<Vec<ElementGeometry>> {
    model
        .elements()
        .iter()
        .map(|element| {
            let coords = element_coords(model, element);
            let [mx, _] = diagonal_midpoint(&coords);
            let cylinder = assign_cylinder(mx, &config.cylinders)?;
            let center = [config.cylinders[cylinder].center_x, config.bore_center_y];
            Ok(ElementGeometry {
                element: element.label,
                area: element_area(&coords),
                width: element_width(element.label, &coords)?,
                angle_deg: element_angle(element.label, &coords, center)?,
                cylinder,
                centroids: centroids(model, element),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: [[f64; 3]; 4] = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
    ];

    #[test]
    fn unit_square_area_and_width() {
        assert!((element_area(&SQUARE) - 1.0).abs() < 1e-12);
        assert!((element_width(1, &SQUARE).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rectangle_width_is_short_side() {
        let rect = [
            [0.0, 0.0, 0.0],
            [4.0, 0.0, 0.0],
            [4.0, 0.5, 0.0],
            [0.0, 0.5, 0.0],
        ];
        assert!((element_area(&rect) - 2.0).abs() < 1e-12);
        assert!((element_width(1, &rect).unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn triangle_width_uses_diagonal() {
        let tri = [[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]];
        assert!((element_area(&tri) - 2.0).abs() < 1e-12);
        // |0-2| = 2
        assert!((element_width(1, &tri).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn angle_reflects_below_center() {
        let above = [[1.0, 1.0, 0.0], [0.0; 3], [1.0, 1.0, 0.0]];
        let below = [[1.0, -1.0, 0.0], [0.0; 3], [1.0, -1.0, 0.0]];
        let a = element_angle(1, &above, [0.0, 0.0]).unwrap();
        let b = element_angle(1, &below, [0.0, 0.0]).unwrap();
        assert!((a - 45.0).abs() < 1e-9);
        assert!((b - 315.0).abs() < 1e-9);
    }

    #[test]
    fn angle_at_center_is_invalid() {
        let err = element_angle(7, &SQUARE, [0.5, 0.5]).unwrap_err();
        assert!(matches!(err, CalcError::InvalidGeometry { element: 7, .. }));
    }

    #[test]
    fn degenerate_diagonal_is_invalid() {
        let collapsed = [[0.0; 3]; 3];
        assert!(element_width(3, &collapsed).is_err());
    }

    #[test]
    fn cylinder_by_band_then_nearest() {
        let cylinders = vec![
            CylinderDef {
                name: "C1".to_string(),
                center_x: 0.0,
                x_min: Some(-45.0),
                x_max: Some(45.0),
            },
            CylinderDef {
                name: "C2".to_string(),
                center_x: 90.0,
                x_min: None,
                x_max: None,
            },
        ];
        assert_eq!(assign_cylinder(44.0, &cylinders).unwrap(), 0);
        assert_eq!(assign_cylinder(-60.0, &cylinders).unwrap(), 0);
        assert_eq!(assign_cylinder(50.0, &cylinders).unwrap(), 1);
        assert_eq!(assign_cylinder(0.0, &[]).unwrap_err(), CalcError::NoCylinder);
    }
}
