//! Algebraic least-squares circle fit (Kåsa).
//!
//! Minimises `Σ (x² + y² + D·x + E·y + F)²` through its 3x3 normal equations.

use crate::error::{DistortionError, DistortionResult};
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: [f64; 2],
    pub radius: f64,
}

pub fn fit_circle(points: &[[f64; 2]]) -> DistortionResult<Circle> {
    let n = points.len();
    let singular = DistortionError::SingularFit { points: n };
    if n < 3 {
        return Err(singular);
    }

    let (mut sx, mut sy, mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0, 0.0, 0.0);
    let (mut sxz, mut syz, mut sz) = (0.0, 0.0, 0.0);
    for &[x, y] in points {
        let z = x * x + y * y;
        sx += x;
        sy += y;
        sxx += x * x;
        syy += y * y;
        sxy += x * y;
        sxz += x * z;
        syz += y * z;
        sz += z;
    }

    let a = Matrix3::new(sxx, sxy, sx, sxy, syy, sy, sx, sy, n as f64);
    let b = Vector3::new(-sxz, -syz, -sz);
    let solution = a.lu().solve(&b).ok_or(singular.clone())?;
    if solution.iter().any(|v| !v.is_finite()) {
        return Err(singular);
    }

    let cx = -solution[0] / 2.0;
    let cy = -solution[1] / 2.0;
    let r2 = cx * cx + cy * cy - solution[2];
    if r2 <= 0.0 {
        return Err(singular);
    }
    Ok(Circle {
        center: [cx, cy],
        radius: r2.sqrt(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_exact_circle() {
        let points: Vec<[f64; 2]> = (0..12)
            .map(|i| {
                let t = i as f64 * std::f64::consts::TAU / 12.0;
                [3.0 + 40.0 * t.cos(), -2.0 + 40.0 * t.sin()]
            })
            .collect();
        let c = fit_circle(&points).unwrap();
        assert!((c.center[0] - 3.0).abs() < 1e-9);
        assert!((c.center[1] + 2.0).abs() < 1e-9);
        assert!((c.radius - 40.0).abs() < 1e-9);
    }

    #[test]
    fn collinear_points_are_singular() {
        let points = [[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0]];
        assert!(matches!(
            fit_circle(&points),
            Err(DistortionError::SingularFit { points: 4 })
        ));
    }

    #[test]
    fn too_few_points() {
        assert!(fit_circle(&[[0.0, 1.0], [1.0, 0.0]]).is_err());
    }
}
