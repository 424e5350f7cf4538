//! Bracket search and linear interpolation over fatigue table axes.

use crate::error::{FatigueError, FatigueResult};

/// Indices `(i, j)` of the table entries around `x`.
///
/// Linear scan over an ascending axis. A value below the first entry clamps to
/// `(0, 0)`, one above the last to `(n-1, n-1)`; nothing is extrapolated.
pub fn bracket(values: &[f64], x: f64, what: &'static str) -> FatigueResult<(usize, usize)> {
    let n = values.len();
    if n == 0 {
        return Err(FatigueError::EmptyAxis { what });
    }
    if !x.is_finite() {
        return Err(FatigueError::NonFinite { what });
    }
    if x <= values[0] {
        return Ok((0, 0));
    }
    if x >= values[n - 1] {
        return Ok((n - 1, n - 1));
    }
    for (i, pair) in values.windows(2).enumerate() {
        if pair[0] <= x && x <= pair[1] {
            return Ok((i, i + 1));
        }
    }
    Ok((n - 1, n - 1))
}

/// `y0 + (x - x0)(y1 - y0)/(x1 - x0)`, or `y0` on a degenerate bracket.
pub fn lerp(x: f64, x0: f64, x1: f64, y0: f64, y1: f64) -> f64 {
    if x0 == x1 {
        return y0;
    }
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

/// Element-wise `lerp` of two equally long vectors.
pub fn lerp_vec(x: f64, x0: f64, x1: f64, y0: &[f64], y1: &[f64]) -> FatigueResult<Vec<f64>> {
    if y0.len() != y1.len() {
        return Err(FatigueError::CriteriaMismatch {
            expected: y0.len(),
            found: y1.len(),
        });
    }
    Ok(y0
        .iter()
        .zip(y1)
        .map(|(&a, &b)| lerp(x, x0, x1, a, b))
        .collect())
}
