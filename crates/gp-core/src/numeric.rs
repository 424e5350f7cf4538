/// Maximum of a sample series, `None` when empty.
pub fn max_of(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    values.into_iter().fold(None, |acc, v| match acc {
        Some(m) if m >= v => Some(m),
        _ => Some(v),
    })
}

/// Minimum of a sample series, `None` when empty.
pub fn min_of(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    values.into_iter().fold(None, |acc, v| match acc {
        Some(m) if m <= v => Some(m),
        _ => Some(v),
    })
}

/// `acos` with the argument clamped to [-1, 1] so round-off never yields NaN.
pub fn acos_clamped(v: f64) -> f64 {
    v.clamp(-1.0, 1.0).acos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extremes_of_series() {
        assert_eq!(max_of([1.0, -3.0, 2.5]), Some(2.5));
        assert_eq!(min_of([1.0, -3.0, 2.5]), Some(-3.0));
        assert_eq!(max_of(Vec::<f64>::new()), None);
    }

    #[test]
    fn acos_clamped_survives_roundoff() {
        assert_eq!(acos_clamped(1.0 + 1e-15), 0.0);
        assert!((acos_clamped(-1.0 - 1e-15) - std::f64::consts::PI).abs() < 1e-15);
    }
}
