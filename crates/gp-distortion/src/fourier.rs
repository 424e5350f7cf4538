//! Fourier decomposition of radial deviation against polar angle, and the
//! resampled distortion profile.
//!
//! Coefficients are diametral micrometres (`2000 · amplitude_mm`), phases radians.

use gp_core::{acos_clamped, deg_to_rad, radial_mm_to_diametral_um};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// One node seen from the fitted center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarSample {
    /// Radians in [0, 2π).
    pub theta: f64,
    /// Distance to the center minus the reference radius, mm.
    pub delta_r: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Harmonic {
    pub order: usize,
    pub coefficient: f64,
    pub phase: f64,
}

/// Polar angle of `p` about `center`, reflected into [0, 2π) below the center.
pub fn polar_angle(p: [f64; 2], center: [f64; 2]) -> f64 {
    let dx = p[0] - center[0];
    let dy = p[1] - center[1];
    let r = (dx * dx + dy * dy).sqrt();
    if r == 0.0 {
        return 0.0;
    }
    let theta = acos_clamped(dx / r);
    if dy < 0.0 { TAU - theta } else { theta }
}

/// Polar samples of `points` about `center`, sorted by angle.
pub fn polar_samples(points: &[[f64; 2]], center: [f64; 2], radius: f64) -> Vec<PolarSample> {
    let mut samples: Vec<PolarSample> = points
        .iter()
        .map(|&p| {
            let length = ((p[0] - center[0]).powi(2) + (p[1] - center[1]).powi(2)).sqrt();
            PolarSample {
                theta: polar_angle(p, center),
                delta_r: length - radius,
            }
        })
        .collect();
    samples.sort_by(|a, b| a.theta.total_cmp(&b.theta));
    samples
}

/// Harmonics 0..=order. Order 0 carries the mean deviation with phase 0.
pub fn decompose(samples: &[PolarSample], order: usize) -> Vec<Harmonic> {
    let n = samples.len();
    if n == 0 {
        return Vec::new();
    }
    let mean = samples.iter().map(|s| s.delta_r).sum::<f64>() / n as f64;
    let mut harmonics = Vec::with_capacity(order + 1);
    harmonics.push(Harmonic {
        order: 0,
        coefficient: radial_mm_to_diametral_um(mean),
        phase: 0.0,
    });
    for j in 1..=order {
        let jf = j as f64;
        let (mut a, mut b) = (0.0, 0.0);
        for s in samples {
            a += s.delta_r * (jf * s.theta).cos();
            b += s.delta_r * (jf * s.theta).sin();
        }
        a *= 2.0 / n as f64;
        b *= 2.0 / n as f64;
        let coefficient = radial_mm_to_diametral_um((a * a + b * b).sqrt());
        let phase = if coefficient == 0.0 {
            0.0
        } else {
            let phi = acos_clamped(radial_mm_to_diametral_um(a) / coefficient);
            if b < 0.0 { TAU - phi } else { phi }
        };
        harmonics.push(Harmonic {
            order: j,
            coefficient,
            phase,
        });
    }
    harmonics
}

/// Radial deviation (mm) rebuilt from the harmonics at `angle` radians.
pub fn reconstruct(harmonics: &[Harmonic], angle: f64) -> f64 {
    harmonics
        .iter()
        .map(|h| h.coefficient * (h.order as f64 * angle - h.phase).cos())
        .sum::<f64>()
        / radial_mm_to_diametral_um(1.0)
}

/// `[angle_deg, delta_r_mm]` from 0 to 360 degrees inclusive at `step_deg`.
pub fn resample(harmonics: &[Harmonic], step_deg: f64) -> Vec<[f64; 2]> {
    let count = (360.0 / step_deg).round() as usize;
    (0..=count)
        .map(|i| {
            let angle = (i as f64 * step_deg).min(360.0);
            [angle, reconstruct(harmonics, deg_to_rad(angle))]
        })
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn synthetic_signal_round_trips(
            amps in prop::collection::vec(-0.05..0.05_f64, 4),
            phases in prop::collection::vec(0.0..TAU, 4),
        ) {
            let f = |t: f64| {
                amps.iter()
                    .zip(&phases)
                    .enumerate()
                    .map(|(k, (a, p))| a * ((k + 1) as f64 * t - p).cos())
                    .sum::<f64>()
            };
            let samples: Vec<PolarSample> = (0..36)
                .map(|i| {
                    let theta = i as f64 * TAU / 36.0;
                    PolarSample { theta, delta_r: f(theta) }
                })
                .collect();
            let h = decompose(&samples, 12);
            for s in &samples {
                prop_assert!((reconstruct(&h, s.theta) - s.delta_r).abs() < 1e-9);
            }
        }
    }
}
