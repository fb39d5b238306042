//! Antenna combining and signal-range math
//!
//! Combined power of a stack of antennas:
//!
//! ```text
//! strongest * (sum of powers / strongest)^e
//! ```
//!
//! where `e` is the power-weighted average combinability exponent. Signal
//! strength between two craft follows the smooth-step falloff
//! `s(x) = 3x^2 - 2x^3` over normalized distance `x`, with maximum range
//! `sqrt(power_1 * power_2)`.

use crate::{PlannerError, Result, SelectedPart};

/// Effective power of a set of quantity-bound antennas.
///
/// Errors on an empty selection or a zero-power part; both are caller
/// bugs, not user input problems.
pub fn combined_power(parts: &[SelectedPart]) -> Result<u64> {
    if parts.is_empty() {
        return Err(PlannerError::EmptySelection);
    }
    if let Some(dead) = parts.iter().find(|p| p.part.power == 0) {
        return Err(PlannerError::NonPositivePower(dead.part.full_name.clone()));
    }

    let strongest = parts.iter().map(|p| p.part.power).max().unwrap_or(0) as f64;
    let total_power: f64 = parts
        .iter()
        .map(|p| p.part.power as f64 * p.quantity as f64)
        .sum();
    let weighted_exponent: f64 = parts
        .iter()
        .map(|p| p.part.power as f64 * p.part.combinability_exponent * p.quantity as f64)
        .sum::<f64>()
        / total_power;

    Ok((strongest * (total_power / strongest).powf(weighted_exponent)).round() as u64)
}

/// Maximum distance in meters at which the link between two effective
/// powers still carries at least `min_strength` (a fraction in [0, 1]).
///
/// Strength 1.0 pins the craft together (distance 0); strength 0.0 allows
/// the full `sqrt(p1 * p2)` range.
pub fn min_signal_distance(power_1: u64, power_2: u64, min_strength: f64) -> u64 {
    let max_range = (power_1 as f64 * power_2 as f64).sqrt();
    let x = smooth_step_inverse(min_strength);
    (max_range * (1.0 - x)).round() as u64
}

/// Inverse of `s(x) = 3x^2 - 2x^3` on [0, 1], the branch where the curve
/// rises monotonically from 0 to 1. Bisection; 64 halvings push the
/// bracket below f64 resolution.
fn smooth_step_inverse(strength: f64) -> f64 {
    let (mut lo, mut hi) = (0.0f64, 1.0f64);
    for _ in 0..64 {
        let mid = 0.5 * (lo + hi);
        if mid * mid * (3.0 - 2.0 * mid) < strength {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}
