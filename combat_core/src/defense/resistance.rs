//! Resistance - Three-branch elemental damage mitigation
//!
//! Formula, with `res = base_res − res_reduction`:
//! - `res < 0`: multiplier = 1 − res / 200 (negative resistance is halved)
//! - `0 ≤ res < 75`: multiplier = 1 − res / 100
//! - `res ≥ 75`: multiplier = 1 / (4 × res / 100 + 1)
//!
//! The curve is continuous at both thresholds: 1.0 at 0 and 0.25 at 75.

use crate::config::ResistanceConstants;

/// Damage multiplier for an effective resistance (percent)
pub fn resistance_multiplier(effective_res: f64, constants: &ResistanceConstants) -> f64 {
    let res = if effective_res.is_finite() {
        effective_res
    } else {
        0.0
    };

    if res < constants.lower_threshold {
        1.0 - res / constants.negative_divisor
    } else if res < constants.upper_threshold {
        1.0 - res / constants.linear_divisor
    } else {
        1.0 / (constants.high_factor * res / 100.0 + 1.0)
    }
}

/// Effective resistance after reduction
pub fn effective_resistance(base_res: f64, res_reduction: f64) -> f64 {
    base_res - res_reduction
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn constants() -> ResistanceConstants {
        ResistanceConstants::default()
    }

    #[test]
    fn test_branch_values() {
        let c = constants();
        assert!((resistance_multiplier(0.0, &c) - 1.0).abs() < f64::EPSILON);
        assert!((resistance_multiplier(10.0, &c) - 0.9).abs() < 1e-12);
        assert!((resistance_multiplier(75.0, &c) - 0.25).abs() < f64::EPSILON);
        // -20% resistance is halved: 1.1
        assert!((resistance_multiplier(-20.0, &c) - 1.1).abs() < 1e-12);
        // 100% resistance: 1 / 5
        assert!((resistance_multiplier(100.0, &c) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_continuous_at_thresholds() {
        let c = constants();
        let eps = 1e-9;
        let below_upper = resistance_multiplier(75.0 - eps, &c);
        assert!((below_upper - 0.25).abs() < 1e-6);
        let below_zero = resistance_multiplier(-eps, &c);
        assert!((below_zero - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_reduction_into_negative() {
        let c = constants();
        let res = effective_resistance(10.0, 40.0);
        assert!((res + 30.0).abs() < f64::EPSILON);
        assert!((resistance_multiplier(res, &c) - 1.15).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_resistance_is_neutral() {
        assert!((resistance_multiplier(f64::NAN, &constants()) - 1.0).abs() < f64::EPSILON);
    }

    proptest! {
        #[test]
        fn prop_monotonic_decreasing(a in -300.0f64..500.0, b in -300.0f64..500.0) {
            let c = constants();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(resistance_multiplier(lo, &c) >= resistance_multiplier(hi, &c));
        }

        #[test]
        fn prop_always_positive(res in -300.0f64..1000.0) {
            prop_assert!(resistance_multiplier(res, &constants()) > 0.0);
        }
    }
}
