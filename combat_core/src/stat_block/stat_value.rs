//! StatValue - The base/flat/percent triple behind ATK, HP and DEF

use serde::{Deserialize, Serialize};

/// A stat that follows the Base → Flat → Percent model
///
/// Final value is calculated as:
/// `(base + flat) × (1 + percent / 100)`
///
/// - `base`: Character base plus weapon base (ATK only)
/// - `flat`: Sum of all flat additions
/// - `percent`: Sum of all percent bonuses, on a 0-100 scale
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatValue {
    pub base: f64,
    pub flat: f64,
    pub percent: f64,
}

impl StatValue {
    /// Create a new StatValue with the given base
    pub fn with_base(base: f64) -> Self {
        StatValue {
            base,
            flat: 0.0,
            percent: 0.0,
        }
    }

    /// Calculate final value: (base + flat) × (1 + percent/100)
    pub fn compute(&self) -> f64 {
        self.total_flat() * self.percent_multiplier()
    }

    pub fn add_base(&mut self, value: f64) {
        self.base += value;
    }

    pub fn add_flat(&mut self, value: f64) {
        self.flat += value;
    }

    /// Add a percent bonus (0-100 scale, e.g. 46.6 for 46.6%)
    pub fn add_percent(&mut self, value: f64) {
        self.percent += value;
    }

    /// Get the total flat value (base + flat additions)
    pub fn total_flat(&self) -> f64 {
        self.base + self.flat
    }

    /// Get the percent multiplier (1 + percent/100)
    pub fn percent_multiplier(&self) -> f64 {
        1.0 + self.percent / 100.0
    }

    /// Back-solve the flat portion so that `compute()` equals `total`.
    /// The result is floored at 0.
    pub fn reconcile_flat(&mut self, total: f64) {
        let flat = if self.percent != 0.0 {
            total / self.percent_multiplier() - self.base
        } else {
            total - self.base
        };
        self.flat = flat.max(0.0);
    }
}
