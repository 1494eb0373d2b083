//! Bond of Life state machine
//!
//! `Inactive → Active` on generation; healing is absorbed while active and
//! the state returns to `Inactive` once the value reaches 0. Values are
//! percentages of max HP and never negative.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BondPhase {
    Inactive,
    Active,
}

/// Result of healing a character carrying a Bond of Life
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealingOutcome {
    /// Healing consumed by the Bond
    pub absorbed: f64,
    /// Healing that reaches the character
    pub passthrough: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondOfLifeState {
    current_value: f64,
    max_value: f64,
    active: bool,
    source: String,
}

impl BondOfLifeState {
    /// An inactive Bond with the given cap
    pub fn new(max_value: f64) -> Self {
        BondOfLifeState {
            current_value: 0.0,
            max_value: sanitize(max_value),
            active: false,
            source: String::new(),
        }
    }

    /// Generation event: adds `value`, clamped to the cap
    pub fn generate(&mut self, value: f64, source: impl Into<String>) {
        let value = sanitize(value);
        if value <= 0.0 {
            return;
        }
        self.current_value = (self.current_value + value).min(self.max_value);
        self.source = source.into();
        self.sync_phase();
    }

    /// Apply healing while the Bond may be active
    pub fn apply_healing(&mut self, amount: f64) -> HealingOutcome {
        let amount = sanitize(amount);
        if !self.active {
            return HealingOutcome {
                absorbed: 0.0,
                passthrough: amount,
            };
        }
        let absorbed = amount.min(self.current_value);
        self.current_value = (self.current_value - absorbed).max(0.0);
        self.sync_phase();
        HealingOutcome {
            absorbed,
            passthrough: amount - absorbed,
        }
    }

    /// Clear the Bond completely (full-heal effects)
    pub fn clear(&mut self) -> HealingOutcome {
        self.apply_healing(self.current_value)
    }

    fn sync_phase(&mut self) {
        self.active = self.current_value > 0.0;
        if !self.active {
            self.current_value = 0.0;
        }
    }

    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn phase(&self) -> BondPhase {
        if self.active {
            BondPhase::Active
        } else {
            BondPhase::Inactive
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
