//! BondOfLifeEngine - Bond state → stat deltas, plus healing simulation

use crate::bond::{BondOfLifeState, BondPhase, BondRule};
use crate::config::{CharacterEntry, EngineConstants};
use crate::source::{ModifierKind, ModifierSource};
use crate::stat_block::{CharacterStats, StatKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Bond of Life outcome for one character in one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondAnalysis {
    pub character: String,
    /// The character declares a Bond conversion rule
    pub has_bond: bool,
    pub phase: BondPhase,
    pub state: BondOfLifeState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<BondRule>,
    pub deltas: BTreeMap<StatKind, f64>,
    pub healing_blocked: bool,
}

impl BondAnalysis {
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn to_modifier_source(&self) -> ModifierSource {
        ModifierSource::from_map("bond_of_life", ModifierKind::BondOfLife, &self.deltas)
    }
}

/// Bond state for a character at a given Bond value. Characters without a
/// declared rule stay inactive whatever the value.
pub fn bond_state_for(
    entry: &CharacterEntry,
    value: f64,
    constants: &EngineConstants,
) -> BondOfLifeState {
    match &entry.bond {
        Some(profile) => {
            let mut state = BondOfLifeState::new(profile.max_value);
            state.generate(value, "elemental_skill");
            state
        }
        None => BondOfLifeState::new(constants.bond.default_max),
    }
}

/// Evaluate the Bond of Life at the configured assumed value
pub fn evaluate_bond(
    entry: &CharacterEntry,
    stats: &CharacterStats,
    constants: &EngineConstants,
) -> BondAnalysis {
    let state = bond_state_for(entry, constants.bond.assumed_value, constants);
    analyze_bond(entry, stats, state)
}

/// Derive the stat bonus of an explicit Bond state
pub fn analyze_bond(
    entry: &CharacterEntry,
    stats: &CharacterStats,
    state: BondOfLifeState,
) -> BondAnalysis {
    let rule = entry.bond.as_ref().map(|p| p.rule);
    let deltas = rule
        .map(|r| r.deltas(&state, stats.total_hp()))
        .unwrap_or_default();
    if state.is_active() {
        debug!(
            character = %stats.name,
            bond = state.current_value(),
            deltas = deltas.len(),
            "bond of life active"
        );
    }
    BondAnalysis {
        character: stats.name.clone(),
        has_bond: rule.is_some(),
        phase: state.phase(),
        healing_blocked: state.is_active(),
        state,
        rule,
        deltas,
    }
}

/// One healing event of a simulation, amounts in HP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealingEvent {
    pub healing_attempted: f64,
    pub healing_received: f64,
    pub healing_blocked: f64,
    /// Bond value before and after, % of max HP
    pub bond_before: f64,
    pub bond_after: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealingSimulation {
    pub initial_value: f64,
    pub final_value: f64,
    pub total_healing_blocked: f64,
    pub total_healing_received: f64,
    pub cleared: bool,
    pub log: Vec<HealingEvent>,
}

/// Run a sequence of heals (in HP) against a Bond. Heals are converted to
/// % of `max_hp` before absorption; a non-positive `max_hp` treats the heals
/// as percentages already.
pub fn simulate_healing(
    mut state: BondOfLifeState,
    heals: &[f64],
    max_hp: f64,
) -> HealingSimulation {
    let hp_per_percent = if max_hp > 0.0 { max_hp / 100.0 } else { 1.0 };
    let initial_value = state.current_value();
    let mut log = Vec::with_capacity(heals.len());

    for &heal in heals {
        let bond_before = state.current_value();
        let outcome = state.apply_healing(heal / hp_per_percent);
        let healing_received = outcome.passthrough * hp_per_percent;
        log.push(HealingEvent {
            healing_attempted: heal,
            healing_received,
            healing_blocked: outcome.absorbed * hp_per_percent,
            bond_before,
            bond_after: state.current_value(),
        });
    }

    HealingSimulation {
        initial_value,
        final_value: state.current_value(),
        total_healing_blocked: log.iter().map(|e| e.healing_blocked).sum(),
        total_healing_received: log.iter().map(|e| e.healing_received).sum(),
        cleared: initial_value > 0.0 && !state.is_active(),
        log,
    }
}
