//! Enemy profile (caller input) and resolved enemy stats

use crate::config::EngineConstants;
use crate::defense::{defense_multiplier, effective_resistance, resistance_multiplier};
use crate::types::Element;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Enemy as supplied by a caller. Everything is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnemyProfile {
    #[serde(default)]
    pub level: Option<u32>,
    /// Per-element resistance overrides
    #[serde(default)]
    pub resistance: BTreeMap<Element, f64>,
    #[serde(default)]
    pub physical_resistance: Option<f64>,
    #[serde(default)]
    pub def_reduction: f64,
}

/// Enemy with every resistance resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub level: u32,
    /// Base resistance for the seven elements and physical
    pub resistance: BTreeMap<Element, f64>,
    pub def_reduction: f64,
    /// Resistance reduction per element, including physical
    pub res_reduction: BTreeMap<Element, f64>,
}

impl EnemyStats {
    /// Default enemy: configured level and the same resistance everywhere
    pub fn standard(constants: &EngineConstants) -> Self {
        Self::from_profile(&EnemyProfile::default(), constants)
    }

    pub fn from_profile(profile: &EnemyProfile, constants: &EngineConstants) -> Self {
        let default_res = constants.enemy.resistance;
        let mut resistance: BTreeMap<Element, f64> = Element::ELEMENTAL
            .into_iter()
            .map(|e| (e, profile.resistance.get(&e).copied().unwrap_or(default_res)))
            .collect();
        let physical = profile
            .physical_resistance
            .or_else(|| profile.resistance.get(&Element::Physical).copied())
            .unwrap_or(default_res);
        resistance.insert(Element::Physical, physical);

        EnemyStats {
            level: profile.level.unwrap_or(constants.enemy.level).max(1),
            resistance,
            def_reduction: profile.def_reduction,
            res_reduction: BTreeMap::new(),
        }
    }

    pub fn base_resistance(&self, element: Element) -> f64 {
        self.resistance.get(&element).copied().unwrap_or(0.0)
    }

    pub fn res_reduction_for(&self, element: Element) -> f64 {
        self.res_reduction.get(&element).copied().unwrap_or(0.0)
    }

    pub fn effective_resistance(&self, element: Element) -> f64 {
        effective_resistance(self.base_resistance(element), self.res_reduction_for(element))
    }

    /// Add resistance reductions on top of existing ones
    pub fn add_res_reduction(&mut self, reductions: &BTreeMap<Element, f64>) {
        for (&element, &value) in reductions {
            *self.res_reduction.entry(element).or_insert(0.0) += value;
        }
    }

    pub fn with_res_reduction(mut self, reductions: &BTreeMap<Element, f64>) -> Self {
        self.add_res_reduction(reductions);
        self
    }

    pub fn defense_multiplier(&self, character_level: u32, constants: &EngineConstants) -> f64 {
        defense_multiplier(
            character_level,
            self.level,
            self.def_reduction,
            &constants.defense,
        )
    }

    pub fn resistance_multiplier(&self, element: Element, constants: &EngineConstants) -> f64 {
        resistance_multiplier(self.effective_resistance(element), &constants.resistance)
    }
}
