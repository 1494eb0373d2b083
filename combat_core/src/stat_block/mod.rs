//! CharacterStats - Aggregated character stats from all sources

mod aggregator;
mod computed;
mod stat_kind;
mod stat_value;

pub use aggregator::StatAccumulator;
pub use computed::StatsSummary;
pub use stat_kind::StatKind;
pub use stat_value::StatValue;

use crate::source::StatSource;
use crate::types::{AbilityType, Element, ReactionType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lowest and highest character level the engine accepts
pub const MIN_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 100;

/// Complete stat state for one character in one calculation
///
/// All percentages are on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterStats {
    // === Identity ===
    pub name: String,
    pub level: u32,
    /// Element of the character's skills and bursts
    pub element: Element,

    // === Core ===
    pub atk: StatValue,
    pub hp: StatValue,
    pub def: StatValue,

    // === Offense ===
    pub crit_rate: f64,
    pub crit_dmg: f64,
    pub elemental_mastery: f64,
    pub energy_recharge: f64,
    /// DMG bonus for the character's own element
    pub elemental_dmg_bonus: f64,
    pub physical_dmg_bonus: f64,
    /// Generic DMG bonus applying to every hit
    pub damage_bonus: f64,
    /// Flat damage added on top of base damage
    pub additive_dmg: f64,
    #[serde(default)]
    pub ability_dmg_bonus: BTreeMap<AbilityType, f64>,
    #[serde(default)]
    pub reaction_bonus: BTreeMap<ReactionType, f64>,

    // === Defense / Utility ===
    pub healing_bonus: f64,
    pub shield_strength: f64,
    #[serde(default)]
    pub element_res: BTreeMap<Element, f64>,
}

impl CharacterStats {
    /// Empty stats for a character: every value 0
    pub fn new(name: impl Into<String>, level: u32, element: Element) -> Self {
        CharacterStats {
            name: name.into(),
            level: level.clamp(MIN_LEVEL, MAX_LEVEL),
            element,
            atk: StatValue::default(),
            hp: StatValue::default(),
            def: StatValue::default(),
            crit_rate: 0.0,
            crit_dmg: 0.0,
            elemental_mastery: 0.0,
            energy_recharge: 0.0,
            elemental_dmg_bonus: 0.0,
            physical_dmg_bonus: 0.0,
            damage_bonus: 0.0,
            additive_dmg: 0.0,
            ability_dmg_bonus: BTreeMap::new(),
            reaction_bonus: BTreeMap::new(),
            healing_bonus: 0.0,
            shield_strength: 0.0,
            element_res: BTreeMap::new(),
        }
    }

    /// Build stats from a list of sources
    pub fn from_sources(
        name: impl Into<String>,
        level: u32,
        element: Element,
        sources: &[Box<dyn StatSource>],
    ) -> Self {
        let mut stats = CharacterStats::new(name, level, element);
        stats.rebuild_from_sources(sources);
        stats
    }

    /// Rebuild stats from all sources, keeping identity
    pub fn rebuild_from_sources(&mut self, sources: &[Box<dyn StatSource>]) {
        let name = std::mem::take(&mut self.name);
        *self = CharacterStats::new(name, self.level, self.element);
        self.apply_sources(sources);
    }

    /// Apply sources on top of the current values (derived variants)
    pub fn apply_sources(&mut self, sources: &[Box<dyn StatSource>]) {
        let mut accumulator = StatAccumulator::new();

        // Sort sources by priority
        let mut sorted_sources: Vec<_> = sources.iter().collect();
        sorted_sources.sort_by_key(|s| s.priority());

        for source in sorted_sources {
            source.apply(&mut accumulator);
        }

        accumulator.apply_to(self);
        self.sanitize();
    }

    /// Enforce the value invariants every consumer relies on
    pub fn sanitize(&mut self) {
        self.level = self.level.clamp(MIN_LEVEL, MAX_LEVEL);
        self.crit_rate = finite_or_zero(self.crit_rate).clamp(0.0, 100.0);
        self.crit_dmg = finite_or_zero(self.crit_dmg).max(0.0);
        self.elemental_mastery = finite_or_zero(self.elemental_mastery).max(0.0);
        self.additive_dmg = finite_or_zero(self.additive_dmg).max(0.0);
        for stat in [&mut self.atk, &mut self.hp, &mut self.def] {
            stat.base = finite_or_zero(stat.base).max(0.0);
            stat.flat = finite_or_zero(stat.flat).max(0.0);
            stat.percent = finite_or_zero(stat.percent);
        }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BaseStats;
    use crate::source::{BaseStatsSource, ModifierKind, ModifierSource};

    #[test]
    fn test_new_clamps_level() {
        assert_eq!(CharacterStats::new("a", 0, Element::Pyro).level, 1);
        assert_eq!(CharacterStats::new("a", 120, Element::Pyro).level, 100);
    }

    #[test]
    fn test_sanitize_clamps_crit_and_flats() {
        let mut stats = CharacterStats::new("a", 90, Element::Pyro);
        stats.crit_rate = 150.0;
        stats.crit_dmg = -20.0;
        stats.atk.flat = -100.0;
        stats.elemental_mastery = f64::NAN;
        stats.sanitize();
        assert!((stats.crit_rate - 100.0).abs() < f64::EPSILON);
        assert!(stats.crit_dmg.abs() < f64::EPSILON);
        assert!(stats.atk.flat.abs() < f64::EPSILON);
        assert!(stats.elemental_mastery.abs() < f64::EPSILON);
    }

    #[test]
    fn test_rebuild_from_sources_sorts_by_priority() {
        let base = BaseStats::default();
        let mut gear = BTreeMap::new();
        gear.insert(StatKind::AtkFlat, 311.0);
        gear.insert(StatKind::CritRate, 31.1);

        let sources: Vec<Box<dyn StatSource>> = vec![
            Box::new(ModifierSource::from_map("gear", ModifierKind::ArtifactSet, &gear)),
            Box::new(BaseStatsSource::new(base, 5.0, 50.0, 100.0)),
        ];
        let stats = CharacterStats::from_sources("a", 90, Element::Pyro, &sources);

        // 800 base, 311 flat, 24% ascension ATK
        assert!((stats.total_atk() - 1111.0 * 1.24).abs() < 1e-9);
        assert!((stats.crit_rate - 36.1).abs() < 1e-9);
        assert!((stats.crit_dmg - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rebuild_resets_previous_values() {
        let mut stats = CharacterStats::new("a", 90, Element::Pyro);
        stats.crit_rate = 80.0;
        stats.rebuild_from_sources(&[]);
        assert!(stats.crit_rate.abs() < f64::EPSILON);
        assert_eq!(stats.name, "a");
    }
}
