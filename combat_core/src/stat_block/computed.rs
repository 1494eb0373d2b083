//! Computed/derived stat calculations for CharacterStats

use crate::stat_block::CharacterStats;
use crate::types::{AbilityType, Element, ReactionType, ScalingAttribute};
use serde::{Deserialize, Serialize};

/// Flattened view of the stats a report shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub level: u32,
    pub element: Element,
    pub total_atk: f64,
    pub total_hp: f64,
    pub total_def: f64,
    pub crit_rate: f64,
    pub crit_dmg: f64,
    /// Crit DMG / Crit Rate; 0 when crit rate is 0
    pub crit_ratio: f64,
    pub elemental_mastery: f64,
    pub energy_recharge: f64,
    pub elemental_dmg_bonus: f64,
    pub physical_dmg_bonus: f64,
}

impl CharacterStats {
    pub fn total_atk(&self) -> f64 {
        self.atk.compute()
    }

    pub fn total_hp(&self) -> f64 {
        self.hp.compute()
    }

    pub fn total_def(&self) -> f64 {
        self.def.compute()
    }

    /// Total of the attribute an ability scales with
    pub fn scaling_value(&self, attribute: ScalingAttribute) -> f64 {
        match attribute {
            ScalingAttribute::Atk => self.total_atk(),
            ScalingAttribute::Hp => self.total_hp(),
            ScalingAttribute::Def => self.total_def(),
            ScalingAttribute::Em => self.elemental_mastery,
        }
    }

    /// DMG bonus for the damage type of a hit: physical bonus for physical
    /// hits, the character's elemental bonus otherwise
    pub fn type_dmg_bonus(&self, element: Element) -> f64 {
        if element == Element::Physical {
            self.physical_dmg_bonus
        } else {
            self.elemental_dmg_bonus
        }
    }

    pub fn ability_bonus(&self, ability: AbilityType) -> f64 {
        self.ability_dmg_bonus.get(&ability).copied().unwrap_or(0.0)
    }

    pub fn reaction_bonus_for(&self, reaction: ReactionType) -> f64 {
        self.reaction_bonus.get(&reaction).copied().unwrap_or(0.0)
    }

    /// Crit rate as consumed by damage math: clamped to [0, 100]
    pub fn effective_crit_rate(&self) -> f64 {
        self.crit_rate.clamp(0.0, 100.0)
    }

    pub fn crit_ratio(&self) -> f64 {
        if self.crit_rate > 0.0 {
            self.crit_dmg / self.crit_rate
        } else {
            0.0
        }
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            level: self.level,
            element: self.element,
            total_atk: self.total_atk(),
            total_hp: self.total_hp(),
            total_def: self.total_def(),
            crit_rate: self.crit_rate,
            crit_dmg: self.crit_dmg,
            crit_ratio: self.crit_ratio(),
            elemental_mastery: self.elemental_mastery,
            energy_recharge: self.energy_recharge,
            elemental_dmg_bonus: self.elemental_dmg_bonus,
            physical_dmg_bonus: self.physical_dmg_bonus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaling_value_per_attribute() {
        let mut stats = CharacterStats::new("test", 90, Element::Geo);
        stats.atk.base = 1000.0;
        stats.hp.base = 15000.0;
        stats.def.base = 800.0;
        stats.def.percent = 50.0;
        stats.elemental_mastery = 120.0;

        assert!((stats.scaling_value(ScalingAttribute::Atk) - 1000.0).abs() < f64::EPSILON);
        assert!((stats.scaling_value(ScalingAttribute::Hp) - 15000.0).abs() < f64::EPSILON);
        assert!((stats.scaling_value(ScalingAttribute::Def) - 1200.0).abs() < 1e-9);
        assert!((stats.scaling_value(ScalingAttribute::Em) - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_type_dmg_bonus() {
        let mut stats = CharacterStats::new("test", 90, Element::Cryo);
        stats.elemental_dmg_bonus = 46.6;
        stats.physical_dmg_bonus = 25.0;
        assert!((stats.type_dmg_bonus(Element::Cryo) - 46.6).abs() < f64::EPSILON);
        assert!((stats.type_dmg_bonus(Element::Physical) - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_crit_ratio_guards_zero_rate() {
        let mut stats = CharacterStats::new("test", 90, Element::Pyro);
        stats.crit_dmg = 100.0;
        assert!(stats.crit_ratio().abs() < f64::EPSILON);
        stats.crit_rate = 50.0;
        assert!((stats.crit_ratio() - 2.0).abs() < f64::EPSILON);
    }
}
