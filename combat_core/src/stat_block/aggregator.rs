//! StatAccumulator - Collects stat modifications before applying to CharacterStats

use crate::stat_block::{CharacterStats, StatKind};
use crate::types::{AbilityType, Element, ReactionType};
use std::collections::BTreeMap;
use tracing::debug;

/// Accumulates stat modifications from various sources
///
/// This is used during stat rebuilding to collect all modifications
/// before applying them to a CharacterStats. Percent values are on a
/// 0-100 scale.
#[derive(Debug, Clone, Default)]
pub struct StatAccumulator {
    // === Base ===
    pub base_atk: f64,
    pub base_hp: f64,
    pub base_def: f64,

    // === Flat / Percent ===
    pub atk_flat: f64,
    pub atk_percent: f64,
    pub hp_flat: f64,
    pub hp_percent: f64,
    pub def_flat: f64,
    pub def_percent: f64,

    // === Offense ===
    pub crit_rate: f64,
    pub crit_dmg: f64,
    pub elemental_mastery: f64,
    pub energy_recharge: f64,
    pub physical_dmg_bonus: f64,
    pub elemental_dmg_bonus: f64,
    /// Element-specific bonuses, resolved against the character's element
    pub element_dmg_bonus: BTreeMap<Element, f64>,
    pub ability_dmg_bonus: BTreeMap<AbilityType, f64>,
    pub damage_bonus: f64,
    pub additive_dmg: f64,
    pub reaction_bonus: BTreeMap<ReactionType, f64>,

    // === Defense / Utility ===
    pub healing_bonus: f64,
    pub shield_strength: f64,
    pub element_res: BTreeMap<Element, f64>,
}

impl StatAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a single stat to the accumulator
    pub fn apply_stat(&mut self, stat: StatKind, value: f64) {
        match stat {
            StatKind::BaseAtk => self.base_atk += value,
            StatKind::BaseHp => self.base_hp += value,
            StatKind::BaseDef => self.base_def += value,

            StatKind::AtkFlat => self.atk_flat += value,
            StatKind::AtkPercent => self.atk_percent += value,
            StatKind::HpFlat => self.hp_flat += value,
            StatKind::HpPercent => self.hp_percent += value,
            StatKind::DefFlat => self.def_flat += value,
            StatKind::DefPercent => self.def_percent += value,

            StatKind::CritRate => self.crit_rate += value,
            StatKind::CritDmg => self.crit_dmg += value,
            StatKind::ElementalMastery => self.elemental_mastery += value,
            StatKind::EnergyRecharge => self.energy_recharge += value,
            StatKind::PhysicalDmgBonus => self.physical_dmg_bonus += value,
            StatKind::ElementalDmgBonus => self.elemental_dmg_bonus += value,
            StatKind::ElementDmgBonus(element) => {
                *self.element_dmg_bonus.entry(element).or_insert(0.0) += value
            }
            StatKind::AbilityDmgBonus(ability) => self.add_ability_bonus(ability, value),
            StatKind::NormalChargedDmgBonus => {
                self.add_ability_bonus(AbilityType::NormalAttack, value);
                self.add_ability_bonus(AbilityType::ChargedAttack, value);
            }
            StatKind::SkillBurstDmgBonus => {
                self.add_ability_bonus(AbilityType::ElementalSkill, value);
                self.add_ability_bonus(AbilityType::ElementalBurst, value);
            }
            StatKind::DamageBonus => self.damage_bonus += value,
            StatKind::AdditiveDmg => self.additive_dmg += value,
            StatKind::ReactionBonus(reaction) => {
                *self.reaction_bonus.entry(reaction).or_insert(0.0) += value
            }

            StatKind::HealingBonus => self.healing_bonus += value,
            StatKind::ShieldStrength => self.shield_strength += value,
            StatKind::ElementRes(element) => {
                *self.element_res.entry(element).or_insert(0.0) += value
            }
        }
    }

    /// Apply every entry of a stat map
    pub fn apply_map(&mut self, stats: &BTreeMap<StatKind, f64>) {
        for (&stat, &value) in stats {
            self.apply_stat(stat, value);
        }
    }

    pub fn add_ability_bonus(&mut self, ability: AbilityType, value: f64) {
        *self.ability_dmg_bonus.entry(ability).or_insert(0.0) += value;
    }

    /// Apply accumulated stats to CharacterStats
    pub fn apply_to(&self, stats: &mut CharacterStats) {
        // Core stats
        stats.atk.add_base(self.base_atk);
        stats.atk.add_flat(self.atk_flat);
        stats.atk.add_percent(self.atk_percent);
        stats.hp.add_base(self.base_hp);
        stats.hp.add_flat(self.hp_flat);
        stats.hp.add_percent(self.hp_percent);
        stats.def.add_base(self.base_def);
        stats.def.add_flat(self.def_flat);
        stats.def.add_percent(self.def_percent);

        // Offense
        stats.crit_rate += self.crit_rate;
        stats.crit_dmg += self.crit_dmg;
        stats.elemental_mastery += self.elemental_mastery;
        stats.energy_recharge += self.energy_recharge;
        stats.physical_dmg_bonus += self.physical_dmg_bonus;
        stats.elemental_dmg_bonus += self.elemental_dmg_bonus;
        stats.damage_bonus += self.damage_bonus;
        stats.additive_dmg += self.additive_dmg;

        // Element-specific bonuses only count for the element the character deals
        for (&element, &value) in &self.element_dmg_bonus {
            if element == stats.element && element.is_elemental() {
                stats.elemental_dmg_bonus += value;
            } else if element == Element::Physical {
                stats.physical_dmg_bonus += value;
            } else {
                debug!(
                    character = %stats.name,
                    bonus = %element,
                    "element DMG bonus does not match character element, ignored"
                );
            }
        }

        for (&ability, &value) in &self.ability_dmg_bonus {
            *stats.ability_dmg_bonus.entry(ability).or_insert(0.0) += value;
        }
        for (&reaction, &value) in &self.reaction_bonus {
            *stats.reaction_bonus.entry(reaction).or_insert(0.0) += value;
        }

        // Defense / Utility
        stats.healing_bonus += self.healing_bonus;
        stats.shield_strength += self.shield_strength;
        for (&element, &value) in &self.element_res {
            *stats.element_res.entry(element).or_insert(0.0) += value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_stat_routes_to_fields() {
        let mut acc = StatAccumulator::new();
        acc.apply_stat(StatKind::AtkPercent, 18.0);
        acc.apply_stat(StatKind::AtkPercent, 28.6);
        acc.apply_stat(StatKind::CritRate, 31.1);
        assert!((acc.atk_percent - 46.6).abs() < 1e-9);
        assert!((acc.crit_rate - 31.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_combined_ability_bonuses_split() {
        let mut acc = StatAccumulator::new();
        acc.apply_stat(StatKind::NormalChargedDmgBonus, 15.0);
        acc.apply_stat(StatKind::AbilityDmgBonus(AbilityType::NormalAttack), 35.0);
        assert_eq!(acc.ability_dmg_bonus.get(&AbilityType::NormalAttack), Some(&50.0));
        assert_eq!(acc.ability_dmg_bonus.get(&AbilityType::ChargedAttack), Some(&15.0));
        assert_eq!(acc.ability_dmg_bonus.get(&AbilityType::PlungeAttack), None);
    }

    #[test]
    fn test_element_bonus_matches_character_only() {
        let mut acc = StatAccumulator::new();
        acc.apply_stat(StatKind::ElementDmgBonus(Element::Pyro), 46.6);
        acc.apply_stat(StatKind::ElementDmgBonus(Element::Hydro), 15.0);
        acc.apply_stat(StatKind::ElementalDmgBonus, 10.0);

        let mut pyro = CharacterStats::new("Hu Tao", 90, Element::Pyro);
        acc.apply_to(&mut pyro);
        assert!((pyro.elemental_dmg_bonus - 56.6).abs() < 1e-9);

        let mut hydro = CharacterStats::new("Xingqiu", 90, Element::Hydro);
        acc.apply_to(&mut hydro);
        assert!((hydro.elemental_dmg_bonus - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_apply_to_core_stats() {
        let mut acc = StatAccumulator::new();
        acc.apply_stat(StatKind::BaseAtk, 800.0);
        acc.apply_stat(StatKind::AtkFlat, 311.0);
        acc.apply_stat(StatKind::AtkPercent, 46.6);
        let mut stats = CharacterStats::new("test", 90, Element::Physical);
        acc.apply_to(&mut stats);
        assert!((stats.total_atk() - 1628.726).abs() < 1e-9);
    }
}
