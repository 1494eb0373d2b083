//! Artifact set bonus definitions and conditional effects

use crate::stat_block::StatKind;
use crate::types::{AbilityType, Element, ReactionType, WeaponType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One 2- or 4-piece bonus of a set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetBonusDef {
    pub set: String,
    pub pieces: u32,
    pub description: String,
    /// Applied as soon as the piece count is met
    #[serde(default)]
    pub stats: BTreeMap<StatKind, f64>,
    /// Conditional effects, evaluated assuming their trigger holds
    #[serde(default)]
    pub effects: Vec<SetEffect>,
}

impl SetBonusDef {
    pub fn is_conditional(&self) -> bool {
        !self.effects.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReactionBonusEntry {
    pub reaction: ReactionType,
    pub value: f64,
}

/// Conditional effect dispatch table. Every variant is evaluated in its
/// best-case trigger state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SetEffect {
    /// Ability DMG bonus when the wielder's weapon matches
    WeaponAbilityBonus {
        weapons: Vec<WeaponType>,
        abilities: Vec<AbilityType>,
        value: f64,
    },
    /// Ability DMG bonus after the set's trigger
    AbilityBonus {
        abilities: Vec<AbilityType>,
        value: f64,
    },
    ReactionBonus { bonuses: Vec<ReactionBonusEntry> },
    /// Stacking stat, taken at max stacks
    Stacks {
        stat: StatKind,
        per_stack: f64,
        max_stacks: u32,
    },
    /// Flat stat bonus behind a named trigger
    ConditionalStat {
        trigger: String,
        stat: StatKind,
        value: f64,
    },
    /// Crit rate vs Cryo-affected targets plus more vs Frozen targets
    FrozenCritBonus { cryo_affected: f64, frozen_extra: f64 },
    /// Ability DMG bonus of `rate × (ER − 100)`, capped
    EnergyRechargeConversion {
        ability: AbilityType,
        rate: f64,
        cap: f64,
    },
    /// Enemy resistance reduction
    ResistanceShred { elements: Vec<Element>, value: f64 },
    /// Ability DMG stacks gained while a Bond of Life is active
    BondOfLifeStacks {
        abilities: Vec<AbilityType>,
        per_stack: f64,
        max_stacks: u32,
    },
    /// Benefits the party rather than the wearer; reported only
    TeamOnly,
}

impl SetEffect {
    pub fn name(&self) -> &'static str {
        match self {
            SetEffect::WeaponAbilityBonus { .. } => "weapon_ability_bonus",
            SetEffect::AbilityBonus { .. } => "ability_bonus",
            SetEffect::ReactionBonus { .. } => "reaction_bonus",
            SetEffect::Stacks { .. } => "stacks",
            SetEffect::ConditionalStat { .. } => "conditional_stat",
            SetEffect::FrozenCritBonus { .. } => "frozen_crit_bonus",
            SetEffect::EnergyRechargeConversion { .. } => "energy_recharge_conversion",
            SetEffect::ResistanceShred { .. } => "resistance_shred",
            SetEffect::BondOfLifeStacks { .. } => "bond_of_life_stacks",
            SetEffect::TeamOnly => "team_only",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bonus_with_effects() {
        let toml = r#"
set = "Emblem of Severed Fate"
pieces = 4
description = "burst bonus from ER"
effects = [
    { kind = "energy_recharge_conversion", ability = "elemental_burst", rate = 0.25, cap = 75.0 },
    { kind = "team_only" },
]
"#;
        let bonus: SetBonusDef = toml::from_str(toml).unwrap();
        assert!(bonus.is_conditional());
        assert!(bonus.stats.is_empty());
        assert_eq!(
            bonus.effects[0],
            SetEffect::EnergyRechargeConversion {
                ability: AbilityType::ElementalBurst,
                rate: 0.25,
                cap: 75.0
            }
        );
        assert_eq!(bonus.effects[1].name(), "team_only");
    }

    #[test]
    fn test_parse_direct_bonus() {
        let toml = r#"
set = "Crimson Witch of Flames"
pieces = 2
description = "Pyro DMG Bonus +15%"
stats = { pyro_dmg_bonus = 15.0 }
"#;
        let bonus: SetBonusDef = toml::from_str(toml).unwrap();
        assert!(!bonus.is_conditional());
        assert_eq!(
            bonus.stats.get(&StatKind::ElementDmgBonus(Element::Pyro)),
            Some(&15.0)
        );
    }
}
