//! StatKind - Every stat a build, set bonus or buff can touch
//!
//! Raw sources name stats in three dialects: snake_case names
//! (`atk_percent`), provider property ids (`FIGHT_PROP_ATTACK_PERCENT`) and
//! display labels (`ATK%`). `StatKind::from_name` folds all three onto one
//! closed enum.

use crate::types::{AbilityType, Element, ReactionType};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatKind {
    // === Base ===
    BaseAtk,
    BaseHp,
    BaseDef,

    // === Flat / Percent ===
    AtkFlat,
    AtkPercent,
    HpFlat,
    HpPercent,
    DefFlat,
    DefPercent,

    // === Offense ===
    CritRate,
    CritDmg,
    ElementalMastery,
    EnergyRecharge,
    PhysicalDmgBonus,
    /// Bonus to whatever element the character deals
    ElementalDmgBonus,
    /// Bonus to one element; only counts when it matches the character
    ElementDmgBonus(Element),
    AbilityDmgBonus(AbilityType),
    /// Normal and charged attacks
    NormalChargedDmgBonus,
    /// Elemental skill and burst
    SkillBurstDmgBonus,
    /// Generic DMG bonus applying to every hit
    DamageBonus,
    /// Flat damage added to base damage
    AdditiveDmg,
    ReactionBonus(ReactionType),

    // === Defense / Utility ===
    HealingBonus,
    ShieldStrength,
    ElementRes(Element),
}

impl StatKind {
    /// Parse any known stat name variant. Returns `None` for names outside
    /// the mapping table.
    pub fn from_name(name: &str) -> Option<StatKind> {
        let key = normalize_stat_key(name);
        let key = key.strip_prefix("fight_prop_").unwrap_or(&key);

        let direct = match key {
            "base_atk" | "base_attack" => Some(StatKind::BaseAtk),
            "base_hp" => Some(StatKind::BaseHp),
            "base_def" | "base_defense" => Some(StatKind::BaseDef),
            "atk" | "atk_flat" | "flat_atk" | "attack" => Some(StatKind::AtkFlat),
            "atk_percent" | "attack_percent" => Some(StatKind::AtkPercent),
            "hp" | "hp_flat" | "flat_hp" => Some(StatKind::HpFlat),
            "hp_percent" => Some(StatKind::HpPercent),
            "def" | "def_flat" | "flat_def" | "defense" => Some(StatKind::DefFlat),
            "def_percent" | "defense_percent" => Some(StatKind::DefPercent),
            "crit_rate" | "critical_rate" | "critical" => Some(StatKind::CritRate),
            "crit_dmg" | "crit_damage" | "critical_damage" | "critical_hurt" => {
                Some(StatKind::CritDmg)
            }
            "elemental_mastery" | "element_mastery" | "em" => Some(StatKind::ElementalMastery),
            "energy_recharge" | "charge_efficiency" | "er" => Some(StatKind::EnergyRecharge),
            "healing_bonus" | "heal_bonus" | "heal_add" => Some(StatKind::HealingBonus),
            "shield_strength" => Some(StatKind::ShieldStrength),
            "elemental_dmg_bonus" | "elemental_dmg" => Some(StatKind::ElementalDmgBonus),
            "damage_bonus" | "dmg_bonus" | "all_dmg_bonus" => Some(StatKind::DamageBonus),
            "additive_dmg" | "additive_base_dmg" | "flat_dmg" => Some(StatKind::AdditiveDmg),
            "normal_charged_attack_dmg" | "normal_charged_dmg" => {
                Some(StatKind::NormalChargedDmgBonus)
            }
            "elemental_skill_burst_dmg" | "skill_burst_dmg" => Some(StatKind::SkillBurstDmgBonus),
            _ => None,
        };
        if direct.is_some() {
            return direct;
        }

        // "Crit DMG%" style labels; never turns a percent into a flat stat
        if let Some(stripped) = key.strip_suffix("_percent") {
            return StatKind::from_name(stripped).filter(|kind| !kind.is_flat());
        }

        // Provider ids: FIGHT_PROP_<ELEMENT>_ADD_HURT / _SUB_HURT
        if let Some(stem) = key.strip_suffix("_add_hurt") {
            return Element::from_name(stem).map(element_dmg_bonus);
        }
        if let Some(stem) = key.strip_suffix("_sub_hurt") {
            return Element::from_name(stem).map(StatKind::ElementRes);
        }

        for suffix in ["_resistance", "_res"] {
            if let Some(stem) = key.strip_suffix(suffix) {
                return Element::from_name(stem).map(StatKind::ElementRes);
            }
        }

        let stem = ["_dmg_bonus", "_damage_bonus", "_dmg", "_damage", "_bonus"]
            .iter()
            .find_map(|suffix| key.strip_suffix(suffix))?;
        if let Some(element) = Element::from_name(stem) {
            return Some(element_dmg_bonus(element));
        }
        if let Some(ability) = AbilityType::from_name(stem) {
            return Some(StatKind::AbilityDmgBonus(ability));
        }
        ReactionType::from_name(stem).map(StatKind::ReactionBonus)
    }

    /// Canonical snake_case name, the form `from_name` always accepts
    pub fn name(&self) -> String {
        match self {
            StatKind::BaseAtk => "base_atk".to_string(),
            StatKind::BaseHp => "base_hp".to_string(),
            StatKind::BaseDef => "base_def".to_string(),
            StatKind::AtkFlat => "atk_flat".to_string(),
            StatKind::AtkPercent => "atk_percent".to_string(),
            StatKind::HpFlat => "hp_flat".to_string(),
            StatKind::HpPercent => "hp_percent".to_string(),
            StatKind::DefFlat => "def_flat".to_string(),
            StatKind::DefPercent => "def_percent".to_string(),
            StatKind::CritRate => "crit_rate".to_string(),
            StatKind::CritDmg => "crit_dmg".to_string(),
            StatKind::ElementalMastery => "elemental_mastery".to_string(),
            StatKind::EnergyRecharge => "energy_recharge".to_string(),
            StatKind::PhysicalDmgBonus => "physical_dmg_bonus".to_string(),
            StatKind::ElementalDmgBonus => "elemental_dmg_bonus".to_string(),
            StatKind::ElementDmgBonus(element) => format!("{}_dmg_bonus", element),
            StatKind::AbilityDmgBonus(ability) => format!("{}_dmg", ability),
            StatKind::NormalChargedDmgBonus => "normal_charged_attack_dmg".to_string(),
            StatKind::SkillBurstDmgBonus => "elemental_skill_burst_dmg".to_string(),
            StatKind::DamageBonus => "damage_bonus".to_string(),
            StatKind::AdditiveDmg => "additive_dmg".to_string(),
            StatKind::ReactionBonus(reaction) => format!("{}_dmg_bonus", reaction),
            StatKind::HealingBonus => "healing_bonus".to_string(),
            StatKind::ShieldStrength => "shield_strength".to_string(),
            StatKind::ElementRes(element) => format!("{}_res", element),
        }
    }

    /// Whether this stat is a flat amount rather than a percentage
    pub fn is_flat(&self) -> bool {
        matches!(
            self,
            StatKind::BaseAtk
                | StatKind::BaseHp
                | StatKind::BaseDef
                | StatKind::AtkFlat
                | StatKind::HpFlat
                | StatKind::DefFlat
                | StatKind::ElementalMastery
                | StatKind::AdditiveDmg
        )
    }
}

fn element_dmg_bonus(element: Element) -> StatKind {
    if element == Element::Physical {
        StatKind::PhysicalDmgBonus
    } else {
        StatKind::ElementDmgBonus(element)
    }
}

/// Lowercase, `%` → `_percent`, every other non-alphanumeric run → `_`
fn normalize_stat_key(name: &str) -> String {
    let lowered = name.trim().to_lowercase().replace('%', "_percent");
    let mut key = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        if c.is_ascii_alphanumeric() {
            key.push(c);
        } else if !key.ends_with('_') {
            key.push('_');
        }
    }
    key.trim_matches('_').to_string()
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl TryFrom<String> for StatKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        StatKind::from_name(&value).ok_or_else(|| format!("unknown stat '{}'", value))
    }
}

impl From<StatKind> for String {
    fn from(kind: StatKind) -> String {
        kind.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case_names() {
        assert_eq!(StatKind::from_name("atk_percent"), Some(StatKind::AtkPercent));
        assert_eq!(StatKind::from_name("crit_dmg"), Some(StatKind::CritDmg));
        assert_eq!(
            StatKind::from_name("elemental_burst_dmg"),
            Some(StatKind::AbilityDmgBonus(AbilityType::ElementalBurst))
        );
    }

    #[test]
    fn test_provider_property_ids() {
        assert_eq!(
            StatKind::from_name("FIGHT_PROP_ATTACK_PERCENT"),
            Some(StatKind::AtkPercent)
        );
        assert_eq!(StatKind::from_name("FIGHT_PROP_CRITICAL"), Some(StatKind::CritRate));
        assert_eq!(StatKind::from_name("FIGHT_PROP_CRITICAL_HURT"), Some(StatKind::CritDmg));
        assert_eq!(
            StatKind::from_name("FIGHT_PROP_FIRE_ADD_HURT"),
            Some(StatKind::ElementDmgBonus(Element::Pyro))
        );
        assert_eq!(
            StatKind::from_name("FIGHT_PROP_PHYSICAL_ADD_HURT"),
            Some(StatKind::PhysicalDmgBonus)
        );
        assert_eq!(
            StatKind::from_name("FIGHT_PROP_CHARGE_EFFICIENCY"),
            Some(StatKind::EnergyRecharge)
        );
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(StatKind::from_name("ATK%"), Some(StatKind::AtkPercent));
        assert_eq!(StatKind::from_name("Flat ATK"), Some(StatKind::AtkFlat));
        assert_eq!(StatKind::from_name("Crit RATE"), Some(StatKind::CritRate));
        assert_eq!(
            StatKind::from_name("Hydro DMG Bonus"),
            Some(StatKind::ElementDmgBonus(Element::Hydro))
        );
        assert_eq!(StatKind::from_name("Elemental Mastery"), Some(StatKind::ElementalMastery));
        assert_eq!(StatKind::from_name("Energy Recharge%"), Some(StatKind::EnergyRecharge));
        assert_eq!(StatKind::from_name("Elemental Mastery%"), None);
    }

    #[test]
    fn test_reaction_and_resistance_names() {
        assert_eq!(
            StatKind::from_name("swirl_dmg_bonus"),
            Some(StatKind::ReactionBonus(ReactionType::Swirl))
        );
        assert_eq!(
            StatKind::from_name("electro_charged_dmg"),
            Some(StatKind::ReactionBonus(ReactionType::ElectroCharged))
        );
        assert_eq!(
            StatKind::from_name("pyro_res"),
            Some(StatKind::ElementRes(Element::Pyro))
        );
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(StatKind::from_name("luck"), None);
        assert_eq!(StatKind::from_name("mega_dmg_bonus"), None);
    }

    #[test]
    fn test_canonical_names_parse_back() {
        let kinds = [
            StatKind::AtkFlat,
            StatKind::ElementDmgBonus(Element::Dendro),
            StatKind::AbilityDmgBonus(AbilityType::NormalAttack),
            StatKind::ReactionBonus(ReactionType::Hyperbloom),
            StatKind::NormalChargedDmgBonus,
            StatKind::SkillBurstDmgBonus,
            StatKind::ElementRes(Element::Electro),
        ];
        for kind in kinds {
            assert_eq!(StatKind::from_name(&kind.name()), Some(kind), "{}", kind);
        }
    }

    #[test]
    fn test_serde_as_map_key() {
        let map: std::collections::BTreeMap<StatKind, f64> =
            toml::from_str("pyro_dmg_bonus = 15.0\natk_percent = 18.0").unwrap();
        assert_eq!(map.get(&StatKind::ElementDmgBonus(Element::Pyro)), Some(&15.0));
        assert_eq!(map.get(&StatKind::AtkPercent), Some(&18.0));
    }
}
