//! Per-character Bond of Life conversion rules

use crate::bond::BondOfLifeState;
use crate::stat_block::StatKind;
use crate::types::AbilityType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a character turns an active Bond into offense
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BondRule {
    /// Flat ATK = Bond% × max HP × factor
    AtkFromHp { factor: f64 },
    /// Skill DMG% = min(Bond × rate, cap); normal attacks get a share of it
    SkillDmgFromBond {
        rate: f64,
        cap: f64,
        normal_attack_share: f64,
    },
}

impl BondRule {
    /// Stat deltas for the current state. Empty while the Bond is inactive.
    pub fn deltas(&self, state: &BondOfLifeState, max_hp: f64) -> BTreeMap<StatKind, f64> {
        let mut deltas = BTreeMap::new();
        if !state.is_active() {
            return deltas;
        }
        let bond = state.current_value();
        match *self {
            BondRule::AtkFromHp { factor } => {
                let bond_hp = bond / 100.0 * max_hp.max(0.0);
                deltas.insert(StatKind::AtkFlat, bond_hp * factor);
            }
            BondRule::SkillDmgFromBond {
                rate,
                cap,
                normal_attack_share,
            } => {
                let skill = (bond * rate).min(cap);
                deltas.insert(StatKind::AbilityDmgBonus(AbilityType::ElementalSkill), skill);
                deltas.insert(
                    StatKind::AbilityDmgBonus(AbilityType::NormalAttack),
                    skill * normal_attack_share,
                );
            }
        }
        deltas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bond(value: f64, max: f64) -> BondOfLifeState {
        let mut state = BondOfLifeState::new(max);
        state.generate(value, "test");
        state
    }

    #[test]
    fn test_atk_from_hp() {
        let rule = BondRule::AtkFromHp { factor: 0.0074 };
        let deltas = rule.deltas(&bond(50.0, 145.0), 20000.0);
        // 50% of 20000 HP = 10000 × 0.0074
        assert!((deltas[&StatKind::AtkFlat] - 74.0).abs() < 1e-9);
    }

    #[test]
    fn test_skill_bonus_capped() {
        let rule = BondRule::SkillDmgFromBond {
            rate: 0.5,
            cap: 50.0,
            normal_attack_share: 0.5,
        };
        let deltas = rule.deltas(&bond(60.0, 200.0), 15000.0);
        let skill = StatKind::AbilityDmgBonus(AbilityType::ElementalSkill);
        let normal = StatKind::AbilityDmgBonus(AbilityType::NormalAttack);
        assert!((deltas[&skill] - 30.0).abs() < 1e-9);
        assert!((deltas[&normal] - 15.0).abs() < 1e-9);

        let capped = rule.deltas(&bond(180.0, 200.0), 15000.0);
        assert!((capped[&skill] - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_inactive_bond_grants_nothing() {
        let rule = BondRule::AtkFromHp { factor: 0.0074 };
        assert!(rule.deltas(&BondOfLifeState::new(145.0), 20000.0).is_empty());
    }

    #[test]
    fn test_rule_parses_from_toml() {
        let rule: BondRule = toml::from_str("kind = \"atk_from_hp\"\nfactor = 0.0074").unwrap();
        assert_eq!(rule, BondRule::AtkFromHp { factor: 0.0074 });
    }
}
