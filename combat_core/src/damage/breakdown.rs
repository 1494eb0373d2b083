//! DamageBreakdown - Damage of one hit with every formula term

use crate::types::{AbilityType, Element, ReactionKind, ReactionType, ScalingAttribute};
use serde::{Deserialize, Serialize};

/// How a reaction entered (or did not enter) a hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionApplication {
    pub reaction: ReactionType,
    pub kind: ReactionKind,
    /// False when the hit's element cannot trigger the reaction
    pub applied: bool,
    /// Amplifying base constant (1.5 / 2.0), 0 for transformative
    pub base_multiplier: f64,
    /// EM term of the reaction curve
    pub em_bonus: f64,
    /// Reaction DMG bonus from gear, percent
    pub reaction_bonus: f64,
    /// Level multiplier, transformative only
    pub level_multiplier: f64,
    /// Reaction-type multiplier, transformative only
    pub reaction_multiplier: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// The result of running the damage formula for one hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageBreakdown {
    // === Hit ===
    pub ability: AbilityType,
    pub hit: usize,
    pub element: Element,
    pub scaling_attribute: ScalingAttribute,

    // === Base ===
    pub scaling_value: f64,
    /// Talent multiplier, percent
    pub talent_multiplier: f64,
    pub base_dmg: f64,
    /// 1.0 unless an amplifying reaction applies
    pub base_dmg_multiplier: f64,
    /// Flat additive damage relative to the scaling value
    pub additive_base_dmg_bonus: f64,

    // === Bonuses and mitigation ===
    /// Total DMG bonus, percent
    pub dmg_bonus: f64,
    pub def_multiplier: f64,
    pub effective_resistance: f64,
    pub res_multiplier: f64,

    // === Results ===
    pub non_crit: f64,
    pub crit: f64,
    pub average: f64,
    /// Crit rate used for the average, 0-1
    pub effective_crit_rate: f64,
    /// Crit DMG, percent
    pub crit_dmg: f64,
    pub transformative_damage: f64,
    pub total_average: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction: Option<ReactionApplication>,
}

impl DamageBreakdown {
    /// All-zero breakdown reported for a failed ability
    pub fn zeroed(ability: AbilityType, element: Element) -> Self {
        DamageBreakdown {
            ability,
            hit: 0,
            element,
            scaling_attribute: ScalingAttribute::Atk,
            scaling_value: 0.0,
            talent_multiplier: 0.0,
            base_dmg: 0.0,
            base_dmg_multiplier: 0.0,
            additive_base_dmg_bonus: 0.0,
            dmg_bonus: 0.0,
            def_multiplier: 0.0,
            effective_resistance: 0.0,
            res_multiplier: 0.0,
            non_crit: 0.0,
            crit: 0.0,
            average: 0.0,
            effective_crit_rate: 0.0,
            crit_dmg: 0.0,
            transformative_damage: 0.0,
            total_average: 0.0,
            reaction: None,
        }
    }

    /// Terms that must be finite for the breakdown to be reported
    pub(crate) fn first_non_finite(&self) -> Option<&'static str> {
        [
            ("scaling_value", self.scaling_value),
            ("base_dmg", self.base_dmg),
            ("base_dmg_multiplier", self.base_dmg_multiplier),
            ("additive_base_dmg_bonus", self.additive_base_dmg_bonus),
            ("dmg_bonus", self.dmg_bonus),
            ("def_multiplier", self.def_multiplier),
            ("res_multiplier", self.res_multiplier),
            ("average", self.average),
            ("transformative_damage", self.transformative_damage),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
        .map(|(term, _)| term)
    }

    pub fn reaction_applied(&self) -> bool {
        self.reaction.as_ref().map(|r| r.applied).unwrap_or(false)
    }
}
