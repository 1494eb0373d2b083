//! Team buff definitions - what a teammate or resonance grants

use crate::stat_block::StatKind;
use crate::types::Element;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which elements a resistance shred applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShredTarget {
    Element(Element),
    /// The swirlable elements (Viridescent-style shred)
    Elemental,
    /// Every element and physical
    All,
}

impl ShredTarget {
    pub fn applies_to(self, element: Element) -> bool {
        match self {
            ShredTarget::Element(target) => target == element,
            ShredTarget::Elemental => Element::SWIRLABLE.contains(&element),
            ShredTarget::All => true,
        }
    }

    fn prefix(self) -> String {
        match self {
            ShredTarget::Element(element) => element.name().to_string(),
            ShredTarget::Elemental => "elemental".to_string(),
            ShredTarget::All => "all".to_string(),
        }
    }
}

/// What a team buff changes
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BuffStat {
    /// A stat on the receiving character
    Stat(StatKind),
    /// Enemy resistance reduction
    ResShred(ShredTarget),
    /// Reported but not modeled by the damage formula
    /// (damage reduction, movement speed, healing)
    Other(String),
}

impl BuffStat {
    pub fn from_name(name: &str) -> BuffStat {
        let key = name.trim().to_lowercase();
        if let Some(stem) = key.strip_suffix("_res_reduction") {
            let target = match stem {
                "all" => Some(ShredTarget::All),
                "elemental" => Some(ShredTarget::Elemental),
                other => Element::from_name(other).map(ShredTarget::Element),
            };
            if let Some(target) = target {
                return BuffStat::ResShred(target);
            }
        }
        match StatKind::from_name(&key) {
            Some(kind) => BuffStat::Stat(kind),
            None => BuffStat::Other(key),
        }
    }

    pub fn name(&self) -> String {
        match self {
            BuffStat::Stat(kind) => kind.name(),
            BuffStat::ResShred(target) => format!("{}_res_reduction", target.prefix()),
            BuffStat::Other(name) => name.clone(),
        }
    }

    pub fn category(&self) -> BuffCategory {
        match self {
            BuffStat::Stat(kind) => match kind {
                StatKind::BaseAtk | StatKind::AtkFlat | StatKind::AtkPercent => {
                    BuffCategory::Attack
                }
                StatKind::DamageBonus
                | StatKind::AbilityDmgBonus(_)
                | StatKind::NormalChargedDmgBonus
                | StatKind::SkillBurstDmgBonus
                | StatKind::ReactionBonus(_)
                | StatKind::AdditiveDmg
                | StatKind::PhysicalDmgBonus
                | StatKind::ElementDmgBonus(_)
                | StatKind::ElementalDmgBonus => BuffCategory::Damage,
                StatKind::ElementalMastery | StatKind::CritRate | StatKind::CritDmg => {
                    BuffCategory::Elemental
                }
                StatKind::ShieldStrength
                | StatKind::HealingBonus
                | StatKind::BaseHp
                | StatKind::HpFlat
                | StatKind::HpPercent
                | StatKind::BaseDef
                | StatKind::DefFlat
                | StatKind::DefPercent
                | StatKind::ElementRes(_) => BuffCategory::Defensive,
                StatKind::EnergyRecharge => BuffCategory::Utility,
            },
            BuffStat::ResShred(_) => BuffCategory::Elemental,
            BuffStat::Other(name) => match name.as_str() {
                "damage_reduction" | "healing" => BuffCategory::Defensive,
                _ => BuffCategory::Utility,
            },
        }
    }
}

impl From<String> for BuffStat {
    fn from(value: String) -> Self {
        BuffStat::from_name(&value)
    }
}

impl From<BuffStat> for String {
    fn from(stat: BuffStat) -> String {
        stat.name()
    }
}

impl fmt::Display for BuffStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Buff category used for reporting and synergy role coverage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuffCategory {
    Attack,
    Damage,
    Defensive,
    Utility,
    Elemental,
}

/// A static buff one character grants its teammates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamBuffDef {
    pub source: String,
    pub stat: BuffStat,
    pub value: f64,
    /// Nominal duration in seconds
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub conditions: Vec<String>,
    /// Share of a rotation the buff is up, 0-100
    #[serde(default = "default_uptime")]
    pub uptime: f64,
}

fn default_uptime() -> f64 {
    100.0
}

/// Elemental resonance granted when two members share an element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResonanceDef {
    pub element: Element,
    pub stat: BuffStat,
    pub value: f64,
    #[serde(default)]
    pub description: String,
}

/// A buff that is active for this roster, weighted by uptime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedBuff {
    pub source: String,
    pub stat: BuffStat,
    pub category: BuffCategory,
    pub value: f64,
    pub uptime: f64,
    /// `value × uptime / 100`
    pub effective_value: f64,
    pub duration: f64,
    pub conditions: Vec<String>,
}

impl AppliedBuff {
    pub fn from_def(def: &TeamBuffDef) -> Self {
        AppliedBuff {
            source: def.source.clone(),
            stat: def.stat.clone(),
            category: def.stat.category(),
            value: def.value,
            uptime: def.uptime,
            effective_value: def.value * def.uptime / 100.0,
            duration: def.duration,
            conditions: def.conditions.clone(),
        }
    }

    /// Resonance buffs are always on
    pub fn from_resonance(def: &ResonanceDef) -> Self {
        AppliedBuff {
            source: format!("{} resonance", def.element),
            stat: def.stat.clone(),
            category: def.stat.category(),
            value: def.value,
            uptime: 100.0,
            effective_value: def.value,
            duration: 0.0,
            conditions: Vec::new(),
        }
    }
}
