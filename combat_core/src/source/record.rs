//! Raw build records handed over by the data-ingestion layer

use crate::types::{AbilityType, WeaponType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One stat as the provider names it ("FIGHT_PROP_CRITICAL", "ATK%", ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    pub stat: String,
    pub value: f64,
}

impl StatLine {
    pub fn new(stat: impl Into<String>, value: f64) -> Self {
        StatLine {
            stat: stat.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactSlot {
    Flower,
    Plume,
    Sands,
    Goblet,
    Circlet,
}

/// One equipped artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactPiece {
    pub set_name: String,
    #[serde(default)]
    pub slot: Option<ArtifactSlot>,
    #[serde(default)]
    pub main_stat: Option<StatLine>,
    #[serde(default)]
    pub substats: Vec<StatLine>,
}

impl ArtifactPiece {
    /// A piece that only carries its set name
    pub fn of_set(set_name: impl Into<String>) -> Self {
        ArtifactPiece {
            set_name: set_name.into(),
            slot: None,
            main_stat: None,
            substats: Vec::new(),
        }
    }

    /// Main stat followed by substats
    pub fn stat_lines(&self) -> impl Iterator<Item = &StatLine> {
        self.main_stat.iter().chain(self.substats.iter())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub weapon_type: Option<WeaponType>,
    #[serde(default)]
    pub base_atk: f64,
    #[serde(default)]
    pub secondary: Option<StatLine>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalentLevels {
    #[serde(default = "default_talent_level")]
    pub normal_attack: u32,
    #[serde(default = "default_talent_level")]
    pub elemental_skill: u32,
    #[serde(default = "default_talent_level")]
    pub elemental_burst: u32,
}

impl Default for TalentLevels {
    fn default() -> Self {
        TalentLevels {
            normal_attack: 10,
            elemental_skill: 10,
            elemental_burst: 10,
        }
    }
}

fn default_talent_level() -> u32 {
    10
}

impl TalentLevels {
    /// Talent level governing an ability; attacks share the normal attack talent
    pub fn level_for(&self, ability: AbilityType) -> u32 {
        match ability {
            AbilityType::NormalAttack | AbilityType::ChargedAttack | AbilityType::PlungeAttack => {
                self.normal_attack
            }
            AbilityType::ElementalSkill => self.elemental_skill,
            AbilityType::ElementalBurst => self.elemental_burst,
        }
    }

    /// Fraction of the tabulated multiplier used at this talent level:
    /// `min(1, level / full_level)`
    pub fn scaling(&self, ability: AbilityType, full_level: u32) -> f64 {
        if full_level == 0 {
            return 1.0;
        }
        (self.level_for(ability) as f64 / full_level as f64).min(1.0)
    }
}

/// Raw character build record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildRecord {
    pub character: String,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub weapon: Option<WeaponRecord>,
    #[serde(default)]
    pub artifacts: Vec<ArtifactPiece>,
    #[serde(default)]
    pub talents: TalentLevels,
    /// Pre-aggregated totals from the provider (`total_atk`, `crit_rate`, ...)
    #[serde(default)]
    pub totals: BTreeMap<String, f64>,
}

fn default_level() -> u32 {
    90
}

impl BuildRecord {
    /// A level-90 record with no gear
    pub fn new(character: impl Into<String>) -> Self {
        BuildRecord {
            character: character.into(),
            level: 90,
            weapon: None,
            artifacts: Vec::new(),
            talents: TalentLevels::default(),
            totals: BTreeMap::new(),
        }
    }

    pub fn with_artifact(mut self, piece: ArtifactPiece) -> Self {
        self.artifacts.push(piece);
        self
    }

    pub fn with_weapon(mut self, weapon: WeaponRecord) -> Self {
        self.weapon = Some(weapon);
        self
    }

    pub fn with_total(mut self, stat: impl Into<String>, value: f64) -> Self {
        self.totals.insert(stat.into(), value);
        self
    }

    /// Whether the record carries any gear at all
    pub fn has_gear(&self) -> bool {
        !self.artifacts.is_empty() || self.weapon.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_talent_scaling() {
        let talents = TalentLevels {
            normal_attack: 6,
            elemental_skill: 10,
            elemental_burst: 13,
        };
        assert!((talents.scaling(AbilityType::ChargedAttack, 10) - 0.6).abs() < 1e-9);
        assert!((talents.scaling(AbilityType::ElementalSkill, 10) - 1.0).abs() < 1e-9);
        // Levels above the full level never exceed the tabulated multiplier
        assert!((talents.scaling(AbilityType::ElementalBurst, 10) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_build_record_json_defaults() {
        let record: BuildRecord = serde_json::from_str(r#"{"character": "Hu Tao"}"#).unwrap();
        assert_eq!(record.level, 90);
        assert_eq!(record.talents, TalentLevels::default());
        assert!(!record.has_gear());
    }

    #[test]
    fn test_artifact_stat_lines_order() {
        let piece = ArtifactPiece {
            set_name: "Gladiator's Finale".to_string(),
            slot: Some(ArtifactSlot::Flower),
            main_stat: Some(StatLine::new("hp_flat", 4780.0)),
            substats: vec![StatLine::new("crit_rate", 3.9)],
        };
        let stats: Vec<_> = piece.stat_lines().map(|l| l.stat.as_str()).collect();
        assert_eq!(stats, vec!["hp_flat", "crit_rate"]);
    }
}
