//! Engine constants configuration

use serde::{Deserialize, Serialize};

/// Tunable engine constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConstants {
    #[serde(default)]
    pub enemy: EnemyDefaults,
    #[serde(default)]
    pub defense: DefenseConstants,
    #[serde(default)]
    pub resistance: ResistanceConstants,
    #[serde(default)]
    pub reaction: ReactionConstants,
    #[serde(default)]
    pub build: BuildConstants,
    #[serde(default)]
    pub bond: BondConstants,
    #[serde(default)]
    pub team: TeamConstants,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyDefaults {
    /// Enemy level when the profile does not name one
    #[serde(default = "default_enemy_level")]
    pub level: u32,
    /// Resistance applied to every element and physical unless overridden
    #[serde(default = "default_enemy_resistance")]
    pub resistance: f64,
}

impl Default for EnemyDefaults {
    fn default() -> Self {
        EnemyDefaults {
            level: 90,
            resistance: 10.0,
        }
    }
}

fn default_enemy_level() -> u32 {
    90
}
fn default_enemy_resistance() -> f64 {
    10.0
}

/// Defense formula: `(lvl × factor + offset)` on both sides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefenseConstants {
    #[serde(default = "default_level_factor")]
    pub level_factor: f64,
    #[serde(default = "default_level_offset")]
    pub level_offset: f64,
}

impl Default for DefenseConstants {
    fn default() -> Self {
        DefenseConstants {
            level_factor: 5.0,
            level_offset: 500.0,
        }
    }
}

fn default_level_factor() -> f64 {
    5.0
}
fn default_level_offset() -> f64 {
    500.0
}

/// Three-branch resistance curve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResistanceConstants {
    /// Below this, resistance is negative and halved
    #[serde(default = "default_lower_threshold")]
    pub lower_threshold: f64,
    /// At or above this, the diminishing branch applies
    #[serde(default = "default_upper_threshold")]
    pub upper_threshold: f64,
    #[serde(default = "default_negative_divisor")]
    pub negative_divisor: f64,
    #[serde(default = "default_linear_divisor")]
    pub linear_divisor: f64,
    #[serde(default = "default_high_factor")]
    pub high_factor: f64,
}

impl Default for ResistanceConstants {
    fn default() -> Self {
        ResistanceConstants {
            lower_threshold: 0.0,
            upper_threshold: 75.0,
            negative_divisor: 200.0,
            linear_divisor: 100.0,
            high_factor: 4.0,
        }
    }
}

fn default_lower_threshold() -> f64 {
    0.0
}
fn default_upper_threshold() -> f64 {
    75.0
}
fn default_negative_divisor() -> f64 {
    200.0
}
fn default_linear_divisor() -> f64 {
    100.0
}
fn default_high_factor() -> f64 {
    4.0
}

/// Elemental mastery curves for reactions: `factor × EM / (EM + offset)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionConstants {
    #[serde(default = "default_amplifying_em_factor")]
    pub amplifying_em_factor: f64,
    #[serde(default = "default_amplifying_em_offset")]
    pub amplifying_em_offset: f64,
    #[serde(default = "default_transformative_em_factor")]
    pub transformative_em_factor: f64,
    #[serde(default = "default_transformative_em_offset")]
    pub transformative_em_offset: f64,
}

impl Default for ReactionConstants {
    fn default() -> Self {
        ReactionConstants {
            amplifying_em_factor: 2.78,
            amplifying_em_offset: 1400.0,
            transformative_em_factor: 16.0,
            transformative_em_offset: 2000.0,
        }
    }
}

fn default_amplifying_em_factor() -> f64 {
    2.78
}
fn default_amplifying_em_offset() -> f64 {
    1400.0
}
fn default_transformative_em_factor() -> f64 {
    16.0
}
fn default_transformative_em_offset() -> f64 {
    2000.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConstants {
    /// Disagreement (in ATK) between a supplied total and the computed total
    /// before flat ATK is back-solved
    #[serde(default = "default_atk_tolerance")]
    pub atk_reconcile_tolerance: f64,
    /// Talent level at which multipliers are used at full value
    #[serde(default = "default_full_talent_level")]
    pub full_talent_level: u32,
    #[serde(default = "default_base_crit_rate")]
    pub base_crit_rate: f64,
    #[serde(default = "default_base_crit_dmg")]
    pub base_crit_dmg: f64,
    #[serde(default = "default_base_energy_recharge")]
    pub base_energy_recharge: f64,
}

impl Default for BuildConstants {
    fn default() -> Self {
        BuildConstants {
            atk_reconcile_tolerance: 50.0,
            full_talent_level: 10,
            base_crit_rate: 5.0,
            base_crit_dmg: 50.0,
            base_energy_recharge: 100.0,
        }
    }
}

fn default_atk_tolerance() -> f64 {
    50.0
}
fn default_full_talent_level() -> u32 {
    10
}
fn default_base_crit_rate() -> f64 {
    5.0
}
fn default_base_crit_dmg() -> f64 {
    50.0
}
fn default_base_energy_recharge() -> f64 {
    100.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BondConstants {
    /// Bond of Life value (% of max HP) assumed when computing damage
    #[serde(default = "default_assumed_bond")]
    pub assumed_value: f64,
    /// Max Bond of Life for characters without their own cap
    #[serde(default = "default_max_bond")]
    pub default_max: f64,
}

impl Default for BondConstants {
    fn default() -> Self {
        BondConstants {
            assumed_value: 50.0,
            default_max: 200.0,
        }
    }
}

fn default_assumed_bond() -> f64 {
    50.0
}
fn default_max_bond() -> f64 {
    200.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamConstants {
    #[serde(default = "default_max_roster")]
    pub max_roster: usize,
}

impl Default for TeamConstants {
    fn default() -> Self {
        TeamConstants { max_roster: 4 }
    }
}

fn default_max_roster() -> usize {
    4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = EngineConstants::default();
        assert_eq!(constants.enemy.level, 90);
        assert!((constants.resistance.upper_threshold - 75.0).abs() < f64::EPSILON);
        assert!((constants.reaction.amplifying_em_factor - 2.78).abs() < f64::EPSILON);
        assert!((constants.bond.assumed_value - 50.0).abs() < f64::EPSILON);
        assert_eq!(constants.team.max_roster, 4);
    }

    #[test]
    fn test_parse_partial_constants() {
        let toml = r#"
[enemy]
level = 100

[resistance]
upper_threshold = 80
"#;

        let constants: EngineConstants = toml::from_str(toml).unwrap();
        assert_eq!(constants.enemy.level, 100);
        assert!((constants.enemy.resistance - 10.0).abs() < f64::EPSILON);
        assert!((constants.resistance.upper_threshold - 80.0).abs() < f64::EPSILON);
        assert!((constants.resistance.negative_divisor - 200.0).abs() < f64::EPSILON);
        assert!((constants.defense.level_offset - 500.0).abs() < f64::EPSILON);
    }
}
