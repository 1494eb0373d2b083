//! Defense - Level-based damage reduction

use crate::config::DefenseConstants;

/// Defense multiplier for an attacker hitting an enemy
///
/// `(char_lvl × 5 + 500) / ((char_lvl × 5 + 500) + (enemy_lvl × 5 + 500) × (1 − def_reduction / 100))`
///
/// # Arguments
/// * `character_level` - Attacker level
/// * `enemy_level` - Defender level
/// * `def_reduction` - Defense reduction in percent; clamped to at most 100
///
/// # Returns
/// Multiplier in (0, 1]; exactly 0.5 at equal levels without reduction
pub fn defense_multiplier(
    character_level: u32,
    enemy_level: u32,
    def_reduction: f64,
    constants: &DefenseConstants,
) -> f64 {
    let attacker = f64::from(character_level) * constants.level_factor + constants.level_offset;
    let defender = f64::from(enemy_level) * constants.level_factor + constants.level_offset;
    let reduction = if def_reduction.is_finite() {
        def_reduction.min(100.0)
    } else {
        0.0
    };
    let effective_defender = defender * (1.0 - reduction / 100.0);

    let denominator = attacker + effective_defender;
    if denominator <= 0.0 {
        return 1.0;
    }
    attacker / denominator
}
