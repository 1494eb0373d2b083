//! Damage calculation - turning an ability hit + stats into a DamageBreakdown

use crate::config::{EngineConstants, ReactionConstants, ReferenceTables};
use crate::damage::{AbilityInstance, DamageBreakdown, DamageError, ReactionApplication};
use crate::defense::EnemyStats;
use crate::reaction::ReactionContext;
use crate::stat_block::CharacterStats;
use crate::types::ReactionKind;
use tracing::debug;

/// Amplifying multiplier: `base × (1 + 2.78 × EM / (EM + 1400) + bonus / 100)`
pub fn amplifying_multiplier(
    base: f64,
    elemental_mastery: f64,
    reaction_bonus: f64,
    constants: &ReactionConstants,
) -> f64 {
    base * (1.0 + amplifying_em_bonus(elemental_mastery, constants) + reaction_bonus / 100.0)
}

pub fn amplifying_em_bonus(elemental_mastery: f64, constants: &ReactionConstants) -> f64 {
    em_curve(
        elemental_mastery,
        constants.amplifying_em_factor,
        constants.amplifying_em_offset,
    )
}

/// Transformative damage: `level_mult × reaction_mult × (1 + 16 × EM / (EM + 2000) + bonus / 100)`
pub fn transformative_damage(
    level_multiplier: f64,
    reaction_multiplier: f64,
    elemental_mastery: f64,
    reaction_bonus: f64,
    constants: &ReactionConstants,
) -> f64 {
    level_multiplier
        * reaction_multiplier
        * (1.0 + transformative_em_bonus(elemental_mastery, constants) + reaction_bonus / 100.0)
}

pub fn transformative_em_bonus(elemental_mastery: f64, constants: &ReactionConstants) -> f64 {
    em_curve(
        elemental_mastery,
        constants.transformative_em_factor,
        constants.transformative_em_offset,
    )
}

fn em_curve(elemental_mastery: f64, factor: f64, offset: f64) -> f64 {
    let em = elemental_mastery.max(0.0);
    let denominator = em + offset;
    if denominator <= 0.0 {
        return 0.0;
    }
    factor * em / denominator
}

/// Calculate the damage of one hit
///
/// A reaction in context only changes the hit when the hit's element is the
/// reaction's trigger; otherwise the breakdown records it as not applied.
pub fn calculate_hit(
    stats: &CharacterStats,
    instance: &AbilityInstance,
    enemy: &EnemyStats,
    reaction: Option<&ReactionContext>,
    tables: &ReferenceTables,
    constants: &EngineConstants,
) -> Result<DamageBreakdown, DamageError> {
    if stats.level == 0 {
        return Err(DamageError::InvalidLevel(stats.level));
    }

    // Step 1: Base damage from the scaling attribute
    let scaling_value = stats.scaling_value(instance.scaling);
    let base_dmg = scaling_value * instance.multiplier / 100.0;

    // Step 2: Reaction terms
    let mut base_dmg_multiplier = 1.0;
    let mut transformative = 0.0;
    let reaction = reaction.map(|ctx| {
        let applied = ctx.applies_to(instance.element);
        let reaction_bonus = stats.reaction_bonus_for(ctx.reaction);
        let mut application = ReactionApplication {
            reaction: ctx.reaction,
            kind: ctx.kind(),
            applied,
            base_multiplier: 0.0,
            em_bonus: 0.0,
            reaction_bonus,
            level_multiplier: 0.0,
            reaction_multiplier: 0.0,
            note: None,
        };
        if !applied {
            application.note = Some(format!(
                "{} hit cannot trigger {}",
                instance.element, ctx.reaction
            ));
            return application;
        }
        match ctx.kind() {
            ReactionKind::Amplifying => {
                let base = ctx.amplifying_base().unwrap_or(1.0);
                application.base_multiplier = base;
                application.em_bonus =
                    amplifying_em_bonus(stats.elemental_mastery, &constants.reaction);
                base_dmg_multiplier = amplifying_multiplier(
                    base,
                    stats.elemental_mastery,
                    reaction_bonus,
                    &constants.reaction,
                );
            }
            ReactionKind::Transformative => {
                application.level_multiplier = tables.level_multiplier(stats.level);
                application.reaction_multiplier = tables.transformative_multiplier(ctx.reaction);
                application.em_bonus =
                    transformative_em_bonus(stats.elemental_mastery, &constants.reaction);
                transformative = transformative_damage(
                    application.level_multiplier,
                    application.reaction_multiplier,
                    stats.elemental_mastery,
                    reaction_bonus,
                    &constants.reaction,
                );
            }
        }
        application
    });

    // Step 3: Additive flat damage relative to the scaling value
    let additive_base_dmg_bonus = if scaling_value > 0.0 {
        stats.additive_dmg / scaling_value
    } else {
        0.0
    };

    // Step 4: DMG bonus for the damage type of the hit
    let dmg_bonus = stats.type_dmg_bonus(instance.element)
        + stats.damage_bonus
        + stats.ability_bonus(instance.ability);

    // Step 5: Enemy mitigation
    let def_multiplier = enemy.defense_multiplier(stats.level, constants);
    let effective_resistance = enemy.effective_resistance(instance.element);
    let res_multiplier = enemy.resistance_multiplier(instance.element, constants);

    let non_crit = base_dmg
        * base_dmg_multiplier
        * (1.0 + additive_base_dmg_bonus)
        * (1.0 + dmg_bonus / 100.0)
        * def_multiplier
        * res_multiplier;

    // Step 6: Crit
    let effective_crit_rate = stats.effective_crit_rate() / 100.0;
    let crit_dmg = stats.crit_dmg;
    let crit = non_crit * (1.0 + crit_dmg / 100.0);
    let average = non_crit * (1.0 + effective_crit_rate * crit_dmg / 100.0);

    let breakdown = DamageBreakdown {
        ability: instance.ability,
        hit: instance.hit,
        element: instance.element,
        scaling_attribute: instance.scaling,
        scaling_value,
        talent_multiplier: instance.multiplier,
        base_dmg,
        base_dmg_multiplier,
        additive_base_dmg_bonus,
        dmg_bonus,
        def_multiplier,
        effective_resistance,
        res_multiplier,
        non_crit,
        crit,
        average,
        effective_crit_rate,
        crit_dmg,
        transformative_damage: transformative,
        total_average: average + transformative,
        reaction,
    };

    if let Some(term) = breakdown.first_non_finite() {
        return Err(DamageError::NonFiniteTerm { term });
    }

    debug!(
        character = %stats.name,
        ability = ?instance.ability,
        base_dmg,
        base_dmg_multiplier,
        dmg_bonus,
        def_multiplier,
        res_multiplier,
        average,
        transformative,
        "hit calculated"
    );

    Ok(breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AbilityType, Element, ReactionType, ScalingAttribute};
    use proptest::prelude::*;

    fn attacker(atk: f64, crit_rate: f64, crit_dmg: f64) -> CharacterStats {
        let mut stats = CharacterStats::new("test", 90, Element::Pyro);
        stats.atk.base = atk;
        stats.crit_rate = crit_rate;
        stats.crit_dmg = crit_dmg;
        stats
    }

    fn skill(multiplier: f64, element: Element) -> AbilityInstance {
        AbilityInstance::custom(AbilityType::ElementalSkill, multiplier, ScalingAttribute::Atk, element)
    }

    fn hit(stats: &CharacterStats, instance: &AbilityInstance, reaction: Option<&ReactionContext>) -> DamageBreakdown {
        let constants = EngineConstants::default();
        let enemy = EnemyStats::standard(&constants);
        calculate_hit(stats, instance, &enemy, reaction, ReferenceTables::builtin(), &constants).unwrap()
    }

    #[test]
    fn test_reference_scenario() {
        let stats = attacker(2000.0, 50.0, 100.0);
        let result = hit(&stats, &skill(200.0, Element::Pyro), None);
        assert!((result.base_dmg - 4000.0).abs() < 1e-9);
        assert!((result.def_multiplier - 0.5).abs() < f64::EPSILON);
        assert!((result.res_multiplier - 0.9).abs() < 1e-12);
        assert!((result.non_crit - 1800.0).abs() < 1e-9);
        assert!((result.crit - 3600.0).abs() < 1e-9);
        assert!((result.average - 2700.0).abs() < 1e-9);
        assert!((result.total_average - 2700.0).abs() < 1e-9);
        assert!(result.reaction.is_none());
    }

    #[test]
    fn test_crit_rate_capped() {
        let over = hit(&attacker(2000.0, 150.0, 100.0), &skill(200.0, Element::Pyro), None);
        let full = hit(&attacker(2000.0, 100.0, 100.0), &skill(200.0, Element::Pyro), None);
        assert!((over.effective_crit_rate - 1.0).abs() < f64::EPSILON);
        assert!((over.average - over.non_crit * 2.0).abs() < 1e-9);
        assert!((over.average - full.average).abs() < f64::EPSILON);
    }

    #[test]
    fn test_vaporize_hydro_trigger() {
        let mut stats = attacker(2000.0, 0.0, 0.0);
        stats.element = Element::Hydro;
        let ctx = ReactionContext::new(ReactionType::Vaporize, Element::Hydro, ReferenceTables::builtin());
        let result = hit(&stats, &skill(100.0, Element::Hydro), Some(&ctx));
        assert!((result.base_dmg_multiplier - 2.0).abs() < f64::EPSILON);
        assert!(result.reaction_applied());
        assert!(result.transformative_damage.abs() < f64::EPSILON);
    }

    #[test]
    fn test_amplifying_em_and_bonus() {
        let constants = ReactionConstants::default();
        // 2.78 × 700 / 2100 = 0.92667
        let mult = amplifying_multiplier(1.5, 700.0, 15.0, &constants);
        assert!((mult - 1.5 * (1.0 + 2.78 * 700.0 / 2100.0 + 0.15)).abs() < 1e-12);
    }

    #[test]
    fn test_physical_hit_ignores_reaction() {
        let stats = attacker(2000.0, 0.0, 0.0);
        let ctx = ReactionContext::new(ReactionType::Vaporize, Element::Pyro, ReferenceTables::builtin());
        let instance = AbilityInstance::custom(AbilityType::NormalAttack, 100.0, ScalingAttribute::Atk, Element::Physical);
        let result = hit(&stats, &instance, Some(&ctx));
        assert!(!result.reaction_applied());
        assert!((result.base_dmg_multiplier - 1.0).abs() < f64::EPSILON);
        assert!(result.reaction.and_then(|r| r.note).is_some());
    }

    #[test]
    fn test_overloaded_transformative() {
        let stats = attacker(2000.0, 0.0, 0.0);
        let ctx = ReactionContext::new(ReactionType::Overloaded, Element::Pyro, ReferenceTables::builtin());
        let result = hit(&stats, &skill(100.0, Element::Pyro), Some(&ctx));
        // level 90: 1446.85 × 2.0, EM 0
        assert!((result.transformative_damage - 2893.7).abs() < 1e-9);
        assert!((result.total_average - (result.average + 2893.7)).abs() < 1e-9);
        assert!((result.base_dmg_multiplier - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_transformative_em_curve() {
        let constants = ReactionConstants::default();
        // 16 × 2000 / 4000 = 8
        let dmg = transformative_damage(1000.0, 1.0, 2000.0, 0.0, &constants);
        assert!((dmg - 9000.0).abs() < 1e-9);
    }

    #[test]
    fn test_hp_scaling_and_dmg_bonus() {
        let mut stats = attacker(0.0, 0.0, 0.0);
        stats.hp.base = 30000.0;
        stats.elemental_dmg_bonus = 46.6;
        stats.physical_dmg_bonus = 100.0;
        let instance = AbilityInstance::custom(AbilityType::ElementalBurst, 10.0, ScalingAttribute::Hp, Element::Pyro);
        let result = hit(&stats, &instance, None);
        assert!((result.base_dmg - 3000.0).abs() < 1e-9);
        assert!((result.dmg_bonus - 46.6).abs() < 1e-9);
        assert!((result.non_crit - 3000.0 * 1.466 * 0.5 * 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_zero_scaling_value_guards_additive() {
        let mut stats = attacker(0.0, 0.0, 0.0);
        stats.additive_dmg = 500.0;
        let result = hit(&stats, &skill(200.0, Element::Pyro), None);
        assert!(result.additive_base_dmg_bonus.abs() < f64::EPSILON);
        assert!(result.average.abs() < f64::EPSILON);
    }

    #[test]
    fn test_additive_bonus() {
        let mut stats = attacker(2000.0, 0.0, 0.0);
        stats.additive_dmg = 1000.0;
        let result = hit(&stats, &skill(100.0, Element::Pyro), None);
        assert!((result.additive_base_dmg_bonus - 0.5).abs() < f64::EPSILON);
        assert!((result.non_crit - 2000.0 * 1.5 * 0.5 * 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_term_is_error() {
        let stats = attacker(f64::INFINITY, 0.0, 0.0);
        let constants = EngineConstants::default();
        let enemy = EnemyStats::standard(&constants);
        let err = calculate_hit(&stats, &skill(100.0, Element::Pyro), &enemy, None, ReferenceTables::builtin(), &constants)
            .unwrap_err();
        assert!(matches!(err, DamageError::NonFiniteTerm { .. }));
    }

    proptest! {
        #[test]
        fn prop_crit_rate_above_cap_matches_cap(rate in 100.0f64..1000.0, crit_dmg in 0.0f64..400.0) {
            let over = hit(&attacker(1500.0, rate, crit_dmg), &skill(150.0, Element::Pyro), None);
            let cap = hit(&attacker(1500.0, 100.0, crit_dmg), &skill(150.0, Element::Pyro), None);
            prop_assert!((over.average - cap.average).abs() < 1e-9);
            prop_assert!((over.average - over.crit).abs() < 1e-6);
        }
    }
}
