//! DamageCalculator - The request-level pipeline
//!
//! build record → aggregated stats → set bonuses → Bond of Life → (team
//! buffs) → reactions → per-ability breakdowns. Nothing here returns an
//! error: unknown entities become fallbacks on the report and failing
//! abilities become zeroed outcomes next to their siblings.

use crate::artifact::{resolve_sets, SetAnalysis, SetContext};
use crate::bond::{analyze_bond, bond_state_for, BondAnalysis};
use crate::combat::{
    rate_build, AbilityOutcome, CharacterDamageReport, DamageIncrease, ReactionOutcomes,
    TeamDamageReport,
};
use crate::config::{EngineConstants, ReferenceTables};
use crate::damage::{calculate_hit, AbilityInstance, DamageBreakdown, DamageError};
use crate::defense::{EnemyProfile, EnemyStats};
use crate::reaction::{analyze_team_reactions, ReactionContext};
use crate::source::{aggregate_build, AggregatedBuild, BuildRecord, StatSource};
use crate::stat_block::CharacterStats;
use crate::team::compose_team_buffs;
use crate::types::{AbilityType, Fallback, ReactionType};
use tracing::{info, warn};

/// A build after aggregation, set resolution and Bond of Life
#[derive(Debug, Clone)]
pub struct PreparedCharacter {
    pub build: AggregatedBuild,
    pub sets: SetAnalysis,
    pub bond: BondAnalysis,
    /// Final unbuffed stats
    pub stats: CharacterStats,
}

/// Runs damage calculations against a set of reference tables
#[derive(Debug, Clone)]
pub struct DamageCalculator<'a> {
    tables: &'a ReferenceTables,
    constants: EngineConstants,
}

impl DamageCalculator<'static> {
    /// Calculator over the built-in tables and default constants
    pub fn builtin() -> Self {
        DamageCalculator::new(ReferenceTables::builtin(), EngineConstants::default())
    }
}

impl<'a> DamageCalculator<'a> {
    pub fn new(tables: &'a ReferenceTables, constants: EngineConstants) -> Self {
        DamageCalculator { tables, constants }
    }

    pub fn tables(&self) -> &ReferenceTables {
        self.tables
    }

    pub fn constants(&self) -> &EngineConstants {
        &self.constants
    }

    /// Aggregate a build and apply its set bonuses and Bond of Life
    pub fn prepare(&self, record: &BuildRecord) -> PreparedCharacter {
        let build = aggregate_build(record, self.tables, &self.constants);
        let mut stats = build.stats.clone();

        let bond_state = bond_state_for(&build.entry, self.constants.bond.assumed_value, &self.constants);
        let context = SetContext {
            weapon_type: build.weapon_type,
            energy_recharge: stats.energy_recharge,
            element: stats.element,
            bond_active: bond_state.is_active(),
        };
        let sets = resolve_sets(&record.artifacts, &context, self.tables);
        let set_source: Box<dyn StatSource> = Box::new(sets.to_modifier_source());
        stats.apply_sources(&[set_source]);

        // Bond bonuses read the post-set HP
        let bond = analyze_bond(&build.entry, &stats, bond_state);
        let bond_source: Box<dyn StatSource> = Box::new(bond.to_modifier_source());
        stats.apply_sources(&[bond_source]);

        PreparedCharacter {
            build,
            sets,
            bond,
            stats,
        }
    }

    /// Damage for a single character, without team buffs
    ///
    /// `reactions` are caller-supplied reaction names; unknown names are
    /// reported as fallbacks and skipped.
    pub fn calculate_character(
        &self,
        record: &BuildRecord,
        enemy: &EnemyProfile,
        reactions: &[String],
    ) -> CharacterDamageReport {
        let prepared = self.prepare(record);
        let mut fallbacks = Vec::new();
        let contexts: Vec<ReactionContext> = reactions
            .iter()
            .filter_map(|name| {
                match ReactionContext::parse(name, prepared.stats.element, self.tables) {
                    Ok(ctx) => Some(ctx),
                    Err(fallback) => {
                        warn!(reaction = %name, "unknown reaction, skipped");
                        fallbacks.push(fallback);
                        None
                    }
                }
            })
            .collect();

        let enemy = self.enemy_for(enemy, &prepared);
        let mut report = self.report(&prepared, &prepared.stats, &enemy, &contexts);
        report.fallbacks.extend(fallbacks);

        info!(
            character = %report.character,
            abilities = report.abilities.len(),
            reactions = report.reactions.len(),
            "character damage calculated"
        );
        report
    }

    /// Damage for a main character inside a team: unbuffed and buffed
    /// variants, with reactions chosen from the team's elements
    pub fn calculate_team(
        &self,
        record: &BuildRecord,
        roster: &[String],
        enemy: &EnemyProfile,
    ) -> TeamDamageReport {
        let prepared = self.prepare(record);
        let team = compose_team_buffs(roster, &record.character, self.tables, &self.constants);
        let reactions = analyze_team_reactions(&team, self.tables);
        let contexts: Vec<ReactionContext> = reactions
            .recommended_reactions
            .iter()
            .map(|&r| ReactionContext::new(r, prepared.stats.element, self.tables))
            .collect();

        let base_enemy = self.enemy_for(enemy, &prepared);
        let base = self.report(&prepared, &prepared.stats, &base_enemy, &contexts);

        let mut buffed_stats = prepared.stats.clone();
        let team_source: Box<dyn StatSource> = Box::new(team.to_modifier_source());
        buffed_stats.apply_sources(&[team_source]);
        let buffed_enemy = base_enemy.with_res_reduction(&team.res_reduction_by_element);
        let buffed = self.report(&prepared, &buffed_stats, &buffed_enemy, &contexts);

        let damage_increase = damage_increase(&base, &buffed);

        let mut fallbacks = base.fallbacks.clone();
        for fallback in &team.fallbacks {
            if !fallbacks.contains(fallback) {
                fallbacks.push(fallback.clone());
            }
        }

        info!(
            character = %base.character,
            team = team.roster.len(),
            synergy = team.synergy_score,
            recommended = ?reactions.recommended_reactions,
            "team damage calculated"
        );

        TeamDamageReport {
            base,
            buffed,
            team,
            reactions,
            damage_increase,
            fallbacks,
        }
    }

    /// Every ability of a character, failures isolated per ability
    pub fn ability_outcomes(
        &self,
        prepared: &PreparedCharacter,
        stats: &CharacterStats,
        enemy: &EnemyStats,
        reaction: Option<&ReactionContext>,
    ) -> Vec<AbilityOutcome> {
        AbilityType::all()
            .iter()
            .map(|&ability| {
                match self.ability_hit(prepared, stats, enemy, ability, reaction) {
                    Ok(breakdown) => AbilityOutcome {
                        ability,
                        breakdown,
                        error: None,
                    },
                    Err(err) => {
                        warn!(character = %stats.name, ability = ?ability, error = %err, "ability failed");
                        AbilityOutcome {
                            ability,
                            breakdown: DamageBreakdown::zeroed(ability, stats.element),
                            error: Some(err.to_string()),
                        }
                    }
                }
            })
            .collect()
    }

    fn ability_hit(
        &self,
        prepared: &PreparedCharacter,
        stats: &CharacterStats,
        enemy: &EnemyStats,
        ability: AbilityType,
        reaction: Option<&ReactionContext>,
    ) -> Result<DamageBreakdown, DamageError> {
        let entry = &prepared.build.entry;
        let talent_scaling = prepared
            .build
            .talents
            .scaling(ability, self.constants.build.full_talent_level);
        let instance = AbilityInstance::resolve(
            &entry.name,
            ability,
            0,
            self.tables.talents_for(entry),
            talent_scaling,
            stats.element,
            entry.infusion,
        )?;
        calculate_hit(stats, &instance, enemy, reaction, self.tables, &self.constants)
    }

    fn enemy_for(&self, profile: &EnemyProfile, prepared: &PreparedCharacter) -> EnemyStats {
        EnemyStats::from_profile(profile, &self.constants).with_res_reduction(&prepared.sets.res_reduction)
    }

    fn report(
        &self,
        prepared: &PreparedCharacter,
        stats: &CharacterStats,
        enemy: &EnemyStats,
        contexts: &[ReactionContext],
    ) -> CharacterDamageReport {
        let abilities = self.ability_outcomes(prepared, stats, enemy, None);
        let reactions = contexts
            .iter()
            .map(|ctx| ReactionOutcomes {
                reaction: ctx.reaction,
                trigger: ctx.trigger,
                abilities: self.ability_outcomes(prepared, stats, enemy, Some(ctx)),
            })
            .collect();

        let summary = stats.summary();
        let build_quality = rate_build(&summary, prepared.sets.total_active_sets, prepared.bond.is_active());

        let mut fallbacks: Vec<Fallback> = prepared.build.fallbacks.clone();
        fallbacks.extend(prepared.sets.fallbacks.iter().cloned());

        CharacterDamageReport {
            character: stats.name.clone(),
            element: stats.element,
            level: stats.level,
            stats: summary,
            build_quality,
            used_fallback_build: prepared.build.used_fallback_build,
            abilities,
            reactions,
            sets: prepared.sets.clone(),
            bond: prepared.bond.clone(),
            enemy: enemy.clone(),
            fallbacks,
        }
    }
}

fn damage_increase(base: &CharacterDamageReport, buffed: &CharacterDamageReport) -> Vec<DamageIncrease> {
    let pairs = |reaction: Option<ReactionType>, base: &[AbilityOutcome], buffed: &[AbilityOutcome]| {
        base.iter()
            .zip(buffed)
            .map(|(b, f)| DamageIncrease::new(b.ability, reaction, b.average(), f.average()))
            .collect::<Vec<_>>()
    };

    let mut increases = pairs(None, &base.abilities, &buffed.abilities);
    for (b, f) in base.reactions.iter().zip(&buffed.reactions) {
        increases.extend(pairs(Some(b.reaction), &b.abilities, &f.abilities));
    }
    increases
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ArtifactPiece;
    use crate::types::Element;

    fn record(name: &str) -> BuildRecord {
        BuildRecord::new(name)
    }

    #[test]
    fn test_every_ability_reported() {
        let calc = DamageCalculator::builtin();
        let report = calc.calculate_character(&record("Hu Tao"), &EnemyProfile::default(), &[]);
        assert_eq!(report.abilities.len(), AbilityType::all().len());
        assert!(report.abilities.iter().all(AbilityOutcome::is_ok));
        assert!(report.used_fallback_build);
        let na = report.ability(AbilityType::NormalAttack).unwrap();
        assert_eq!(na.breakdown.element, Element::Physical);
        let skill = report.ability(AbilityType::ElementalSkill).unwrap();
        assert_eq!(skill.breakdown.element, Element::Pyro);
        assert!(skill.average() > 0.0);
    }

    #[test]
    fn test_unknown_reaction_reported() {
        let calc = DamageCalculator::builtin();
        let reactions = vec!["vaporize".to_string(), "mega-melt".to_string()];
        let report = calc.calculate_character(&record("Hu Tao"), &EnemyProfile::default(), &reactions);
        assert_eq!(report.reactions.len(), 1);
        assert!(report
            .fallbacks
            .contains(&Fallback::UnknownReaction("mega-melt".to_string())));
        let vape = report.reaction(ReactionType::Vaporize).unwrap();
        let skill = vape
            .abilities
            .iter()
            .find(|o| o.ability == AbilityType::ElementalSkill)
            .unwrap();
        assert!(skill.breakdown.reaction_applied());
        assert!((skill.breakdown.base_dmg_multiplier - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_character_uses_archetype() {
        let calc = DamageCalculator::builtin();
        let report = calc.calculate_character(&record("Nobody"), &EnemyProfile::default(), &[]);
        assert!(report
            .fallbacks
            .contains(&Fallback::UnknownCharacter("Nobody".to_string())));
        assert!(report.abilities.iter().all(|o| o.average() > 0.0));
        // Physical archetype: the fallback goblet feeds every hit
        for outcome in &report.abilities {
            assert_eq!(outcome.breakdown.element, Element::Physical);
            assert!((outcome.breakdown.dmg_bonus - 46.6).abs() < 1e-9);
        }
    }

    #[test]
    fn test_failing_ability_is_isolated() {
        let calc = DamageCalculator::builtin();
        let mut prepared = calc.prepare(&record("Hu Tao"));
        if let Some(talents) = prepared.build.entry.talents.as_mut() {
            talents.normal_attack.clear();
        }
        let enemy = EnemyStats::standard(calc.constants());
        let outcomes = calc.ability_outcomes(&prepared, &prepared.stats, &enemy, None);
        assert_eq!(outcomes.len(), AbilityType::all().len());
        let na = &outcomes[0];
        assert_eq!(na.ability, AbilityType::NormalAttack);
        assert!(na.error.is_some());
        assert!(na.average().abs() < f64::EPSILON);
        assert!(outcomes[1..].iter().all(|o| o.is_ok() && o.average() > 0.0));
    }

    #[test]
    fn test_team_buffs_increase_damage() {
        let calc = DamageCalculator::builtin();
        let roster: Vec<String> = ["Hu Tao", "Xingqiu", "Bennett", "Zhongli"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let report = calc.calculate_team(&record("Hu Tao"), &roster, &EnemyProfile::default());
        assert_eq!(report.reactions.recommended_reactions[0], ReactionType::Vaporize);
        let skill_increase = report
            .damage_increase
            .iter()
            .find(|i| i.ability == AbilityType::ElementalSkill && i.reaction.is_none())
            .unwrap();
        assert!(skill_increase.increase_percent > 0.0);
        assert!(report.buffed.stats.total_atk > report.base.stats.total_atk);
        // Zhongli's shred lowers pyro resistance
        assert!(report.buffed.enemy.effective_resistance(Element::Pyro) < report.base.enemy.effective_resistance(Element::Pyro));
    }

    #[test]
    fn test_set_bonus_applied_before_damage() {
        let calc = DamageCalculator::builtin();
        let mut rec = record("Hu Tao");
        for _ in 0..4 {
            rec = rec.with_artifact(ArtifactPiece::of_set("Crimson Witch of Flames"));
        }
        let report = calc.calculate_character(&rec, &EnemyProfile::default(), &[]);
        assert!(report.sets.has_bonus("Crimson Witch of Flames", 4));
        assert!(report.stats.elemental_dmg_bonus > 0.0);
    }

    #[test]
    fn test_repeated_calculation_is_identical() {
        let calc = DamageCalculator::builtin();
        let roster: Vec<String> = ["Raiden Shogun", "Xiangling", "Xingqiu", "Bennett"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let first = calc.calculate_team(&record("Raiden Shogun"), &roster, &EnemyProfile::default());
        let second = calc.calculate_team(&record("Raiden Shogun"), &roster, &EnemyProfile::default());
        assert_eq!(first, second);
    }
}
