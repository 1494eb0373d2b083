//! StatAggregator - Raw build record → CharacterStats
//!
//! Pure transform. Unknown characters fall back to the generic archetype,
//! unknown stat names are skipped, and a build without any gear gets the
//! typical-endgame fallback build. Every substitution is recorded as a
//! `Fallback` on the result instead of failing.

use crate::config::{CharacterEntry, EngineConstants, ReferenceTables};
use crate::source::{
    BaseStatsSource, BuildRecord, GearSource, StatSource, TalentLevels, WeaponSource,
};
use crate::stat_block::{CharacterStats, StatKind, StatValue};
use crate::types::{Element, Fallback, WeaponType};
use tracing::{debug, warn};

/// Output of the StatAggregator
#[derive(Debug, Clone)]
pub struct AggregatedBuild {
    pub stats: CharacterStats,
    /// Table entry used for the character (the archetype when unknown)
    pub entry: CharacterEntry,
    pub weapon_type: Option<WeaponType>,
    pub talents: TalentLevels,
    /// The record had no gear and the fallback build was used
    pub used_fallback_build: bool,
    /// Flat stats back-solved from provider totals
    pub reconciled: Vec<StatKind>,
    pub fallbacks: Vec<Fallback>,
}

/// Aggregate a raw build record into normalized stats
pub fn aggregate_build(
    record: &BuildRecord,
    tables: &ReferenceTables,
    constants: &EngineConstants,
) -> AggregatedBuild {
    let mut fallbacks = Vec::new();

    let entry = match tables.character(&record.character) {
        Some(entry) => entry.clone(),
        None => {
            warn!(character = %record.character, "unknown character, using generic archetype");
            fallbacks.push(Fallback::UnknownCharacter(record.character.clone()));
            tables.archetype().clone()
        }
    };
    let name = if fallbacks.is_empty() {
        entry.name.clone()
    } else {
        record.character.clone()
    };

    let build = &constants.build;
    let mut sources: Vec<Box<dyn StatSource>> = vec![Box::new(BaseStatsSource::new(
        tables.base_stats_for(&entry).clone(),
        build.base_crit_rate,
        build.base_crit_dmg,
        build.base_energy_recharge,
    ))];

    if let Some(weapon) = &record.weapon {
        let secondary = weapon.secondary.as_ref().and_then(|line| {
            let kind = StatKind::from_name(&line.stat);
            if kind.is_none() {
                warn!(stat = %line.stat, "unknown weapon stat, ignored");
                fallbacks.push(Fallback::UnknownStat(line.stat.clone()));
            }
            kind.map(|k| (k, line.value))
        });
        let id = weapon.name.clone().unwrap_or_else(|| "weapon".to_string());
        sources.push(Box::new(WeaponSource::new(id, weapon.base_atk, secondary)));
    }

    let used_fallback_build = !record.has_gear();
    if used_fallback_build {
        debug!(character = %name, "build has no gear, using fallback build");
        sources.push(Box::new(GearSource {
            id: "fallback_build".to_string(),
            stats: tables
                .fallback_build()
                .iter()
                .map(|(&k, &v)| (goblet_stat(k, entry.element), v))
                .collect(),
        }));
    } else {
        for piece in &record.artifacts {
            let (source, unknown) = GearSource::from_piece(piece);
            for stat in unknown {
                warn!(stat = %stat, set = %piece.set_name, "unknown artifact stat, ignored");
                fallbacks.push(Fallback::UnknownStat(stat));
            }
            sources.push(Box::new(source));
        }
    }

    let mut stats = CharacterStats::from_sources(name, record.level, entry.element, &sources);

    // Provider totals override summed values; total ATK/HP/DEF are reconciled last
    let mut totals = Vec::new();
    for (key, &value) in &record.totals {
        let normalized = key.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "total_atk" | "atk_total" => totals.push((StatKind::AtkFlat, value)),
            "total_hp" | "hp_total" => totals.push((StatKind::HpFlat, value)),
            "total_def" | "def_total" => totals.push((StatKind::DefFlat, value)),
            _ => match StatKind::from_name(key) {
                Some(kind) => override_stat(&mut stats, kind, value),
                None => {
                    warn!(stat = %key, "unknown provider total, ignored");
                    fallbacks.push(Fallback::UnknownStat(key.clone()));
                }
            },
        }
    }

    let mut reconciled = Vec::new();
    for (kind, total) in totals {
        let stat = match kind {
            StatKind::AtkFlat => &mut stats.atk,
            StatKind::HpFlat => &mut stats.hp,
            _ => &mut stats.def,
        };
        if reconcile(stat, total, build.atk_reconcile_tolerance) {
            debug!(stat = %kind, total, flat = stat.flat, "back-solved flat stat from provider total");
            reconciled.push(kind);
        }
    }

    stats.sanitize();
    debug!(
        character = %stats.name,
        total_atk = stats.total_atk(),
        crit_rate = stats.crit_rate,
        crit_dmg = stats.crit_dmg,
        "build aggregated"
    );

    AggregatedBuild {
        stats,
        weapon_type: record
            .weapon
            .as_ref()
            .and_then(|w| w.weapon_type)
            .or(entry.weapon),
        entry,
        talents: record.talents,
        used_fallback_build,
        reconciled,
        fallbacks,
    }
}

/// Back-solve flat when the computed total disagrees with `total` by more
/// than `tolerance`. Returns whether the flat value changed.
fn reconcile(stat: &mut StatValue, total: f64, tolerance: f64) -> bool {
    if (stat.compute() - total).abs() > tolerance {
        stat.reconcile_flat(total);
        true
    } else {
        false
    }
}

/// Replace a summed value with a pre-aggregated provider value
fn override_stat(stats: &mut CharacterStats, kind: StatKind, value: f64) {
    match kind {
        StatKind::BaseAtk => stats.atk.base = value,
        StatKind::BaseHp => stats.hp.base = value,
        StatKind::BaseDef => stats.def.base = value,
        StatKind::AtkFlat => stats.atk.flat = value,
        StatKind::AtkPercent => stats.atk.percent = value,
        StatKind::HpFlat => stats.hp.flat = value,
        StatKind::HpPercent => stats.hp.percent = value,
        StatKind::DefFlat => stats.def.flat = value,
        StatKind::DefPercent => stats.def.percent = value,
        StatKind::CritRate => stats.crit_rate = value,
        StatKind::CritDmg => stats.crit_dmg = value,
        StatKind::ElementalMastery => stats.elemental_mastery = value,
        StatKind::EnergyRecharge => stats.energy_recharge = value,
        StatKind::PhysicalDmgBonus => stats.physical_dmg_bonus = value,
        StatKind::ElementalDmgBonus => stats.elemental_dmg_bonus = value,
        StatKind::ElementDmgBonus(element) => {
            if element == stats.element {
                stats.elemental_dmg_bonus = value;
            }
        }
        StatKind::AbilityDmgBonus(ability) => {
            stats.ability_dmg_bonus.insert(ability, value);
        }
        StatKind::NormalChargedDmgBonus | StatKind::SkillBurstDmgBonus => {
            debug!(stat = %kind, "combined ability bonus totals are not overridable, ignored");
        }
        StatKind::DamageBonus => stats.damage_bonus = value,
        StatKind::AdditiveDmg => stats.additive_dmg = value,
        StatKind::ReactionBonus(reaction) => {
            stats.reaction_bonus.insert(reaction, value);
        }
        StatKind::HealingBonus => stats.healing_bonus = value,
        StatKind::ShieldStrength => stats.shield_strength = value,
        StatKind::ElementRes(element) => {
            stats.element_res.insert(element, value);
        }
    }
}

/// The fallback goblet matches the character: physical characters get the
/// elemental bonus as physical DMG bonus
fn goblet_stat(kind: StatKind, element: Element) -> StatKind {
    match (kind, element) {
        (StatKind::ElementalDmgBonus, Element::Physical) => StatKind::PhysicalDmgBonus,
        _ => kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{ArtifactPiece, StatLine, WeaponRecord};
    use crate::types::Element;

    fn tables() -> &'static ReferenceTables {
        ReferenceTables::builtin()
    }

    #[test]
    fn test_known_character_with_gear() {
        let record = BuildRecord::new("Hu Tao")
            .with_weapon(WeaponRecord {
                name: Some("Staff of Homa".to_string()),
                weapon_type: Some(WeaponType::Polearm),
                base_atk: 608.0,
                secondary: Some(StatLine::new("CRIT DMG", 66.2)),
            })
            .with_artifact(ArtifactPiece {
                set_name: "Crimson Witch of Flames".to_string(),
                slot: None,
                main_stat: Some(StatLine::new("FIGHT_PROP_ATTACK", 311.0)),
                substats: vec![StatLine::new("crit_rate", 10.0)],
            });
        let build = aggregate_build(&record, tables(), &EngineConstants::default());

        assert!(build.fallbacks.is_empty());
        assert!(!build.used_fallback_build);
        assert_eq!(build.stats.element, Element::Pyro);
        // 715 character + 608 weapon base, 311 flat
        assert!((build.stats.atk.base - 1323.0).abs() < 1e-9);
        assert!((build.stats.atk.flat - 311.0).abs() < 1e-9);
        assert!((build.stats.crit_rate - 15.0).abs() < 1e-9);
        // 50 base + 38.4 ascension + 66.2 weapon
        assert!((build.stats.crit_dmg - 154.6).abs() < 1e-9);
        assert_eq!(build.weapon_type, Some(WeaponType::Polearm));
    }

    #[test]
    fn test_unknown_character_falls_back() {
        let record = BuildRecord::new("Mystery Person");
        let build = aggregate_build(&record, tables(), &EngineConstants::default());
        assert_eq!(
            build.fallbacks,
            vec![Fallback::UnknownCharacter("Mystery Person".to_string())]
        );
        assert_eq!(build.stats.element, Element::Physical);
        assert_eq!(build.stats.name, "Mystery Person");
        assert!(build.used_fallback_build);
    }

    #[test]
    fn test_archetype_fallback_goblet_is_physical() {
        let build = aggregate_build(&BuildRecord::new("Mystery Person"), tables(), &EngineConstants::default());
        assert!((build.stats.physical_dmg_bonus - 46.6).abs() < 1e-9);
        assert!(build.stats.elemental_dmg_bonus.abs() < 1e-9);
        assert!((build.stats.type_dmg_bonus(Element::Physical) - 46.6).abs() < 1e-9);
    }

    #[test]
    fn test_empty_build_uses_fallback_gear() {
        let build = aggregate_build(&BuildRecord::new("Ganyu"), tables(), &EngineConstants::default());
        assert!(build.used_fallback_build);
        // 5 base + 31.1 fallback
        assert!((build.stats.crit_rate - 36.1).abs() < 1e-9);
        assert!((build.stats.atk.flat - 311.0).abs() < 1e-9);
        assert!(build.stats.elemental_dmg_bonus >= 46.6);
    }

    #[test]
    fn test_unknown_stat_recorded() {
        let record = BuildRecord::new("Ganyu").with_artifact(ArtifactPiece {
            set_name: "Blizzard Strayer".to_string(),
            slot: None,
            main_stat: Some(StatLine::new("luck", 99.0)),
            substats: Vec::new(),
        });
        let build = aggregate_build(&record, tables(), &EngineConstants::default());
        assert_eq!(build.fallbacks, vec![Fallback::UnknownStat("luck".to_string())]);
    }

    #[test]
    fn test_total_atk_reconciles_flat() {
        let record = BuildRecord::new("Hu Tao")
            .with_artifact(ArtifactPiece::of_set("Crimson Witch of Flames"))
            .with_total("atk_percent", 50.0)
            .with_total("total_atk", 2000.0);
        let build = aggregate_build(&record, tables(), &EngineConstants::default());

        assert_eq!(build.reconciled, vec![StatKind::AtkFlat]);
        assert!((build.stats.total_atk() - 2000.0).abs() < 1e-6);
        assert!((build.stats.atk.flat - (2000.0 / 1.5 - 715.0)).abs() < 1e-6);
    }

    #[test]
    fn test_total_within_tolerance_is_kept() {
        let record = BuildRecord::new("Hu Tao")
            .with_artifact(ArtifactPiece::of_set("Crimson Witch of Flames"))
            .with_total("total_atk", 730.0);
        let build = aggregate_build(&record, tables(), &EngineConstants::default());
        assert!(build.reconciled.is_empty());
        assert!((build.stats.total_atk() - 715.0).abs() < 1e-9);
    }

    #[test]
    fn test_provider_totals_override() {
        let record = BuildRecord::new("Hu Tao")
            .with_artifact(ArtifactPiece::of_set("Crimson Witch of Flames"))
            .with_total("crit_rate", 74.2)
            .with_total("FIGHT_PROP_FIRE_ADD_HURT", 61.6);
        let build = aggregate_build(&record, tables(), &EngineConstants::default());
        assert!((build.stats.crit_rate - 74.2).abs() < 1e-9);
        assert!((build.stats.elemental_dmg_bonus - 61.6).abs() < 1e-9);
    }
}
