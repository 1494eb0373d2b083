//! TeamBuffComposer - Teammate buffs and resonance → expected stat deltas
//!
//! Every buff is weighted by its uptime before it is accumulated. This is an
//! expected-value approximation over a rotation, not a timeline model.

use crate::config::{EngineConstants, ReferenceTables};
use crate::source::{ModifierKind, ModifierSource};
use crate::stat_block::StatKind;
use crate::team::synergy::{rotation_order, synergy_score, RotationMember};
use crate::team::{
    AppliedBuff, BuffCategory, BuffStat, ElementalCoverage, RotationStep, ShredTarget,
};
use crate::types::{normalize_name, Element, Fallback};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// One resolved roster member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Canonical table name, or the given name when unknown
    pub name: String,
    /// `None` for characters missing from the tables
    pub element: Option<Element>,
    pub is_main: bool,
}

/// An elemental resonance active for the roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveResonance {
    pub element: Element,
    pub members: usize,
    pub description: String,
}

/// The headline multipliers a team grants the main character
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamMultipliers {
    pub atk_percent: f64,
    pub atk_flat: f64,
    /// Bonuses for the main character's element plus generic elemental bonuses
    pub elemental_dmg_bonus: f64,
    pub crit_rate: f64,
    pub crit_dmg: f64,
    pub elemental_mastery: f64,
    pub damage_bonus: f64,
}

/// Output of the TeamBuffComposer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamBuffAnalysis {
    pub roster: Vec<TeamMember>,
    pub main_character: String,
    pub main_element: Element,
    pub total_buffs: usize,
    pub categorized_buffs: BTreeMap<BuffCategory, Vec<AppliedBuff>>,
    pub resonances: Vec<ActiveResonance>,
    pub multipliers: TeamMultipliers,
    /// Uptime-weighted deltas applied to the buffed stats variant
    pub deltas: BTreeMap<StatKind, f64>,
    /// Resistance reduction against the main character's element
    pub res_reduction: f64,
    pub res_reduction_by_element: BTreeMap<Element, f64>,
    pub synergy_score: f64,
    pub coverage: ElementalCoverage,
    pub rotation: Vec<RotationStep>,
    pub notes: Vec<String>,
    pub fallbacks: Vec<Fallback>,
}

impl TeamBuffAnalysis {
    /// Every applied buff in category order
    pub fn buffs(&self) -> impl Iterator<Item = &AppliedBuff> {
        self.categorized_buffs.values().flatten()
    }

    /// The deltas as a stat source for the buffed variant
    pub fn to_modifier_source(&self) -> ModifierSource {
        ModifierSource::from_map("team_buffs", ModifierKind::TeamBuff, &self.deltas)
    }
}

/// Compose team buffs for a roster around its main character
pub fn compose_team_buffs(
    roster: &[String],
    main_character: &str,
    tables: &ReferenceTables,
    constants: &EngineConstants,
) -> TeamBuffAnalysis {
    let mut notes = Vec::new();
    let mut fallbacks = Vec::new();

    let members = resolve_roster(
        roster,
        main_character,
        tables,
        constants.team.max_roster,
        &mut notes,
        &mut fallbacks,
    );
    let main_name = members
        .iter()
        .find(|m| m.is_main)
        .map(|m| m.name.clone())
        .unwrap_or_else(|| main_character.to_string());
    let main_element = tables
        .element_of(main_character)
        .unwrap_or(tables.archetype().element);

    // Teammate buffs, roster order
    let mut buffs: Vec<AppliedBuff> = Vec::new();
    for member in members.iter().filter(|m| !m.is_main) {
        let before = buffs.len();
        buffs.extend(tables.team_buffs_for(&member.name).map(AppliedBuff::from_def));
        debug!(member = %member.name, buffs = buffs.len() - before, "teammate buffs");
    }

    // Resonance: one instance per element shared by two or more members
    let mut resonances = Vec::new();
    for element in Element::ELEMENTAL {
        let count = members.iter().filter(|m| m.element == Some(element)).count();
        if count < 2 {
            continue;
        }
        if let Some(def) = tables.resonance(element) {
            buffs.push(AppliedBuff::from_resonance(def));
            resonances.push(ActiveResonance {
                element,
                members: count,
                description: def.description.clone(),
            });
        }
    }

    let mut deltas: BTreeMap<StatKind, f64> = BTreeMap::new();
    let mut multipliers = TeamMultipliers::default();
    for buff in &buffs {
        let BuffStat::Stat(kind) = buff.stat else {
            continue;
        };
        let value = buff.effective_value;
        *deltas.entry(kind).or_insert(0.0) += value;
        match kind {
            StatKind::AtkPercent => multipliers.atk_percent += value,
            StatKind::AtkFlat => multipliers.atk_flat += value,
            StatKind::ElementalDmgBonus => multipliers.elemental_dmg_bonus += value,
            StatKind::ElementDmgBonus(element) if element == main_element => {
                multipliers.elemental_dmg_bonus += value
            }
            StatKind::CritRate => multipliers.crit_rate += value,
            StatKind::CritDmg => multipliers.crit_dmg += value,
            StatKind::ElementalMastery => multipliers.elemental_mastery += value,
            StatKind::DamageBonus | StatKind::AbilityDmgBonus(_) => {
                multipliers.damage_bonus += value
            }
            _ => {}
        }
    }

    let res_reduction_by_element = resistance_reduction(&buffs);
    let res_reduction = res_reduction_by_element
        .get(&main_element)
        .copied()
        .unwrap_or(0.0);

    let coverage = ElementalCoverage::from_elements(members.iter().filter_map(|m| m.element));
    let score = synergy_score(coverage.element_count, &buffs);

    let rotation_members: Vec<RotationMember<'_>> = members
        .iter()
        .map(|m| RotationMember {
            name: &m.name,
            element: m.element,
            is_main: m.is_main,
            buffs_attack: !m.is_main
                && buffs
                    .iter()
                    .any(|b| b.source == m.name && b.category == BuffCategory::Attack),
        })
        .collect();
    let rotation = rotation_order(&rotation_members);

    let total_buffs = buffs.len();
    let mut categorized_buffs: BTreeMap<BuffCategory, Vec<AppliedBuff>> = BTreeMap::new();
    for buff in buffs {
        categorized_buffs.entry(buff.category).or_default().push(buff);
    }

    debug!(
        main = %main_name,
        buffs = total_buffs,
        resonances = resonances.len(),
        synergy = score,
        "team buffs composed"
    );

    TeamBuffAnalysis {
        roster: members,
        main_character: main_name,
        main_element,
        total_buffs,
        categorized_buffs,
        resonances,
        multipliers,
        deltas,
        res_reduction,
        res_reduction_by_element,
        synergy_score: score,
        coverage,
        rotation,
        notes,
        fallbacks,
    }
}

/// Normalize a roster: canonical names, no duplicates, main character
/// present, at most `max_roster` members with the main character kept.
fn resolve_roster(
    roster: &[String],
    main_character: &str,
    tables: &ReferenceTables,
    max_roster: usize,
    notes: &mut Vec<String>,
    fallbacks: &mut Vec<Fallback>,
) -> Vec<TeamMember> {
    let canonical = |name: &str| -> String {
        tables
            .character(name)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| name.trim().to_string())
    };
    let main_key = normalize_name(&canonical(main_character));

    let mut names: Vec<String> = Vec::new();
    for name in roster {
        let name = canonical(name);
        if names.iter().any(|n| normalize_name(n) == normalize_name(&name)) {
            notes.push(format!("{} listed twice, duplicate ignored", name));
            continue;
        }
        names.push(name);
    }

    if !names.iter().any(|n| normalize_name(n) == main_key) {
        notes.push(format!(
            "{} was not in the roster and was added as main character",
            main_character
        ));
        names.insert(0, canonical(main_character));
    }

    while names.len() > max_roster.max(1) {
        let Some(idx) = names.iter().rposition(|n| normalize_name(n) != main_key) else {
            break;
        };
        let dropped = names.remove(idx);
        notes.push(format!("roster exceeds {} members, {} dropped", max_roster, dropped));
    }

    names
        .into_iter()
        .map(|name| {
            let element = tables.element_of(&name);
            if element.is_none() {
                warn!(character = %name, "unknown team member, no buffs or element");
                fallbacks.push(Fallback::UnknownCharacter(name.clone()));
            }
            TeamMember {
                is_main: normalize_name(&name) == main_key,
                name,
                element,
            }
        })
        .collect()
}

/// Per-element resistance reduction. Shreds of the same kind do not stack
/// (the strongest applies), different kinds add.
fn resistance_reduction(buffs: &[AppliedBuff]) -> BTreeMap<Element, f64> {
    let mut strongest: BTreeMap<ShredTarget, f64> = BTreeMap::new();
    for buff in buffs {
        if let BuffStat::ResShred(target) = buff.stat {
            let entry = strongest.entry(target).or_insert(0.0);
            *entry = entry.max(buff.effective_value);
        }
    }

    let all_elements = Element::ELEMENTAL
        .into_iter()
        .chain(std::iter::once(Element::Physical));
    let mut by_element = BTreeMap::new();
    for element in all_elements {
        let total: f64 = strongest
            .iter()
            .filter(|(target, _)| target.applies_to(element))
            .map(|(_, value)| value)
            .sum();
        if total > 0.0 {
            by_element.insert(element, total);
        }
    }
    by_element
}
