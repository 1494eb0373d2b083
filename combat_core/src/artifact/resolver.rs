//! ArtifactSetResolver - Equipped pieces → active set bonuses and stat deltas
//!
//! Set names are matched case and whitespace insensitive. Conditional
//! effects assume their best-case trigger state: the result is "damage if
//! the condition holds", not a timed simulation. Sets without a table entry
//! contribute nothing.

use crate::artifact::{SetBonusDef, SetEffect};
use crate::config::ReferenceTables;
use crate::source::{ArtifactPiece, ModifierKind, ModifierSource};
use crate::stat_block::StatKind;
use crate::types::{normalize_name, Element, Fallback, WeaponType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Trigger state assumed for conditional effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerAssumption {
    #[default]
    BestCase,
}

/// Wearer context the conditional effects read
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetContext {
    pub weapon_type: Option<WeaponType>,
    /// Energy recharge before set bonuses, in percent
    pub energy_recharge: f64,
    pub element: Element,
    pub bond_active: bool,
}

/// Outcome of one conditional effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectOutcome {
    pub effect: SetEffect,
    pub applied: bool,
    pub deltas: BTreeMap<StatKind, f64>,
    #[serde(default)]
    pub res_reduction: BTreeMap<Element, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// An activated 2- or 4-piece bonus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveSetBonus {
    pub set: String,
    pub pieces: u32,
    pub description: String,
    pub direct: BTreeMap<StatKind, f64>,
    pub effects: Vec<EffectOutcome>,
}

/// Output of the ArtifactSetResolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetAnalysis {
    /// Equipped pieces per set, keyed by display name
    pub set_counts: BTreeMap<String, u32>,
    pub active_bonuses: Vec<ActiveSetBonus>,
    /// Combined direct and conditional deltas
    pub deltas: BTreeMap<StatKind, f64>,
    /// Enemy resistance reduction from set effects
    pub res_reduction: BTreeMap<Element, f64>,
    /// One line per applied delta, for display
    pub applied_effects: Vec<String>,
    pub total_active_sets: usize,
    pub assumption: TriggerAssumption,
    pub fallbacks: Vec<Fallback>,
}

impl SetAnalysis {
    /// Nothing equipped
    pub fn empty() -> Self {
        SetAnalysis {
            set_counts: BTreeMap::new(),
            active_bonuses: Vec::new(),
            deltas: BTreeMap::new(),
            res_reduction: BTreeMap::new(),
            applied_effects: Vec::new(),
            total_active_sets: 0,
            assumption: TriggerAssumption::BestCase,
            fallbacks: Vec::new(),
        }
    }

    pub fn has_bonus(&self, set: &str, pieces: u32) -> bool {
        let key = normalize_name(set);
        self.active_bonuses
            .iter()
            .any(|b| b.pieces == pieces && normalize_name(&b.set) == key)
    }

    /// The deltas as a stat source
    pub fn to_modifier_source(&self) -> ModifierSource {
        ModifierSource::from_map("artifact_sets", ModifierKind::ArtifactSet, &self.deltas)
    }
}

/// Count pieces per set name
pub fn count_sets(pieces: &[ArtifactPiece]) -> BTreeMap<String, u32> {
    let mut counts = BTreeMap::new();
    for piece in pieces {
        let key = normalize_name(&piece.set_name);
        if key.is_empty() || key == "unknown" {
            continue;
        }
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Resolve the active set bonuses for a list of equipped pieces
pub fn resolve_sets(
    pieces: &[ArtifactPiece],
    context: &SetContext,
    tables: &ReferenceTables,
) -> SetAnalysis {
    let mut analysis = SetAnalysis::empty();

    for (key, count) in count_sets(pieces) {
        let Some(display) = tables.set_display_name(&key) else {
            warn!(set = %key, "unknown artifact set, no bonus");
            analysis.fallbacks.push(Fallback::UnknownSet(key.clone()));
            analysis.set_counts.insert(key, count);
            continue;
        };
        analysis.set_counts.insert(display.to_string(), count);

        let mut bonuses: Vec<&SetBonusDef> =
            tables.set_bonuses(&key).filter(|b| count >= b.pieces).collect();
        bonuses.sort_by_key(|b| b.pieces);
        for bonus in bonuses {
            debug!(set = %bonus.set, pieces = bonus.pieces, "set bonus active");
            analysis.active_bonuses.push(ActiveSetBonus {
                set: bonus.set.clone(),
                pieces: bonus.pieces,
                description: bonus.description.clone(),
                direct: bonus.stats.clone(),
                effects: Vec::new(),
            });
        }
    }

    // Direct stats first: conditional effects read the stats they raise
    for bonus in &analysis.active_bonuses {
        for (&stat, &value) in &bonus.direct {
            *analysis.deltas.entry(stat).or_insert(0.0) += value;
            analysis
                .applied_effects
                .push(format!("{} {}-piece: +{} {}", bonus.set, bonus.pieces, value, stat));
        }
    }
    let energy_recharge = context.energy_recharge
        + analysis
            .deltas
            .get(&StatKind::EnergyRecharge)
            .copied()
            .unwrap_or(0.0);

    let mut outcomes = Vec::new();
    for (idx, bonus) in analysis.active_bonuses.iter().enumerate() {
        let Some(def) = tables
            .set_bonuses(&bonus.set)
            .find(|b| b.pieces == bonus.pieces)
        else {
            continue;
        };
        for effect in &def.effects {
            outcomes.push((idx, evaluate_effect(effect, context, energy_recharge)));
        }
    }

    for (idx, outcome) in outcomes {
        let bonus = &mut analysis.active_bonuses[idx];
        for (&stat, &value) in &outcome.deltas {
            *analysis.deltas.entry(stat).or_insert(0.0) += value;
            analysis.applied_effects.push(format!(
                "{} {}-piece (conditional): +{} {}",
                bonus.set, bonus.pieces, value, stat
            ));
        }
        // Shred from different sets does not stack on the same element
        for (&element, &value) in &outcome.res_reduction {
            let entry = analysis.res_reduction.entry(element).or_insert(0.0);
            *entry = entry.max(value);
        }
        bonus.effects.push(outcome);
    }

    analysis.total_active_sets = analysis.active_bonuses.len();
    analysis
}

/// Evaluate one conditional effect in its best-case trigger state
pub fn evaluate_effect(
    effect: &SetEffect,
    context: &SetContext,
    energy_recharge: f64,
) -> EffectOutcome {
    let mut deltas = BTreeMap::new();
    let mut res_reduction = BTreeMap::new();
    let mut note = None;

    match effect {
        SetEffect::WeaponAbilityBonus {
            weapons,
            abilities,
            value,
        } => match context.weapon_type {
            Some(weapon) if weapons.contains(&weapon) => {
                for &ability in abilities {
                    deltas.insert(StatKind::AbilityDmgBonus(ability), *value);
                }
            }
            Some(_) => note = Some("weapon type does not match".to_string()),
            None => note = Some("weapon type unknown".to_string()),
        },
        SetEffect::AbilityBonus { abilities, value } => {
            for &ability in abilities {
                deltas.insert(StatKind::AbilityDmgBonus(ability), *value);
            }
        }
        SetEffect::ReactionBonus { bonuses } => {
            for entry in bonuses {
                *deltas
                    .entry(StatKind::ReactionBonus(entry.reaction))
                    .or_insert(0.0) += entry.value;
            }
        }
        SetEffect::Stacks {
            stat,
            per_stack,
            max_stacks,
        } => {
            deltas.insert(*stat, per_stack * f64::from(*max_stacks));
        }
        SetEffect::ConditionalStat { trigger, stat, value } => {
            deltas.insert(*stat, *value);
            note = Some(format!("assumes {}", trigger));
        }
        SetEffect::FrozenCritBonus {
            cryo_affected,
            frozen_extra,
        } => {
            deltas.insert(StatKind::CritRate, cryo_affected + frozen_extra);
            note = Some("assumes a Frozen target".to_string());
        }
        SetEffect::EnergyRechargeConversion { ability, rate, cap } => {
            let bonus = ((energy_recharge - 100.0) * rate).min(*cap);
            if bonus > 0.0 {
                deltas.insert(StatKind::AbilityDmgBonus(*ability), bonus);
            } else {
                note = Some("energy recharge at or below 100%".to_string());
            }
        }
        SetEffect::ResistanceShred { elements, value } => {
            for &element in elements {
                res_reduction.insert(element, *value);
            }
        }
        SetEffect::BondOfLifeStacks {
            abilities,
            per_stack,
            max_stacks,
        } => {
            if context.bond_active {
                let value = per_stack * f64::from(*max_stacks);
                for &ability in abilities {
                    deltas.insert(StatKind::AbilityDmgBonus(ability), value);
                }
            } else {
                note = Some("no active Bond of Life".to_string());
            }
        }
        SetEffect::TeamOnly => note = Some("party-wide effect, not applied to the wearer".to_string()),
    }

    EffectOutcome {
        effect: effect.clone(),
        applied: !deltas.is_empty() || !res_reduction.is_empty(),
        deltas,
        res_reduction,
        note,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AbilityType;

    fn pieces(set: &str, count: usize) -> Vec<ArtifactPiece> {
        (0..count).map(|_| ArtifactPiece::of_set(set)).collect()
    }

    fn context() -> SetContext {
        SetContext {
            weapon_type: Some(WeaponType::Polearm),
            energy_recharge: 100.0,
            element: Element::Pyro,
            bond_active: false,
        }
    }

    fn resolve(pieces: &[ArtifactPiece], context: &SetContext) -> SetAnalysis {
        resolve_sets(pieces, context, ReferenceTables::builtin())
    }

    #[test]
    fn test_two_pieces_activate_only_two_piece_bonus() {
        let analysis = resolve(&pieces("Gladiator's Finale", 2), &context());
        assert!(analysis.has_bonus("Gladiator's Finale", 2));
        assert!(!analysis.has_bonus("Gladiator's Finale", 4));
        assert_eq!(analysis.deltas.get(&StatKind::AtkPercent), Some(&18.0));
    }

    #[test]
    fn test_three_pieces_do_not_activate_four_piece() {
        let analysis = resolve(&pieces("Gladiator's Finale", 3), &context());
        assert_eq!(analysis.total_active_sets, 1);
        assert!(!analysis.has_bonus("Gladiator's Finale", 4));
    }

    #[test]
    fn test_four_or_more_pieces_activate_both() {
        for count in [4, 5] {
            let analysis = resolve(&pieces("gladiator's   FINALE", count), &context());
            assert!(analysis.has_bonus("Gladiator's Finale", 2));
            assert!(analysis.has_bonus("Gladiator's Finale", 4));
            assert_eq!(
                analysis
                    .deltas
                    .get(&StatKind::AbilityDmgBonus(AbilityType::NormalAttack)),
                Some(&35.0)
            );
            assert_eq!(analysis.set_counts.get("Gladiator's Finale"), Some(&(count as u32)));
        }
    }

    #[test]
    fn test_weapon_mismatch_not_applied() {
        let mut ctx = context();
        ctx.weapon_type = Some(WeaponType::Catalyst);
        let analysis = resolve(&pieces("Gladiator's Finale", 4), &ctx);
        let four = &analysis.active_bonuses[1];
        assert!(!four.effects[0].applied);
        assert!(analysis
            .deltas
            .get(&StatKind::AbilityDmgBonus(AbilityType::NormalAttack))
            .is_none());
    }

    #[test]
    fn test_two_plus_two_split() {
        let mut equipped = pieces("Gladiator's Finale", 2);
        equipped.extend(pieces("Shimenawa's Reminiscence", 2));
        equipped.push(ArtifactPiece::of_set("Crimson Witch of Flames"));
        let analysis = resolve(&equipped, &context());
        assert_eq!(analysis.total_active_sets, 2);
        assert_eq!(analysis.deltas.get(&StatKind::AtkPercent), Some(&36.0));
    }

    #[test]
    fn test_unknown_set_ignored() {
        let analysis = resolve(&pieces("Totally Made Up", 4), &context());
        assert_eq!(analysis.total_active_sets, 0);
        assert!(analysis.deltas.is_empty());
        assert_eq!(
            analysis.fallbacks,
            vec![Fallback::UnknownSet("totally made up".to_string())]
        );
    }

    #[test]
    fn test_emblem_conversion_uses_set_er() {
        let mut ctx = context();
        ctx.energy_recharge = 180.0;
        let analysis = resolve(&pieces("Emblem of Severed Fate", 4), &ctx);
        // (180 + 20 - 100) × 0.25
        assert_eq!(
            analysis
                .deltas
                .get(&StatKind::AbilityDmgBonus(AbilityType::ElementalBurst)),
            Some(&25.0)
        );

        ctx.energy_recharge = 500.0;
        let capped = resolve(&pieces("Emblem of Severed Fate", 4), &ctx);
        assert_eq!(
            capped
                .deltas
                .get(&StatKind::AbilityDmgBonus(AbilityType::ElementalBurst)),
            Some(&75.0)
        );
    }

    #[test]
    fn test_blizzard_assumes_frozen() {
        let analysis = resolve(&pieces("Blizzard Strayer", 4), &context());
        assert_eq!(analysis.deltas.get(&StatKind::CritRate), Some(&40.0));
        assert_eq!(analysis.assumption, TriggerAssumption::BestCase);
    }

    #[test]
    fn test_crimson_witch_stacks_and_reactions() {
        let analysis = resolve(&pieces("Crimson Witch of Flames", 4), &context());
        assert_eq!(
            analysis.deltas.get(&StatKind::ElementDmgBonus(Element::Pyro)),
            Some(&37.5)
        );
        assert_eq!(
            analysis
                .deltas
                .get(&StatKind::ReactionBonus(crate::types::ReactionType::Vaporize)),
            Some(&15.0)
        );
    }

    #[test]
    fn test_viridescent_shred() {
        let analysis = resolve(&pieces("Viridescent Venerer", 4), &context());
        assert_eq!(analysis.res_reduction.get(&Element::Hydro), Some(&40.0));
        assert!(analysis.res_reduction.get(&Element::Geo).is_none());
    }

    #[test]
    fn test_whimsy_requires_bond() {
        let analysis = resolve(&pieces("Fragment of Harmonic Whimsy", 4), &context());
        assert!(analysis
            .deltas
            .get(&StatKind::AbilityDmgBonus(AbilityType::NormalAttack))
            .is_none());

        let mut ctx = context();
        ctx.bond_active = true;
        let analysis = resolve(&pieces("Fragment of Harmonic Whimsy", 4), &ctx);
        assert_eq!(
            analysis
                .deltas
                .get(&StatKind::AbilityDmgBonus(AbilityType::NormalAttack)),
            Some(&54.0)
        );
    }

    #[test]
    fn test_team_only_effect_reported_without_deltas() {
        let analysis = resolve(&pieces("Noblesse Oblige", 4), &context());
        let four = &analysis.active_bonuses[1];
        assert!(!four.effects[0].applied);
        assert!(four.effects[0].note.is_some());
        assert_eq!(analysis.deltas.len(), 1);
    }
}
