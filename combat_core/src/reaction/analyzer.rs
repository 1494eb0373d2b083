//! Reaction ranking for a team roster

use crate::config::{EngineConstants, ReferenceTables};
use crate::reaction::table::{describe, ReactionEntry};
use crate::team::{compose_team_buffs, TeamBuffAnalysis};
use crate::types::{Element, Fallback, ReactionKind, ReactionType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

const MAX_RECOMMENDED: usize = 3;

const MAIN_TRIGGER_SCORE: u32 = 50;
const MAIN_AURA_SCORE: u32 = 30;
const MAIN_SUPPORT_SCORE: u32 = 10;
const AMPLIFYING_SCORE: u32 = 30;
const TRANSFORMATIVE_SCORE: u32 = 10;
const APPLICATOR_SCORE: u32 = 15;

/// Part the main character plays in a reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MainRole {
    Trigger,
    Aura,
    Support,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionOption {
    pub reaction: ReactionType,
    pub kind: ReactionKind,
    pub trigger: Element,
    pub aura: Element,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires: Option<Element>,
    pub score: u32,
    pub main_role: MainRole,
    /// Team members applying the trigger element
    pub triggers: Vec<String>,
    /// Team members applying the aura element
    pub aura_sources: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReactionCoverage {
    pub amplifying_reactions: usize,
    pub transformative_reactions: usize,
    pub element_count: usize,
    /// Members per element
    pub elements: BTreeMap<Element, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionSynergy {
    pub synergy_score: f64,
    pub resonance_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionAnalysis {
    pub main_character: String,
    pub team_elements: BTreeMap<String, Element>,
    /// Viable reactions, best first
    pub possible_reactions: Vec<ReactionOption>,
    /// Top distinct reaction names
    pub recommended_reactions: Vec<ReactionType>,
    pub elemental_coverage: ReactionCoverage,
    pub team_synergy: ReactionSynergy,
    pub notes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fallbacks: Vec<Fallback>,
}

impl ReactionAnalysis {
    pub fn top_reaction(&self) -> Option<&ReactionOption> {
        self.possible_reactions.first()
    }
}

/// Rank the reactions a roster can produce around its main character
pub fn analyze_reactions(
    roster: &[String],
    main_character: &str,
    tables: &ReferenceTables,
    constants: &EngineConstants,
) -> ReactionAnalysis {
    let team = compose_team_buffs(roster, main_character, tables, constants);
    analyze_team_reactions(&team, tables)
}

/// Rank reactions for an already composed team
pub fn analyze_team_reactions(team: &TeamBuffAnalysis, tables: &ReferenceTables) -> ReactionAnalysis {
    let members: Vec<(&str, Element)> = team
        .roster
        .iter()
        .filter_map(|m| m.element.map(|e| (m.name.as_str(), e)))
        .collect();
    let present: Vec<Element> = team.coverage.elements_present.clone();
    let main_element = team
        .roster
        .iter()
        .find(|m| m.is_main)
        .and_then(|m| m.element);

    let reliable_elements: Vec<Element> = members
        .iter()
        .filter(|(name, _)| {
            tables
                .character(name)
                .map(|c| c.reliable_applicator)
                .unwrap_or(false)
        })
        .map(|&(_, element)| element)
        .collect();

    let mut possible: Vec<ReactionOption> = tables
        .reactions()
        .iter()
        .filter(|entry| entry.is_viable(&present))
        .map(|entry| score_entry(entry, main_element, &reliable_elements, &members))
        .collect();
    // stable: equal scores keep table order
    possible.sort_by(|a, b| b.score.cmp(&a.score));

    let mut recommended: Vec<ReactionType> = Vec::new();
    for option in &possible {
        if recommended.len() == MAX_RECOMMENDED {
            break;
        }
        if !recommended.contains(&option.reaction) {
            recommended.push(option.reaction);
        }
    }

    let mut elements: BTreeMap<Element, usize> = BTreeMap::new();
    for &(_, element) in &members {
        *elements.entry(element).or_insert(0) += 1;
    }
    let coverage = ReactionCoverage {
        amplifying_reactions: possible
            .iter()
            .filter(|o| o.reaction.is_amplifying())
            .count(),
        transformative_reactions: possible
            .iter()
            .filter(|o| !o.reaction.is_amplifying())
            .count(),
        element_count: elements.len(),
        elements,
    };
    let synergy = ReactionSynergy {
        synergy_score: team.synergy_score,
        resonance_active: !team.resonances.is_empty(),
    };
    let notes = analysis_notes(&coverage, &synergy);

    debug!(
        main = %team.main_character,
        viable = possible.len(),
        recommended = ?recommended,
        "reactions ranked"
    );

    ReactionAnalysis {
        main_character: team.main_character.clone(),
        team_elements: members
            .iter()
            .map(|&(name, element)| (name.to_string(), element))
            .collect(),
        possible_reactions: possible,
        recommended_reactions: recommended,
        elemental_coverage: coverage,
        team_synergy: synergy,
        notes,
        fallbacks: team.fallbacks.clone(),
    }
}

fn score_entry(
    entry: &ReactionEntry,
    main_element: Option<Element>,
    reliable_elements: &[Element],
    members: &[(&str, Element)],
) -> ReactionOption {
    let main_role = match main_element {
        Some(e) if e == entry.trigger => MainRole::Trigger,
        Some(e) if e == entry.aura => MainRole::Aura,
        _ => MainRole::Support,
    };
    let mut score = match main_role {
        MainRole::Trigger => MAIN_TRIGGER_SCORE,
        MainRole::Aura => MAIN_AURA_SCORE,
        MainRole::Support => MAIN_SUPPORT_SCORE,
    };
    score += if entry.reaction.is_amplifying() {
        AMPLIFYING_SCORE
    } else {
        TRANSFORMATIVE_SCORE
    };
    for side in [entry.trigger, entry.aura] {
        if reliable_elements.contains(&side) {
            score += APPLICATOR_SCORE;
        }
    }

    let names_of = |element: Element| -> Vec<String> {
        members
            .iter()
            .filter(|(_, e)| *e == element)
            .map(|(name, _)| name.to_string())
            .collect()
    };

    ReactionOption {
        reaction: entry.reaction,
        kind: entry.reaction.kind(),
        trigger: entry.trigger,
        aura: entry.aura,
        requires: entry.requires,
        score,
        main_role,
        triggers: names_of(entry.trigger),
        aura_sources: names_of(entry.aura),
        description: describe(entry.reaction).to_string(),
    }
}

fn analysis_notes(coverage: &ReactionCoverage, synergy: &ReactionSynergy) -> Vec<String> {
    let mut notes = Vec::new();
    if coverage.amplifying_reactions > 0 {
        notes.push("Vaporize or Melt available: high damage multipliers on the triggering hit".to_string());
    }
    if coverage.transformative_reactions > 0 {
        notes.push("Transformative reactions available for extra damage and utility".to_string());
    }
    if coverage.elements.contains_key(&Element::Anemo) {
        notes.push("Anemo present: Swirl spreads auras and Viridescent Venerer can shred resistance".to_string());
    }
    if synergy.resonance_active {
        notes.push("Elemental resonance active".to_string());
    }
    if coverage.element_count >= 3 {
        notes.push("Three or more elements give several reaction options".to_string());
    }
    notes
}
