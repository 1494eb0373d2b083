//! Synergy score, elemental coverage and rotation hint
//!
//! Deterministic heuristics over the roster; no randomness and no timeline.

use crate::team::{AppliedBuff, BuffCategory};
use crate::types::Element;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const BASE_SCORE: f64 = 50.0;
const DUAL_ELEMENT_BONUS: f64 = 10.0;
const DIVERSE_ELEMENT_BONUS: f64 = 15.0;
const POINTS_PER_BUFF: f64 = 3.0;
const MAX_BUFF_POINTS: f64 = 25.0;
const POINTS_PER_ROLE: f64 = 3.0;

/// Roles a team can cover through its buffs
const ROLE_CATEGORIES: [BuffCategory; 3] = [
    BuffCategory::Attack,
    BuffCategory::Defensive,
    BuffCategory::Elemental,
];

/// Team synergy score on a 0-100 scale
pub fn synergy_score(distinct_elements: usize, buffs: &[AppliedBuff]) -> f64 {
    let mut score = BASE_SCORE;

    score += match distinct_elements {
        0 | 1 => 0.0,
        2 => DUAL_ELEMENT_BONUS,
        _ => DIVERSE_ELEMENT_BONUS,
    };

    score += (buffs.len() as f64 * POINTS_PER_BUFF).min(MAX_BUFF_POINTS);

    let roles_covered = ROLE_CATEGORIES
        .iter()
        .filter(|role| buffs.iter().any(|b| b.category == **role))
        .count();
    score += roles_covered as f64 * POINTS_PER_ROLE;

    score.clamp(0.0, 100.0)
}

/// Elemental coverage of a roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementalCoverage {
    pub elements_present: Vec<Element>,
    pub element_count: usize,
    pub has_anemo: bool,
    pub has_geo: bool,
    pub reaction_potential: bool,
    pub shield_breaking: bool,
    pub crowd_control: bool,
}

impl ElementalCoverage {
    pub fn from_elements(elements: impl IntoIterator<Item = Element>) -> Self {
        let present: BTreeSet<Element> = elements.into_iter().collect();
        let has = |e: Element| present.contains(&e);
        ElementalCoverage {
            element_count: present.len(),
            has_anemo: has(Element::Anemo),
            has_geo: has(Element::Geo),
            reaction_potential: present.len() >= 2,
            shield_breaking: has(Element::Pyro) || has(Element::Electro) || has(Element::Geo),
            crowd_control: has(Element::Anemo) || has(Element::Cryo) || has(Element::Hydro),
            elements_present: present.into_iter().collect(),
        }
    }
}

/// One step of the suggested rotation order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationStep {
    pub character: String,
    pub action: String,
}

/// What the rotation builder needs to know about a roster member
pub struct RotationMember<'a> {
    pub name: &'a str,
    pub element: Option<Element>,
    pub is_main: bool,
    /// Grants an attack-category buff to the team
    pub buffs_attack: bool,
}

/// Suggested rotation: anemo first, attack buffers and aura appliers just
/// before the last queued step, the main character's combo in roster order.
pub fn rotation_order(members: &[RotationMember<'_>]) -> Vec<RotationStep> {
    let mut rotation: Vec<RotationStep> = Vec::new();

    for member in members {
        let step = |action: &str| RotationStep {
            character: member.name.to_string(),
            action: action.to_string(),
        };
        let before_last = rotation.len().saturating_sub(1);

        if member.is_main {
            rotation.push(step("Main DPS rotation (Skill → Burst → Normal Attacks)"));
        } else if member.element == Some(Element::Anemo) {
            rotation.insert(0, step("Use Skill for VV shred"));
        } else if member.buffs_attack {
            rotation.insert(before_last, step("Use Burst for ATK buff"));
        } else if matches!(
            member.element,
            Some(Element::Hydro | Element::Electro | Element::Cryo)
        ) {
            rotation.insert(before_last, step("Apply element for reactions"));
        } else {
            rotation.push(step("Use Skill/Burst for support"));
        }
    }

    rotation
}
