//! Reports - Outcome of a character or team damage calculation

use crate::artifact::SetAnalysis;
use crate::bond::BondAnalysis;
use crate::combat::BuildQuality;
use crate::damage::DamageBreakdown;
use crate::defense::EnemyStats;
use crate::reaction::ReactionAnalysis;
use crate::stat_block::StatsSummary;
use crate::team::TeamBuffAnalysis;
use crate::types::{AbilityType, Element, Fallback, ReactionType};
use serde::{Deserialize, Serialize};

/// Damage of one ability. A failed ability keeps its place with an error
/// marker and an all-zero breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityOutcome {
    pub ability: AbilityType,
    pub breakdown: DamageBreakdown,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AbilityOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn average(&self) -> f64 {
        self.breakdown.total_average
    }
}

/// Every ability evaluated with one reaction in context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionOutcomes {
    pub reaction: ReactionType,
    pub trigger: Element,
    pub abilities: Vec<AbilityOutcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterDamageReport {
    // === Character ===
    pub character: String,
    pub element: Element,
    pub level: u32,
    pub stats: StatsSummary,
    pub build_quality: BuildQuality,
    /// No gear was supplied and the fallback build was used
    pub used_fallback_build: bool,

    // === Damage ===
    /// One outcome per ability, no reaction
    pub abilities: Vec<AbilityOutcome>,
    pub reactions: Vec<ReactionOutcomes>,

    // === Modifiers ===
    pub sets: SetAnalysis,
    pub bond: BondAnalysis,
    pub enemy: EnemyStats,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fallbacks: Vec<Fallback>,
}

impl CharacterDamageReport {
    pub fn ability(&self, ability: AbilityType) -> Option<&AbilityOutcome> {
        self.abilities.iter().find(|o| o.ability == ability)
    }

    pub fn reaction(&self, reaction: ReactionType) -> Option<&ReactionOutcomes> {
        self.reactions.iter().find(|r| r.reaction == reaction)
    }
}

/// Unbuffed vs buffed average of one ability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageIncrease {
    pub ability: AbilityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction: Option<ReactionType>,
    pub base_average: f64,
    pub buffed_average: f64,
    /// Percent increase; 0 when the base average is 0
    pub increase_percent: f64,
}

impl DamageIncrease {
    pub fn new(ability: AbilityType, reaction: Option<ReactionType>, base: f64, buffed: f64) -> Self {
        let increase_percent = if base > 0.0 {
            (buffed - base) / base * 100.0
        } else {
            0.0
        };
        DamageIncrease {
            ability,
            reaction,
            base_average: base,
            buffed_average: buffed,
            increase_percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamDamageReport {
    pub base: CharacterDamageReport,
    pub buffed: CharacterDamageReport,
    pub team: TeamBuffAnalysis,
    pub reactions: ReactionAnalysis,
    pub damage_increase: Vec<DamageIncrease>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fallbacks: Vec<Fallback>,
}
