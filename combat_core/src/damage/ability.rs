//! AbilityInstance - One hit of an ability, resolved against talent data

use crate::config::TalentMultipliers;
use crate::damage::DamageError;
use crate::types::{AbilityType, Element, ScalingAttribute};
use serde::{Deserialize, Serialize};

/// A single hit ready for the damage formula
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbilityInstance {
    pub ability: AbilityType,
    /// Normal-attack hit index; 0 for every other ability
    pub hit: usize,
    /// Talent multiplier in percent, after talent-level scaling
    pub multiplier: f64,
    pub scaling: ScalingAttribute,
    /// Damage element of the hit
    pub element: Element,
}

impl AbilityInstance {
    /// Resolve an ability hit for a character
    ///
    /// # Arguments
    /// * `talents` - The character's talent multipliers
    /// * `talent_scaling` - Fraction of the multiplier used at the current talent level
    /// * `character_element` - Element of skills, bursts and infused attacks
    /// * `infusion` - Normal, charged and plunge attacks deal the character's element
    pub fn resolve(
        character: &str,
        ability: AbilityType,
        hit: usize,
        talents: &TalentMultipliers,
        talent_scaling: f64,
        character_element: Element,
        infusion: bool,
    ) -> Result<Self, DamageError> {
        if ability == AbilityType::NormalAttack && talents.normal_attack.is_empty() {
            return Err(DamageError::EmptyNormalAttackChain {
                character: character.to_string(),
            });
        }
        let hit = if ability == AbilityType::NormalAttack { hit } else { 0 };
        let base = talents
            .multiplier(ability, hit)
            .ok_or(DamageError::HitOutOfRange {
                ability,
                hit,
                hits: talents.normal_attack.len(),
            })?;

        let element = if ability.is_attack() && !infusion {
            Element::Physical
        } else {
            character_element
        };

        Ok(AbilityInstance {
            ability,
            hit,
            multiplier: base * talent_scaling,
            scaling: talents.scaling_for(ability),
            element,
        })
    }

    /// A hit with an explicit multiplier, bypassing talent data
    pub fn custom(ability: AbilityType, multiplier: f64, scaling: ScalingAttribute, element: Element) -> Self {
        AbilityInstance {
            ability,
            hit: 0,
            multiplier,
            scaling,
            element,
        }
    }
}
