//! Reaction table entries and per-reaction constants

use crate::types::{Element, ReactionType};
use serde::{Deserialize, Serialize};

/// One (reaction, trigger, aura) combination of the reaction table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionEntry {
    pub reaction: ReactionType,
    pub trigger: Element,
    pub aura: Element,
    /// Third element the reaction needs on the field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires: Option<Element>,
}

impl ReactionEntry {
    /// Every element involved, trigger first
    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        [Some(self.trigger), Some(self.aura), self.requires]
            .into_iter()
            .flatten()
    }

    /// All involved elements are present among `elements`
    pub fn is_viable(&self, elements: &[Element]) -> bool {
        self.elements().all(|e| elements.contains(&e))
    }
}

/// Aura element for a reaction triggered by `trigger`: the first matching
/// table entry
pub fn aura_for(entries: &[ReactionEntry], reaction: ReactionType, trigger: Element) -> Option<Element> {
    entries
        .iter()
        .find(|e| e.reaction == reaction && e.trigger == trigger)
        .map(|e| e.aura)
}

/// Base multiplier of an amplifying reaction. The stronger side is the
/// hydro trigger for vaporize and the pyro trigger for melt.
pub fn amplifying_base(reaction: ReactionType, trigger: Element) -> Option<f64> {
    match (reaction, trigger) {
        (ReactionType::Vaporize, Element::Hydro) => Some(2.0),
        (ReactionType::Vaporize, Element::Pyro) => Some(1.5),
        (ReactionType::Melt, Element::Pyro) => Some(2.0),
        (ReactionType::Melt, Element::Cryo) => Some(1.5),
        _ => None,
    }
}

pub fn describe(reaction: ReactionType) -> &'static str {
    match reaction {
        ReactionType::Vaporize => "Pyro and Hydro amplify the triggering hit",
        ReactionType::Melt => "Pyro and Cryo amplify the triggering hit",
        ReactionType::Overloaded => "Pyro and Electro explode for AoE Pyro damage",
        ReactionType::ElectroCharged => "Hydro and Electro deal Electro damage over time",
        ReactionType::Superconduct => "Cryo and Electro deal AoE Cryo damage and cut physical RES",
        ReactionType::Frozen => "Hydro and Cryo freeze the target in place",
        ReactionType::Shatter => "Heavy hits on frozen targets deal physical damage",
        ReactionType::Swirl => "Anemo spreads the aura element to nearby enemies",
        ReactionType::Crystallize => "Geo creates an elemental shield from the aura",
        ReactionType::Bloom => "Dendro and Hydro create Dendro Cores",
        ReactionType::Burning => "Dendro and Pyro deal Pyro damage over time",
        ReactionType::Quicken => "Dendro and Electro leave a Quicken aura",
        ReactionType::Spread => "Dendro hits on a Quicken aura gain flat damage",
        ReactionType::Hyperbloom => "Electro turns Dendro Cores into tracking projectiles",
        ReactionType::Burgeon => "Pyro detonates Dendro Cores for AoE damage",
    }
}
