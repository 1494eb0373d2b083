//! Reaction context for a single hit

use crate::config::ReferenceTables;
use crate::reaction::table::{amplifying_base, aura_for};
use crate::types::{Element, Fallback, ReactionKind, ReactionType};
use serde::{Deserialize, Serialize};

/// A reaction the damage formula should consider, triggered by `trigger`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReactionContext {
    pub reaction: ReactionType,
    pub trigger: Element,
    /// Inferred from the reaction table; `None` when the trigger cannot
    /// start this reaction
    pub aura: Option<Element>,
}

impl ReactionContext {
    pub fn new(reaction: ReactionType, trigger: Element, tables: &ReferenceTables) -> Self {
        ReactionContext {
            reaction,
            trigger,
            aura: aura_for(tables.reactions(), reaction, trigger),
        }
    }

    /// Parse a caller-supplied reaction name
    pub fn parse(name: &str, trigger: Element, tables: &ReferenceTables) -> Result<Self, Fallback> {
        ReactionType::from_name(name)
            .map(|reaction| Self::new(reaction, trigger, tables))
            .ok_or_else(|| Fallback::UnknownReaction(name.trim().to_string()))
    }

    pub fn kind(&self) -> ReactionKind {
        self.reaction.kind()
    }

    /// The reaction affects a hit only when the hit is elemental, carries
    /// the trigger element, and the trigger can start the reaction
    pub fn applies_to(&self, hit_element: Element) -> bool {
        hit_element.is_elemental() && hit_element == self.trigger && self.aura.is_some()
    }

    /// Base multiplier for amplifying reactions
    pub fn amplifying_base(&self) -> Option<f64> {
        amplifying_base(self.reaction, self.trigger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_infer_aura() {
        let tables = ReferenceTables::builtin();
        let ctx = ReactionContext::parse("Vaporize", Element::Pyro, tables).unwrap();
        assert_eq!(ctx.aura, Some(Element::Hydro));
        assert_eq!(ctx.amplifying_base(), Some(1.5));
        assert!(ctx.applies_to(Element::Pyro));
        assert!(!ctx.applies_to(Element::Physical));
        assert!(!ctx.applies_to(Element::Hydro));
    }

    #[test]
    fn test_unknown_reaction_is_fallback() {
        let err = ReactionContext::parse("mega-melt", Element::Pyro, ReferenceTables::builtin())
            .unwrap_err();
        assert_eq!(err, Fallback::UnknownReaction("mega-melt".to_string()));
    }

    #[test]
    fn test_wrong_trigger_does_not_apply() {
        let ctx = ReactionContext::new(ReactionType::Swirl, Element::Pyro, ReferenceTables::builtin());
        assert_eq!(ctx.aura, None);
        assert!(!ctx.applies_to(Element::Pyro));
    }
}
