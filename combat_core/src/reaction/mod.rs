//! ReactionAnalyzer - Elemental reactions a team can produce
//!
//! The reaction table is enumerated in its stored order and every viable
//! entry is scored. Equal scores keep table order so repeated analyses of
//! the same roster rank identically.

mod analyzer;
mod context;
mod table;

pub use analyzer::{
    analyze_reactions, analyze_team_reactions, MainRole, ReactionAnalysis, ReactionCoverage,
    ReactionOption, ReactionSynergy,
};
pub use context::ReactionContext;
pub use table::{amplifying_base, aura_for, describe, ReactionEntry};
