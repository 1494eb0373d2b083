//! Per-ability damage errors

use crate::types::AbilityType;
use thiserror::Error;

/// Failure computing one ability. The request pipeline turns these into a
/// zeroed breakdown with an error marker; they never abort sibling abilities.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DamageError {
    #[error("{character} has no normal attack hits")]
    EmptyNormalAttackChain { character: String },
    #[error("{ability} hit {hit} out of range ({hits} hits)")]
    HitOutOfRange {
        ability: AbilityType,
        hit: usize,
        hits: usize,
    },
    #[error("non-finite {term} in damage formula")]
    NonFiniteTerm { term: &'static str },
    #[error("invalid character level {0}")]
    InvalidLevel(u32),
}
