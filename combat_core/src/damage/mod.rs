//! DamageFormulaEngine - AbilityInstance in, DamageBreakdown out
//!
//! Every intermediate term of the formula is kept on the breakdown so
//! callers can audit how a number was reached.

mod ability;
mod breakdown;
mod calculation;
mod error;

pub use ability::AbilityInstance;
pub use breakdown::{DamageBreakdown, ReactionApplication};
pub use calculation::{
    amplifying_em_bonus, amplifying_multiplier, calculate_hit, transformative_damage,
    transformative_em_bonus,
};
pub use error::DamageError;
