//! Combat pipeline - Character and team damage reports

mod calculator;
mod rating;
mod result;

pub use calculator::{DamageCalculator, PreparedCharacter};
pub use rating::{rate_build, BuildQuality, BuildRating};
pub use result::{
    AbilityOutcome, CharacterDamageReport, DamageIncrease, ReactionOutcomes, TeamDamageReport,
};
