//! combat_core - Theoretical combat damage engine
//!
//! This library provides:
//! - StatAggregator: raw build records into normalized CharacterStats
//! - ArtifactSetResolver: 2/4-piece set bonuses, best-case conditional effects
//! - BondOfLifeEngine: the healing-blocking Bond resource and its conversions
//! - TeamBuffComposer: teammate buffs, elemental resonance, synergy score
//! - ReactionAnalyzer: ranking of the reactions a team can produce
//! - DamageFormulaEngine: per-ability damage with a full term breakdown
//! - DamageCalculator: the request pipeline producing character and team reports
//!
//! Everything is a pure, synchronous function of its inputs plus immutable
//! reference tables, so calculations can run concurrently without locking.

pub mod artifact;
pub mod bond;
pub mod combat;
pub mod config;
pub mod damage;
pub mod defense;
pub mod prelude;
pub mod reaction;
pub mod source;
pub mod stat_block;
pub mod team;
pub mod types;

// Re-export core types for convenience
pub use combat::{
    AbilityOutcome, CharacterDamageReport, DamageCalculator, DamageIncrease, TeamDamageReport,
};
pub use config::{ConfigError, EngineConstants, ReferenceTables};
pub use damage::{AbilityInstance, DamageBreakdown, DamageError};
pub use defense::{EnemyProfile, EnemyStats};
pub use source::{BuildRecord, StatSource};
pub use stat_block::{CharacterStats, StatKind, StatValue};
pub use types::{AbilityType, Element, Fallback, ReactionType, ScalingAttribute};
