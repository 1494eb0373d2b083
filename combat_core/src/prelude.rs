//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Core types
pub use crate::stat_block::{CharacterStats, StatKind, StatValue, StatsSummary};
pub use crate::types::{
    AbilityType, Element, Fallback, ReactionKind, ReactionType, ScalingAttribute, WeaponType,
};

// Inputs
pub use crate::defense::{EnemyProfile, EnemyStats};
pub use crate::source::{ArtifactPiece, ArtifactSlot, BuildRecord, StatLine, TalentLevels, WeaponRecord};

// Components
pub use crate::artifact::{recommend_sets, resolve_sets, SetAnalysis, SetContext};
pub use crate::bond::{evaluate_bond, simulate_healing, BondAnalysis, BondOfLifeState};
pub use crate::reaction::{analyze_reactions, ReactionAnalysis, ReactionContext};
pub use crate::team::{compose_team_buffs, TeamBuffAnalysis};

// Damage
pub use crate::damage::{calculate_hit, AbilityInstance, DamageBreakdown, DamageError};

// Pipeline
pub use crate::combat::{CharacterDamageReport, DamageCalculator, TeamDamageReport};

// Config
pub use crate::config::{EngineConstants, ReferenceTables};
