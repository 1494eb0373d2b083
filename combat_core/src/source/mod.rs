//! StatSource - Trait and implementations for stat providers
//!
//! Also home of the raw build record consumed from callers and the
//! StatAggregator that turns it into `CharacterStats`.

mod aggregate;
mod base_stats;
mod gear;
mod modifier;
mod record;
mod weapon;

pub use aggregate::{aggregate_build, AggregatedBuild};
pub use base_stats::BaseStatsSource;
pub use gear::GearSource;
pub use modifier::{ModifierKind, ModifierSource};
pub use record::{ArtifactPiece, ArtifactSlot, BuildRecord, StatLine, TalentLevels, WeaponRecord};
pub use weapon::WeaponSource;

use crate::stat_block::StatAccumulator;

/// Trait for anything that contributes stats to CharacterStats
pub trait StatSource: Send + Sync {
    /// Unique identifier for this source
    fn id(&self) -> &str;

    /// Priority for application order (higher = applied later)
    /// Default priority is 0.
    /// Suggested priorities:
    /// - Base stats: -100
    /// - Weapon: -50
    /// - Gear: 0
    /// - Artifact set bonuses: 100
    /// - Bond of Life: 150
    /// - Team buffs: 200
    fn priority(&self) -> i32 {
        0
    }

    /// Apply this source's stats to the accumulator
    fn apply(&self, stats: &mut StatAccumulator);
}
