//! TeamBuffComposer - Cross-character buffs, resonance and synergy
//!
//! Buff magnitudes are weighted by their estimated uptime. Elemental
//! resonance is granted once per element shared by two or more members.

mod buff;
mod composer;
mod synergy;

pub use buff::{AppliedBuff, BuffCategory, BuffStat, ResonanceDef, ShredTarget, TeamBuffDef};
pub use composer::{
    compose_team_buffs, ActiveResonance, TeamBuffAnalysis, TeamMember, TeamMultipliers,
};
pub use synergy::{rotation_order, synergy_score, ElementalCoverage, RotationMember, RotationStep};
