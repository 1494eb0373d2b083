//! ArtifactSetResolver - Set counting, 2/4-piece activation and
//! conditional set effects

mod recommend;
mod resolver;
mod set_bonus;

pub use recommend::{recommend_sets, BonusSummary, Priority, SetRecommendation, SetRecommendations};
pub use resolver::{
    count_sets, evaluate_effect, resolve_sets, ActiveSetBonus, EffectOutcome, SetAnalysis,
    SetContext, TriggerAssumption,
};
pub use set_bonus::{ReactionBonusEntry, SetBonusDef, SetEffect};
