//! BondOfLifeEngine - A healing-blocking resource some characters convert
//! into offense
//!
//! The mechanic is opt-in per character: only characters with a declared
//! rule in the character table ever hold an active Bond.

mod engine;
mod rule;
mod state;

pub use engine::{
    analyze_bond, bond_state_for, evaluate_bond, simulate_healing, BondAnalysis, HealingEvent,
    HealingSimulation,
};
pub use rule::BondRule;
pub use state::{BondOfLifeState, BondPhase, HealingOutcome};
