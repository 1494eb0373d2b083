//! Defense system - Enemy stats, level defense, resistances

mod enemy;
mod level;
mod resistance;

pub use enemy::{EnemyProfile, EnemyStats};
pub use level::defense_multiplier;
pub use resistance::{effective_resistance, resistance_multiplier};
