//! Build quality rating

use crate::stat_block::StatsSummary;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildRating {
    NeedsImprovement,
    Average,
    Good,
    VeryGood,
    Excellent,
    Perfect,
}

impl BuildRating {
    pub fn from_score(score: u32) -> Self {
        match score {
            9.. => BuildRating::Perfect,
            8 => BuildRating::Excellent,
            6..=7 => BuildRating::VeryGood,
            4..=5 => BuildRating::Good,
            2..=3 => BuildRating::Average,
            _ => BuildRating::NeedsImprovement,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildQuality {
    pub score: u32,
    pub rating: BuildRating,
}

/// Score a build from its final stats
///
/// Points: total ATK (2000 / 2500), crit ratio (1.5-2.5, best 1.8-2.2),
/// crit rate (50 / 70), crit DMG (120 / 150), elemental bonus of 60+,
/// any active set, an active Bond of Life.
pub fn rate_build(summary: &StatsSummary, active_sets: usize, bond_active: bool) -> BuildQuality {
    let mut score = 0;

    score += tier(summary.total_atk, 2000.0, 2500.0);
    let ratio = summary.crit_ratio;
    if (1.8..=2.2).contains(&ratio) {
        score += 2;
    } else if (1.5..=2.5).contains(&ratio) {
        score += 1;
    }
    score += tier(summary.crit_rate, 50.0, 70.0);
    score += tier(summary.crit_dmg, 120.0, 150.0);
    if summary.elemental_dmg_bonus >= 60.0 {
        score += 1;
    }
    if active_sets > 0 {
        score += 1;
    }
    if bond_active {
        score += 1;
    }

    BuildQuality {
        score,
        rating: BuildRating::from_score(score),
    }
}

fn tier(value: f64, good: f64, great: f64) -> u32 {
    if value >= great {
        2
    } else if value >= good {
        1
    } else {
        0
    }
}
