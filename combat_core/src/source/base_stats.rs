//! BaseStatsSource - Character base stats and ascension bonus

use crate::config::BaseStats;
use crate::source::StatSource;
use crate::stat_block::{StatAccumulator, StatKind};

/// Stats every character starts with before gear
pub struct BaseStatsSource {
    pub base: BaseStats,
    pub crit_rate: f64,
    pub crit_dmg: f64,
    pub energy_recharge: f64,
}

impl BaseStatsSource {
    pub fn new(base: BaseStats, crit_rate: f64, crit_dmg: f64, energy_recharge: f64) -> Self {
        BaseStatsSource {
            base,
            crit_rate,
            crit_dmg,
            energy_recharge,
        }
    }
}

impl StatSource for BaseStatsSource {
    fn id(&self) -> &str {
        "base_stats"
    }

    fn priority(&self) -> i32 {
        -100 // Base stats apply first
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        stats.apply_stat(StatKind::BaseAtk, self.base.base_atk);
        stats.apply_stat(StatKind::BaseHp, self.base.base_hp);
        stats.apply_stat(StatKind::BaseDef, self.base.base_def);

        stats.apply_stat(StatKind::CritRate, self.crit_rate);
        stats.apply_stat(StatKind::CritDmg, self.crit_dmg);
        stats.apply_stat(StatKind::EnergyRecharge, self.energy_recharge);

        // Ascension stat
        stats.apply_stat(self.base.ascension_stat, self.base.ascension_value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hu_tao_base() -> BaseStats {
        BaseStats {
            base_atk: 715.0,
            base_hp: 15552.0,
            base_def: 876.0,
            ascension_stat: StatKind::CritDmg,
            ascension_value: 38.4,
        }
    }

    #[test]
    fn test_base_stats_and_ascension() {
        let source = BaseStatsSource::new(hu_tao_base(), 5.0, 50.0, 100.0);
        let mut acc = StatAccumulator::new();
        source.apply(&mut acc);

        assert!((acc.base_atk - 715.0).abs() < 0.01);
        assert!((acc.base_hp - 15552.0).abs() < 0.01);
        // 50 base + 38.4 ascension
        assert!((acc.crit_dmg - 88.4).abs() < 0.01);
        assert!((acc.crit_rate - 5.0).abs() < 0.01);
        assert!((acc.energy_recharge - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_base_stats_priority() {
        let source = BaseStatsSource::new(BaseStats::default(), 5.0, 50.0, 100.0);
        assert_eq!(source.priority(), -100);
    }
}
