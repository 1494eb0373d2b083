//! WeaponSource - Weapon base ATK and secondary stat

use crate::source::StatSource;
use crate::stat_block::{StatAccumulator, StatKind};

/// Stats from the equipped weapon. Weapon base ATK adds to base ATK, so
/// ATK% scales it.
pub struct WeaponSource {
    pub id: String,
    pub base_atk: f64,
    pub secondary: Option<(StatKind, f64)>,
}

impl WeaponSource {
    pub fn new(id: impl Into<String>, base_atk: f64, secondary: Option<(StatKind, f64)>) -> Self {
        WeaponSource {
            id: id.into(),
            base_atk,
            secondary,
        }
    }
}

impl StatSource for WeaponSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn priority(&self) -> i32 {
        -50
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        stats.apply_stat(StatKind::BaseAtk, self.base_atk);
        if let Some((stat, value)) = self.secondary {
            stats.apply_stat(stat, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weapon_adds_base_atk_and_secondary() {
        let source = WeaponSource::new("Staff of Homa", 608.0, Some((StatKind::CritDmg, 66.2)));
        let mut acc = StatAccumulator::new();
        source.apply(&mut acc);
        assert!((acc.base_atk - 608.0).abs() < f64::EPSILON);
        assert!((acc.crit_dmg - 66.2).abs() < f64::EPSILON);
        assert_eq!(source.id(), "Staff of Homa");
    }
}
