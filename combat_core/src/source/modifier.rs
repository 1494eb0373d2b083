//! ModifierSource - Stat deltas from set bonuses, Bond of Life and team buffs

use crate::source::StatSource;
use crate::stat_block::{StatAccumulator, StatKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a modifier comes from; decides application order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKind {
    ArtifactSet,
    BondOfLife,
    TeamBuff,
}

impl ModifierKind {
    pub fn priority(self) -> i32 {
        match self {
            ModifierKind::ArtifactSet => 100,
            ModifierKind::BondOfLife => 150,
            ModifierKind::TeamBuff => 200,
        }
    }
}

/// A bag of stat deltas produced by one of the modifier components
#[derive(Debug, Clone)]
pub struct ModifierSource {
    pub id: String,
    pub kind: ModifierKind,
    modifiers: Vec<(StatKind, f64)>,
}

impl ModifierSource {
    pub fn new(id: impl Into<String>, kind: ModifierKind) -> Self {
        ModifierSource {
            id: id.into(),
            kind,
            modifiers: Vec::new(),
        }
    }

    /// Build from a delta map
    pub fn from_map(
        id: impl Into<String>,
        kind: ModifierKind,
        deltas: &BTreeMap<StatKind, f64>,
    ) -> Self {
        let mut source = ModifierSource::new(id, kind);
        source.modifiers = deltas.iter().map(|(&k, &v)| (k, v)).collect();
        source
    }

    /// Add a modifier to this source
    pub fn with_modifier(mut self, stat: StatKind, value: f64) -> Self {
        self.modifiers.push((stat, value));
        self
    }

    pub fn modifiers(&self) -> &[(StatKind, f64)] {
        &self.modifiers
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }
}

impl StatSource for ModifierSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn priority(&self) -> i32 {
        self.kind.priority()
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        for &(stat, value) in &self.modifiers {
            stats.apply_stat(stat, value);
        }
    }
}
