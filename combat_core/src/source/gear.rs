//! GearSource - Stats from one equipped artifact

use crate::source::{ArtifactPiece, StatSource};
use crate::stat_block::{StatAccumulator, StatKind};

/// Stats from an equipped artifact, names already resolved
pub struct GearSource {
    /// Set name of the piece, used as its identifier
    pub id: String,
    pub stats: Vec<(StatKind, f64)>,
}

impl GearSource {
    /// Resolve a piece's stat lines. Lines whose names are not in the
    /// mapping table are returned separately and contribute nothing.
    pub fn from_piece(piece: &ArtifactPiece) -> (GearSource, Vec<String>) {
        let mut stats = Vec::new();
        let mut unknown = Vec::new();
        for line in piece.stat_lines() {
            match StatKind::from_name(&line.stat) {
                Some(kind) => stats.push((kind, line.value)),
                None => unknown.push(line.stat.clone()),
            }
        }
        let source = GearSource {
            id: piece.set_name.clone(),
            stats,
        };
        (source, unknown)
    }
}

impl StatSource for GearSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn priority(&self) -> i32 {
        0 // Gear applies at default priority
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        for &(stat, value) in &self.stats {
            stats.apply_stat(stat, value);
        }
    }
}
