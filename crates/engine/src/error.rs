//! Engine error types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::moves::Selection;
use crate::types::Color;

/// Which index of a move was out of bounds
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum IndexKind {
    Selection,
    Placement,
    Player,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Selection => f.write_str("selection"),
            IndexKind::Placement => f.write_str("placement"),
            IndexKind::Player => f.write_str("player"),
        }
    }
}

/// Tile counts of every container, used for conservation checks and diagnostics
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SupplyCounts {
    pub bag: usize,
    pub discard: usize,
    pub factories: usize,
    pub center: usize,
    pub staging: usize,
    pub wall: usize,
    pub floor: usize,
}

impl SupplyCounts {
    pub fn total(&self) -> usize {
        self.bag + self.discard + self.factories + self.center + self.staging + self.wall + self.floor
    }
}

impl fmt::Display for SupplyCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bag={} box={} factories={} center={} staging={} wall={} floor={} total={}",
            self.bag,
            self.discard,
            self.factories,
            self.center,
            self.staging,
            self.wall,
            self.floor,
            self.total()
        )
    }
}

/// Errors returned by the engine
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// Requested color is not present at the chosen source (strict mode only)
    #[error("illegal selection: no {color} tiles at {selection}")]
    IllegalSelection { selection: Selection, color: Color },

    /// Tiles cannot go into the chosen staging row (strict mode only)
    #[error("illegal placement: row {row} cannot take {color} tiles")]
    IllegalPlacement { row: u8, color: Color },

    #[error("{kind} index {index} out of range (limit {limit})")]
    IndexOutOfRange {
        kind: IndexKind,
        index: usize,
        limit: usize,
    },

    #[error("invalid color value {0}")]
    InvalidColor(u8),

    #[error("invalid number of players: {0} (expected 2..=4)")]
    InvalidPlayerCount(u8),

    /// Bag and box cannot refill the factories for the next round. All tiles
    /// are still accounted for; the rest sit on walls and staging rows.
    #[error("tile supply exhausted: {counts}")]
    SupplyExhausted { counts: SupplyCounts },

    #[error("tile conservation violated: {counts}")]
    ConservationViolated { counts: SupplyCounts },

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supply_counts_display_lists_every_container() {
        let counts = SupplyCounts {
            bag: 60,
            discard: 5,
            factories: 20,
            center: 1,
            staging: 10,
            wall: 3,
            floor: 2,
        };
        assert_eq!(counts.total(), 101);
        let text = EngineError::SupplyExhausted { counts }.to_string();
        assert!(text.contains("bag=60"));
        assert!(text.contains("box=5"));
        assert!(text.contains("floor=2"));
        assert!(text.contains("total=101"));
    }
}
