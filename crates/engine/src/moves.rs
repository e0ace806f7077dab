//! Move representation and decoding of raw integer moves

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, IndexKind};
use crate::types::{Color, Row, BOARD_SIZE};

/// Source of tiles for drafting
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Selection {
    Factory(u8), // index 0..num_factories-1
    Center,
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Factory(i) => write!(f, "factory {i}"),
            Selection::Center => f.write_str("center"),
        }
    }
}

/// Destination for drafted tiles
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Placement {
    Row(Row), // 0..4
    Floor,
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Row(r) => write!(f, "row {r}"),
            Placement::Floor => f.write_str("floor"),
        }
    }
}

/// Draft all tiles of a color from a source into a destination
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub selection: Selection,
    pub color: Color,
    pub placement: Placement,
}

impl Move {
    pub fn new(selection: Selection, color: Color, placement: Placement) -> Self {
        Move {
            selection,
            color,
            placement,
        }
    }

    /// Decode the integer form used by training code.
    ///
    /// `selection == num_factories` selects the center and `placement == 5`
    /// targets the floor. Anything beyond those sentinels is out of range,
    /// and the marker's sentinel color is not selectable.
    pub fn from_raw(
        selection: usize,
        color: u8,
        placement: usize,
        num_factories: usize,
    ) -> Result<Move, EngineError> {
        let selection = match selection {
            s if s < num_factories => Selection::Factory(s as u8),
            s if s == num_factories => Selection::Center,
            s => {
                return Err(EngineError::IndexOutOfRange {
                    kind: IndexKind::Selection,
                    index: s,
                    limit: num_factories,
                })
            }
        };

        let color = Color::from_index(color).ok_or(EngineError::InvalidColor(color))?;

        let placement = match placement {
            p if p < BOARD_SIZE => Placement::Row(p as u8),
            p if p == BOARD_SIZE => Placement::Floor,
            p => {
                return Err(EngineError::IndexOutOfRange {
                    kind: IndexKind::Placement,
                    index: p,
                    limit: BOARD_SIZE,
                })
            }
        };

        Ok(Move::new(selection, color, placement))
    }

    /// Inverse of [`Move::from_raw`]: (selection, color, placement)
    pub fn to_raw(&self, num_factories: usize) -> (usize, u8, usize) {
        let selection = match self.selection {
            Selection::Factory(f) => f as usize,
            Selection::Center => num_factories,
        };
        let placement = match self.placement {
            Placement::Row(r) => r as usize,
            Placement::Floor => BOARD_SIZE,
        };
        (selection, self.color as u8, placement)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {} to {}", self.color, self.selection, self.placement)
    }
}
