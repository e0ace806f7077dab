//! Basic types and constants: colors, tiles and the wall layout

use std::fmt;

use serde::{Deserialize, Serialize};

/// Row index (0..=4)
pub type Row = u8;

/// Column index (0..=4)
pub type Col = u8;

/// Index into the player boards: 0..num_players-1
pub type PlayerIdx = u8;

/// Stable identity of a tile (0..=100)
pub type TileId = u8;

pub const BOARD_SIZE: usize = 5;
pub const MIN_PLAYERS: u8 = 2;
pub const MAX_PLAYERS: u8 = 4;
pub const FACTORY_CAPACITY: usize = 4;
pub const TILE_COLORS: usize = 5;
pub const TILES_PER_COLOR: usize = 20;
pub const REGULAR_TILES: usize = TILE_COLORS * TILES_PER_COLOR;

/// Regular tiles plus the first-player marker
pub const TOTAL_TILES: usize = REGULAR_TILES + 1;

/// The marker is the last tile created
pub const MARKER_ID: TileId = REGULAR_TILES as TileId;

/// Raw color value reserved for the first-player marker
pub const MARKER_SENTINEL: u8 = TILE_COLORS as u8;

/// Floor penalties, applied to the first 7 floor positions only
pub const FLOOR_PENALTY: [i32; 7] = [-1, -1, -2, -2, -2, -3, -3];

/// Tile colors (order fixed: it is the numeric identity used at the API boundary)
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Color {
    Red = 0,
    Blue = 1,
    Teal = 2, // "turquoise"
    Yellow = 3,
    Black = 4,
}

impl Color {
    /// Convert from u8 index to Color. The marker sentinel is not a color.
    pub fn from_index(idx: u8) -> Option<Color> {
        match idx {
            0 => Some(Color::Red),
            1 => Some(Color::Blue),
            2 => Some(Color::Teal),
            3 => Some(Color::Yellow),
            4 => Some(Color::Black),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::Red => "RED",
            Color::Blue => "BLUE",
            Color::Teal => "TEAL",
            Color::Yellow => "YELLOW",
            Color::Black => "BLACK",
        };
        f.write_str(name)
    }
}

pub const ALL_COLORS: [Color; TILE_COLORS] = [
    Color::Red,
    Color::Blue,
    Color::Teal,
    Color::Yellow,
    Color::Black,
];

/// What a tile shows: a regular color or the first-player marker
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Token {
    Tile(Color),
    FirstPlayerMarker,
}

/// A physical tile. Created once per game and never destroyed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub token: Token,
}

impl Tile {
    /// The tile a given id was created as, if the id exists at all
    pub fn from_id(id: TileId) -> Option<Tile> {
        let idx = id as usize;
        if idx < REGULAR_TILES {
            let color = Color::from_index((idx / TILES_PER_COLOR) as u8)?;
            Some(Tile {
                id,
                token: Token::Tile(color),
            })
        } else if id == MARKER_ID {
            Some(Tile::marker())
        } else {
            None
        }
    }

    pub fn marker() -> Tile {
        Tile {
            id: MARKER_ID,
            token: Token::FirstPlayerMarker,
        }
    }

    /// Color of a regular tile; None for the marker
    pub fn color(&self) -> Option<Color> {
        match self.token {
            Token::Tile(c) => Some(c),
            Token::FirstPlayerMarker => None,
        }
    }

    pub fn is_marker(&self) -> bool {
        self.token == Token::FirstPlayerMarker
    }

    pub fn has_color(&self, color: Color) -> bool {
        self.color() == Some(color)
    }
}

/// All 100 regular tiles, color-major
pub fn regular_tiles() -> Vec<Tile> {
    (0..REGULAR_TILES as TileId)
        .filter_map(Tile::from_id)
        .collect()
}

// =============================================================================
// Wall layout
// =============================================================================

/// TILE_WALL_MAP[row][col] = color at that wall position.
/// Each row is a permutation of the 5 colors; together they form a Latin square.
pub const TILE_WALL_MAP: [[Color; BOARD_SIZE]; BOARD_SIZE] = {
    use Color::*;
    [
        [Blue, Yellow, Red, Black, Teal],
        [Teal, Blue, Yellow, Red, Black],
        [Black, Teal, Blue, Yellow, Red],
        [Red, Black, Teal, Blue, Yellow],
        [Yellow, Red, Black, Teal, Blue],
    ]
};

/// Destination column lookup: WALL_DEST_COL[row][color_index] => col.
/// Inverse of TILE_WALL_MAP for O(1) lookup.
pub const WALL_DEST_COL: [[Col; TILE_COLORS]; BOARD_SIZE] = [
    // row 0: Red=2, Blue=0, Teal=4, Yellow=1, Black=3
    [2, 0, 4, 1, 3],
    // row 1: Red=3, Blue=1, Teal=0, Yellow=2, Black=4
    [3, 1, 0, 2, 4],
    // row 2: Red=4, Blue=2, Teal=1, Yellow=3, Black=0
    [4, 2, 1, 3, 0],
    // row 3: Red=0, Blue=3, Teal=2, Yellow=4, Black=1
    [0, 3, 2, 4, 1],
    // row 4: Red=1, Blue=4, Teal=3, Yellow=0, Black=2
    [1, 4, 3, 0, 2],
];

/// Wall column that `color` must occupy in `row`
pub fn wall_column(row: usize, color: Color) -> usize {
    WALL_DEST_COL[row][color.index()] as usize
}

/// Color that belongs at wall position (row, col)
pub fn wall_color(row: usize, col: usize) -> Color {
    TILE_WALL_MAP[row][col]
}
