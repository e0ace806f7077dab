//! Per-player board: staging rows, wall and floor line

use serde::{Deserialize, Serialize};

use crate::moves::Placement;
use crate::types::{wall_column, Color, Tile, BOARD_SIZE, FLOOR_PENALTY};

/// A staging-row or wall cell
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Tile),
}

impl Cell {
    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    pub fn tile(&self) -> Option<Tile> {
        match *self {
            Cell::Filled(t) => Some(t),
            Cell::Empty => None,
        }
    }

    pub fn color(&self) -> Option<Color> {
        self.tile().and_then(|t| t.color())
    }
}

/// Wall: 5x5 grid. Once filled, a cell stays filled.
pub type Wall = [[Cell; BOARD_SIZE]; BOARD_SIZE];

/// Complete board for one player
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerBoard {
    /// Row i has capacity i + 1
    pub staging_rows: [Vec<Cell>; BOARD_SIZE],
    pub wall: Wall,
    /// Ordered; only the first 7 entries are penalized
    pub floor: Vec<Tile>,
}

impl Default for PlayerBoard {
    fn default() -> Self {
        PlayerBoard {
            staging_rows: std::array::from_fn(|r| vec![Cell::Empty; r + 1]),
            wall: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
            floor: Vec::new(),
        }
    }
}

impl PlayerBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every occupied cell of the row already holds `color`
    pub fn row_accepts(&self, row: usize, color: Color) -> bool {
        self.staging_rows[row]
            .iter()
            .all(|cell| !cell.is_filled() || cell.color() == Some(color))
    }

    pub fn row_is_full(&self, row: usize) -> bool {
        self.staging_rows[row].iter().all(Cell::is_filled)
    }

    /// Color held by the row, None when empty
    pub fn row_color(&self, row: usize) -> Option<Color> {
        self.staging_rows[row].iter().find_map(Cell::color)
    }

    /// Whether the wall already holds `color` in `row`
    pub fn wall_has(&self, row: usize, color: Color) -> bool {
        self.wall[row][wall_column(row, color)].is_filled()
    }

    /// Placement under strict rules: the row takes this color, has room, and
    /// the wall row does not already hold the color. The floor is always legal.
    pub fn is_legal_placement(&self, placement: Placement, color: Color) -> bool {
        match placement {
            Placement::Floor => true,
            Placement::Row(r) => {
                let r = r as usize;
                r < BOARD_SIZE
                    && self.row_accepts(r, color)
                    && !self.row_is_full(r)
                    && !self.wall_has(r, color)
            }
        }
    }

    /// Route drafted tiles into a staging row; whatever the row does not take
    /// goes to the floor in the order received. Returns how many hit the floor.
    ///
    /// A row holding another color takes nothing. Tiles not of `color` (the
    /// marker) always go to the floor.
    pub fn place(&mut self, tiles: Vec<Tile>, placement: Placement, color: Color) -> usize {
        let row = match placement {
            Placement::Row(r) => Some(r as usize)
                .filter(|&r| r < BOARD_SIZE && self.row_accepts(r, color)),
            Placement::Floor => None,
        };

        let mut overflow = Vec::new();
        for tile in tiles {
            let slot = match row {
                Some(r) if tile.has_color(color) => {
                    self.staging_rows[r].iter_mut().find(|c| !c.is_filled())
                }
                _ => None,
            };
            match slot {
                Some(cell) => *cell = Cell::Filled(tile),
                None => overflow.push(tile),
            }
        }

        let n = overflow.len();
        self.floor.extend(overflow);
        n
    }

    /// Sum of floor penalties for the current floor (<= 0)
    pub fn floor_penalty(&self) -> i32 {
        FLOOR_PENALTY.iter().take(self.floor.len()).sum()
    }

    /// Any wall row completely filled
    pub fn has_complete_wall_row(&self) -> bool {
        self.wall.iter().any(|row| row.iter().all(Cell::is_filled))
    }

    pub fn staging_count(&self) -> usize {
        self.staging_rows
            .iter()
            .flatten()
            .filter(|c| c.is_filled())
            .count()
    }

    pub fn wall_count(&self) -> usize {
        self.wall.iter().flatten().filter(|c| c.is_filled()).count()
    }

    /// All tiles currently on this board
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.staging_rows
            .iter()
            .flatten()
            .chain(self.wall.iter().flatten())
            .filter_map(Cell::tile)
            .chain(self.floor.iter().copied())
    }
}
