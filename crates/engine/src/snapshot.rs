//! Full read-view snapshot of a game and reconstruction from it
//!
//! A `Snapshot` is plain data (serde-friendly) describing where every tile is.
//! `GameEngine::from_snapshot` validates it and rebuilds an engine that
//! compares equal to the one it was taken from.

use serde::{Deserialize, Serialize};

use crate::board::{Cell, PlayerBoard};
use crate::config::EngineConfig;
use crate::engine::{GameEngine, RoundSummary};
use crate::error::EngineError;
use crate::factory::{CenterPool, Factory};
use crate::supply::TileSupply;
use crate::types::{wall_color, Tile, BOARD_SIZE, FACTORY_CAPACITY, TOTAL_TILES};

/// One player's board; `None` marks an empty cell
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub staging_rows: Vec<Vec<Option<Tile>>>,
    pub wall: Vec<Vec<Option<Tile>>>,
    pub floor: Vec<Tile>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub config: EngineConfig,
    pub round: u32,
    pub last_round: Option<RoundSummary>,
    pub factories: Vec<Vec<Tile>>,
    /// Center tiles; the marker is listed here while it sits in the center
    pub center: Vec<Tile>,
    /// Draw order is preserved
    pub bag: Vec<Tile>,
    pub discard: Vec<Tile>,
    pub boards: Vec<BoardSnapshot>,
}

fn cells_to_snapshot(cells: &[Cell]) -> Vec<Option<Tile>> {
    cells.iter().map(Cell::tile).collect()
}

fn invalid(msg: impl Into<String>) -> EngineError {
    EngineError::InvalidSnapshot(msg.into())
}

/// Tracks which tile ids have been seen while rebuilding
struct TileLedger {
    seen: [bool; TOTAL_TILES],
}

impl TileLedger {
    fn new() -> Self {
        TileLedger {
            seen: [false; TOTAL_TILES],
        }
    }

    /// Check the tile is genuine and not seen before
    fn claim(&mut self, tile: Tile, at: &str) -> Result<Tile, EngineError> {
        if Tile::from_id(tile.id) != Some(tile) {
            return Err(invalid(format!("{at}: unknown tile {tile:?}")));
        }
        let seen = &mut self.seen[tile.id as usize];
        if *seen {
            return Err(invalid(format!("{at}: tile {} appears twice", tile.id)));
        }
        *seen = true;
        Ok(tile)
    }

    fn claim_regular(&mut self, tile: Tile, at: &str) -> Result<Tile, EngineError> {
        if tile.is_marker() {
            return Err(invalid(format!("{at}: first-player marker not allowed here")));
        }
        self.claim(tile, at)
    }

    fn claim_all(&mut self, tiles: &[Tile], at: &str) -> Result<Vec<Tile>, EngineError> {
        tiles.iter().map(|&t| self.claim_regular(t, at)).collect()
    }

    fn is_complete(&self) -> bool {
        self.seen.iter().all(|&s| s)
    }
}

impl GameEngine {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            config: self.config.clone(),
            round: self.round,
            last_round: self.last_round.clone(),
            factories: self.factories.iter().map(|f| f.tiles.clone()).collect(),
            center: self
                .center
                .tiles
                .iter()
                .chain(&self.center.marker)
                .copied()
                .collect(),
            bag: self.supply.bag.clone(),
            discard: self.supply.discard.clone(),
            boards: self
                .boards
                .iter()
                .map(|b| BoardSnapshot {
                    staging_rows: b.staging_rows.iter().map(|r| cells_to_snapshot(r)).collect(),
                    wall: b.wall.iter().map(|r| cells_to_snapshot(r)).collect(),
                    floor: b.floor.clone(),
                })
                .collect(),
        }
    }

    /// Rebuild an engine from a snapshot, checking that every one of the 101
    /// tiles is present exactly once and that every container is well formed
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, EngineError> {
        let config = snapshot.config;
        config.validate()?;
        let mut ledger = TileLedger::new();

        if snapshot.factories.len() != config.num_factories() {
            return Err(invalid(format!(
                "expected {} factories, got {}",
                config.num_factories(),
                snapshot.factories.len()
            )));
        }
        let mut factories = Vec::with_capacity(snapshot.factories.len());
        for (f, tiles) in snapshot.factories.iter().enumerate() {
            if tiles.len() > FACTORY_CAPACITY {
                return Err(invalid(format!("factory {f} holds {} tiles", tiles.len())));
            }
            factories.push(Factory {
                tiles: ledger.claim_all(tiles, &format!("factory {f}"))?,
            });
        }

        let mut center = CenterPool::default();
        for &tile in &snapshot.center {
            if tile.is_marker() {
                center.place_marker(ledger.claim(tile, "center")?);
            } else {
                center.tiles.push(ledger.claim(tile, "center")?);
            }
        }

        let supply = TileSupply {
            bag: ledger.claim_all(&snapshot.bag, "bag")?,
            discard: ledger.claim_all(&snapshot.discard, "box")?,
        };

        if snapshot.boards.len() != config.num_players as usize {
            return Err(invalid(format!(
                "expected {} boards, got {}",
                config.num_players,
                snapshot.boards.len()
            )));
        }
        let boards = snapshot
            .boards
            .iter()
            .enumerate()
            .map(|(p, b)| rebuild_board(b, p, &mut ledger))
            .collect::<Result<Vec<_>, _>>()?;

        if !ledger.is_complete() {
            return Err(invalid("tiles missing from snapshot"));
        }

        Ok(GameEngine {
            config,
            factories,
            center,
            supply,
            boards,
            round: snapshot.round,
            last_round: snapshot.last_round,
        })
    }
}

fn rebuild_board(
    snapshot: &BoardSnapshot,
    player: usize,
    ledger: &mut TileLedger,
) -> Result<PlayerBoard, EngineError> {
    let mut board = PlayerBoard::default();

    if snapshot.staging_rows.len() != BOARD_SIZE {
        return Err(invalid(format!("player {player}: expected 5 staging rows")));
    }
    for (r, row) in snapshot.staging_rows.iter().enumerate() {
        let at = format!("player {player} row {r}");
        if row.len() != r + 1 {
            return Err(invalid(format!("{at}: expected {} cells", r + 1)));
        }
        let filled = row.iter().take_while(|c| c.is_some()).count();
        if row[filled..].iter().any(Option::is_some) {
            return Err(invalid(format!("{at}: tiles not packed to the left")));
        }
        let first_color = row.first().copied().flatten().and_then(|t| t.color());
        for (cell, &tile) in board.staging_rows[r].iter_mut().zip(row) {
            if let Some(tile) = tile {
                let tile = ledger.claim_regular(tile, &at)?;
                if tile.color() != first_color {
                    return Err(invalid(format!("{at}: mixed colors")));
                }
                *cell = Cell::Filled(tile);
            }
        }
    }

    if snapshot.wall.len() != BOARD_SIZE || snapshot.wall.iter().any(|r| r.len() != BOARD_SIZE) {
        return Err(invalid(format!("player {player}: wall must be 5x5")));
    }
    for (r, row) in snapshot.wall.iter().enumerate() {
        for (c, &tile) in row.iter().enumerate() {
            let Some(tile) = tile else { continue };
            let at = format!("player {player} wall ({r},{c})");
            let tile = ledger.claim_regular(tile, &at)?;
            if tile.color() != Some(wall_color(r, c)) {
                return Err(invalid(format!("{at}: color does not match the wall layout")));
            }
            board.wall[r][c] = Cell::Filled(tile);
        }
    }

    for &tile in &snapshot.floor {
        board.floor.push(ledger.claim(tile, &format!("player {player} floor"))?);
    }

    Ok(board)
}
