//! Game engine: move orchestration, round completion and scoring
//!
//! `GameEngine` owns every tile container of one game. The caller is the only
//! mutator and drives the game through [`GameEngine::act`]; the random source
//! is passed in on each call so seeded games replay exactly.

use log::{debug, error, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Cell, PlayerBoard, Wall};
use crate::config::EngineConfig;
use crate::error::{EngineError, IndexKind, SupplyCounts};
use crate::factory::{CenterPool, Factory};
use crate::moves::{Move, Placement, Selection};
use crate::supply::TileSupply;
use crate::types::{wall_column, PlayerIdx, Tile, BOARD_SIZE, FACTORY_CAPACITY, TOTAL_TILES};

/// Reward breakdown of the most recently completed round
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    /// Wall points plus floor penalties, per player
    pub per_player: Vec<i32>,
    /// Sum over all players; this is what `act` returns
    pub total: i32,
}

/// Complete game: supply, factories, center and player boards
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameEngine {
    pub(crate) config: EngineConfig,
    pub(crate) factories: Vec<Factory>,
    pub(crate) center: CenterPool,
    pub(crate) supply: TileSupply,
    pub(crate) boards: Vec<PlayerBoard>,
    /// Number of rounds completed so far (0 at game start)
    pub(crate) round: u32,
    pub(crate) last_round: Option<RoundSummary>,
}

impl GameEngine {
    /// Initialize a new game: shuffled bag, full factories, marker in the center
    pub fn new(config: EngineConfig, rng: &mut impl Rng) -> Result<Self, EngineError> {
        config.validate()?;

        let mut center = CenterPool::default();
        center.place_marker(Tile::marker());

        let mut engine = GameEngine {
            factories: vec![Factory::default(); config.num_factories()],
            boards: vec![PlayerBoard::default(); config.num_players as usize],
            center,
            supply: TileSupply::new_shuffled(rng),
            round: 0,
            last_round: None,
            config,
        };
        engine.refill_factories(rng)?;

        debug!(
            "new game: {} players, {} factories",
            engine.num_players(),
            engine.num_factories()
        );
        Ok(engine)
    }

    /// Permissive game with default settings for `num_players`
    pub fn new_game(num_players: u8, rng: &mut impl Rng) -> Result<Self, EngineError> {
        Self::new(EngineConfig::with_players(num_players), rng)
    }

    // =========================================================================
    // Read accessors
    // =========================================================================

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn num_players(&self) -> usize {
        self.boards.len()
    }

    pub fn num_factories(&self) -> usize {
        self.factories.len()
    }

    pub fn factories(&self) -> &[Factory] {
        &self.factories
    }

    pub fn center(&self) -> &CenterPool {
        &self.center
    }

    pub fn supply(&self) -> &TileSupply {
        &self.supply
    }

    pub fn bag(&self) -> &[Tile] {
        &self.supply.bag
    }

    /// The box
    pub fn discard(&self) -> &[Tile] {
        &self.supply.discard
    }

    pub fn boards(&self) -> &[PlayerBoard] {
        &self.boards
    }

    pub fn board(&self, player: PlayerIdx) -> Option<&PlayerBoard> {
        self.boards.get(player as usize)
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn last_round(&self) -> Option<&RoundSummary> {
        self.last_round.as_ref()
    }

    // =========================================================================
    // Moves
    // =========================================================================

    /// Apply a move for `player` and return the round reward (0 unless the
    /// move ended the round).
    ///
    /// Turn order is not checked. Indices out of range are rejected without
    /// touching the state. Under the default permissive configuration a color
    /// absent from the source is a no-op, and tiles a row cannot take go to
    /// the floor.
    pub fn act(
        &mut self,
        mv: Move,
        player: PlayerIdx,
        rng: &mut impl Rng,
    ) -> Result<i32, EngineError> {
        self.check_indices(mv, player)?;
        let p = player as usize;

        let available = match mv.selection {
            Selection::Factory(f) => self.factories[f as usize].contains(mv.color),
            Selection::Center => self.center.contains(mv.color),
        };
        if !available {
            if self.config.strict_selection {
                return Err(EngineError::IllegalSelection {
                    selection: mv.selection,
                    color: mv.color,
                });
            }
            warn!("player {player}: no {} at {}, nothing taken", mv.color, mv.selection);
            return self.try_complete_round(rng);
        }

        if !self.boards[p].is_legal_placement(mv.placement, mv.color) {
            if let Placement::Row(row) = mv.placement {
                if self.config.strict_placement {
                    return Err(EngineError::IllegalPlacement {
                        row,
                        color: mv.color,
                    });
                }
                let board = &self.boards[p];
                let r = row as usize;
                if !board.row_accepts(r, mv.color) {
                    warn!(
                        "player {player}: row {row} holds another color, {} tiles go to floor",
                        mv.color
                    );
                } else if board.row_is_full(r) {
                    warn!("player {player}: row {row} is full, {} tiles go to floor", mv.color);
                } else {
                    warn!(
                        "player {player}: wall row {row} already holds {}, row will be discarded",
                        mv.color
                    );
                }
            }
        }

        // Restored if the round this move finishes cannot be scored
        let rollback = self.ends_round(mv).then(|| self.clone());

        let tiles = match mv.selection {
            Selection::Factory(f) => {
                let (matched, rest) = self.factories[f as usize].fetch(mv.color);
                self.center.add_discard(rest);
                matched
            }
            Selection::Center => self.center.take(mv.color),
        };

        let taken = tiles.len();
        let floored = self.boards[p].place(tiles, mv.placement, mv.color);
        debug!("player {player}: {mv}, took {taken}, {floored} to floor");

        let result = self.try_complete_round(rng);
        if let (Err(_), Some(before)) = (&result, rollback) {
            *self = before;
        }
        result
    }

    /// Whether taking `mv.color` from `mv.selection` leaves no regular tiles
    /// on the table
    fn ends_round(&self, mv: Move) -> bool {
        let only_color = |tiles: &[Tile]| tiles.iter().all(|t| t.has_color(mv.color));
        match mv.selection {
            Selection::Factory(f) => {
                self.center.is_empty()
                    && self.factories.iter().enumerate().all(|(i, factory)| {
                        if i == f as usize {
                            only_color(&factory.tiles)
                        } else {
                            factory.is_empty()
                        }
                    })
            }
            Selection::Center => {
                self.factories.iter().all(Factory::is_empty) && only_color(&self.center.tiles)
            }
        }
    }

    /// Decode an integer move (see [`Move::from_raw`]) and apply it
    pub fn act_raw(
        &mut self,
        selection: usize,
        color: u8,
        placement: usize,
        player: usize,
        rng: &mut impl Rng,
    ) -> Result<i32, EngineError> {
        let mv = Move::from_raw(selection, color, placement, self.num_factories())?;
        let player = PlayerIdx::try_from(player).map_err(|_| EngineError::IndexOutOfRange {
            kind: IndexKind::Player,
            index: player,
            limit: self.num_players(),
        })?;
        self.act(mv, player, rng)
    }

    fn check_indices(&self, mv: Move, player: PlayerIdx) -> Result<(), EngineError> {
        if player as usize >= self.num_players() {
            return Err(EngineError::IndexOutOfRange {
                kind: IndexKind::Player,
                index: player as usize,
                limit: self.num_players(),
            });
        }
        if let Selection::Factory(f) = mv.selection {
            if f as usize >= self.num_factories() {
                return Err(EngineError::IndexOutOfRange {
                    kind: IndexKind::Selection,
                    index: f as usize,
                    limit: self.num_factories(),
                });
            }
        }
        if let Placement::Row(r) = mv.placement {
            if r as usize >= BOARD_SIZE {
                return Err(EngineError::IndexOutOfRange {
                    kind: IndexKind::Placement,
                    index: r as usize,
                    limit: BOARD_SIZE,
                });
            }
        }
        Ok(())
    }

    /// Enumerate the moves `player` may make under strict rules
    pub fn legal_moves(&self, player: PlayerIdx) -> Vec<Move> {
        let Some(board) = self.board(player) else {
            return Vec::new();
        };

        let sources = self
            .factories
            .iter()
            .enumerate()
            .map(|(f, factory)| (Selection::Factory(f as u8), factory.colors()))
            .chain(std::iter::once((Selection::Center, self.center.colors())));

        let mut moves = Vec::new();
        for (selection, colors) in sources {
            for color in colors {
                let placements = (0..BOARD_SIZE as u8)
                    .map(Placement::Row)
                    .chain(std::iter::once(Placement::Floor));
                for placement in placements {
                    if board.is_legal_placement(placement, color) {
                        moves.push(Move::new(selection, color, placement));
                    }
                }
            }
        }
        moves
    }

    // =========================================================================
    // Round completion
    // =========================================================================

    /// All factories empty and no regular tiles left in the center
    pub fn is_round_over(&self) -> bool {
        self.factories.iter().all(Factory::is_empty) && self.center.is_empty()
    }

    /// Some player has a completely filled wall row. Advisory only: the
    /// engine keeps accepting moves.
    pub fn is_game_over(&self) -> bool {
        self.boards.iter().any(PlayerBoard::has_complete_wall_row)
    }

    /// Score and reset the round if drafting is finished; otherwise a no-op
    /// returning 0.
    ///
    /// Fails with `SupplyExhausted`, leaving the state untouched, when the bag
    /// and box together with the tiles scoring would discard cannot refill
    /// every factory.
    pub fn try_complete_round(&mut self, rng: &mut impl Rng) -> Result<i32, EngineError> {
        if !self.is_round_over() {
            return Ok(0);
        }

        let needed = self.factories.len() * FACTORY_CAPACITY;
        let available =
            self.supply.len() + self.boards.iter().map(round_end_discards).sum::<usize>();
        if available < needed {
            let counts = self.counts();
            error!(
                "cannot score round {}: {available} tiles for {needed} factory slots ({counts})",
                self.round + 1
            );
            return Err(EngineError::SupplyExhausted { counts });
        }

        let per_player: Vec<i32> = self
            .boards
            .iter_mut()
            .map(|board| tile_wall(board, &mut self.supply, &mut self.center))
            .collect();
        let total = per_player.iter().sum();

        self.round += 1;
        info!("round {} complete: reward {total} {per_player:?}", self.round);
        self.last_round = Some(RoundSummary { per_player, total });

        self.refill_factories(rng)?;
        Ok(total)
    }

    /// Top every factory up to 4 tiles from the bag
    pub(crate) fn refill_factories(&mut self, rng: &mut impl Rng) -> Result<(), EngineError> {
        for f in 0..self.factories.len() {
            while !self.factories[f].is_full() {
                match self.supply.draw(rng) {
                    Some(tile) => self.factories[f].tiles.push(tile),
                    None => {
                        let counts = self.counts();
                        error!("tile supply exhausted refilling factory {f}: {counts}");
                        return Err(EngineError::SupplyExhausted { counts });
                    }
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // Tile accounting
    // =========================================================================

    pub fn counts(&self) -> SupplyCounts {
        SupplyCounts {
            bag: self.supply.bag.len(),
            discard: self.supply.discard.len(),
            factories: self.factories.iter().map(|f| f.tiles.len()).sum(),
            center: self.center.len(),
            staging: self.boards.iter().map(PlayerBoard::staging_count).sum(),
            wall: self.boards.iter().map(PlayerBoard::wall_count).sum(),
            floor: self.boards.iter().map(|b| b.floor.len()).sum(),
        }
    }

    /// Every tile in the game, wherever it currently is
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.supply
            .bag
            .iter()
            .chain(&self.supply.discard)
            .chain(self.factories.iter().flat_map(|f| &f.tiles))
            .chain(&self.center.tiles)
            .chain(&self.center.marker)
            .copied()
            .chain(self.boards.iter().flat_map(PlayerBoard::tiles))
    }

    /// Verify that all 101 tiles exist exactly once
    pub fn check_conservation(&self) -> Result<SupplyCounts, EngineError> {
        let counts = self.counts();
        let mut seen = [false; TOTAL_TILES];
        for tile in self.tiles() {
            let slot = seen.get_mut(tile.id as usize);
            match slot {
                Some(s) if !*s => *s = true,
                _ => return Err(EngineError::ConservationViolated { counts }),
            }
        }
        if counts.total() != TOTAL_TILES || !seen.iter().all(|&s| s) {
            return Err(EngineError::ConservationViolated { counts });
        }
        Ok(counts)
    }
}

/// Move completed staging rows to the wall, apply the floor penalty and clear
/// the floor. Returns this board's reward for the round.
fn tile_wall(board: &mut PlayerBoard, supply: &mut TileSupply, center: &mut CenterPool) -> i32 {
    let mut reward = 0;

    for r in 0..BOARD_SIZE {
        if !board.row_is_full(r) {
            continue;
        }
        let row_tiles: Vec<Tile> = board.staging_rows[r]
            .iter_mut()
            .filter_map(|cell| std::mem::take(cell).tile())
            .collect();
        let Some((&first, rest)) = row_tiles.split_first() else {
            continue;
        };

        let col = first.color().map(|color| wall_column(r, color));
        match col {
            Some(col) if !board.wall[r][col].is_filled() => {
                board.wall[r][col] = Cell::Filled(first);
                reward += score_placement(&board.wall, r, col);
                supply.return_to_box(rest.iter().copied());
            }
            _ => {
                // Wall spot already taken: the whole row is discarded
                warn!("row {r} completed onto an occupied wall cell, discarding");
                supply.return_to_box(row_tiles.iter().copied());
            }
        }
    }

    reward += board.floor_penalty();
    let (markers, discards): (Vec<Tile>, Vec<Tile>) =
        board.floor.drain(..).partition(Tile::is_marker);
    for marker in markers {
        center.place_marker(marker);
    }
    supply.return_to_box(discards);

    reward
}

/// How many tiles `tile_wall` would send from this board to the box
fn round_end_discards(board: &PlayerBoard) -> usize {
    let rows: usize = (0..BOARD_SIZE)
        .filter(|&r| board.row_is_full(r))
        .map(|r| match board.row_color(r) {
            Some(color) if !board.wall_has(r, color) => r,
            _ => r + 1,
        })
        .sum();
    rows + board.floor.iter().filter(|t| !t.is_marker()).count()
}

/// Length of the horizontal run of filled cells through (row, col)
fn score_placement(wall: &Wall, row: usize, col: usize) -> i32 {
    let cells = &wall[row];
    let mut start = col;
    while start > 0 && cells[start - 1].is_filled() {
        start -= 1;
    }
    cells[start..].iter().take_while(|c| c.is_filled()).count() as i32
}
