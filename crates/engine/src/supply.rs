//! Tile supply: the bag (draw pile) and the box (discard pile)

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::{regular_tiles, Tile};

/// Bag and box. Tiles only ever move between these and the rest of the game.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TileSupply {
    /// Draw pile
    pub bag: Vec<Tile>,
    /// Discard pile ("box"), recycled into the bag when the bag runs dry
    pub discard: Vec<Tile>,
}

impl TileSupply {
    /// A full bag of all regular tiles in random order
    pub fn new_shuffled(rng: &mut impl Rng) -> Self {
        let mut bag = regular_tiles();
        bag.shuffle(rng);
        TileSupply {
            bag,
            discard: Vec::new(),
        }
    }

    /// Draw a single random tile from the bag, refilling it from the box if needed.
    /// Returns None if both bag and box are empty.
    pub fn draw(&mut self, rng: &mut impl Rng) -> Option<Tile> {
        if self.bag.is_empty() {
            if self.discard.is_empty() {
                return None;
            }
            self.refill_bag(rng);
        }

        let pick = rng.random_range(0..self.bag.len());
        Some(self.bag.swap_remove(pick))
    }

    /// Move every tile from the box into the bag and shuffle it
    fn refill_bag(&mut self, rng: &mut impl Rng) {
        debug!("bag empty, reshuffling {} tiles from box", self.discard.len());
        self.bag.append(&mut self.discard);
        self.bag.shuffle(rng);
    }

    pub fn return_to_box(&mut self, tiles: impl IntoIterator<Item = Tile>) {
        self.discard.extend(tiles);
    }

    pub fn len(&self) -> usize {
        self.bag.len() + self.discard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bag.is_empty() && self.discard.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, REGULAR_TILES};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_supply_holds_every_regular_tile() {
        let mut rng = StdRng::seed_from_u64(42);
        let supply = TileSupply::new_shuffled(&mut rng);

        assert_eq!(supply.bag.len(), REGULAR_TILES);
        assert!(supply.discard.is_empty());
        let mut ids: Vec<_> = supply.bag.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..REGULAR_TILES as u8).collect::<Vec<_>>());
    }

    #[test]
    fn test_draw_refills_from_box() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut supply = TileSupply::default();
        supply.return_to_box(regular_tiles().into_iter().take(3));

        let tile = supply.draw(&mut rng).expect("box should refill the bag");
        assert_eq!(tile.color(), Some(Color::Red));
        assert!(supply.discard.is_empty(), "box should be cleared on refill");
        assert_eq!(supply.bag.len(), 2);
    }

    #[test]
    fn test_draw_from_empty_supply() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut supply = TileSupply::default();
        assert!(supply.draw(&mut rng).is_none());
    }

    #[test]
    fn test_draw_prefers_bag_over_box() {
        let mut rng = StdRng::seed_from_u64(7);
        let tiles = regular_tiles();
        let mut supply = TileSupply {
            bag: vec![tiles[0]],
            discard: vec![tiles[50], tiles[51]],
        };

        assert_eq!(supply.draw(&mut rng), Some(tiles[0]));
        assert_eq!(supply.discard.len(), 2, "box untouched while bag has tiles");
    }

    #[test]
    fn test_same_seed_same_draws() {
        let draws = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut supply = TileSupply::new_shuffled(&mut rng);
            (0..30)
                .map(|_| supply.draw(&mut rng).map(|t| t.id))
                .collect::<Vec<_>>()
        };
        assert_eq!(draws(12345), draws(12345));
    }
}
