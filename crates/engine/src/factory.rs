//! Factory displays and the center pool

use serde::{Deserialize, Serialize};

use crate::types::{Color, Tile, FACTORY_CAPACITY};

/// A single factory display (holds up to 4 tiles)
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Factory {
    pub tiles: Vec<Tile>,
}

impl Factory {
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tiles.len() >= FACTORY_CAPACITY
    }

    pub fn contains(&self, color: Color) -> bool {
        self.tiles.iter().any(|t| t.has_color(color))
    }

    /// Take every tile of `color`; the rest is returned for the center.
    ///
    /// If the factory holds no tile of `color` nothing changes and both
    /// collections are empty. Otherwise the factory ends up empty.
    pub fn fetch(&mut self, color: Color) -> (Vec<Tile>, Vec<Tile>) {
        if !self.contains(color) {
            return (Vec::new(), Vec::new());
        }
        std::mem::take(&mut self.tiles)
            .into_iter()
            .partition(|t| t.has_color(color))
    }

    /// Distinct colors on offer, in tile order
    pub fn colors(&self) -> Vec<Color> {
        distinct_colors(&self.tiles)
    }
}

/// Center pool: leftover factory tiles plus possibly the first player marker
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct CenterPool {
    pub tiles: Vec<Tile>,
    pub marker: Option<Tile>,
}

impl CenterPool {
    /// Take all tiles of `color`, plus the marker if it is still here.
    /// A color that is absent leaves the pool (and the marker) untouched.
    pub fn take(&mut self, color: Color) -> Vec<Tile> {
        if !self.contains(color) {
            return Vec::new();
        }
        let (mut taken, rest): (Vec<Tile>, Vec<Tile>) = std::mem::take(&mut self.tiles)
            .into_iter()
            .partition(|t| t.has_color(color));
        self.tiles = rest;
        taken.extend(self.marker.take());
        taken
    }

    pub fn add_discard(&mut self, tiles: impl IntoIterator<Item = Tile>) {
        self.tiles.extend(tiles);
    }

    pub fn place_marker(&mut self, marker: Tile) {
        debug_assert!(marker.is_marker());
        self.marker = Some(marker);
    }

    pub fn contains(&self, color: Color) -> bool {
        self.tiles.iter().any(|t| t.has_color(color))
    }

    pub fn has_marker(&self) -> bool {
        self.marker.is_some()
    }

    /// True when no regular tiles are left. The marker does not count.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Number of tiles held, marker included
    pub fn len(&self) -> usize {
        self.tiles.len() + usize::from(self.marker.is_some())
    }

    pub fn colors(&self) -> Vec<Color> {
        distinct_colors(&self.tiles)
    }
}

fn distinct_colors(tiles: &[Tile]) -> Vec<Color> {
    let mut colors = Vec::new();
    for color in tiles.iter().filter_map(Tile::color) {
        if !colors.contains(&color) {
            colors.push(color);
        }
    }
    colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Tile, Token};

    fn tile(id: u8) -> Tile {
        Tile::from_id(id).unwrap()
    }

    // ids: 0..20 red, 20..40 blue, 40..60 teal, 60..80 yellow, 80..100 black
    fn red(k: u8) -> Tile {
        tile(k)
    }
    fn blue(k: u8) -> Tile {
        tile(20 + k)
    }
    fn yellow(k: u8) -> Tile {
        tile(60 + k)
    }

    #[test]
    fn test_fetch_partitions_and_empties() {
        let mut factory = Factory {
            tiles: vec![red(0), blue(0), red(1), yellow(0)],
        };

        let (matched, rest) = factory.fetch(Color::Red);

        assert_eq!(matched, vec![red(0), red(1)]);
        assert_eq!(rest, vec![blue(0), yellow(0)]);
        assert!(factory.is_empty());
    }

    #[test]
    fn test_fetch_absent_color_is_noop() {
        let mut factory = Factory {
            tiles: vec![red(0), red(1), blue(0), blue(1)],
        };

        let (matched, rest) = factory.fetch(Color::Black);

        assert!(matched.is_empty());
        assert!(rest.is_empty());
        assert_eq!(factory.tiles.len(), 4);
    }

    #[test]
    fn test_fetch_all_same_color() {
        let mut factory = Factory {
            tiles: vec![blue(0), blue(1), blue(2), blue(3)],
        };
        let (matched, rest) = factory.fetch(Color::Blue);
        assert_eq!(matched.len(), 4);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_center_take_claims_marker() {
        let mut center = CenterPool::default();
        center.place_marker(Tile::marker());
        center.add_discard([blue(0), red(0), blue(1)]);

        let taken = center.take(Color::Blue);

        assert_eq!(taken.len(), 3);
        assert_eq!(taken.last().map(|t| t.token), Some(Token::FirstPlayerMarker));
        assert!(!center.has_marker());
        assert_eq!(center.tiles, vec![red(0)]);

        // Marker only comes along once
        let taken = center.take(Color::Red);
        assert_eq!(taken, vec![red(0)]);
        assert_eq!(center.len(), 0);
    }

    #[test]
    fn test_center_take_absent_color_keeps_marker() {
        let mut center = CenterPool::default();
        center.place_marker(Tile::marker());
        center.add_discard([red(0)]);

        assert!(center.take(Color::Yellow).is_empty());
        assert!(center.has_marker());
        assert_eq!(center.len(), 2);
    }

    #[test]
    fn test_center_emptiness_ignores_marker() {
        let mut center = CenterPool::default();
        center.place_marker(Tile::marker());
        assert!(center.is_empty());
        assert_eq!(center.len(), 1);
    }

    #[test]
    fn test_distinct_colors_in_order() {
        let factory = Factory {
            tiles: vec![yellow(0), red(0), yellow(1), blue(0)],
        };
        assert_eq!(factory.colors(), vec![Color::Yellow, Color::Red, Color::Blue]);
    }
}
