use rand::{Rng, seq::IndexedRandom};
use serde::Serialize;

use crate::models::{SymbolId, VariantConfig};

/// A named family of tile images. Symbols `1..=symbols` map to one image each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileSet {
    pub id: u32,
    pub title: &'static str,
    pub symbols: usize,
}

pub static TILE_SETS: [TileSet; 12] = [
    TileSet::new(1, "DefJam", 26),
    TileSet::new(2, "Dr. Pepper", 27),
    TileSet::new(3, "ESPN", 34),
    TileSet::new(4, "Hard Rock", 35),
    TileSet::new(5, "Nike", 34),
    TileSet::new(6, "Playboy", 34),
    TileSet::new(7, "Travelocity", 37),
    TileSet::new(8, "Expedia", 35),
    TileSet::new(9, "Priceline", 32),
    TileSet::new(10, "Barnes & Noble", 37),
    TileSet::new(11, "Spinmaster", 34),
    TileSet::new(12, "Live Nation", 45),
];

impl TileSet {
    pub const fn new(id: u32, title: &'static str, symbols: usize) -> Self {
        Self { id, title, symbols }
    }

    pub fn find(id: u32) -> Option<&'static TileSet> {
        TILE_SETS.iter().find(|set| set.id == id)
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> &'static TileSet {
        // The catalog is a non-empty constant.
        TILE_SETS.choose(rng).unwrap_or(&TILE_SETS[0])
    }

    /// Image path of `symbol`, or `None` when the set has no such image.
    pub fn asset_path(&self, symbol: SymbolId) -> Option<String> {
        if symbol == 0 || symbol as usize > self.symbols {
            return None;
        }
        Some(format!(
            "eyecons/set{id}/set{id}-tile-{symbol:02}.jpg",
            id = self.id
        ))
    }

    /// A quickie board (pairs scattered over 56 stacks) using every image of the set once.
    pub fn variant(&self) -> VariantConfig {
        VariantConfig {
            symbol_count: self.symbols,
            ..VariantConfig::quickie()
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn asset_paths_are_zero_padded() {
        let espn = TileSet::find(3).unwrap();
        assert_eq!(
            espn.asset_path(7).as_deref(),
            Some("eyecons/set3/set3-tile-07.jpg")
        );
        assert_eq!(
            espn.asset_path(34).as_deref(),
            Some("eyecons/set3/set3-tile-34.jpg")
        );
        assert_eq!(espn.asset_path(0), None);
        assert_eq!(espn.asset_path(35), None);
    }

    #[test]
    fn every_set_fits_a_quickie_board() {
        for set in &TILE_SETS {
            let config = set.variant();
            assert_eq!(config.symbol_count, set.symbols);
            assert!(config.capacity() >= config.tile_count(), "{}", set.title);
        }
    }

    #[test]
    fn random_pick_comes_from_the_catalog() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            let set = TileSet::random(&mut rng);
            assert_eq!(TileSet::find(set.id), Some(set));
        }
    }
}
