//! Tile index: geohash cells used as spatial bucket keys.
//!
//! Two precisions are used by convention. Coarse tiles (7 characters, roughly
//! 150m x 150m near the equator) group spawns for low-zoom map clustering.
//! Fine tiles (8 characters, roughly 40m x 20m) key close-range lookups.

use crate::error::GeoError;
use crate::geo::{encode, encode_nonzero, Geohash};
use crate::types::{Coordinate, SpawnEntity};
use std::collections::HashSet;
use std::num::NonZeroUsize;

const COARSE_CHARS: NonZeroUsize = match NonZeroUsize::new(7) {
    Some(p) => p,
    None => panic!("coarse precision must be positive"),
};
const FINE_CHARS: NonZeroUsize = match NonZeroUsize::new(8) {
    Some(p) => p,
    None => panic!("fine precision must be positive"),
};

/// Standard tile precisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TilePrecision {
    /// 7-character tile, used for clustering
    Coarse,
    /// 8-character tile, used for fine-grained lookup
    Fine,
}

impl TilePrecision {
    /// Number of geohash characters for this precision.
    pub fn chars(self) -> usize {
        self.non_zero().get()
    }

    fn non_zero(self) -> NonZeroUsize {
        match self {
            TilePrecision::Coarse => COARSE_CHARS,
            TilePrecision::Fine => FINE_CHARS,
        }
    }
}

/// Returns the tile id of a point at a caller-supplied precision.
///
/// Thin wrapper over [`encode`]; callers normally pass 7 or 8.
pub fn tile_id_for(lat: f64, lon: f64, precision: usize) -> Result<Geohash, GeoError> {
    encode(lat, lon, precision)
}

/// Returns the tile id of a point at one of the standard precisions.
pub fn tile_for(coord: Coordinate, precision: TilePrecision) -> Geohash {
    encode_nonzero(coord.latitude, coord.longitude, precision.non_zero())
}

/// Coarse and fine tile ids of a single point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileTags {
    pub coarse: Geohash,
    pub fine: Geohash,
}

impl TileTags {
    /// Computes both standard tags for `coord`.
    pub fn for_coordinate(coord: Coordinate) -> Self {
        Self {
            coarse: tile_for(coord, TilePrecision::Coarse),
            fine: tile_for(coord, TilePrecision::Fine),
        }
    }
}

/// Coarse tile of an entity, computing it when the stored tag is missing.
pub fn coarse_tile_of(entity: &SpawnEntity) -> Geohash {
    entity
        .tile_id_coarse
        .clone()
        .unwrap_or_else(|| tile_for(entity.spawn_location, TilePrecision::Coarse))
}

/// The coarse tile containing `coord` followed by its neighbors.
///
/// This is the tile set a map view requests spawns for.
pub fn tiles_around(coord: Coordinate) -> Vec<Geohash> {
    let center = tile_for(coord, TilePrecision::Coarse);
    let mut tiles = Vec::with_capacity(9);
    tiles.extend(center.neighbors());
    tiles.insert(0, center);
    tiles
}

/// Keeps the entities whose coarse tile is one of `tiles`.
///
/// Entities without a stored coarse tag are placed by their spawn location.
pub fn spawns_in_tiles<'a, I>(entities: I, tiles: &[Geohash]) -> Vec<SpawnEntity>
where
    I: IntoIterator<Item = &'a SpawnEntity>,
{
    let wanted: HashSet<&Geohash> = tiles.iter().collect();
    entities
        .into_iter()
        .filter(|entity| wanted.contains(&coarse_tile_of(entity)))
        .cloned()
        .collect()
}
