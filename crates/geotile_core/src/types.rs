//! # Core Type Definitions
//!
//! Value types shared by every part of the geotile core.
//!
//! ## Key Types
//!
//! - [`Coordinate`] - latitude/longitude pair in degrees
//! - [`CreatureId`] - unique identifier of a spawned creature
//! - [`Rarity`] - rarity tier rolled by the spawn pipeline
//! - [`SpawnEntity`] - a point-located creature carrying its tile tags
//!
//! All types are plain values: cheap to clone, serializable, and never shared
//! by reference across calls.

use crate::geo::{distance_meters, Geohash};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A position on the globe in degrees.
///
/// Latitude is expected in `[-90, 90]` and longitude in `[-180, 180]`; values
/// outside those ranges are not rejected.
///
/// # Examples
///
/// ```rust
/// use geotile_core::Coordinate;
///
/// let merlion = Coordinate::new(1.2868, 103.8545);
/// let mbs = Coordinate::new(1.2834, 103.8607);
/// assert!(merlion.distance_to(mbs) < 1_000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate from latitude and longitude in degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Haversine distance to `other` in meters.
    pub fn distance_to(&self, other: Coordinate) -> f64 {
        distance_meters(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// Unique identifier for a spawned creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatureId(pub Uuid);

impl CreatureId {
    /// Creates a new random creature ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CreatureId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::str::FromStr for CreatureId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl std::fmt::Display for CreatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rarity tier of a creature, ordered from most to least common.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// All tiers in roll order.
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    /// Position of the tier in [`Rarity::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A creature placed at a fixed location on the map.
///
/// Tile tags are computed once when the creature spawns and never change,
/// because spawned creatures do not move. Entities loaded from older data may
/// lack tags; the cluster engine buckets those under
/// [`UNKNOWN_TILE`](crate::cluster::UNKNOWN_TILE).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnEntity {
    pub id: CreatureId,
    pub spawn_location: Coordinate,
    #[serde(default)]
    pub rarity: Rarity,
    /// Coarse (7-character) tile used for clustering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_id_coarse: Option<Geohash>,
    /// Fine (8-character) tile used for close-range lookup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_id_fine: Option<Geohash>,
}

impl SpawnEntity {
    /// Creates an untagged entity at `location`.
    pub fn new(id: CreatureId, spawn_location: Coordinate, rarity: Rarity) -> Self {
        Self {
            id,
            spawn_location,
            rarity,
            tile_id_coarse: None,
            tile_id_fine: None,
        }
    }

    /// Creates an entity with both tile tags computed from its location.
    pub fn tagged(id: CreatureId, spawn_location: Coordinate, rarity: Rarity) -> Self {
        let tags = crate::tiles::TileTags::for_coordinate(spawn_location);
        Self {
            id,
            spawn_location,
            rarity,
            tile_id_coarse: Some(tags.coarse),
            tile_id_fine: Some(tags.fine),
        }
    }

    /// Attaches explicit tile tags, used when tags come from stored data.
    pub fn with_tiles(mut self, coarse: Geohash, fine: Geohash) -> Self {
        self.tile_id_coarse = Some(coarse);
        self.tile_id_fine = Some(fine);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Rarity::Legendary).unwrap(), "\"legendary\"");
        let r: Rarity = serde_json::from_str("\"uncommon\"").unwrap();
        assert_eq!(r, Rarity::Uncommon);
        assert_eq!(Rarity::ALL[Rarity::Epic.index()], Rarity::Epic);
        assert_eq!(Rarity::default(), Rarity::Common);
    }

    #[test]
    fn test_tagged_entity_has_both_tiles() {
        let entity = SpawnEntity::tagged(CreatureId::new(), Coordinate::new(1.29027, 103.851959), Rarity::Rare);
        let coarse = entity.tile_id_coarse.as_ref().unwrap();
        let fine = entity.tile_id_fine.as_ref().unwrap();
        assert_eq!(coarse.len(), 7);
        assert_eq!(fine.len(), 8);
        assert!(coarse.is_prefix_of(fine));
    }

    #[test]
    fn test_entity_json_without_tags() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "spawn_location": { "latitude": 1.0, "longitude": 103.8 }
        }"#;
        let entity: SpawnEntity = serde_json::from_str(json).unwrap();
        assert_eq!(entity.rarity, Rarity::Common);
        assert!(entity.tile_id_coarse.is_none());
        assert_eq!(entity.id.to_string(), "550e8400-e29b-41d4-a716-446655440000");
    }
}
