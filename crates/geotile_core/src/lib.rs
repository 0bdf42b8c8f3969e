//! # Geotile Core
//!
//! Geospatial tiling and spawn-eligibility engine for a location-based
//! creature-collection game. It decides what a player can see on the map and
//! what they can collect or check in at.
//!
//! ## Data Flow
//!
//! ```text
//! lat/lon ──► geohash codec ──► tile tags on each spawn
//!                                  │
//!              low zoom  ◄─────────┴─────────►  high zoom
//!         cluster_by_tile                 eligibility gate
//!     (one badge per coarse tile)     (within 50m of the player)
//! ```
//!
//! ## Modules
//!
//! * [`geo`] - haversine distance and the geohash codec (encode, decode, neighbors)
//! * [`tiles`] - coarse/fine tile ids and tile-set lookups
//! * [`cluster`] - grouping spawns by coarse tile with a flat centroid
//! * [`eligibility`] - the 50m interaction gate
//! * [`checkin`] - proximity-validated check-in records
//! * [`spawn`] - rarity table, environmental boost, cooldowns and the spawn pipeline
//!
//! ## Quick Example
//!
//! ```rust
//! use geotile_core::{cluster_by_tile, is_spawn_eligible, Coordinate, CreatureId, Rarity, SpawnEntity};
//!
//! let player = Coordinate::new(1.29027, 103.851959);
//! let spawns = vec![
//!     SpawnEntity::tagged(CreatureId::new(), Coordinate::new(1.2906, 103.8522), Rarity::Common),
//!     SpawnEntity::tagged(CreatureId::new(), Coordinate::new(1.30027, 103.861959), Rarity::Rare),
//! ];
//!
//! let clusters = cluster_by_tile(&spawns);
//! assert_eq!(clusters.len(), 2);
//!
//! let collectable: Vec<_> = spawns.iter().filter(|s| is_spawn_eligible(player, s)).collect();
//! assert_eq!(collectable.len(), 1);
//! ```
//!
//! ## Thread Safety
//!
//! Everything except [`spawn::CooldownTracker`] is a pure function of its
//! inputs. The tracker uses a concurrent map and is shared through an `Arc`.

pub mod checkin;
pub mod cluster;
pub mod eligibility;
pub mod error;
pub mod geo;
pub mod spawn;
pub mod tiles;
pub mod types;
pub mod utils;


pub use checkin::{check_in, CheckIn};
pub use cluster::{cluster_by_tile, SpawnCluster, UNKNOWN_TILE};
pub use eligibility::{
    is_eligible, is_spawn_eligible, Eligibility, EligibilityGate, DEFAULT_ELIGIBILITY_RADIUS_M,
};
pub use error::GeoError;
pub use geo::{decode_bounding_box, distance_meters, encode, neighbors, BoundingBox, Geohash};
pub use tiles::{spawns_in_tiles, tile_for, tile_id_for, tiles_around, TilePrecision, TileTags};
pub use types::{Coordinate, CreatureId, Rarity, SpawnEntity};
pub use utils::current_timestamp_ms;
