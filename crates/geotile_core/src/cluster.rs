//! Cluster engine: groups spawns by coarse tile for low-zoom map rendering.
//!
//! Clusters are ephemeral. They are rebuilt from the current entity set on
//! every render pass and never persisted.

use crate::types::{Coordinate, SpawnEntity};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Bucket key for entities that carry no coarse tile tag.
pub const UNKNOWN_TILE: &str = "unknown";

/// A group of spawns sharing a coarse tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnCluster {
    /// Coarse tile id, or [`UNKNOWN_TILE`]
    pub tile_id: String,
    pub count: usize,
    /// Flat arithmetic mean of member latitudes and longitudes
    pub center: Coordinate,
    pub members: Vec<SpawnEntity>,
}

impl SpawnCluster {
    /// Whether the cluster holds one entity, which maps usually draw as a pin.
    pub fn is_single(&self) -> bool {
        self.count == 1
    }

    /// Whether this is the bucket of untagged entities.
    pub fn is_unknown(&self) -> bool {
        self.tile_id == UNKNOWN_TILE
    }
}

/// Groups entities by their precomputed coarse tile.
///
/// Clusters appear in the order their tile is first seen. The center is the
/// independent mean of latitudes and of longitudes, which is accurate at city
/// block scale but drifts for large tiles, near the poles and across the
/// antimeridian. Untagged entities are collected under [`UNKNOWN_TILE`] and
/// reported with a warning, since every spawn is tagged when created.
pub fn cluster_by_tile<'a, I>(entities: I) -> Vec<SpawnCluster>
where
    I: IntoIterator<Item = &'a SpawnEntity>,
{
    let mut order: Vec<(String, Vec<SpawnEntity>)> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut untagged = 0usize;

    for entity in entities {
        let key = match &entity.tile_id_coarse {
            Some(tile) => tile.as_str(),
            None => {
                untagged += 1;
                UNKNOWN_TILE
            }
        };

        match slots.get(key) {
            Some(&slot) => order[slot].1.push(entity.clone()),
            None => {
                slots.insert(key.to_string(), order.len());
                order.push((key.to_string(), vec![entity.clone()]));
            }
        }
    }

    if untagged > 0 {
        warn!(
            untagged,
            "🗺️ {} spawn(s) without a coarse tile were clustered under '{}'", untagged, UNKNOWN_TILE
        );
    }

    order
        .into_iter()
        .map(|(tile_id, members)| {
            let count = members.len();
            let n = count as f64;
            let (lat_sum, lon_sum) = members.iter().fold((0.0, 0.0), |(lat, lon), m| {
                (lat + m.spawn_location.latitude, lon + m.spawn_location.longitude)
            });
            SpawnCluster {
                tile_id,
                count,
                center: Coordinate::new(lat_sum / n, lon_sum / n),
                members,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Geohash;
    use crate::types::{CreatureId, Rarity};

    fn creature(lat: f64, lon: f64, tile: &str) -> SpawnEntity {
        let coarse: Geohash = tile.parse().unwrap();
        let fine: Geohash = format!("{tile}x").parse().unwrap();
        SpawnEntity::new(CreatureId::new(), Coordinate::new(lat, lon), Rarity::Common)
            .with_tiles(coarse, fine)
    }

    #[test]
    fn test_clusters_by_coarse_tile() {
        let a1 = creature(1.0, 103.8, "w21z7y0");
        let a2 = creature(1.001, 103.801, "w21z7y0");
        let b1 = creature(1.02, 103.82, "w21z7y1");

        let clusters = cluster_by_tile(&[a1, a2, b1]);
        assert_eq!(clusters.len(), 2);

        assert_eq!(clusters[0].tile_id, "w21z7y0");
        assert_eq!(clusters[0].count, 2);
        assert!((clusters[0].center.latitude - 1.0005).abs() < 1e-12);
        assert!((clusters[0].center.longitude - 103.8005).abs() < 1e-9);

        assert_eq!(clusters[1].tile_id, "w21z7y1");
        assert_eq!(clusters[1].count, 1);
        assert!(clusters[1].is_single());
    }

    #[test]
    fn test_empty_input() {
        let none: Vec<SpawnEntity> = Vec::new();
        assert!(cluster_by_tile(&none).is_empty());
    }

    #[test]
    fn test_single_entity_center_is_location() {
        let only = creature(1.2868, 103.8545, "w21z7y0");
        let clusters = cluster_by_tile(std::slice::from_ref(&only));
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].count, 1);
        assert_eq!(clusters[0].center, only.spawn_location);
        assert_eq!(clusters[0].members, vec![only]);
    }

    #[test]
    fn test_untagged_go_to_unknown_bucket() {
        let tagged = creature(1.0, 103.8, "w21z7y0");
        let loose_a = SpawnEntity::new(CreatureId::new(), Coordinate::new(2.0, 104.0), Rarity::Rare);
        let loose_b = SpawnEntity::new(CreatureId::new(), Coordinate::new(4.0, 106.0), Rarity::Epic);

        let clusters = cluster_by_tile(&[loose_a, tagged, loose_b]);
        assert_eq!(clusters.len(), 2);
        assert!(clusters[0].is_unknown());
        assert_eq!(clusters[0].count, 2);
        assert_eq!(clusters[0].center, Coordinate::new(3.0, 105.0));
        assert_eq!(clusters[1].tile_id, "w21z7y0");
    }

    #[test]
    fn test_preserves_first_seen_order() {
        let input = [
            creature(0.0, 0.0, "s0000000"),
            creature(0.0, 0.0, "s0000001"),
            creature(0.0, 0.0, "s0000000"),
            creature(0.0, 0.0, "s0000002"),
        ];
        let ids: Vec<String> = cluster_by_tile(&input).into_iter().map(|c| c.tile_id).collect();
        assert_eq!(ids, vec!["s0000000", "s0000001", "s0000002"]);
    }
}
