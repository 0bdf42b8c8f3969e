//! Pure geographic math: great-circle distance and the geohash codec.
//!
//! Everything here is stateless and allocation-light, so it can be called from
//! any thread or task without coordination.

pub mod distance;
pub mod geohash;

pub use distance::{distance_meters, EARTH_RADIUS_M};
pub use geohash::{
    decode_bounding_box, encode, encode_nonzero, neighbors, BoundingBox, Geohash, NeighborList, BASE32,
    MAX_PRECISION,
};
