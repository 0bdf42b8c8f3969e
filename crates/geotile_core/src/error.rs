//! Error types for the geotile core.
//!
//! The geo math itself has almost no failure modes: distance, clustering and
//! eligibility are total functions. Only the geohash codec and the check-in /
//! spawn flow can reject their input.

/// Errors raised by the geotile core.
///
/// Codec errors are deterministic and signal a caller bug (a malformed hash),
/// so they are propagated rather than recovered locally.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeoError {
    /// A geohash contained a character outside the base-32 alphabet
    #[error("Invalid geohash character '{character}' at position {position}")]
    InvalidGeohashCharacter {
        /// The offending character
        character: char,
        /// Zero-based character index within the hash
        position: usize,
    },

    /// Requested geohash precision was not a positive integer
    #[error("Invalid geohash precision: {0} (must be at least 1)")]
    InvalidPrecision(usize),

    /// The user is outside the interaction radius of the target
    #[error("Not eligible: {distance_m:.1}m away, radius is {radius_m:.1}m")]
    NotEligible {
        /// Great-circle distance between user and target
        distance_m: f64,
        /// Radius the distance was checked against
        radius_m: f64,
    },

    /// Entity data supplied by a caller could not be interpreted
    #[error("Invalid entity data: {0}")]
    InvalidEntityData(String),
}

impl From<serde_json::Error> for GeoError {
    fn from(err: serde_json::Error) -> Self {
        GeoError::InvalidEntityData(err.to_string())
    }
}
