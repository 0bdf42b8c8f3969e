//! Check-ins at eco-locations.
//!
//! A check-in is accepted only when the user stands within the eligibility
//! radius of the location. The resulting record carries the user's fine tile
//! and the coarse tile whose cached spawn list should be refreshed. Storing the
//! record is left to the caller.

use crate::eligibility::EligibilityGate;
use crate::error::GeoError;
use crate::geo::Geohash;
use crate::spawn::EcoLocation;
use crate::tiles::{tile_for, TilePrecision};
use crate::types::Coordinate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An accepted check-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckIn {
    /// `chk_<unix millis>`
    pub id: String,
    pub eco_location_id: String,
    pub user_id: String,
    /// Unix milliseconds
    pub at_ms: u64,
    pub user_location: Coordinate,
    pub tile_id_fine: Geohash,
    /// Coarse tiles whose spawn lists are stale after this check-in
    pub invalidated_tiles: Vec<Geohash>,
}

/// Validates proximity and builds a check-in record.
///
/// Callers normally pass the location's own
/// [`verification_gate`](EcoLocation::verification_gate).
///
/// # Errors
///
/// Returns [`GeoError::NotEligible`] when the user is farther than the gate's
/// radius from the location.
pub fn check_in(
    gate: &EligibilityGate,
    location: &EcoLocation,
    user_location: Coordinate,
    user_id: &str,
    now_ms: u64,
) -> Result<CheckIn, GeoError> {
    let result = gate.check(user_location, location.coordinates);
    if !result.eligible {
        return Err(GeoError::NotEligible {
            distance_m: result.distance_m,
            radius_m: gate.radius_m,
        });
    }

    debug!(
        "📍 Check-in by {} at {} ({:.1}m away)",
        user_id, location.id, result.distance_m
    );

    Ok(CheckIn {
        id: format!("chk_{now_ms}"),
        eco_location_id: location.id.clone(),
        user_id: user_id.to_string(),
        at_ms: now_ms,
        user_location,
        tile_id_fine: tile_for(user_location, TilePrecision::Fine),
        invalidated_tiles: vec![tile_for(user_location, TilePrecision::Coarse)],
    })
}
