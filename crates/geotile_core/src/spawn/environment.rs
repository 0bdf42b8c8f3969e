//! Eco-locations, their green-plan targets, and environmental conditions that
//! boost spawn rarity.

use crate::eligibility::{EligibilityGate, DEFAULT_ELIGIBILITY_RADIUS_M};
use crate::types::Coordinate;
use serde::{Deserialize, Serialize};

/// Kinds of real-world places a user can check in at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EcoLocationType {
    NaturePark,
    CommunityGarden,
    EvChargingStation,
    RecyclingCenter,
    AbcWatersSite,
    RecyclingBin,
}

/// Sustainability targets a location contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GreenPlanTarget {
    CityInNature,
    EnergyReset,
    SustainableLiving,
    GreenEconomy,
    ResilientFuture,
}

impl GreenPlanTarget {
    /// Stable key used in cooldown bookkeeping.
    pub fn as_str(self) -> &'static str {
        match self {
            GreenPlanTarget::CityInNature => "city_in_nature",
            GreenPlanTarget::EnergyReset => "energy_reset",
            GreenPlanTarget::SustainableLiving => "sustainable_living",
            GreenPlanTarget::GreenEconomy => "green_economy",
            GreenPlanTarget::ResilientFuture => "resilient_future",
        }
    }
}

impl EcoLocationType {
    /// Green-plan target credited for visiting this kind of location.
    pub fn target(self) -> GreenPlanTarget {
        match self {
            EcoLocationType::NaturePark | EcoLocationType::CommunityGarden => {
                GreenPlanTarget::CityInNature
            }
            EcoLocationType::EvChargingStation => GreenPlanTarget::EnergyReset,
            EcoLocationType::RecyclingCenter | EcoLocationType::RecyclingBin => {
                GreenPlanTarget::SustainableLiving
            }
            EcoLocationType::AbcWatersSite => GreenPlanTarget::ResilientFuture,
        }
    }
}

/// A place users can check in at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcoLocation {
    pub id: String,
    pub name: String,
    pub kind: EcoLocationType,
    pub coordinates: Coordinate,
    /// How close a user must stand to check in, in meters
    #[serde(default = "default_verification_radius")]
    pub verification_radius_m: f64,
}

fn default_verification_radius() -> f64 {
    DEFAULT_ELIGIBILITY_RADIUS_M
}

impl EcoLocation {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: EcoLocationType, coordinates: Coordinate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            coordinates,
            verification_radius_m: DEFAULT_ELIGIBILITY_RADIUS_M,
        }
    }

    /// Replaces the default 50m check-in radius.
    pub fn with_verification_radius(mut self, radius_m: f64) -> Self {
        self.verification_radius_m = radius_m;
        self
    }

    /// Gate that accepts users within this location's check-in radius.
    pub fn verification_gate(&self) -> EligibilityGate {
        EligibilityGate::new(self.verification_radius_m)
    }
}

/// Current environmental readings at the user's location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSnapshot {
    /// Air quality index
    pub air_quality: f64,
    pub temperature_c: f64,
    pub uv_index: f64,
}

impl EnvironmentSnapshot {
    /// Good air, bearable heat and moderate UV boost rarity odds.
    pub fn should_boost(&self) -> bool {
        self.air_quality < 100.0 && self.temperature_c < 33.0 && self.uv_index < 9.0
    }
}
