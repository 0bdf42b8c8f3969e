//! Eligibility gate: proximity check deciding whether a user can collect a
//! spawn or check in at a location.

use crate::types::{Coordinate, SpawnEntity};
use serde::{Deserialize, Serialize};

/// Interaction radius used for both collecting and checking in.
pub const DEFAULT_ELIGIBILITY_RADIUS_M: f64 = 50.0;

/// Whether `user` is within `radius_m` meters of `target`. The boundary is
/// inclusive.
pub fn is_eligible(user: Coordinate, target: Coordinate, radius_m: f64) -> bool {
    user.distance_to(target) <= radius_m
}

/// Whether `user` may interact with `spawn` at the default 50m radius.
pub fn is_spawn_eligible(user: Coordinate, spawn: &SpawnEntity) -> bool {
    is_eligible(user, spawn.spawn_location, DEFAULT_ELIGIBILITY_RADIUS_M)
}

/// Outcome of a single gate check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Eligibility {
    pub distance_m: f64,
    pub eligible: bool,
}

/// Eligibility gate with a configurable radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EligibilityGate {
    pub radius_m: f64,
}

impl Default for EligibilityGate {
    fn default() -> Self {
        Self {
            radius_m: DEFAULT_ELIGIBILITY_RADIUS_M,
        }
    }
}

impl EligibilityGate {
    /// Creates a gate with a custom radius in meters.
    pub fn new(radius_m: f64) -> Self {
        Self { radius_m }
    }

    /// Measures the distance and applies the radius.
    pub fn check(&self, user: Coordinate, target: Coordinate) -> Eligibility {
        let distance_m = user.distance_to(target);
        Eligibility {
            distance_m,
            eligible: distance_m <= self.radius_m,
        }
    }

    /// Keeps the spawns the user is close enough to interact with.
    pub fn filter<'a, I>(&self, user: Coordinate, spawns: I) -> Vec<&'a SpawnEntity>
    where
        I: IntoIterator<Item = &'a SpawnEntity>,
    {
        spawns
            .into_iter()
            .filter(|spawn| self.check(user, spawn.spawn_location).eligible)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CreatureId, Rarity};

    fn spawn_at(lat: f64, lon: f64) -> SpawnEntity {
        SpawnEntity::new(CreatureId::new(), Coordinate::new(lat, lon), Rarity::Common)
    }

    #[test]
    fn test_near_and_far() {
        let user = Coordinate::new(1.29027, 103.851959);
        let near = spawn_at(1.2906, 103.8522); // ~45m
        let far = spawn_at(1.30027, 103.861959); // ~1.5km

        assert!(is_spawn_eligible(user, &near));
        assert!(!is_spawn_eligible(user, &far));
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let user = Coordinate::new(1.29027, 103.851959);
        let target = Coordinate::new(1.2906, 103.8522);
        let exact = user.distance_to(target);

        assert!(is_eligible(user, target, exact));
        assert!(!is_eligible(user, target, exact - 1e-6));
    }

    #[test]
    fn test_same_point_always_eligible() {
        let p = Coordinate::new(-33.8688, 151.2093);
        assert!(is_eligible(p, p, 0.0));
    }

    #[test]
    fn test_gate_check_and_filter() {
        let gate = EligibilityGate::default();
        assert_eq!(gate.radius_m, 50.0);

        let user = Coordinate::new(1.29027, 103.851959);
        let near = spawn_at(1.2906, 103.8522);
        let far = spawn_at(1.30027, 103.861959);

        let result = gate.check(user, far.spawn_location);
        assert!(!result.eligible);
        assert!(result.distance_m > 1_000.0);

        let spawns = vec![near.clone(), far];
        let visible = gate.filter(user, &spawns);
        assert_eq!(visible, vec![&near]);

        let wide = EligibilityGate::new(2_000.0);
        assert_eq!(wide.filter(user, &spawns).len(), 2);
    }
}
