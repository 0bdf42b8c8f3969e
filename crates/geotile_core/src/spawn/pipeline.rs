//! Spawn pipeline: decides whether a check-in at an eco-location yields a
//! creature, and which rarity it gets.

use super::cooldown::{CooldownTracker, DEFAULT_COOLDOWN};
use super::environment::{EcoLocation, EnvironmentSnapshot};
use super::rarity::RarityTable;
use crate::eligibility::EligibilityGate;
use crate::error::GeoError;
use crate::types::{Coordinate, CreatureId, SpawnEntity};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Settings for a [`SpawnPipeline`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnConfig {
    pub gate: EligibilityGate,
    pub cooldown: Duration,
    pub rarity: RarityTable,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            gate: EligibilityGate::default(),
            cooldown: DEFAULT_COOLDOWN,
            rarity: RarityTable::default(),
        }
    }
}

/// Spawns creatures at eco-locations, gated by distance and cooldown.
///
/// The cooldown tracker is injected so several pipelines (or request
/// handlers) can share it.
#[derive(Debug, Clone)]
pub struct SpawnPipeline {
    config: SpawnConfig,
    cooldowns: Arc<CooldownTracker>,
}

impl SpawnPipeline {
    pub fn new(config: SpawnConfig, cooldowns: Arc<CooldownTracker>) -> Self {
        Self { config, cooldowns }
    }

    pub fn cooldowns(&self) -> &Arc<CooldownTracker> {
        &self.cooldowns
    }

    /// Attempts a spawn for `user_id` standing at `user_location`.
    ///
    /// Returns `Ok(None)` while the user's cooldown for the location's target
    /// is running. On success the creature appears where the user stands,
    /// tagged with its tiles, and the cooldown restarts.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::NotEligible`] when the user is outside the gate
    /// radius of the location.
    pub fn try_spawn<R: Rng + ?Sized>(
        &self,
        location: &EcoLocation,
        user_location: Coordinate,
        user_id: &str,
        environment: &EnvironmentSnapshot,
        now_ms: u64,
        rng: &mut R,
    ) -> Result<Option<SpawnEntity>, GeoError> {
        let check = self.config.gate.check(user_location, location.coordinates);
        if !check.eligible {
            return Err(GeoError::NotEligible {
                distance_m: check.distance_m,
                radius_m: self.config.gate.radius_m,
            });
        }

        let target = location.kind.target();
        if !self.cooldowns.is_ready(user_id, target, now_ms) {
            debug!(
                "⏳ Spawn for {} at {} skipped: {} cooldown active",
                user_id,
                location.id,
                target.as_str()
            );
            return Ok(None);
        }

        let boosted = environment.should_boost();
        let table = if boosted {
            self.config.rarity.boosted()
        } else {
            self.config.rarity
        };
        let rarity = table.roll(rng);

        let creature = SpawnEntity::tagged(CreatureId::new(), user_location, rarity);
        self.cooldowns
            .set_cooldown(user_id, target, now_ms, self.config.cooldown);

        info!(
            "✨ Spawned {:?} creature {} for {} at {} (boosted: {})",
            rarity, creature.id, user_id, location.id, boosted
        );
        Ok(Some(creature))
    }
}
