//! Main application logic.
//!
//! The `Application` struct merges configuration with CLI overrides and runs
//! the requested operation against the geotile core, printing JSON to stdout.

use crate::cli::{CliArgs, CliCommand};
use crate::config::AppConfig;
use geotile_core::geo::MAX_PRECISION;
use geotile_core::spawn::{experience_for, CooldownTracker, EcoLocation, SpawnPipeline};
use geotile_core::utils::entities_from_json;
use geotile_core::{
    check_in, cluster_by_tile, current_timestamp_ms, decode_bounding_box, distance_meters, encode,
    neighbors, tile_id_for, EligibilityGate, Geohash,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

/// Application state for a single invocation.
pub struct Application {
    /// Loaded application configuration
    config: AppConfig,
    /// Operation to run
    command: CliCommand,
    /// Spawn pipeline sharing one cooldown tracker
    pipeline: SpawnPipeline,
}

impl Application {
    /// Creates a new application instance.
    ///
    /// Loads configuration, applies CLI overrides and validates the merged
    /// settings.
    ///
    /// # Arguments
    ///
    /// * `args` - Parsed command-line arguments
    ///
    /// # Returns
    ///
    /// A configured `Application` ready to run, or an error if the
    /// configuration could not be loaded or is invalid.
    pub async fn new(args: CliArgs) -> Result<Self, Box<dyn std::error::Error>> {
        debug!("🔧 Loading configuration from: {}", args.config_path.display());
        let config = AppConfig::load_from_file(&args.config_path).await?;
        Self::with_config(config, args)
    }

    /// Creates an application from an already loaded configuration.
    pub fn with_config(mut config: AppConfig, args: CliArgs) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(log_level) = args.log_level {
            config.logging.level = log_level;
        }

        if args.json_logs {
            config.logging.json_format = true;
        }

        if let Err(e) = config.validate() {
            return Err(format!("Configuration validation failed: {e}").into());
        }

        let pipeline = SpawnPipeline::new(config.to_spawn_config(), Arc::new(CooldownTracker::new()));

        Ok(Self {
            config,
            command: args.command,
            pipeline,
        })
    }

    /// The merged configuration in effect.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Runs the command and prints its result as pretty JSON.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let output = self.execute().await?;
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    /// Runs the command and returns its JSON result.
    pub async fn execute(&self) -> Result<Value, Box<dyn std::error::Error>> {
        let output = match &self.command {
            CliCommand::Encode { point, precision } => {
                let precision = precision.unwrap_or(self.config.tiles.coarse_precision);
                if precision > MAX_PRECISION {
                    return Err(format!(
                        "precision must be between 1 and {MAX_PRECISION}, got {precision}"
                    )
                    .into());
                }
                let hash = encode(point.latitude, point.longitude, precision)?;
                json!({ "geohash": hash, "precision": precision })
            }
            CliCommand::Decode { hash } => {
                let bbox = decode_bounding_box(hash)?;
                json!({
                    "geohash": hash,
                    "bounding_box": bbox.as_array(),
                    "center": bbox.center(),
                })
            }
            CliCommand::Neighbors { hash } => {
                let cells = neighbors(hash)?;
                json!({ "geohash": hash, "neighbors": cells.as_slice() })
            }
            CliCommand::Tiles { point } => {
                let tiles = &self.config.tiles;
                let coarse = tile_id_for(point.latitude, point.longitude, tiles.coarse_precision)?;
                let fine = tile_id_for(point.latitude, point.longitude, tiles.fine_precision)?;
                let mut around: Vec<Geohash> = vec![coarse.clone()];
                around.extend(coarse.neighbors());
                json!({ "coarse": coarse, "fine": fine, "around": around })
            }
            CliCommand::Distance { from, to } => {
                let meters = distance_meters(from.latitude, from.longitude, to.latitude, to.longitude);
                json!({ "distance_m": meters })
            }
            CliCommand::Eligible { user, target, radius_m } => {
                let gate = match radius_m {
                    Some(radius) => EligibilityGate::new(*radius),
                    None => self.config.gate(),
                };
                let check = gate.check(*user, *target);
                json!({
                    "distance_m": check.distance_m,
                    "radius_m": gate.radius_m,
                    "eligible": check.eligible,
                })
            }
            CliCommand::Cluster { input } => {
                let content = tokio::fs::read_to_string(input).await?;
                let entities = entities_from_json(&content)?;
                let clusters = cluster_by_tile(&entities);
                info!(
                    "🗺️ Clustered {} spawns into {} tiles",
                    entities.len(),
                    clusters.len()
                );
                serde_json::to_value(clusters)?
            }
            CliCommand::CheckIn { location_id, kind, location, user, user_id } => {
                let eco = EcoLocation::new(location_id.as_str(), location_id.as_str(), *kind, *location)
                    .with_verification_radius(self.config.eligibility.radius_m);
                let record = check_in(&eco.verification_gate(), &eco, *user, user_id, current_timestamp_ms())?;
                info!("📍 {} checked in at {}", record.user_id, record.eco_location_id);
                serde_json::to_value(record)?
            }
            CliCommand::Spawn { location_id, kind, location, user, user_id, environment } => {
                let eco = EcoLocation::new(location_id.as_str(), location_id.as_str(), *kind, *location);
                let spawned = self.pipeline.try_spawn(
                    &eco,
                    *user,
                    user_id,
                    environment,
                    current_timestamp_ms(),
                    &mut rand::thread_rng(),
                )?;
                let experience = spawned
                    .as_ref()
                    .map(|creature| experience_for(creature.rarity, false, false));
                json!({
                    "target": kind.target().as_str(),
                    "boosted": environment.should_boost(),
                    "creature": spawned,
                    "experience": experience,
                })
            }
        };
        Ok(output)
    }
}
