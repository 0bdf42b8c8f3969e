//! # Geotile - Command-line Entry Point
//!
//! Command-line front end for the geotile core: geohash encoding, tile
//! lookups, spawn clustering, eligibility checks, check-ins and single spawn
//! attempts. Every command prints JSON on stdout; logs go to stderr.
//!
//! ## Quick Start
//!
//! ```bash
//! # Coarse tile of a point (precision from geotile.toml)
//! geotile encode 1.29027 103.851959
//!
//! # Cells around a fine tile
//! geotile neighbors w21z7y0k
//!
//! # Is the player close enough to collect?
//! geotile eligible 1.29027 103.851959 1.2906 103.8522 --radius 50
//!
//! # Group exported spawns by coarse tile
//! geotile cluster spawns.json --log-level debug --json-logs
//! ```
//!
//! ## Configuration
//!
//! Settings are read from a TOML file (default: `geotile.toml`). If the file
//! doesn't exist, a default configuration is written there.

use tracing::error;

mod app;
mod cli;
mod config;
mod logging;

use app::Application;
use cli::CliArgs;
use config::AppConfig;

/// Runs the geotile command line.
///
/// 1. Command-line argument parsing
/// 2. Configuration loading (defaults when the file can't be read)
/// 3. Logging system initialization
/// 4. Application creation and execution
///
/// # Exit Codes
///
/// * **0**: Command completed
/// * **1**: Invalid configuration, invalid input, or a failed check-in/spawn
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let mut config = AppConfig::load_from_file(&args.config_path)
        .await
        .unwrap_or_default();
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }

    if let Err(e) = logging::setup_logging(&config.logging, args.json_logs) {
        eprintln!("❌ Failed to setup logging: {e}");
        std::process::exit(1);
    }

    match Application::new(args).await {
        Ok(app) => {
            if let Err(e) = app.run().await {
                error!("❌ Command failed: {e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            error!("❌ Failed to start: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}

pub use config::{EligibilitySettings, LoggingSettings, SpawnSettings, TileSettings};

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_config_file_round_trip_through_application() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("geotile.toml");
        tokio::fs::write(&path, "[eligibility]\nradius_m = 5.0\n")
            .await
            .unwrap();

        let args = CliArgs::try_parse_from([
            "geotile",
            "eligible",
            "1.29027",
            "103.851959",
            "1.2906",
            "103.8522",
            "--config",
            path.to_str().unwrap(),
        ])
        .unwrap();

        let app = Application::new(args).await.unwrap();
        assert_eq!(app.config().eligibility.radius_m, 5.0);
        let out = app.execute().await.unwrap();
        assert_eq!(out["eligible"], false);
    }

    #[tokio::test]
    async fn test_invalid_config_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("geotile.toml");
        tokio::fs::write(&path, "[tiles]\ncoarse_precision = 9\nfine_precision = 8\n")
            .await
            .unwrap();

        let args = CliArgs::try_parse_from([
            "geotile",
            "decode",
            "w21z",
            "-c",
            path.to_str().unwrap(),
        ])
        .unwrap();

        assert!(Application::new(args).await.is_err());
    }
}
