//! Command-line interface handling for the geotile tool.
//!
//! This module provides command-line argument parsing using the `clap` crate.
//! Every subcommand maps onto one operation of the geotile core.

use clap::builder::RangedU64ValueParser;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use geotile_core::geo::MAX_PRECISION;
use geotile_core::spawn::{EcoLocationType, EnvironmentSnapshot};
use geotile_core::Coordinate;
use std::path::PathBuf;

/// Operation requested on the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Encode a point as a geohash
    Encode { point: Coordinate, precision: Option<usize> },
    /// Decode a geohash into its bounding box
    Decode { hash: String },
    /// List the cells surrounding a geohash
    Neighbors { hash: String },
    /// Coarse and fine tile ids of a point plus the surrounding coarse tiles
    Tiles { point: Coordinate },
    /// Great-circle distance between two points
    Distance { from: Coordinate, to: Coordinate },
    /// Whether a user is close enough to a target
    Eligible { user: Coordinate, target: Coordinate, radius_m: Option<f64> },
    /// Cluster spawns read from a JSON file
    Cluster { input: PathBuf },
    /// Validate a check-in at an eco-location
    CheckIn {
        location_id: String,
        kind: EcoLocationType,
        location: Coordinate,
        user: Coordinate,
        user_id: String,
    },
    /// Run the spawn pipeline once for a user at an eco-location
    Spawn {
        location_id: String,
        kind: EcoLocationType,
        location: Coordinate,
        user: Coordinate,
        user_id: String,
        environment: EnvironmentSnapshot,
    },
}

/// Command line arguments parsed from user input.
///
/// Global options override configuration file settings; the subcommand
/// selects the operation to run.
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Path to the configuration file
    pub config_path: PathBuf,
    /// Optional override for log level
    pub log_level: Option<String>,
    /// Whether to force JSON log output
    pub json_logs: bool,
    /// Operation to run
    pub command: CliCommand,
}

fn coordinate_args(cmd: Command, lat: &'static str, lon: &'static str, help: &'static str) -> Command {
    cmd.arg(
        Arg::new(lat)
            .required(true)
            .allow_negative_numbers(true)
            .value_parser(value_parser!(f64))
            .help(format!("{help} latitude in degrees")),
    )
    .arg(
        Arg::new(lon)
            .required(true)
            .allow_negative_numbers(true)
            .value_parser(value_parser!(f64))
            .help(format!("{help} longitude in degrees")),
    )
}

fn eco_location_args(cmd: Command) -> Command {
    let cmd = cmd
        .arg(Arg::new("location-id").required(true).help("Eco-location identifier"))
        .arg(
            Arg::new("kind")
                .required(true)
                .value_parser(parse_location_type)
                .help("Location type (nature_park, community_garden, ev_charging_station, recycling_center, abc_waters_site, recycling_bin)"),
        );
    let cmd = coordinate_args(cmd, "loc-lat", "loc-lon", "Location");
    coordinate_args(cmd, "user-lat", "user-lon", "User").arg(
        Arg::new("user")
            .short('u')
            .long("user")
            .value_name("ID")
            .default_value("local")
            .help("User identifier"),
    )
}

fn parse_location_type(value: &str) -> Result<EcoLocationType, String> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .map_err(|_| format!("unknown location type '{value}'"))
}

/// Builds the clap command definition.
pub fn command() -> Command {
    let hash_arg = || Arg::new("hash").required(true).help("Geohash string");

    Command::new("geotile")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Geohash tiling, spawn clustering and eligibility checks")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("geotile.toml")
                .global(true),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level (trace, debug, info, warn, error)")
                .global(true),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .help("Output logs in JSON format")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            coordinate_args(Command::new("encode").about("Encode a point as a geohash"), "lat", "lon", "Point").arg(
                Arg::new("precision")
                    .short('p')
                    .long("precision")
                    .value_name("N")
                    .value_parser(RangedU64ValueParser::<usize>::new().range(1..=MAX_PRECISION as u64))
                    .help("Number of geohash characters (defaults to the coarse tile precision)"),
            ),
        )
        .subcommand(Command::new("decode").about("Decode a geohash into its bounding box").arg(hash_arg()))
        .subcommand(Command::new("neighbors").about("List the cells around a geohash").arg(hash_arg()))
        .subcommand(coordinate_args(
            Command::new("tiles").about("Show the tile ids of a point and the coarse tiles around it"),
            "lat",
            "lon",
            "Point",
        ))
        .subcommand(coordinate_args(
            coordinate_args(Command::new("distance").about("Haversine distance in meters"), "lat1", "lon1", "First"),
            "lat2",
            "lon2",
            "Second",
        ))
        .subcommand(
            coordinate_args(
                coordinate_args(Command::new("eligible").about("Check whether a user can interact with a target"), "user-lat", "user-lon", "User"),
                "target-lat",
                "target-lon",
                "Target",
            )
            .arg(
                Arg::new("radius")
                    .short('r')
                    .long("radius")
                    .value_name("METERS")
                    .value_parser(value_parser!(f64))
                    .help("Interaction radius (defaults to the configured radius)"),
            ),
        )
        .subcommand(
            Command::new("cluster").about("Cluster spawns from a JSON file by coarse tile").arg(
                Arg::new("input")
                    .required(true)
                    .value_name("FILE")
                    .value_parser(value_parser!(PathBuf))
                    .help("JSON array of spawn entities"),
            ),
        )
        .subcommand(eco_location_args(
            Command::new("checkin").about("Validate a check-in at an eco-location"),
        ))
        .subcommand(
            eco_location_args(Command::new("spawn").about("Run the spawn pipeline once at an eco-location"))
                .arg(
                    Arg::new("aqi")
                        .long("aqi")
                        .value_parser(value_parser!(f64))
                        .default_value("50")
                        .help("Air quality index"),
                )
                .arg(
                    Arg::new("temperature")
                        .long("temperature")
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(f64))
                        .default_value("30")
                        .help("Temperature in degrees Celsius"),
                )
                .arg(
                    Arg::new("uv")
                        .long("uv")
                        .value_parser(value_parser!(f64))
                        .default_value("5")
                        .help("UV index"),
                ),
        )
}

fn coordinate(matches: &ArgMatches, lat: &str, lon: &str) -> Coordinate {
    Coordinate::new(
        matches.get_one::<f64>(lat).copied().unwrap_or_default(),
        matches.get_one::<f64>(lon).copied().unwrap_or_default(),
    )
}

fn string(matches: &ArgMatches, id: &str) -> String {
    matches.get_one::<String>(id).cloned().unwrap_or_default()
}

impl CliArgs {
    /// Parses command line arguments, exiting with usage on error.
    pub fn parse() -> Self {
        Self::from_matches(&command().get_matches())
    }

    /// Parses an explicit argument list.
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Ok(Self::from_matches(&command().try_get_matches_from(args)?))
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        let command = match matches.subcommand() {
            Some(("encode", sub)) => CliCommand::Encode {
                point: coordinate(sub, "lat", "lon"),
                precision: sub.get_one::<usize>("precision").copied(),
            },
            Some(("decode", sub)) => CliCommand::Decode { hash: string(sub, "hash") },
            Some(("neighbors", sub)) => CliCommand::Neighbors { hash: string(sub, "hash") },
            Some(("tiles", sub)) => CliCommand::Tiles { point: coordinate(sub, "lat", "lon") },
            Some(("distance", sub)) => CliCommand::Distance {
                from: coordinate(sub, "lat1", "lon1"),
                to: coordinate(sub, "lat2", "lon2"),
            },
            Some(("eligible", sub)) => CliCommand::Eligible {
                user: coordinate(sub, "user-lat", "user-lon"),
                target: coordinate(sub, "target-lat", "target-lon"),
                radius_m: sub.get_one::<f64>("radius").copied(),
            },
            Some(("cluster", sub)) => CliCommand::Cluster {
                input: sub.get_one::<PathBuf>("input").cloned().unwrap_or_default(),
            },
            Some(("checkin", sub)) => CliCommand::CheckIn {
                location_id: string(sub, "location-id"),
                kind: sub.get_one::<EcoLocationType>("kind").copied().unwrap_or(EcoLocationType::NaturePark),
                location: coordinate(sub, "loc-lat", "loc-lon"),
                user: coordinate(sub, "user-lat", "user-lon"),
                user_id: string(sub, "user"),
            },
            Some(("spawn", sub)) => CliCommand::Spawn {
                location_id: string(sub, "location-id"),
                kind: sub.get_one::<EcoLocationType>("kind").copied().unwrap_or(EcoLocationType::NaturePark),
                location: coordinate(sub, "loc-lat", "loc-lon"),
                user: coordinate(sub, "user-lat", "user-lon"),
                user_id: string(sub, "user"),
                environment: EnvironmentSnapshot {
                    air_quality: sub.get_one::<f64>("aqi").copied().unwrap_or(50.0),
                    temperature_c: sub.get_one::<f64>("temperature").copied().unwrap_or(30.0),
                    uv_index: sub.get_one::<f64>("uv").copied().unwrap_or(5.0),
                },
            },
            // subcommand_required(true) rejects anything else during parsing
            _ => CliCommand::Decode { hash: String::new() },
        };

        Self {
            config_path: PathBuf::from(string(matches, "config")),
            log_level: matches.get_one::<String>("log-level").cloned(),
            json_logs: matches.get_flag("json-logs"),
            command,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_definition_is_valid() {
        command().debug_assert();
    }

    #[test]
    fn test_parse_encode_with_negative_coordinates() {
        let args = CliArgs::try_parse_from(["geotile", "encode", "-33.8688", "-70.6693", "-p", "9"]).unwrap();
        assert_eq!(
            args.command,
            CliCommand::Encode {
                point: Coordinate::new(-33.8688, -70.6693),
                precision: Some(9),
            }
        );
        assert_eq!(args.config_path, PathBuf::from("geotile.toml"));
        assert!(!args.json_logs);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CliArgs::try_parse_from([
            "geotile", "neighbors", "w21z7y0k", "--config", "custom.toml", "--json-logs", "-l", "debug",
        ])
        .unwrap();
        assert_eq!(args.command, CliCommand::Neighbors { hash: "w21z7y0k".to_string() });
        assert_eq!(args.config_path, PathBuf::from("custom.toml"));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.json_logs);
    }

    #[test]
    fn test_parse_spawn_with_environment() {
        let args = CliArgs::try_parse_from([
            "geotile", "spawn", "park-1", "nature_park", "1.2946", "103.8462", "1.2947", "103.8463",
            "--user", "alice", "--aqi", "120",
        ])
        .unwrap();
        match args.command {
            CliCommand::Spawn { kind, user_id, environment, .. } => {
                assert_eq!(kind, EcoLocationType::NaturePark);
                assert_eq!(user_id, "alice");
                assert_eq!(environment.air_quality, 120.0);
                assert!(!environment.should_boost());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_location_type() {
        let result = CliArgs::try_parse_from([
            "geotile", "checkin", "x", "volcano", "1.0", "103.0", "1.0", "103.0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_encode_precision_out_of_range() {
        assert!(CliArgs::try_parse_from(["geotile", "encode", "1.0", "103.0", "-p", "0"]).is_err());
        assert!(CliArgs::try_parse_from(["geotile", "encode", "1.0", "103.0", "-p", "13"]).is_err());
        assert!(CliArgs::try_parse_from(["geotile", "encode", "1.0", "103.0", "-p", "12"]).is_ok());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(CliArgs::try_parse_from(["geotile"]).is_err());
    }
}
