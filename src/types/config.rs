//! Configuration for the parking facility simulator
//!
//! Holds the facility layout parameters, the staffing of the wash service,
//! and the deterministic-seed knob. Configuration can come from defaults, a
//! JSON file, or CLI arguments, with CLI taking precedence over the file and
//! the file taking precedence over defaults.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Error produced when a configuration fails validation or loading
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    /// A field value is out of its allowed range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
    /// Reading the configuration file failed
    #[error("Failed to read configuration file '{path}': {source}")]
    FileRead {
        /// Path that could not be read
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// Parsing the configuration file failed
    #[error("Failed to parse configuration file '{path}': {source}")]
    FileParse {
        /// Path that could not be parsed
        path: String,
        /// Underlying JSON error
        source: serde_json::Error,
    },
}

/// Facility configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacilityConfig {
    /// Display name of the facility
    pub name: String,
    /// Street address, used in reports and notifications
    pub address: String,
    /// Number of parking floors
    pub floors: usize,
    /// Number of spots per floor
    pub spots_per_floor: usize,
    /// Number of wash workers on shift
    pub wash_workers: usize,
    /// Default target battery percentage for charging sessions
    pub default_charge_target: u8,
    /// Optional seed for deterministic probabilistic draws
    pub seed: Option<u64>,
}

impl Default for FacilityConfig {
    fn default() -> Self {
        Self {
            name: "Central Parking".to_string(),
            address: "1 Main Street".to_string(),
            floors: 3,
            spots_per_floor: 20,
            wash_workers: 2,
            default_charge_target: 100,
            seed: None,
        }
    }
}

impl FacilityConfig {
    /// Validate all configuration fields
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.name.trim().is_empty() {
            return Err(ConfigValidationError::Invalid(
                "facility name must not be empty".to_string(),
            ));
        }
        if self.floors == 0 {
            return Err(ConfigValidationError::Invalid(
                "floors must be greater than 0".to_string(),
            ));
        }
        if self.spots_per_floor == 0 {
            return Err(ConfigValidationError::Invalid(
                "spots_per_floor must be greater than 0".to_string(),
            ));
        }
        if self.wash_workers == 0 {
            return Err(ConfigValidationError::Invalid(
                "wash_workers must be greater than 0".to_string(),
            ));
        }
        if self.default_charge_target == 0 || self.default_charge_target > 100 {
            return Err(ConfigValidationError::Invalid(format!(
                "default_charge_target must be in 1..=100, got {}",
                self.default_charge_target
            )));
        }
        Ok(())
    }

    /// Total number of spots across all floors
    pub fn total_capacity(&self) -> usize {
        self.floors * self.spots_per_floor
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigValidationError> {
        let path_str = path.as_ref().display().to_string();
        let contents = fs::read_to_string(&path).map_err(|source| {
            ConfigValidationError::FileRead { path: path_str.clone(), source }
        })?;
        serde_json::from_str(&contents)
            .map_err(|source| ConfigValidationError::FileParse { path: path_str, source })
    }

    /// Build a configuration from CLI arguments, honoring the precedence
    /// CLI flag > config file > default.
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigValidationError> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(name) = args.name {
            config.name = name;
        }
        if let Some(floors) = args.floors {
            config.floors = floors;
        }
        if let Some(spots) = args.spots_per_floor {
            config.spots_per_floor = spots;
        }
        if let Some(workers) = args.wash_workers {
            config.wash_workers = workers;
        }
        if let Some(target) = args.charge_target {
            config.default_charge_target = target;
        }
        if let Some(seed) = args.seed {
            config.seed = Some(seed);
        }

        Ok(config)
    }

    /// Serialize the configuration as pretty-printed JSON
    pub fn print_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Command line arguments
#[derive(Debug, Clone, Parser)]
#[command(
    name = "parklot",
    about = "Parking facility simulator - admission, pricing, car wash, EV charging, security",
    long_about = "Runs a deterministic demo scenario against an in-memory parking facility:
vehicle admission and exit with tiered pricing, a FIFO car wash queue, EV
charging sessions, and a security incident log.

EXAMPLES:
    # Run with default settings
    parklot

    # Use a configuration file
    parklot --config facility.json

    # Override specific settings
    parklot --floors 5 --spots-per-floor 30 --seed 42

    # Generate a configuration template
    parklot --print-config > facility.json

    # Validate configuration without running
    parklot --config facility.json --dry-run"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(short, long, help = "Configuration file path (JSON format)")]
    pub config: Option<String>,

    /// Facility display name
    #[arg(long, help = "Facility display name")]
    pub name: Option<String>,

    /// Number of parking floors
    #[arg(long, help = "Number of parking floors")]
    pub floors: Option<usize>,

    /// Number of spots per floor
    #[arg(long, help = "Number of spots per floor")]
    pub spots_per_floor: Option<usize>,

    /// Number of wash workers on shift
    #[arg(long, help = "Number of wash workers on shift")]
    pub wash_workers: Option<usize>,

    /// Default target battery percentage for charging sessions
    #[arg(long, help = "Default charge target percentage (1-100)")]
    pub charge_target: Option<u8>,

    /// Random seed for reproducible runs
    #[arg(long, help = "Random seed for reproducible runs")]
    pub seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, help = "Enable debug logging")]
    pub debug: bool,

    /// Print the default configuration as JSON and exit
    #[arg(long, help = "Print default configuration as JSON and exit")]
    pub print_config: bool,

    /// Validate configuration and exit without running
    #[arg(long, help = "Validate configuration and exit without running")]
    pub dry_run: bool,
}
