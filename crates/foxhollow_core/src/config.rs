//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file. Every section has defaults, so a file only needs to
//! name the values it changes.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. `config.toml` file (overrides defaults)
//! 3. Command-line flags (override the file)
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 480
//! height = 360
//! initial_rabbits = 30
//! seed = 42
//!
//! [terrain]
//! water = -0.05
//! sand = 0.12
//!
//! [terrain.moisture]
//! scale = 120.0
//! seed = 9
//!
//! [fox]
//! sight = 250.0
//! ```

use foxhollow_data::{NoiseParams, Thresholds};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while building or checking a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("threshold `{lower}` ({lower_value}) must not exceed `{upper}` ({upper_value})")]
    NonMonotonicThresholds {
        lower: &'static str,
        lower_value: f64,
        upper: &'static str,
        upper_value: f64,
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Checks that the elevation cutoffs are ordered.
pub fn check_thresholds(thresholds: &Thresholds) -> Result<(), ConfigError> {
    match thresholds.first_inversion() {
        Some(((lower, lower_value), (upper, upper_value))) => {
            Err(ConfigError::NonMonotonicThresholds {
                lower,
                lower_value,
                upper,
                upper_value,
            })
        }
        None => Ok(()),
    }
}

/// Checks that a noise field can be sampled.
pub fn check_noise(field: &str, params: &NoiseParams) -> Result<(), ConfigError> {
    let invalid = |what: &str| Err(ConfigError::InvalidParameter(format!("{field} {what}")));
    if !(params.scale > 0.0) {
        return invalid("scale must be positive");
    }
    if params.octaves == 0 {
        return invalid("octaves must be at least 1");
    }
    if !(params.lacunarity > 0.0) {
        return invalid("lacunarity must be positive");
    }
    if !(params.persistence > 0.0 && params.persistence <= 1.0) {
        return invalid("persistence must be in (0, 1]");
    }
    Ok(())
}

/// World dimensions, populations and timing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u32,
    pub height: u32,
    pub initial_rabbits: usize,
    pub initial_foxes: usize,
    pub initial_food: usize,
    pub food_capacity: usize,
    /// Simulated milliseconds between food spawns.
    pub food_interval_ms: u64,
    /// Simulated milliseconds per frame.
    pub frame_ms: u64,
    /// Initial speeds are drawn from `(min_speed, max_speed]`.
    pub min_speed: f64,
    pub max_speed: f64,
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 750,
            initial_rabbits: 20,
            initial_foxes: 6,
            initial_food: 80,
            food_capacity: 80,
            food_interval_ms: 1000,
            frame_ms: 33,
            min_speed: 0.1,
            max_speed: 4.0,
            seed: None,
        }
    }
}

/// Elevation cutoffs and the two noise fields.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    #[serde(flatten)]
    pub thresholds: Thresholds,
    pub elevation: NoiseParams,
    pub moisture: NoiseParams,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            elevation: NoiseParams::default(),
            moisture: NoiseParams::default().with_seed(1),
        }
    }
}

/// Per-species constants.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SpeciesConfig {
    pub sight: f64,
    /// Hunger restored by one meal.
    pub eat_restore: f64,
    /// Thirst restored by one drink.
    pub drink_restore: f64,
    /// Every this many meals the animal enters REPRODUCE.
    pub eats_per_litter: u32,
    /// Every this many drinks the animal enters REPRODUCE.
    pub drinks_per_litter: u32,
}

impl SpeciesConfig {
    #[must_use]
    pub fn rabbit() -> Self {
        Self {
            sight: 150.0,
            eat_restore: 30.0,
            drink_restore: 30.0,
            eats_per_litter: 2,
            drinks_per_litter: 2,
        }
    }

    #[must_use]
    pub fn fox() -> Self {
        Self {
            sight: 200.0,
            eat_restore: 30.0,
            drink_restore: 25.0,
            eats_per_litter: 3,
            drinks_per_litter: 2,
        }
    }
}

/// Decay rates and seeking thresholds shared by both species.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MetabolismConfig {
    /// At or below this hunger a REPRODUCE animal still looks for food.
    pub hunger_seek_threshold: f64,
    /// Thirst lost per tick per unit of speed.
    pub thirst_rate: f64,
    /// Offspring speed is drawn within this distance of the parents' mean.
    pub offspring_speed_variance: f64,
    pub min_offspring_speed: f64,
}

impl Default for MetabolismConfig {
    fn default() -> Self {
        Self {
            hunger_seek_threshold: 50.0,
            thirst_rate: 0.1,
            offspring_speed_variance: 1.0,
            min_offspring_speed: 0.1,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct StatsConfig {
    /// A row is recorded at least this often (simulated ms) even without a count change.
    pub timeout_ms: u64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self { timeout_ms: 3000 }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub terrain: TerrainConfig,
    pub rabbit: SpeciesConfig,
    pub fox: SpeciesConfig,
    pub metabolism: MetabolismConfig,
    pub stats: StatsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            terrain: TerrainConfig::default(),
            rabbit: SpeciesConfig::rabbit(),
            fox: SpeciesConfig::fox(),
            metabolism: MetabolismConfig::default(),
            stats: StatsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    ///
    /// # Validation Rules
    /// - World dimensions must be positive and at most 4096
    /// - Thresholds must be ordered `water <= shallowwater <= sand <= mountain <= hugemountain`
    /// - Noise fields need a positive scale and lacunarity, at least one octave,
    ///   and persistence in (0, 1]
    /// - Sight radii and reproduction periods must be positive
    /// - Speeds must satisfy `0 < min_speed < max_speed`
    pub fn validate(&self) -> anyhow::Result<()> {
        let world = &self.world;
        anyhow::ensure!(world.width > 0, "World width must be positive");
        anyhow::ensure!(world.width <= 4096, "World width too large (max 4096)");
        anyhow::ensure!(world.height > 0, "World height must be positive");
        anyhow::ensure!(world.height <= 4096, "World height too large (max 4096)");
        anyhow::ensure!(
            world.initial_food <= world.food_capacity,
            "Initial food must not exceed food capacity"
        );
        anyhow::ensure!(world.frame_ms > 0, "Frame duration must be positive");
        anyhow::ensure!(world.min_speed > 0.0, "Minimum speed must be positive");
        anyhow::ensure!(
            world.min_speed < world.max_speed,
            "Minimum speed must be below maximum speed"
        );

        check_thresholds(&self.terrain.thresholds)?;
        check_noise("elevation", &self.terrain.elevation)?;
        check_noise("moisture", &self.terrain.moisture)?;

        for (name, species) in [("rabbit", &self.rabbit), ("fox", &self.fox)] {
            anyhow::ensure!(species.sight > 0.0, "{name} sight must be positive");
            anyhow::ensure!(
                species.eat_restore >= 0.0 && species.drink_restore >= 0.0,
                "{name} restore amounts must be non-negative"
            );
            anyhow::ensure!(
                species.eats_per_litter > 0 && species.drinks_per_litter > 0,
                "{name} reproduction periods must be positive"
            );
        }

        let metabolism = &self.metabolism;
        anyhow::ensure!(
            metabolism.thirst_rate >= 0.0,
            "Thirst rate must be non-negative"
        );
        anyhow::ensure!(
            metabolism.offspring_speed_variance >= 0.0,
            "Offspring speed variance must be non-negative"
        );
        anyhow::ensure!(
            metabolism.min_offspring_speed > 0.0,
            "Minimum offspring speed must be positive"
        );

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path`.
    ///
    /// A missing file yields the defaults; an unreadable or invalid file is an error.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// SHA-256 of the simulation-relevant sections, hex encoded.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.world).as_bytes());
        hasher.update(format!("{:?}", self.terrain).as_bytes());
        hasher.update(format!("{:?}", self.rabbit).as_bytes());
        hasher.update(format!("{:?}", self.fox).as_bytes());
        hasher.update(format!("{:?}", self.metabolism).as_bytes());
        hex::encode(hasher.finalize())
    }

    #[must_use]
    pub fn species(&self, species: foxhollow_data::Species) -> &SpeciesConfig {
        match species {
            foxhollow_data::Species::Rabbit => &self.rabbit,
            foxhollow_data::Species::Fox => &self.fox,
        }
    }
}
