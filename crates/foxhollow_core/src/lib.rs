//! # Foxhollow Core
//!
//! The simulation logic for Foxhollow, a rabbit and fox ecosystem on
//! procedurally generated terrain.
//!
//! This crate contains the deterministic building blocks:
//! - Multi-octave noise fields and biome classification
//! - Terrain maps and their habitat partitions
//! - Sight queries over live entities and drinkable cells
//! - Per-species decision policy and animal lifecycle rules
//! - Snapshot-based statistics, configuration, metrics and logging
//!
//! The scheduler that owns entities and applies decisions lives in the root
//! crate; everything here is either pure or works on borrowed state.
//!
//! ## Example
//!
//! ```
//! use foxhollow_core::biome::{BiomeClassifier, BiomeLogic};
//! use foxhollow_data::{Biome, Thresholds};
//!
//! let classifier = BiomeClassifier::new(Thresholds::default()).unwrap();
//! let biome = classifier.classify(0.08, 0.25);
//! assert_eq!(biome, Biome::Swamp);
//! assert!(!biome.is_habitable());
//! ```

/// Per-species decision policy
pub mod behavior;
/// Biome classification and biome properties
pub mod biome;
/// Configuration management for simulation parameters
pub mod config;
/// Animal construction, eating, drinking and decay
pub mod lifecycle;
/// Run metrics and structured logging
pub mod metrics;
/// Multi-octave coherent noise
pub mod noise;
/// Neighbourhood queries
pub mod sight;
/// Read-only world snapshots
pub mod snapshot;
/// Static bucket grid over terrain cells
pub mod spatial;
/// Population statistics
pub mod stats;
/// Terrain maps and habitat partitions
pub mod terrain;

pub use biome::{BiomeClassifier, BiomeLogic};
pub use metrics::{init_logging, Metrics};
pub use terrain::{TerrainMap, TerrainPartition};
