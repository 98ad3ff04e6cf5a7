//! # Foxhollow IO
//!
//! File formats for the Foxhollow simulation.
//!
//! This crate provides:
//! - Structured error handling with custom error types
//! - JSON serialization helpers
//! - Terrain file save/load
//! - Biome raster export to PNG
//! - Population statistics export

/// Error types and result aliases for I/O operations
pub mod error;
/// Population statistics export
pub mod export;
/// Biome raster rendering and PNG output
pub mod raster;
/// Validated serialization helpers for JSON
pub mod serialization;
/// Terrain map persistence
pub mod terrain_file;

pub use error::{IoError, Result};
pub use export::{write_stats, StatsFile};
pub use raster::{render_biome_image, save_biome_image};
pub use serialization::{from_json, read_json_file, to_json, to_json_pretty, write_json_file};
pub use terrain_file::{load_terrain, save_terrain};
