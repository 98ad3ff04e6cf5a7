pub mod data;

pub use data::animal::{
    Animal, AnimalState, Appetite, Food, Position, Sex, Species, Vitals, VITAL_MAX,
};
pub use data::environment::{DeathCause, FoodRow, LiveEvent, PopulationRow};
pub use data::terrain::{
    noise_ranges, Biome, Cell, CellPos, NoiseParams, NoiseThreshold, Thresholds,
};
