use super::animal::Species;
use serde::{Deserialize, Serialize};

/// Why an animal left the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    Starvation,
    Dehydration,
    /// Eaten by a fox.
    Predation,
}

/// Something that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiveEvent {
    /// An offspring was placed at the mating point.
    Birth {
        species: Species,
        x: f64,
        y: f64,
        speed: f64,
        tick: u64,
    },
    /// An animal was removed from the world.
    Death {
        species: Species,
        cause: DeathCause,
        x: f64,
        y: f64,
        tick: u64,
    },
    /// A food item appeared on a land cell.
    FoodSpawned { x: f64, y: f64, tick: u64 },
    /// The termination predicate fired on this tick.
    Extinction {
        rabbits: usize,
        foxes: usize,
        tick: u64,
    },
}

/// One statistics row for a species.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PopulationRow {
    /// Simulated seconds since the start of the run.
    pub time_s: f64,
    pub count: usize,
    pub avg_speed: f64,
    pub avg_thirst: f64,
    pub avg_hunger: f64,
    pub avg_size: f64,
    pub male_count: usize,
    pub female_count: usize,
}

/// One statistics row for food.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FoodRow {
    pub time_s: f64,
    pub count: usize,
}
