use foxhollow_data::{AnimalState, Position, Sex, Species};
use serde::{Deserialize, Serialize};

/// Read-only copy of one animal, for renderers and statistics observers.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct AnimalSnapshot {
    pub species: Species,
    pub position: Position,
    pub speed: f64,
    pub size: f64,
    pub sex: Sex,
    pub hunger: f64,
    pub thirst: f64,
    pub state: AnimalState,
}

/// Owned copy of the live entities at the end of a tick.
///
/// Observers may hold one across later ticks; it never changes.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub runtime_ms: u64,
    pub running: bool,
    pub width: u32,
    pub height: u32,
    pub animals: Vec<AnimalSnapshot>,
    pub food: Vec<Position>,
}

impl WorldSnapshot {
    pub fn species(&self, species: Species) -> impl Iterator<Item = &AnimalSnapshot> {
        self.animals.iter().filter(move |a| a.species == species)
    }

    #[must_use]
    pub fn count(&self, species: Species) -> usize {
        self.species(species).count()
    }
}
