use serde::{Deserialize, Serialize};

/// Upper bound of hunger and thirst.
pub const VITAL_MAX: f64 = 100.0;

/// World position of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// The two animal species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Rabbit,
    Fox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Sex::Male => Sex::Female,
            Sex::Female => Sex::Male,
        }
    }
}

/// Behavioural state of an animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AnimalState {
    #[default]
    Roam,
    Reproduce,
}

/// Hunger and thirst, both kept in `[0, VITAL_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub hunger: f64,
    pub thirst: f64,
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            hunger: VITAL_MAX,
            thirst: VITAL_MAX,
        }
    }
}

impl Vitals {
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hunger > 0.0 && self.thirst > 0.0
    }
}

/// Consumption counters and the count at which each last fired a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Appetite {
    pub eat_count: u32,
    pub drink_count: u32,
    pub food_checkpoint: u32,
    pub water_checkpoint: u32,
}

/// Shared state of every animal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub species: Species,
    pub sex: Sex,
    /// Body size in `[0.5, 1.0]`; hunger drops by this much every tick.
    pub size: f64,
    pub speed: f64,
    pub sight: f64,
    pub vitals: Vitals,
    pub appetite: Appetite,
    pub state: AnimalState,
    /// Random-walk heading in radians.
    pub heading: f64,
}

/// A food item. Its location is the entity's [`Position`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Food;
