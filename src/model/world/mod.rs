use crate::model::config::AppConfig;
use crate::model::metrics::Metrics;
use crate::model::sight::Bounds;
use crate::model::snapshot::{AnimalSnapshot, WorldSnapshot};
use crate::model::spatial::CellIndex;
use crate::model::terrain::TerrainPartition;
use crate::ui::DrawSurface;
use foxhollow_data::{Animal, Food, Position, Species};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

pub mod init;
pub mod update;

/// Side of one bucket of the shore index, in world units.
pub const SHORE_BUCKET_SIZE: u32 = 32;

/// Owns every live entity and the terrain partitions, and is the only thing
/// that mutates them.
///
/// Animals are `(Position, Animal, Mind)` entities and food items are
/// `(Position, Food)` entities in one `hecs` world.
pub struct World {
    pub width: u32,
    pub height: u32,
    pub tick: u64,
    /// Simulated milliseconds since the start of the run.
    pub runtime_ms: u64,
    /// Runtime at the last food spawn.
    pub food_checkpoint_ms: u64,
    pub running: bool,
    pub ecs: hecs::World,
    pub partition: TerrainPartition,
    pub shore_index: CellIndex,
    pub config: AppConfig,
    pub rng: ChaCha8Rng,
    pub metrics: Metrics,
    cached_snapshot: Arc<WorldSnapshot>,
}

impl World {
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(f64::from(self.width), f64::from(self.height))
    }

    /// `true` iff `pos` lies in `[0, width) x [0, height)`.
    #[must_use]
    pub fn in_bounds(&self, pos: Position) -> bool {
        self.bounds().contains(pos)
    }

    #[must_use]
    pub fn count(&self, species: Species) -> usize {
        self.ecs
            .query::<&Animal>()
            .iter()
            .filter(|(_, a)| a.species == species)
            .count()
    }

    #[must_use]
    pub fn rabbit_count(&self) -> usize {
        self.count(Species::Rabbit)
    }

    #[must_use]
    pub fn fox_count(&self) -> usize {
        self.count(Species::Fox)
    }

    #[must_use]
    pub fn food_count(&self) -> usize {
        self.ecs.query::<&Food>().iter().count()
    }

    /// Handles of the live animals of one species, in storage order.
    #[must_use]
    pub fn handles(&self, species: Species) -> Vec<hecs::Entity> {
        self.ecs
            .query::<&Animal>()
            .iter()
            .filter(|(_, a)| a.species == species)
            .map(|(h, _)| h)
            .collect()
    }

    /// Builds an owned copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> WorldSnapshot {
        let mut animals: Vec<AnimalSnapshot> = self
            .ecs
            .query::<(&Position, &Animal)>()
            .iter()
            .map(|(_, (pos, a))| AnimalSnapshot {
                species: a.species,
                position: *pos,
                speed: a.speed,
                size: a.size,
                sex: a.sex,
                hunger: a.vitals.hunger,
                thirst: a.vitals.thirst,
                state: a.state,
            })
            .collect();
        animals.sort_by_key(|a| a.species == Species::Fox);

        let food = self
            .ecs
            .query::<(&Position, &Food)>()
            .iter()
            .map(|(_, (pos, _))| *pos)
            .collect();

        WorldSnapshot {
            tick: self.tick,
            runtime_ms: self.runtime_ms,
            running: self.running,
            width: self.width,
            height: self.height,
            animals,
            food,
        }
    }

    /// The snapshot published by the last live tick.
    #[must_use]
    pub fn latest_snapshot(&self) -> Arc<WorldSnapshot> {
        Arc::clone(&self.cached_snapshot)
    }

    /// Replaces the published snapshot with the current state.
    pub fn publish_snapshot(&mut self) {
        self.cached_snapshot = Arc::new(self.snapshot());
    }

    /// Issues one draw call per entity of the latest published snapshot.
    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        let snapshot = &self.cached_snapshot;
        for animal in &snapshot.animals {
            match animal.species {
                Species::Rabbit => surface.draw_rabbit(animal.position, animal.size),
                Species::Fox => surface.draw_fox(animal.position, animal.size),
            }
        }
        for food in &snapshot.food {
            surface.draw_food(*food);
        }
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("tick", &self.tick)
            .field("runtime_ms", &self.runtime_ms)
            .field("rabbits", &self.rabbit_count())
            .field("foxes", &self.fox_count())
            .field("food", &self.food_count())
            .finish()
    }
}
