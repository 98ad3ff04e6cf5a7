use crate::model::behavior::Mind;
use crate::model::config::AppConfig;
use crate::model::lifecycle;
use crate::model::metrics::Metrics;
use crate::model::snapshot::WorldSnapshot;
use crate::model::spatial::CellIndex;
use crate::model::terrain::{TerrainMap, TerrainPartition};
use crate::model::world::{World, SHORE_BUCKET_SIZE};
use anyhow::Context;
use foxhollow_data::{Animal, Food, Position, Species};
use hecs::Entity;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

impl World {
    /// Validates `config`, generates its terrain and populates the world.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let terrain = TerrainMap::generate(
            config.world.width,
            config.world.height,
            config.terrain.elevation,
            config.terrain.moisture,
            config.terrain.thresholds,
        )
        .context("generating terrain")?;
        Self::with_terrain(&terrain, config)
    }

    /// Populates a world on an existing map; the map's dimensions win over
    /// the configured ones.
    pub fn with_terrain(terrain: &TerrainMap, mut config: AppConfig) -> anyhow::Result<Self> {
        anyhow::ensure!(
            terrain.is_classified(),
            "terrain must be classified before it can be populated"
        );
        config.world.width = terrain.width;
        config.world.height = terrain.height;
        Self::from_partition(terrain.partition(), config)
    }

    /// Builds the world from pre-computed habitat buckets.
    pub fn from_partition(partition: TerrainPartition, config: AppConfig) -> anyhow::Result<Self> {
        anyhow::ensure!(
            !partition.land.is_empty(),
            "terrain has no forest or grassland cell to place animals and food on"
        );

        let rng = match config.world.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let shore_index = CellIndex::build(
            &partition.shore,
            partition.width,
            partition.height,
            SHORE_BUCKET_SIZE,
        );

        let mut world = Self {
            width: partition.width,
            height: partition.height,
            tick: 0,
            runtime_ms: 0,
            food_checkpoint_ms: 0,
            running: true,
            ecs: hecs::World::new(),
            partition,
            shore_index,
            config,
            rng,
            metrics: Metrics::new(),
            cached_snapshot: Arc::new(WorldSnapshot::default()),
        };

        for _ in 0..world.config.world.initial_rabbits {
            world.spawn_random_animal(Species::Rabbit);
        }
        for _ in 0..world.config.world.initial_foxes {
            world.spawn_random_animal(Species::Fox);
        }
        for _ in 0..world.config.world.initial_food {
            let pos = world.random_land_position();
            world.spawn_food(pos);
        }
        world.publish_snapshot();

        tracing::info!(
            width = world.width,
            height = world.height,
            rabbits = world.rabbit_count(),
            foxes = world.fox_count(),
            food = world.food_count(),
            "world initialised"
        );
        Ok(world)
    }

    /// Places an animal with an empty memory.
    pub fn spawn_animal(&mut self, position: Position, animal: Animal) -> Entity {
        self.ecs.spawn((position, animal, Mind::default()))
    }

    pub fn spawn_food(&mut self, position: Position) -> Entity {
        self.ecs.spawn((position, Food))
    }

    /// A fresh animal with a random initial speed on a random land cell.
    pub fn spawn_random_animal(&mut self, species: Species) -> Entity {
        let speed = lifecycle::random_speed(
            self.config.world.min_speed,
            self.config.world.max_speed,
            &mut self.rng,
        );
        let animal = lifecycle::create_animal_with_rng(
            species,
            speed,
            self.config.species(species),
            &mut self.rng,
        );
        let pos = self.random_land_position();
        self.spawn_animal(pos, animal)
    }

    /// Top-left corner of a uniformly chosen land cell.
    pub(crate) fn random_land_position(&mut self) -> Position {
        if self.partition.land.is_empty() {
            return self.bounds().center();
        }
        let idx = self.rng.gen_range(0..self.partition.land.len());
        let cell = self.partition.land[idx];
        Position::new(f64::from(cell.x), f64::from(cell.y))
    }
}
