pub mod macros;

use foxhollow_data::{
    Animal, AnimalState, Appetite, CellPos, Position, Sex, Species, Vitals,
};
use foxhollow_lib::model::config::{AppConfig, SpeciesConfig};
use foxhollow_lib::model::world::World;
use foxhollow_lib::model::TerrainPartition;

type WorldMod = Box<dyn FnOnce(&mut World)>;

/// Seeded world on an all-land map with no initial population.
#[allow(dead_code)]
pub struct WorldBuilder {
    config: AppConfig,
    width: u32,
    height: u32,
    shore: Vec<CellPos>,
    mods: Vec<WorldMod>,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.initial_rabbits = 0;
        config.world.initial_foxes = 0;
        config.world.initial_food = 0;
        config.world.seed = Some(42);
        Self {
            config,
            width: 100,
            height: 100,
            shore: Vec::new(),
            mods: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_animal(mut self, animal: Animal, x: f64, y: f64) -> Self {
        self.mods.push(Box::new(move |world| {
            world.spawn_animal(Position::new(x, y), animal);
        }));
        self
    }

    pub fn with_food(mut self, x: f64, y: f64) -> Self {
        self.mods.push(Box::new(move |world| {
            world.spawn_food(Position::new(x, y));
        }));
        self
    }

    /// Marks a cell as drinkable shallows instead of land.
    pub fn with_shore(mut self, x: u32, y: u32) -> Self {
        self.shore.push(CellPos::new(x, y));
        self
    }

    pub fn build(self) -> World {
        let mut land = Vec::with_capacity(self.width as usize * self.height as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = CellPos::new(x, y);
                if !self.shore.contains(&pos) {
                    land.push(pos);
                }
            }
        }
        let partition = TerrainPartition {
            width: self.width,
            height: self.height,
            land,
            shore: self.shore,
            ..Default::default()
        };
        let mut config = self.config;
        config.world.width = self.width;
        config.world.height = self.height;

        let mut world =
            World::from_partition(partition, config).expect("Failed to create world in test builder");
        for modifier in self.mods {
            modifier(&mut world);
        }
        world.publish_snapshot();
        world
    }
}

/// Animal with fixed, predictable traits.
#[allow(dead_code)]
pub struct AnimalBuilder {
    animal: Animal,
}

#[allow(dead_code)]
impl AnimalBuilder {
    pub fn new(species: Species) -> Self {
        let config = match species {
            Species::Rabbit => SpeciesConfig::rabbit(),
            Species::Fox => SpeciesConfig::fox(),
        };
        Self {
            animal: Animal {
                species,
                sex: Sex::Male,
                size: 0.5,
                speed: 2.0,
                sight: config.sight,
                vitals: Vitals::default(),
                appetite: Appetite::default(),
                state: AnimalState::Roam,
                heading: 0.0,
            },
        }
    }

    pub fn rabbit() -> Self {
        Self::new(Species::Rabbit)
    }

    pub fn fox() -> Self {
        Self::new(Species::Fox)
    }

    pub fn sex(mut self, sex: Sex) -> Self {
        self.animal.sex = sex;
        self
    }

    pub fn female(self) -> Self {
        self.sex(Sex::Female)
    }

    pub fn size(mut self, size: f64) -> Self {
        self.animal.size = size;
        self
    }

    pub fn speed(mut self, speed: f64) -> Self {
        self.animal.speed = speed;
        self
    }

    pub fn sight(mut self, sight: f64) -> Self {
        self.animal.sight = sight;
        self
    }

    pub fn hunger(mut self, hunger: f64) -> Self {
        self.animal.vitals.hunger = hunger;
        self
    }

    pub fn thirst(mut self, thirst: f64) -> Self {
        self.animal.vitals.thirst = thirst;
        self
    }

    pub fn reproducing(mut self) -> Self {
        self.animal.state = AnimalState::Reproduce;
        self
    }

    pub fn heading(mut self, heading: f64) -> Self {
        self.animal.heading = heading;
        self
    }

    /// Blind and nearly still: keeps a species alive without interfering.
    pub fn bystander(self) -> Self {
        self.sight(0.0).speed(0.001)
    }

    pub fn build(self) -> Animal {
        self.animal
    }
}

/// Position and state of the animal behind `entity`, if it is still alive.
#[allow(dead_code)]
pub fn animal_at(world: &World, entity: hecs::Entity) -> Option<(Position, Animal)> {
    let pos = *world.ecs.get::<&Position>(entity).ok()?;
    let animal = *world.ecs.get::<&Animal>(entity).ok()?;
    Some((pos, animal))
}
