use crate::model::behavior::{decide, random_walk, resolve_target, Action, DecisionInput, Mind};
use crate::model::lifecycle;
use crate::model::sight::{sight_entities, WorldView};
use crate::model::world::World;
use foxhollow_data::{Animal, AnimalState, DeathCause, LiveEvent, Position, Species};
use hecs::Entity;
use std::time::Instant;

impl World {
    /// Advances the simulation by one frame of `elapsed_ms` simulated milliseconds.
    ///
    /// Order within a tick:
    /// - runtime and food spawning
    /// - every rabbit, then every fox, each over the handles live when its pass starts
    /// - the termination check, which either stops the run or publishes a snapshot
    ///
    /// Calling `step` after termination is a no-op.
    pub fn step(&mut self, elapsed_ms: u64) -> Vec<LiveEvent> {
        if !self.running {
            return Vec::new();
        }
        let started = Instant::now();
        self.tick += 1;
        self.runtime_ms += elapsed_ms;

        let mut events = Vec::new();
        self.pass_food_spawn(&mut events);
        self.pass_species(Species::Rabbit, &mut events);
        self.pass_species(Species::Fox, &mut events);

        let rabbits = self.rabbit_count();
        let foxes = self.fox_count();
        if rabbits <= 1 || foxes == 0 {
            self.running = false;
            tracing::info!(
                tick = self.tick,
                runtime_ms = self.runtime_ms,
                rabbits,
                foxes,
                "simulation terminated"
            );
            events.push(LiveEvent::Extinction {
                rabbits,
                foxes,
                tick: self.tick,
            });
        } else {
            self.publish_snapshot();
        }

        self.metrics
            .record_tick(started.elapsed(), &events, rabbits, foxes);
        events
    }

    fn pass_food_spawn(&mut self, events: &mut Vec<LiveEvent>) {
        let due = self.runtime_ms.saturating_sub(self.food_checkpoint_ms)
            >= self.config.world.food_interval_ms;
        if !due || self.food_count() >= self.config.world.food_capacity {
            return;
        }
        let pos = self.random_land_position();
        self.spawn_food(pos);
        self.food_checkpoint_ms = self.runtime_ms;
        tracing::trace!(x = pos.x, y = pos.y, tick = self.tick, "food spawned");
        events.push(LiveEvent::FoodSpawned {
            x: pos.x,
            y: pos.y,
            tick: self.tick,
        });
    }

    fn pass_species(&mut self, species: Species, events: &mut Vec<LiveEvent>) {
        for handle in self.handles(species) {
            self.advance_animal(handle, events);
        }
    }

    /// Runs one animal through sight, decision, action and decay.
    /// Handles removed earlier in the pass are skipped.
    fn advance_animal(&mut self, handle: Entity, events: &mut Vec<LiveEvent>) {
        let Ok((mut position, mut animal, mind)) = self
            .ecs
            .query_one_mut::<(&Position, &Animal, &Mind)>(handle)
            .map(|(p, a, m)| (*p, *a, *m))
        else {
            return;
        };

        let bounds = self.bounds();
        let species = animal.species;
        let (sighting, remembered) = {
            let view = WorldView::new(&self.ecs, &self.shore_index, bounds);
            let sighting = sight_entities(&view, handle, position, animal.sight);
            let remembered = mind
                .target
                .and_then(|target| resolve_target(&view, &animal, target));
            (sighting, remembered)
        };

        let decision = decide(&DecisionInput {
            animal: &animal,
            position,
            remembered,
            sighting: &sighting,
            bounds,
            hunger_seek_threshold: self.config.metabolism.hunger_seek_threshold,
        });

        match decision.action {
            Action::Flee { to } | Action::Approach { to } => position = to,
            Action::Eat { food, at } => {
                if self.ecs.despawn(food).is_ok() {
                    position = at;
                    lifecycle::eat(&mut animal, self.config.species(species));
                }
            }
            Action::Prey { rabbit, at } => {
                if self.ecs.despawn(rabbit).is_ok() {
                    position = at;
                    lifecycle::eat(&mut animal, self.config.species(species));
                    tracing::debug!(tick = self.tick, x = at.x, y = at.y, "rabbit preyed on");
                    events.push(LiveEvent::Death {
                        species: Species::Rabbit,
                        cause: DeathCause::Predation,
                        x: at.x,
                        y: at.y,
                        tick: self.tick,
                    });
                }
            }
            Action::Mate { partner, at } => {
                if let Some(birth) = self.mate(&mut animal, partner, at) {
                    position = at;
                    events.push(birth);
                }
            }
            Action::Drink { at, .. } => {
                position = at;
                lifecycle::drink(&mut animal, self.config.species(species));
            }
            Action::Wander => {
                let (to, heading) = random_walk(
                    position,
                    animal.heading,
                    animal.speed,
                    bounds,
                    &mut self.rng,
                );
                position = to;
                animal.heading = heading;
            }
        }

        if let Some(cause) = lifecycle::decay(&mut animal, &self.config.metabolism) {
            if self.ecs.despawn(handle).is_ok() {
                tracing::debug!(species = ?animal.species, ?cause, tick = self.tick, "animal died");
                events.push(LiveEvent::Death {
                    species: animal.species,
                    cause,
                    x: position.x,
                    y: position.y,
                    tick: self.tick,
                });
            }
            return;
        }

        if let Ok((p, a, m)) = self
            .ecs
            .query_one_mut::<(&mut Position, &mut Animal, &mut Mind)>(handle)
        {
            *p = position;
            *a = animal;
            m.target = decision.target;
        }
    }

    /// Pairs `animal` with `partner` at `at`: both return to ROAM and forget
    /// their targets, and one offspring is spawned there.
    fn mate(&mut self, animal: &mut Animal, partner: Entity, at: Position) -> Option<LiveEvent> {
        let partner_speed = {
            let (mate, mind) = self
                .ecs
                .query_one_mut::<(&mut Animal, &mut Mind)>(partner)
                .ok()?;
            if mate.species != animal.species
                || mate.sex != animal.sex.opposite()
                || mate.state != AnimalState::Reproduce
            {
                return None;
            }
            mate.state = AnimalState::Roam;
            mind.target = None;
            mate.speed
        };
        animal.state = AnimalState::Roam;

        let species = animal.species;
        let speed = lifecycle::offspring_speed(
            animal.speed,
            partner_speed,
            &self.config.metabolism,
            &mut self.rng,
        );
        let child =
            lifecycle::create_animal_with_rng(species, speed, self.config.species(species), &mut self.rng);
        self.spawn_animal(at, child);

        tracing::debug!(?species, x = at.x, y = at.y, speed, tick = self.tick, "offspring born");
        Some(LiveEvent::Birth {
            species,
            x: at.x,
            y: at.y,
            speed,
            tick: self.tick,
        })
    }
}
