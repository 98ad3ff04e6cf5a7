//! Neighbourhood queries that drive every animal decision.

use crate::spatial::CellIndex;
use foxhollow_data::{Animal, AnimalState, CellPos, Food, Position, Sex, Species};
use hecs::Entity;

/// The rectangle `[0, width) x [0, height)` in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        (0.0..self.width).contains(&pos.x) && (0.0..self.height).contains(&pos.y)
    }

    #[must_use]
    pub fn center(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Read-only access to everything an animal may look at.
#[derive(Clone, Copy)]
pub struct WorldView<'w> {
    pub ecs: &'w hecs::World,
    pub shore: &'w CellIndex,
    pub bounds: Bounds,
}

impl<'w> WorldView<'w> {
    #[must_use]
    pub fn new(ecs: &'w hecs::World, shore: &'w CellIndex, bounds: Bounds) -> Self {
        Self { ecs, shore, bounds }
    }

    /// Position of a live food item.
    #[must_use]
    pub fn food_at(&self, entity: Entity) -> Option<Position> {
        self.ecs.get::<&Food>(entity).ok()?;
        self.ecs.get::<&Position>(entity).ok().map(|p| *p)
    }

    /// Position and state of a live animal.
    #[must_use]
    pub fn animal(&self, entity: Entity) -> Option<(Position, Animal)> {
        let animal = *self.ecs.get::<&Animal>(entity).ok()?;
        let pos = *self.ecs.get::<&Position>(entity).ok()?;
        Some((pos, animal))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeenFood {
    pub entity: Entity,
    pub position: Position,
    pub distance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeenAnimal {
    pub entity: Entity,
    pub position: Position,
    pub distance: f64,
    pub sex: Sex,
    pub state: AnimalState,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeenWater {
    pub cell: CellPos,
    pub position: Position,
    pub distance: f64,
}

/// Everything within sight of one animal, each list nearest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sighting {
    pub food: Vec<SeenFood>,
    pub rabbits: Vec<SeenAnimal>,
    pub foxes: Vec<SeenAnimal>,
    pub water: Vec<SeenWater>,
}

impl Sighting {
    /// Nearest opposite-sex animal of the given list that is ready to mate.
    #[must_use]
    pub fn nearest_mate(list: &[SeenAnimal], sex: Sex) -> Option<&SeenAnimal> {
        list.iter()
            .find(|a| a.state == AnimalState::Reproduce && a.sex == sex.opposite())
    }

    #[must_use]
    pub fn kin(&self, species: Species) -> &[SeenAnimal] {
        match species {
            Species::Rabbit => &self.rabbits,
            Species::Fox => &self.foxes,
        }
    }
}

/// Collects food, rabbits, foxes and drinkable cells within `radius` of
/// `origin`, excluding `viewer` itself. Pure read.
#[must_use]
pub fn sight_entities(
    view: &WorldView<'_>,
    viewer: Entity,
    origin: Position,
    radius: f64,
) -> Sighting {
    let mut sighting = Sighting::default();

    for (entity, (pos, _)) in view.ecs.query::<(&Position, &Food)>().iter() {
        let distance = origin.distance(pos);
        if distance <= radius {
            sighting.food.push(SeenFood {
                entity,
                position: *pos,
                distance,
            });
        }
    }

    for (entity, (pos, animal)) in view.ecs.query::<(&Position, &Animal)>().iter() {
        if entity == viewer {
            continue;
        }
        let distance = origin.distance(pos);
        if distance > radius {
            continue;
        }
        let seen = SeenAnimal {
            entity,
            position: *pos,
            distance,
            sex: animal.sex,
            state: animal.state,
        };
        match animal.species {
            Species::Rabbit => sighting.rabbits.push(seen),
            Species::Fox => sighting.foxes.push(seen),
        }
    }

    view.shore.query_callback(origin.x, origin.y, radius, |cell| {
        let position = Position::new(f64::from(cell.x), f64::from(cell.y));
        let distance = origin.distance(&position);
        if distance <= radius {
            sighting.water.push(SeenWater {
                cell,
                position,
                distance,
            });
        }
    });

    sighting.food.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    sighting.rabbits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    sighting.foxes.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    sighting
        .water
        .sort_by(|a, b| a.distance.total_cmp(&b.distance).then((a.cell.y, a.cell.x).cmp(&(b.cell.y, b.cell.x))));

    sighting
}
