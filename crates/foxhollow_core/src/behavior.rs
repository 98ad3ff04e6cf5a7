//! Per-species decision policy.
//!
//! [`decide`] is a pure function of one animal, what it remembers and what it
//! currently sees. It returns an [`Action`]; the world applies it.

use crate::sight::{Bounds, SeenAnimal, Sighting, WorldView};
use foxhollow_data::{Animal, AnimalState, CellPos, Position, Species};
use hecs::Entity;
use rand::Rng;
use std::f64::consts::{FRAC_PI_2, PI};

/// Heading jitter applied after every random-walk step (10 degrees).
const HEADING_JITTER: f64 = PI / 18.0;

/// What an animal is currently heading for. Entity targets are handles into
/// the world and may go stale at any time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    Food(Entity),
    Prey(Entity),
    Mate(Entity),
    Water(CellPos),
}

/// Per-animal memory component.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Mind {
    pub target: Option<Target>,
}

/// A remembered target that is still valid this tick, with its current position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tracked {
    pub target: Target,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Rabbit running from sighted foxes.
    Flee { to: Position },
    /// Intermediate step toward the current target.
    Approach { to: Position },
    Eat { food: Entity, at: Position },
    Prey { rabbit: Entity, at: Position },
    Mate { partner: Entity, at: Position },
    Drink { cell: CellPos, at: Position },
    Wander,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub action: Action,
    /// Target to remember after this tick.
    pub target: Option<Target>,
}

pub struct DecisionInput<'a> {
    pub animal: &'a Animal,
    pub position: Position,
    pub remembered: Option<Tracked>,
    pub sighting: &'a Sighting,
    pub bounds: Bounds,
    pub hunger_seek_threshold: f64,
}

/// Checks a remembered target against the live world.
///
/// Food must still exist, prey must still be a live rabbit, and a mate must
/// still be a live opposite-sex animal of the same species in REPRODUCE.
#[must_use]
pub fn resolve_target(view: &WorldView<'_>, me: &Animal, target: Target) -> Option<Tracked> {
    let position = match target {
        Target::Food(e) => view.food_at(e)?,
        Target::Prey(e) => {
            let (pos, prey) = view.animal(e)?;
            (prey.species == Species::Rabbit).then_some(pos)?
        }
        Target::Mate(e) => {
            let (pos, mate) = view.animal(e)?;
            let valid = mate.species == me.species
                && mate.sex == me.sex.opposite()
                && mate.state == AnimalState::Reproduce;
            valid.then_some(pos)?
        }
        Target::Water(cell) => Position::new(f64::from(cell.x), f64::from(cell.y)),
    };
    Some(Tracked { target, position })
}

pub fn decide(input: &DecisionInput<'_>) -> Decision {
    match input.animal.species {
        Species::Rabbit if !input.sighting.foxes.is_empty() => Decision {
            action: Action::Flee {
                to: flee_position(
                    input.position,
                    input.animal.speed,
                    &input.sighting.foxes,
                    input.bounds,
                ),
            },
            target: input.remembered.map(|t| t.target),
        },
        _ => forage_or_mate(input),
    }
}

fn forage_or_mate(input: &DecisionInput<'_>) -> Decision {
    let animal = input.animal;

    if animal.state == AnimalState::Roam || animal.vitals.hunger <= input.hunger_seek_threshold {
        if let Some(meal) = meal_target(input) {
            return pursue(input.position, animal.speed, meal);
        }
        return wander(input);
    }

    if let Some(mate) = mate_target(input) {
        return pursue(input.position, animal.speed, mate);
    }
    if let Some(water) = water_target(input) {
        return pursue(input.position, animal.speed, water);
    }
    wander(input)
}

fn remembered(input: &DecisionInput<'_>, matches: fn(&Target) -> bool) -> Option<Tracked> {
    input.remembered.filter(|t| matches(&t.target))
}

fn meal_target(input: &DecisionInput<'_>) -> Option<Tracked> {
    match input.animal.species {
        Species::Rabbit => input
            .sighting
            .food
            .first()
            .map(|f| Tracked {
                target: Target::Food(f.entity),
                position: f.position,
            })
            .or_else(|| remembered(input, |t| matches!(t, Target::Food(_)))),
        Species::Fox => input
            .sighting
            .rabbits
            .first()
            .map(|r| Tracked {
                target: Target::Prey(r.entity),
                position: r.position,
            })
            .or_else(|| remembered(input, |t| matches!(t, Target::Prey(_)))),
    }
}

fn mate_target(input: &DecisionInput<'_>) -> Option<Tracked> {
    let kin = input.sighting.kin(input.animal.species);
    Sighting::nearest_mate(kin, input.animal.sex)
        .map(|m| Tracked {
            target: Target::Mate(m.entity),
            position: m.position,
        })
        .or_else(|| remembered(input, |t| matches!(t, Target::Mate(_))))
}

fn water_target(input: &DecisionInput<'_>) -> Option<Tracked> {
    input
        .sighting
        .water
        .first()
        .map(|w| Tracked {
            target: Target::Water(w.cell),
            position: w.position,
        })
        .or_else(|| remembered(input, |t| matches!(t, Target::Water(_))))
}

fn wander(input: &DecisionInput<'_>) -> Decision {
    Decision {
        action: Action::Wander,
        target: input.remembered.map(|t| t.target),
    }
}

/// Jumps onto the target when it is within one step, otherwise steps toward it.
fn pursue(from: Position, speed: f64, tracked: Tracked) -> Decision {
    let distance = from.distance(&tracked.position);
    if distance <= speed {
        let at = tracked.position;
        let action = match tracked.target {
            Target::Food(food) => Action::Eat { food, at },
            Target::Prey(rabbit) => Action::Prey { rabbit, at },
            Target::Mate(partner) => Action::Mate { partner, at },
            Target::Water(cell) => Action::Drink { cell, at },
        };
        return Decision {
            action,
            target: None,
        };
    }
    Decision {
        action: Action::Approach {
            to: step_toward(from, tracked.position, speed),
        },
        target: Some(tracked.target),
    }
}

/// Moves `speed` units along the straight line to `to`.
#[must_use]
pub fn step_toward(from: Position, to: Position, speed: f64) -> Position {
    let distance = from.distance(&to);
    if distance <= f64::EPSILON {
        return to;
    }
    let ratio = speed / distance;
    Position::new(
        from.x + (to.x - from.x) * ratio,
        from.y + (to.y - from.y) * ratio,
    )
}

/// One step directly away from the centroid of `threats`. When that step would
/// leave the world the animal heads for the world centre instead.
#[must_use]
pub fn flee_position(
    from: Position,
    speed: f64,
    threats: &[SeenAnimal],
    bounds: Bounds,
) -> Position {
    if threats.is_empty() {
        return from;
    }
    let n = threats.len() as f64;
    let cx = threats.iter().map(|t| t.position.x).sum::<f64>() / n;
    let cy = threats.iter().map(|t| t.position.y).sum::<f64>() / n;

    let away = (cy - from.y).atan2(cx - from.x) + PI;
    let proposed = Position::new(from.x + speed * away.cos(), from.y + speed * away.sin());
    if bounds.contains(proposed) {
        return proposed;
    }

    let center = bounds.center();
    let inward = (center.y - from.y).atan2(center.x - from.x);
    Position::new(from.x + speed * inward.cos(), from.y + speed * inward.sin())
}

/// Advances along `heading`, turning by quarter turns until the step stays in
/// bounds. Returns the new position and the jittered heading for the next
/// tick; the animal stays put when every direction is blocked.
pub fn random_walk<R: Rng>(
    from: Position,
    heading: f64,
    speed: f64,
    bounds: Bounds,
    rng: &mut R,
) -> (Position, f64) {
    let mut heading = heading;
    for _ in 0..4 {
        let proposed = Position::new(from.x + speed * heading.cos(), from.y + speed * heading.sin());
        if bounds.contains(proposed) {
            let next = heading + rng.gen_range(-HEADING_JITTER..HEADING_JITTER);
            return (proposed, next);
        }
        heading += FRAC_PI_2;
    }
    (from, heading)
}
