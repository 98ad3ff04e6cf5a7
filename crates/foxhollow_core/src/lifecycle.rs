use crate::config::{MetabolismConfig, SpeciesConfig};
use foxhollow_data::{
    Animal, AnimalState, Appetite, DeathCause, Sex, Species, Vitals, VITAL_MAX,
};
use rand::Rng;
use std::f64::consts::TAU;

/// A speed in `(min, max]`.
pub fn random_speed<R: Rng>(min: f64, max: f64, rng: &mut R) -> f64 {
    if max <= min {
        return max;
    }
    max - rng.gen_range(0.0..(max - min))
}

/// Body size in tenths between 0.5 and 1.0.
pub fn random_size<R: Rng>(rng: &mut R) -> f64 {
    f64::from(rng.gen_range(5u32..=10)) / 10.0
}

pub fn create_animal_with_rng<R: Rng>(
    species: Species,
    speed: f64,
    config: &SpeciesConfig,
    rng: &mut R,
) -> Animal {
    Animal {
        species,
        sex: if rng.gen_bool(0.5) {
            Sex::Male
        } else {
            Sex::Female
        },
        size: random_size(rng),
        speed,
        sight: config.sight,
        vitals: Vitals::default(),
        appetite: Appetite::default(),
        state: AnimalState::Roam,
        heading: rng.gen_range(0.0..TAU),
    }
}

/// Offspring speed drawn uniformly from
/// `[max(mean - variance, floor), mean + variance]`.
pub fn offspring_speed<R: Rng>(
    a: f64,
    b: f64,
    metabolism: &MetabolismConfig,
    rng: &mut R,
) -> f64 {
    let mean = (a + b) / 2.0;
    let lo = (mean - metabolism.offspring_speed_variance).max(metabolism.min_offspring_speed);
    let hi = mean + metabolism.offspring_speed_variance;
    if hi <= lo {
        lo
    } else {
        rng.gen_range(lo..=hi)
    }
}

/// Records a meal. Returns `true` when this meal switched the animal to REPRODUCE.
pub fn eat(animal: &mut Animal, config: &SpeciesConfig) -> bool {
    let appetite = &mut animal.appetite;
    appetite.eat_count += 1;
    animal.vitals.hunger = (animal.vitals.hunger + config.eat_restore).clamp(0.0, VITAL_MAX);

    let count = appetite.eat_count;
    if count % config.eats_per_litter == 0 && count != appetite.food_checkpoint {
        appetite.food_checkpoint = count;
        animal.state = AnimalState::Reproduce;
        return true;
    }
    false
}

/// Records a drink. Returns `true` when this drink switched the animal to REPRODUCE.
pub fn drink(animal: &mut Animal, config: &SpeciesConfig) -> bool {
    let appetite = &mut animal.appetite;
    appetite.drink_count += 1;
    animal.vitals.thirst = (animal.vitals.thirst + config.drink_restore).clamp(0.0, VITAL_MAX);

    let count = appetite.drink_count;
    if count % config.drinks_per_litter == 0 && count != appetite.water_checkpoint {
        appetite.water_checkpoint = count;
        animal.state = AnimalState::Reproduce;
        return true;
    }
    false
}

/// Applies one tick of hunger and thirst loss and reports the death cause, if any.
pub fn decay(animal: &mut Animal, metabolism: &MetabolismConfig) -> Option<DeathCause> {
    let vitals = &mut animal.vitals;
    vitals.hunger = (vitals.hunger - animal.size).clamp(0.0, VITAL_MAX);
    vitals.thirst = (vitals.thirst - animal.speed * metabolism.thirst_rate).clamp(0.0, VITAL_MAX);

    if vitals.hunger <= 0.0 {
        Some(DeathCause::Starvation)
    } else if vitals.thirst <= 0.0 {
        Some(DeathCause::Dehydration)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rabbit(size: f64, speed: f64) -> Animal {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        Animal {
            size,
            ..create_animal_with_rng(Species::Rabbit, speed, &SpeciesConfig::rabbit(), &mut rng)
        }
    }

    #[test]
    fn test_decay_reduces_hunger_by_size() {
        let mut r = rabbit(0.6, 2.0);
        assert_eq!(decay(&mut r, &MetabolismConfig::default()), None);
        assert!((r.vitals.hunger - 99.4).abs() < 1e-9);
        assert!((r.vitals.thirst - 99.8).abs() < 1e-9);
    }

    #[test]
    fn test_decay_reports_starvation_before_dehydration() {
        let mut r = rabbit(1.0, 4.0);
        r.vitals.hunger = 0.5;
        r.vitals.thirst = 0.1;
        assert_eq!(decay(&mut r, &MetabolismConfig::default()), Some(DeathCause::Starvation));
        assert!(!r.vitals.is_alive());

        let mut r = rabbit(0.5, 4.0);
        r.vitals.thirst = 0.3;
        assert_eq!(decay(&mut r, &MetabolismConfig::default()), Some(DeathCause::Dehydration));
    }

    #[test]
    fn test_eat_caps_and_fires_once_per_multiple() {
        let config = SpeciesConfig::rabbit();
        let mut r = rabbit(0.5, 1.0);
        r.vitals.hunger = 90.0;
        assert!(!eat(&mut r, &config));
        assert_eq!(r.vitals.hunger, VITAL_MAX);
        assert!(eat(&mut r, &config));
        assert_eq!(r.state, AnimalState::Reproduce);
        assert_eq!(r.appetite.food_checkpoint, 2);

        r.state = AnimalState::Roam;
        assert!(!eat(&mut r, &config));
        assert!(eat(&mut r, &config));
    }

    #[test]
    fn test_fox_needs_three_meals() {
        let config = SpeciesConfig::fox();
        let mut f = rabbit(0.5, 1.0);
        assert!(!eat(&mut f, &config));
        assert!(!eat(&mut f, &config));
        assert!(eat(&mut f, &config));
    }

    #[test]
    fn test_drink_uses_its_own_checkpoint() {
        let config = SpeciesConfig::fox();
        let mut f = rabbit(0.5, 1.0);
        f.vitals.thirst = 10.0;
        assert!(!drink(&mut f, &config));
        assert_eq!(f.vitals.thirst, 35.0);
        assert!(drink(&mut f, &config));
        assert_eq!(f.appetite.water_checkpoint, 2);
        assert_eq!(f.appetite.food_checkpoint, 0);
    }

    #[test]
    fn test_random_size_is_in_tenths() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..200 {
            let s = random_size(&mut rng);
            assert!((0.5..=1.0).contains(&s));
            assert!(((s * 10.0).round() - s * 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_offspring_speed_floor() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let metabolism = MetabolismConfig::default();
        for _ in 0..100 {
            assert!(offspring_speed(0.2, 0.2, &metabolism, &mut rng) >= metabolism.min_offspring_speed);
        }
    }

    proptest! {
        #[test]
        fn prop_vitals_stay_in_range(ops in prop::collection::vec(0u8..3, 0..200), size in 0.5f64..=1.0, speed in 0.1f64..4.0) {
            let rabbit_cfg = SpeciesConfig::rabbit();
            let metabolism = MetabolismConfig::default();
            let mut r = rabbit(size, speed);
            for op in ops {
                match op {
                    0 => { eat(&mut r, &rabbit_cfg); }
                    1 => { drink(&mut r, &rabbit_cfg); }
                    _ => { decay(&mut r, &metabolism); }
                }
                prop_assert!((0.0..=VITAL_MAX).contains(&r.vitals.hunger));
                prop_assert!((0.0..=VITAL_MAX).contains(&r.vitals.thirst));
            }
        }

        #[test]
        fn prop_offspring_speed_within_variance(a in 0.1f64..4.0, b in 0.1f64..4.0, seed in any::<u64>()) {
            let metabolism = MetabolismConfig::default();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let s = offspring_speed(a, b, &metabolism, &mut rng);
            let mean = (a + b) / 2.0;
            prop_assert!(s <= mean + metabolism.offspring_speed_variance + 1e-12);
            prop_assert!(s >= (mean - metabolism.offspring_speed_variance).max(metabolism.min_offspring_speed) - 1e-12);
        }

        #[test]
        fn prop_random_speed_in_half_open_range(seed in any::<u64>()) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let s = random_speed(0.1, 4.0, &mut rng);
            prop_assert!(s > 0.1 && s <= 4.0);
        }
    }
}
