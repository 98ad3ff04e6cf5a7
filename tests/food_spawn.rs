mod common;
use common::{AnimalBuilder, WorldBuilder};
use foxhollow_data::{CellPos, LiveEvent, Position};
use foxhollow_lib::model::config::AppConfig;
use foxhollow_lib::model::TerrainPartition;
use foxhollow_lib::World;

fn quiet_world(configure: impl FnOnce(&mut AppConfig)) -> World {
    let mut world = WorldBuilder::new().with_config(configure).build();
    world.spawn_animal(Position::new(10.5, 10.5), AnimalBuilder::rabbit().bystander().build());
    world.spawn_animal(Position::new(20.5, 20.5), AnimalBuilder::rabbit().bystander().build());
    world.spawn_animal(Position::new(80.5, 80.5), AnimalBuilder::fox().bystander().build());
    world
}

#[test]
fn test_food_appears_once_per_simulated_second() {
    let mut world = quiet_world(|_| {});

    world.step(500);
    assert_eq!(world.food_count(), 0);

    let events = world.step(500);
    assert_eq!(world.food_count(), 1);
    assert_eq!(count_events!(events, LiveEvent::FoodSpawned { .. }), 1);
    assert_eq!(world.food_checkpoint_ms, 1000);

    world.step(999);
    assert_eq!(world.food_count(), 1);

    world.step(1);
    assert_eq!(world.food_count(), 2);
}

#[test]
fn test_food_stops_at_capacity() {
    let mut world = quiet_world(|c| c.world.food_capacity = 1);
    for _ in 0..4 {
        world.step(1000);
    }
    assert_eq!(world.food_count(), 1);
    assert_eq!(world.metrics.food_spawned(), 1);
}

#[test]
fn test_food_is_only_placed_on_land() {
    let mut config = AppConfig::default();
    config.world.seed = Some(7);
    config.world.initial_rabbits = 0;
    config.world.initial_foxes = 0;
    config.world.initial_food = 5;
    let partition = TerrainPartition {
        width: 10,
        height: 10,
        land: vec![CellPos::new(3, 4)],
        shore: vec![CellPos::new(0, 0)],
        ..Default::default()
    };

    let world = World::from_partition(partition, config).expect("one land cell is enough");
    let snapshot = world.snapshot();
    assert_eq!(snapshot.food.len(), 5);
    assert!(snapshot.food.iter().all(|p| *p == Position::new(3.0, 4.0)));
}

#[test]
fn test_world_without_land_is_rejected() {
    let partition = TerrainPartition {
        width: 4,
        height: 4,
        water: (0..16).map(|i| CellPos::new(i % 4, i / 4)).collect(),
        ..Default::default()
    };
    assert!(World::from_partition(partition, AppConfig::default()).is_err());
}
