/// Asserts the live rabbit and fox counts.
#[macro_export]
macro_rules! assert_population {
    ($world:expr, $rabbits:expr, $foxes:expr) => {
        assert_eq!(
            ($world.rabbit_count(), $world.fox_count()),
            ($rabbits, $foxes),
            "(rabbits, foxes) mismatch at tick {}",
            $world.tick
        );
    };
}

/// Asserts that an entity handle no longer refers to a live entity.
#[macro_export]
macro_rules! assert_despawned {
    ($world:expr, $entity:expr) => {
        assert!(
            !$world.ecs.contains($entity),
            "entity {:?} should be gone but is still alive",
            $entity
        );
    };
}

/// Asserts that two positions are within `1e-9` of each other.
#[macro_export]
macro_rules! assert_pos_eq {
    ($actual:expr, $x:expr, $y:expr) => {
        let actual = $actual;
        assert!(
            (actual.x - $x).abs() < 1e-9 && (actual.y - $y).abs() < 1e-9,
            "expected ({}, {}), got ({}, {})",
            $x,
            $y,
            actual.x,
            actual.y
        );
    };
}

/// Counts events matching a pattern.
#[macro_export]
macro_rules! count_events {
    ($events:expr, $pattern:pat) => {
        $events.iter().filter(|e| matches!(e, $pattern)).count()
    };
}
