//! Population statistics gathered from world snapshots.
//!
//! Trackers never touch the world. They are fed snapshots on whatever schedule
//! the observer chooses and decide for themselves whether a new row is due.

use crate::snapshot::WorldSnapshot;
use foxhollow_data::{FoodRow, PopulationRow, Sex, Species};
use serde::{Deserialize, Serialize};

/// Mean speed, thirst, hunger and size of a group of animals.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Averages {
    speed: f64,
    thirst: f64,
    hunger: f64,
    size: f64,
}

/// Records one [`PopulationRow`] per observation where the head count changed
/// or `timeout_ms` of simulated time passed. The first observation always records.
#[derive(Debug, Clone)]
pub struct PopulationTracker {
    pub species: Species,
    pub timeout_ms: u64,
    rows: Vec<PopulationRow>,
    last_count: Option<usize>,
    last_time_ms: u64,
    averages: Averages,
}

impl PopulationTracker {
    #[must_use]
    pub fn new(species: Species, timeout_ms: u64) -> Self {
        Self {
            species,
            timeout_ms,
            rows: Vec::new(),
            last_count: None,
            last_time_ms: 0,
            averages: Averages::default(),
        }
    }

    /// Returns `true` when a row was appended.
    pub fn observe(&mut self, snapshot: &WorldSnapshot) -> bool {
        let members: Vec<_> = snapshot.species(self.species).collect();
        let count = members.len();
        if !due(self.last_count, count, self.last_time_ms, snapshot.runtime_ms, self.timeout_ms) {
            return false;
        }

        // An empty population keeps the previous averages.
        if count > 0 {
            let n = count as f64;
            self.averages = Averages {
                speed: members.iter().map(|a| a.speed).sum::<f64>() / n,
                thirst: members.iter().map(|a| a.thirst).sum::<f64>() / n,
                hunger: members.iter().map(|a| a.hunger).sum::<f64>() / n,
                size: members.iter().map(|a| a.size).sum::<f64>() / n,
            };
        }
        let male_count = members.iter().filter(|a| a.sex == Sex::Male).count();

        self.rows.push(PopulationRow {
            time_s: snapshot.runtime_ms as f64 / 1000.0,
            count,
            avg_speed: self.averages.speed,
            avg_thirst: self.averages.thirst,
            avg_hunger: self.averages.hunger,
            avg_size: self.averages.size,
            male_count,
            female_count: count - male_count,
        });
        self.last_count = Some(count);
        self.last_time_ms = snapshot.runtime_ms;
        true
    }

    #[must_use]
    pub fn rows(&self) -> &[PopulationRow] {
        &self.rows
    }
}

#[derive(Debug, Clone)]
pub struct FoodTracker {
    pub timeout_ms: u64,
    rows: Vec<FoodRow>,
    last_count: Option<usize>,
    last_time_ms: u64,
}

impl FoodTracker {
    #[must_use]
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            timeout_ms,
            rows: Vec::new(),
            last_count: None,
            last_time_ms: 0,
        }
    }

    pub fn observe(&mut self, snapshot: &WorldSnapshot) -> bool {
        let count = snapshot.food.len();
        if !due(self.last_count, count, self.last_time_ms, snapshot.runtime_ms, self.timeout_ms) {
            return false;
        }
        self.rows.push(FoodRow {
            time_s: snapshot.runtime_ms as f64 / 1000.0,
            count,
        });
        self.last_count = Some(count);
        self.last_time_ms = snapshot.runtime_ms;
        true
    }

    #[must_use]
    pub fn rows(&self) -> &[FoodRow] {
        &self.rows
    }
}

fn due(last_count: Option<usize>, count: usize, last_ms: u64, now_ms: u64, timeout_ms: u64) -> bool {
    match last_count {
        None => true,
        Some(last) => last != count || now_ms.saturating_sub(last_ms) >= timeout_ms,
    }
}

/// The rabbit, fox and food series of one run.
#[derive(Debug, Clone)]
pub struct StatsCollector {
    pub rabbits: PopulationTracker,
    pub foxes: PopulationTracker,
    pub food: FoodTracker,
}

impl StatsCollector {
    #[must_use]
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            rabbits: PopulationTracker::new(Species::Rabbit, timeout_ms),
            foxes: PopulationTracker::new(Species::Fox, timeout_ms),
            food: FoodTracker::new(timeout_ms),
        }
    }

    pub fn observe(&mut self, snapshot: &WorldSnapshot) {
        self.rabbits.observe(snapshot);
        self.foxes.observe(snapshot);
        self.food.observe(snapshot);
    }

    /// Owned copy of all three series, ready to serialize.
    #[must_use]
    pub fn report(&self) -> StatsReport {
        StatsReport {
            rabbits: self.rabbits.rows().to_vec(),
            foxes: self.foxes.rows().to_vec(),
            food: self.food.rows().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    pub rabbits: Vec<PopulationRow>,
    pub foxes: Vec<PopulationRow>,
    pub food: Vec<FoodRow>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::AnimalSnapshot;
    use foxhollow_data::{AnimalState, Position};

    fn rabbit(speed: f64, sex: Sex) -> AnimalSnapshot {
        AnimalSnapshot {
            species: Species::Rabbit,
            position: Position::default(),
            speed,
            size: 0.5,
            sex,
            hunger: 80.0,
            thirst: 60.0,
            state: AnimalState::Roam,
        }
    }

    fn snapshot(runtime_ms: u64, animals: Vec<AnimalSnapshot>) -> WorldSnapshot {
        WorldSnapshot {
            runtime_ms,
            running: true,
            animals,
            ..Default::default()
        }
    }

    #[test]
    fn test_first_observation_records() {
        let mut t = PopulationTracker::new(Species::Rabbit, 3000);
        assert!(t.observe(&snapshot(0, vec![rabbit(2.0, Sex::Male), rabbit(4.0, Sex::Female)])));
        let row = t.rows()[0];
        assert_eq!(row.count, 2);
        assert_eq!(row.avg_speed, 3.0);
        assert_eq!(row.male_count, 1);
        assert_eq!(row.female_count, 1);
    }

    #[test]
    fn test_records_on_change_or_timeout() {
        let mut t = PopulationTracker::new(Species::Rabbit, 3000);
        let one = vec![rabbit(2.0, Sex::Male)];
        assert!(t.observe(&snapshot(0, one.clone())));
        assert!(!t.observe(&snapshot(1000, one.clone())));
        assert!(t.observe(&snapshot(1500, vec![])));
        assert!(!t.observe(&snapshot(4000, vec![])));
        assert!(t.observe(&snapshot(4500, vec![])));
        assert_eq!(t.rows().len(), 3);
        assert_eq!(t.rows()[2].time_s, 4.5);
    }

    #[test]
    fn test_empty_population_keeps_previous_averages() {
        let mut t = PopulationTracker::new(Species::Rabbit, 3000);
        t.observe(&snapshot(0, vec![rabbit(2.0, Sex::Male)]));
        t.observe(&snapshot(33, vec![]));
        let row = t.rows()[1];
        assert_eq!(row.count, 0);
        assert_eq!(row.avg_speed, 2.0);
        assert_eq!(row.avg_hunger, 80.0);
        assert_eq!(row.male_count, 0);
    }

    #[test]
    fn test_empty_from_start_reports_zero() {
        let mut t = PopulationTracker::new(Species::Fox, 3000);
        t.observe(&snapshot(0, vec![rabbit(2.0, Sex::Male)]));
        assert_eq!(t.rows()[0].count, 0);
        assert_eq!(t.rows()[0].avg_speed, 0.0);
    }

    #[test]
    fn test_collector_tracks_food() {
        let mut c = StatsCollector::new(3000);
        let mut s = snapshot(0, vec![]);
        s.food = vec![Position::new(1.0, 1.0)];
        c.observe(&s);
        s.runtime_ms = 33;
        s.food.clear();
        c.observe(&s);
        let report = c.report();
        assert_eq!(report.food.len(), 2);
        assert_eq!(report.rabbits.len(), 1);
    }
}
