use crate::model::config::AppConfig;
use crate::model::stats::StatsCollector;
use crate::model::world::World;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Drives a world frame by frame and feeds its statistics observer.
pub struct App {
    pub world: World,
    pub stats: StatsCollector,
    pub paused: bool,
    /// Stop after this many ticks even if both species survive.
    pub max_ticks: Option<u64>,
}

/// Outcome of a headless run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub runtime_ms: u64,
    pub rabbits: usize,
    pub foxes: usize,
    pub food: usize,
    pub births: u64,
    pub deaths: u64,
    /// `true` when the run ended because a population collapsed.
    pub terminated: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        Ok(Self::with_world(World::new(config)?))
    }

    pub fn with_world(world: World) -> Self {
        let mut stats = StatsCollector::new(world.config.stats.timeout_ms);
        stats.observe(&world.latest_snapshot());
        Self {
            world,
            stats,
            paused: false,
            max_ticks: None,
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        tracing::info!(paused = self.paused, tick = self.world.tick, "pause toggled");
    }

    /// Advances one frame unless paused. Returns whether the run is still live.
    pub fn tick(&mut self) -> bool {
        if !self.world.running {
            return false;
        }
        if self.paused {
            return true;
        }
        self.world.step(self.world.config.world.frame_ms);
        // The terminating tick publishes no snapshot, so read the live state.
        self.stats.observe(&self.world.snapshot());
        self.world.running
    }

    /// Steps until termination, the tick budget, or a pause.
    pub fn run_headless(&mut self) -> RunSummary {
        let budget = self.max_ticks.unwrap_or(u64::MAX);
        let mut ticks = 0;
        while ticks < budget && !self.paused && self.tick() {
            ticks += 1;
        }
        self.summary()
    }

    #[must_use]
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            ticks: self.world.tick,
            runtime_ms: self.world.runtime_ms,
            rabbits: self.world.rabbit_count(),
            foxes: self.world.fox_count(),
            food: self.world.food_count(),
            births: self.world.metrics.births(),
            deaths: self.world.metrics.deaths(),
            terminated: !self.world.running,
        }
    }
}
