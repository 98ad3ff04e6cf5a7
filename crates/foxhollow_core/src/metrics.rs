//! Run metrics and structured logging for the simulation.

use foxhollow_data::{DeathCause, LiveEvent};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Counters for one simulation run. Safe to read from another thread.
pub struct Metrics {
    tick_count: AtomicU64,
    births: AtomicU64,
    deaths: AtomicU64,
    predations: AtomicU64,
    food_spawned: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            births: AtomicU64::new(0),
            deaths: AtomicU64::new(0),
            predations: AtomicU64::new(0),
            food_spawned: AtomicU64::new(0),
        }
    }

    /// Records a completed tick and the events it produced.
    pub fn record_tick(&self, duration: Duration, events: &[LiveEvent], rabbits: usize, foxes: usize) {
        for event in events {
            match event {
                LiveEvent::Birth { .. } => {
                    self.births.fetch_add(1, Ordering::Relaxed);
                }
                LiveEvent::Death { cause, .. } => {
                    self.deaths.fetch_add(1, Ordering::Relaxed);
                    if *cause == DeathCause::Predation {
                        self.predations.fetch_add(1, Ordering::Relaxed);
                    }
                }
                LiveEvent::FoodSpawned { .. } => {
                    self.food_spawned.fetch_add(1, Ordering::Relaxed);
                }
                LiveEvent::Extinction { .. } => {}
            }
        }

        let tick = self.tick_count.fetch_add(1, Ordering::Relaxed) + 1;
        if tick % 1000 == 0 {
            tracing::info!(
                tick,
                rabbits,
                foxes,
                births = self.births(),
                deaths = self.deaths(),
                duration_us = duration.as_micros() as u64,
                "simulation tick"
            );
        }
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn births(&self) -> u64 {
        self.births.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn deaths(&self) -> u64 {
        self.deaths.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn predations(&self) -> u64 {
        self.predations.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn food_spawned(&self) -> u64 {
        self.food_spawned.load(Ordering::Relaxed)
    }
}

/// Installs the global tracing subscriber. `RUST_LOG` overrides the default
/// `foxhollow=info` filter. Calling it again is a no-op.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(
            "foxhollow=info,foxhollow_lib=info,foxhollow_core=info,foxhollow_io=info",
        )
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .ok();
}
