use crate::error::Result;
use crate::serialization::write_json_file;
use foxhollow_core::stats::{StatsCollector, StatsReport};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk form of a run's statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsFile {
    /// Fingerprint of the configuration that produced the run.
    pub config_fingerprint: String,
    #[serde(flatten)]
    pub report: StatsReport,
}

/// Writes the rabbit, fox and food series as pretty JSON.
pub fn write_stats<P: AsRef<Path>>(
    collector: &StatsCollector,
    fingerprint: &str,
    path: P,
) -> Result<()> {
    let file = StatsFile {
        config_fingerprint: fingerprint.to_string(),
        report: collector.report(),
    };
    write_json_file(&file, &path)?;
    tracing::info!(
        path = %path.as_ref().display(),
        rabbit_rows = file.report.rabbits.len(),
        fox_rows = file.report.foxes.len(),
        food_rows = file.report.food.len(),
        "statistics written"
    );
    Ok(())
}
