pub use foxhollow_core::{BiomeClassifier, BiomeLogic, TerrainMap, TerrainPartition};
pub mod behavior {
    pub use foxhollow_core::behavior::*;
}
pub mod biome {
    pub use foxhollow_core::biome::*;
}
pub mod config {
    pub use foxhollow_core::config::*;
}
pub mod lifecycle {
    pub use foxhollow_core::lifecycle::*;
}
pub mod metrics {
    pub use foxhollow_core::metrics::*;
}
pub mod noise {
    pub use foxhollow_core::noise::*;
}
pub mod sight {
    pub use foxhollow_core::sight::*;
}
pub mod snapshot {
    pub use foxhollow_core::snapshot::*;
}
pub mod spatial {
    pub use foxhollow_core::spatial::*;
}
pub mod stats {
    pub use foxhollow_core::stats::*;
}
pub mod terrain {
    pub use foxhollow_core::terrain::*;
}

pub mod state {
    pub use foxhollow_data::*;
}
pub mod world;
