use crate::config::ConfigError;
use foxhollow_data::{Biome, Thresholds};

/// Display and habitat properties of a biome.
pub trait BiomeLogic {
    /// Fixed RGB colour used by the terrain raster.
    fn color(&self) -> [u8; 3];
    /// Animals and food may be placed here.
    fn is_habitable(&self) -> bool;
    /// Animals may drink here.
    fn is_drinkable(&self) -> bool;
    fn is_deep_water(&self) -> bool;
}

impl BiomeLogic for Biome {
    fn color(&self) -> [u8; 3] {
        match self {
            Biome::Ocean => [54, 62, 150],
            Biome::Shallows => [88, 205, 237],
            Biome::Beach => [247, 247, 119],
            Biome::Tundra => [132, 173, 158],
            Biome::Grassland => [55, 181, 43],
            Biome::Forest => [1, 50, 32],
            Biome::Snow => [255, 255, 255],
            Biome::Taiga => [62, 87, 71],
            Biome::Swamp => [92, 112, 104],
            Biome::Scorched => [85, 85, 85],
            Biome::Bare => [136, 136, 136],
            Biome::Shrubland => [136, 153, 119],
        }
    }

    fn is_habitable(&self) -> bool {
        matches!(self, Biome::Forest | Biome::Grassland)
    }

    fn is_drinkable(&self) -> bool {
        matches!(self, Biome::Shallows)
    }

    fn is_deep_water(&self) -> bool {
        matches!(self, Biome::Ocean)
    }
}

/// Maps (elevation, moisture) to a biome. Rules are tried in order and the
/// first match wins.
pub fn classify(elevation: f64, moisture: f64, t: &Thresholds) -> Biome {
    if elevation <= t.water {
        return Biome::Ocean;
    }
    if elevation <= t.sand && moisture >= 0.2 {
        return Biome::Swamp;
    }
    if elevation <= t.shallowwater {
        return Biome::Shallows;
    }
    if elevation <= t.sand {
        return Biome::Beach;
    }

    if elevation > t.hugemountain {
        return if moisture < 0.1 {
            Biome::Scorched
        } else if moisture < 0.2 {
            Biome::Bare
        } else if moisture < 0.5 {
            Biome::Tundra
        } else {
            Biome::Snow
        };
    }

    if elevation > t.mountain {
        return if moisture < 0.66 {
            Biome::Shrubland
        } else {
            Biome::Taiga
        };
    }

    if moisture < 0.33 {
        Biome::Grassland
    } else {
        Biome::Forest
    }
}

/// [`classify`] bound to a set of thresholds that has been checked for ordering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiomeClassifier {
    thresholds: Thresholds,
}

impl BiomeClassifier {
    pub fn new(thresholds: Thresholds) -> Result<Self, ConfigError> {
        if let Some(((lower, lower_value), (upper, upper_value))) = thresholds.first_inversion() {
            return Err(ConfigError::NonMonotonicThresholds {
                lower,
                lower_value,
                upper,
                upper_value,
            });
        }
        Ok(Self { thresholds })
    }

    #[must_use]
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    #[must_use]
    pub fn classify(&self, elevation: f64, moisture: f64) -> Biome {
        classify(elevation, moisture, &self.thresholds)
    }
}
