use serde::{Deserialize, Serialize};

/// Discrete terrain classification derived from elevation and moisture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Biome {
    /// Deep water.
    Ocean,
    /// Drinkable shallow water along the coast.
    Shallows,
    /// Dry sand just above the waterline.
    Beach,
    /// Wet lowland at sand height.
    Swamp,
    /// Dry high peaks.
    Scorched,
    /// Slightly wetter high peaks.
    Bare,
    /// Cold high plateau.
    Tundra,
    /// Wet high peaks.
    Snow,
    /// Dry mountain slopes.
    Shrubland,
    /// Wet mountain slopes.
    Taiga,
    /// Dry lowland, habitable.
    Grassland,
    /// Wet lowland, habitable.
    Forest,
}

impl Biome {
    pub const ALL: [Biome; 12] = [
        Biome::Ocean,
        Biome::Shallows,
        Biome::Beach,
        Biome::Swamp,
        Biome::Scorched,
        Biome::Bare,
        Biome::Tundra,
        Biome::Snow,
        Biome::Shrubland,
        Biome::Taiga,
        Biome::Grassland,
        Biome::Forest,
    ];
}

/// One terrain grid cell. The biome is written once, by classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
    #[serde(alias = "noise_value")]
    pub elevation: f64,
    #[serde(default)]
    pub biome: Option<Biome>,
}

impl Cell {
    #[must_use]
    pub fn new(x: u32, y: u32, elevation: f64) -> Self {
        Self {
            x,
            y,
            elevation,
            biome: None,
        }
    }
}

/// Integer grid coordinate of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub x: u32,
    pub y: u32,
}

impl CellPos {
    #[must_use]
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Parameters of one multi-octave coherent noise field.
///
/// `scale` divides input coordinates, so larger values give smoother fields.
/// Each octave multiplies amplitude by `persistence` and frequency by
/// `lacunarity`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    pub scale: f64,
    pub octaves: u32,
    pub persistence: f64,
    pub lacunarity: f64,
    pub seed: u32,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            scale: 200.0,
            octaves: 8,
            persistence: 0.5,
            lacunarity: 3.0,
            seed: 0,
        }
    }
}

impl NoiseParams {
    #[must_use]
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }
}

/// A named elevation cutoff, as it appears in terrain files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseThreshold {
    pub name: String,
    pub threshold: f64,
}

impl NoiseThreshold {
    pub fn new(name: impl Into<String>, threshold: f64) -> Self {
        Self {
            name: name.into(),
            threshold,
        }
    }
}

/// Elevation cutoffs used by biome classification.
///
/// Classification is only defined when
/// `water <= shallowwater <= sand <= mountain <= hugemountain`.
/// `land` is carried for configuration compatibility and does not take part
/// in classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub water: f64,
    pub shallowwater: f64,
    pub sand: f64,
    pub land: f64,
    pub mountain: f64,
    pub hugemountain: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            water: 0.0,
            shallowwater: 0.05,
            sand: 0.1,
            land: 0.6,
            mountain: 0.5,
            hugemountain: 0.6,
        }
    }
}

impl Thresholds {
    /// Returns the first adjacent pair of the ordered chain that is inverted.
    #[must_use]
    pub fn first_inversion(&self) -> Option<((&'static str, f64), (&'static str, f64))> {
        let chain = [
            ("water", self.water),
            ("shallowwater", self.shallowwater),
            ("sand", self.sand),
            ("mountain", self.mountain),
            ("hugemountain", self.hugemountain),
        ];
        chain
            .windows(2)
            .find(|pair| pair[0].1 > pair[1].1 || pair[0].1.is_nan() || pair[1].1.is_nan())
            .map(|pair| (pair[0], pair[1]))
    }

    #[must_use]
    pub fn is_monotonic(&self) -> bool {
        self.first_inversion().is_none()
    }

    /// Named list form, highest cutoff first.
    #[must_use]
    pub fn ranges(&self) -> Vec<NoiseThreshold> {
        vec![
            NoiseThreshold::new("hugemountain", self.hugemountain),
            NoiseThreshold::new("mountain", self.mountain),
            NoiseThreshold::new("land", self.land),
            NoiseThreshold::new("sand", self.sand),
            NoiseThreshold::new("shallowwater", self.shallowwater),
            NoiseThreshold::new("water", self.water),
        ]
    }

    /// Rebuilds thresholds from a named list. Every name must appear exactly once.
    pub fn from_ranges(ranges: &[NoiseThreshold]) -> Result<Self, String> {
        let mut slots: [Option<f64>; 6] = [None; 6];
        for range in ranges {
            let slot = match range.name.as_str() {
                "water" => 0,
                "shallowwater" => 1,
                "sand" => 2,
                "land" => 3,
                "mountain" => 4,
                "hugemountain" => 5,
                other => return Err(format!("unknown noise range `{other}`")),
            };
            if slots[slot].replace(range.threshold).is_some() {
                return Err(format!("duplicate noise range `{}`", range.name));
            }
        }
        let get = |idx: usize, name: &str| slots[idx].ok_or_else(|| format!("missing noise range `{name}`"));
        Ok(Self {
            water: get(0, "water")?,
            shallowwater: get(1, "shallowwater")?,
            sand: get(2, "sand")?,
            land: get(3, "land")?,
            mountain: get(4, "mountain")?,
            hugemountain: get(5, "hugemountain")?,
        })
    }
}

/// Serializes [`Thresholds`] as the named `noise_ranges` list used by terrain files.
pub mod noise_ranges {
    use super::{NoiseThreshold, Thresholds};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(thresholds: &Thresholds, serializer: S) -> Result<S::Ok, S::Error> {
        thresholds.ranges().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Thresholds, D::Error> {
        let ranges = Vec::<NoiseThreshold>::deserialize(deserializer)?;
        Thresholds::from_ranges(&ranges).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds_are_monotonic() {
        assert!(Thresholds::default().is_monotonic());
    }

    #[test]
    fn test_inversion_reports_offending_pair() {
        let t = Thresholds {
            sand: 0.02,
            ..Default::default()
        };
        let ((lo, _), (hi, _)) = t.first_inversion().expect("inversion expected");
        assert_eq!(lo, "shallowwater");
        assert_eq!(hi, "sand");
    }

    #[test]
    fn test_land_is_not_part_of_the_chain() {
        let t = Thresholds {
            land: -5.0,
            ..Default::default()
        };
        assert!(t.is_monotonic());
    }

    #[test]
    fn test_ranges_rebuild_thresholds() {
        let t = Thresholds {
            water: -0.2,
            ..Default::default()
        };
        assert_eq!(Thresholds::from_ranges(&t.ranges()), Ok(t));
    }

    #[test]
    fn test_from_ranges_rejects_missing_and_unknown() {
        let mut ranges = Thresholds::default().ranges();
        ranges.pop();
        assert!(Thresholds::from_ranges(&ranges).is_err());
        ranges.push(NoiseThreshold::new("lava", 0.9));
        assert!(Thresholds::from_ranges(&ranges).is_err());
    }

    #[test]
    fn test_cell_accepts_noise_value_alias() {
        let cell: Cell = serde_json::from_str(r#"{"x":1,"y":2,"noise_value":0.25}"#).unwrap();
        assert_eq!(cell.elevation, 0.25);
        assert_eq!(cell.biome, None);
    }
}
