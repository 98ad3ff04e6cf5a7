//! Procedural terrain: elevation and moisture fields reduced to one biome per cell.

use crate::biome::{BiomeClassifier, BiomeLogic};
use crate::config::{check_noise, check_thresholds, ConfigError};
use crate::noise::NoiseField;
use foxhollow_data::{noise_ranges, Biome, Cell, CellPos, NoiseParams, Thresholds};
use serde::{Deserialize, Serialize};

/// A `width` x `height` grid of cells stored row-major, plus its moisture field.
///
/// Serialized form is the terrain file: the elevation noise parameters sit at
/// the top level and the thresholds are stored as a named `noise_ranges` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainMap {
    pub width: u32,
    pub height: u32,
    #[serde(flatten)]
    pub elevation_params: NoiseParams,
    #[serde(rename = "noise_ranges", with = "noise_ranges")]
    pub thresholds: Thresholds,
    pub cells: Vec<Cell>,
    #[serde(default = "default_moisture_params")]
    pub moisture_params: NoiseParams,
    #[serde(default)]
    pub moisture: Vec<f64>,
}

fn default_moisture_params() -> NoiseParams {
    NoiseParams::default().with_seed(1)
}

impl TerrainMap {
    /// Samples both noise fields and classifies every cell.
    pub fn generate(
        width: u32,
        height: u32,
        elevation: NoiseParams,
        moisture: NoiseParams,
        thresholds: Thresholds,
    ) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidParameter(format!(
                "terrain dimensions must be positive, got {width}x{height}"
            )));
        }
        check_thresholds(&thresholds)?;
        check_noise("elevation", &elevation)?;
        check_noise("moisture", &moisture)?;

        let heights = NoiseField::new(elevation).grid(width, height);
        let cells = heights
            .into_iter()
            .enumerate()
            .map(|(idx, e)| {
                let idx = idx as u32;
                Cell::new(idx % width, idx / width, e)
            })
            .collect();

        let mut map = Self {
            width,
            height,
            elevation_params: elevation,
            thresholds,
            cells,
            moisture_params: moisture,
            moisture: NoiseField::new(moisture).grid(width, height),
        };
        map.classify()?;

        tracing::debug!(width, height, "terrain generated");
        Ok(map)
    }

    /// Builds a map from already known cells, e.g. a hand-made test map.
    /// Cells must be row-major and number `width * height`.
    pub fn from_cells(
        width: u32,
        height: u32,
        cells: Vec<Cell>,
        thresholds: Thresholds,
    ) -> Result<Self, ConfigError> {
        let expected = width as usize * height as usize;
        if cells.len() != expected {
            return Err(ConfigError::InvalidParameter(format!(
                "expected {expected} cells for {width}x{height}, got {}",
                cells.len()
            )));
        }
        check_thresholds(&thresholds)?;
        Ok(Self {
            width,
            height,
            elevation_params: NoiseParams::default(),
            thresholds,
            cells,
            moisture_params: default_moisture_params(),
            moisture: Vec::new(),
        })
    }

    /// Builds a pre-classified map from a row-major list of biomes.
    pub fn from_biomes(width: u32, height: u32, biomes: &[Biome]) -> Result<Self, ConfigError> {
        let cells = biomes
            .iter()
            .enumerate()
            .map(|(idx, &biome)| {
                let idx = idx as u32;
                Cell {
                    biome: Some(biome),
                    ..Cell::new(idx % width.max(1), idx / width.max(1), 0.0)
                }
            })
            .collect();
        Self::from_cells(width, height, cells, Thresholds::default())
    }

    /// Writes a biome to every cell that does not have one yet.
    ///
    /// The moisture field is regenerated from `moisture_params` when it is
    /// missing, as it is for terrain files that only stored elevation.
    pub fn classify(&mut self) -> Result<(), ConfigError> {
        let classifier = BiomeClassifier::new(self.thresholds)?;
        if self.moisture.len() != self.cells.len() {
            check_noise("moisture", &self.moisture_params)?;
            self.moisture = NoiseField::new(self.moisture_params).grid(self.width, self.height);
        }

        for (cell, &moisture) in self.cells.iter_mut().zip(&self.moisture) {
            if cell.biome.is_none() {
                cell.biome = Some(classifier.classify(cell.elevation, moisture));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn is_classified(&self) -> bool {
        self.cells.iter().all(|c| c.biome.is_some())
    }

    #[inline]
    #[must_use]
    pub fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    #[must_use]
    pub fn cell(&self, x: u32, y: u32) -> Option<&Cell> {
        self.index(x, y).and_then(|idx| self.cells.get(idx))
    }

    #[must_use]
    pub fn biome_at(&self, x: u32, y: u32) -> Option<Biome> {
        self.cell(x, y).and_then(|c| c.biome)
    }

    /// Buckets every classified cell by habitat in a single pass.
    #[must_use]
    pub fn partition(&self) -> TerrainPartition {
        let mut partition = TerrainPartition {
            width: self.width,
            height: self.height,
            ..Default::default()
        };
        for cell in &self.cells {
            let Some(biome) = cell.biome else { continue };
            let pos = CellPos::new(cell.x, cell.y);
            if biome.is_habitable() {
                partition.land.push(pos);
            } else if biome.is_drinkable() {
                partition.shore.push(pos);
            } else if biome.is_deep_water() {
                partition.water.push(pos);
            } else {
                partition.other.push(pos);
            }
        }
        tracing::info!(
            land = partition.land.len(),
            shore = partition.shore.len(),
            water = partition.water.len(),
            other = partition.other.len(),
            "terrain partitioned"
        );
        partition
    }

    /// Cell count per biome, in [`Biome::ALL`] order.
    #[must_use]
    pub fn biome_histogram(&self) -> Vec<(Biome, usize)> {
        Biome::ALL
            .iter()
            .map(|&b| (b, self.cells.iter().filter(|c| c.biome == Some(b)).count()))
            .collect()
    }
}

/// Disjoint habitat buckets derived from a classified map.
///
/// `land` holds FOREST and GRASSLAND, `shore` SHALLOWS and `water` OCEAN.
/// Everything else (beach, swamp, mountains) lands in `other`, so the four
/// buckets together cover every classified cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerrainPartition {
    pub width: u32,
    pub height: u32,
    pub land: Vec<CellPos>,
    pub shore: Vec<CellPos>,
    pub water: Vec<CellPos>,
    pub other: Vec<CellPos>,
}

impl TerrainPartition {
    #[must_use]
    pub fn total(&self) -> usize {
        self.land.len() + self.shore.len() + self.water.len() + self.other.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn small_params(seed: u32) -> NoiseParams {
        NoiseParams {
            scale: 12.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            seed,
        }
    }

    #[test]
    fn test_generate_classifies_every_cell() {
        let map = TerrainMap::generate(
            24,
            16,
            small_params(3),
            small_params(4),
            Thresholds::default(),
        )
        .unwrap();
        assert_eq!(map.cells.len(), 24 * 16);
        assert_eq!(map.moisture.len(), 24 * 16);
        assert!(map.is_classified());
        assert_eq!(map.cell(5, 7).map(|c| (c.x, c.y)), Some((5, 7)));
    }

    #[test]
    fn test_generate_rejects_inverted_thresholds() {
        let bad = Thresholds {
            water: 0.5,
            ..Default::default()
        };
        let err = TerrainMap::generate(8, 8, small_params(0), small_params(1), bad).unwrap_err();
        assert!(matches!(err, ConfigError::NonMonotonicThresholds { .. }));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = TerrainMap::generate(16, 16, small_params(9), small_params(10), Thresholds::default());
        let b = TerrainMap::generate(16, 16, small_params(9), small_params(10), Thresholds::default());
        assert_eq!(a.unwrap(), b.unwrap());
    }

    #[test]
    fn test_classify_keeps_existing_biomes() {
        let mut map = TerrainMap::from_biomes(2, 1, &[Biome::Snow, Biome::Snow]).unwrap();
        map.cells[1].biome = None;
        map.cells[1].elevation = -0.9;
        map.classify().unwrap();
        assert_eq!(map.biome_at(0, 0), Some(Biome::Snow));
        assert_eq!(map.biome_at(1, 0), Some(Biome::Ocean));
    }

    #[test]
    fn test_partition_buckets() {
        let map = TerrainMap::from_biomes(
            3,
            2,
            &[
                Biome::Forest,
                Biome::Grassland,
                Biome::Shallows,
                Biome::Ocean,
                Biome::Beach,
                Biome::Swamp,
            ],
        )
        .unwrap();
        let p = map.partition();
        assert_eq!(p.land, vec![CellPos::new(0, 0), CellPos::new(1, 0)]);
        assert_eq!(p.shore, vec![CellPos::new(2, 0)]);
        assert_eq!(p.water, vec![CellPos::new(0, 1)]);
        assert_eq!(p.other.len(), 2);
        assert_eq!(p.total(), 6);
    }

    #[test]
    fn test_from_cells_rejects_wrong_length() {
        let err = TerrainMap::from_cells(2, 2, vec![Cell::new(0, 0, 0.0)], Thresholds::default());
        assert!(err.is_err());
    }

    #[test]
    fn test_index_out_of_bounds() {
        let map = TerrainMap::from_biomes(2, 2, &[Biome::Forest; 4]).unwrap();
        assert_eq!(map.index(1, 1), Some(3));
        assert_eq!(map.index(2, 0), None);
        assert_eq!(map.cell(0, 2), None);
    }

    #[test]
    fn test_json_uses_terrain_file_layout() {
        let map = TerrainMap::from_biomes(1, 1, &[Biome::Forest]).unwrap();
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["scale"], 200.0);
        assert_eq!(json["octaves"], 8);
        assert_eq!(json["noise_ranges"][0]["name"], "hugemountain");
        assert_eq!(json["cells"][0]["biome"], "FOREST");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_partitions_are_disjoint_and_cover(seed in 0u32..1000, w in 1u32..20, h in 1u32..20) {
            let map = TerrainMap::generate(w, h, small_params(seed), small_params(seed + 1), Thresholds::default()).unwrap();
            let p = map.partition();
            let mut seen = HashSet::new();
            for pos in p.land.iter().chain(&p.shore).chain(&p.water).chain(&p.other) {
                prop_assert!(seen.insert(*pos), "cell {:?} in two buckets", pos);
            }
            prop_assert_eq!(seen.len(), map.cells.len());
        }
    }
}
