use crate::error::{IoError, Result};
use crate::serialization::{read_json_file, write_json_file};
use foxhollow_core::TerrainMap;
use std::path::Path;

/// Writes a terrain map as JSON.
pub fn save_terrain<P: AsRef<Path>>(map: &TerrainMap, path: P) -> Result<()> {
    write_json_file(map, &path)?;
    tracing::info!(path = %path.as_ref().display(), cells = map.cells.len(), "terrain saved");
    Ok(())
}

/// Reads a terrain map and classifies any cell stored without a biome.
pub fn load_terrain<P: AsRef<Path>>(path: P) -> Result<TerrainMap> {
    let path = path.as_ref();
    let mut map: TerrainMap = read_json_file(path)
        .map_err(|e| e.with_context(format!("loading terrain from {}", path.display())))?;

    let expected = map.width as usize * map.height as usize;
    if map.width == 0 || map.height == 0 || map.cells.len() != expected {
        return Err(IoError::validation(format!(
            "terrain {}x{} needs {expected} cells, file has {}",
            map.width,
            map.height,
            map.cells.len()
        )));
    }
    for (idx, cell) in map.cells.iter().enumerate() {
        if map.index(cell.x, cell.y) != Some(idx) {
            return Err(IoError::validation(format!(
                "cell {idx} at ({}, {}) is out of row-major order",
                cell.x, cell.y
            )));
        }
    }

    if !map.is_classified() {
        map.classify()
            .map_err(|e| IoError::validation(e.to_string()))?;
    }
    Ok(map)
}
