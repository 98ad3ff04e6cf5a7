use crate::error::{IoError, Result};
use foxhollow_core::{BiomeLogic, TerrainMap};
use image::{ImageFormat, Rgb, RgbImage};
use std::path::Path;

const UNCLASSIFIED: [u8; 3] = [0, 0, 0];

/// Draws one filled `cell_size` x `cell_size` block per cell in its biome colour.
pub fn render_biome_image(map: &TerrainMap, cell_size: u32) -> Result<RgbImage> {
    let cell_size = cell_size.max(1);
    let (Some(width), Some(height)) = (
        map.width.checked_mul(cell_size),
        map.height.checked_mul(cell_size),
    ) else {
        return Err(IoError::validation("raster dimensions overflow"));
    };

    let mut img = RgbImage::new(width, height);
    for cell in &map.cells {
        let color = cell.biome.map_or(UNCLASSIFIED, |b| b.color());
        for dy in 0..cell_size {
            for dx in 0..cell_size {
                let (px, py) = (cell.x * cell_size + dx, cell.y * cell_size + dy);
                if px < width && py < height {
                    img.put_pixel(px, py, Rgb(color));
                }
            }
        }
    }
    Ok(img)
}

/// Renders the biome raster and writes it as PNG.
pub fn save_biome_image<P: AsRef<Path>>(map: &TerrainMap, path: P, cell_size: u32) -> Result<()> {
    let path = path.as_ref();
    let img = render_biome_image(map, cell_size)?;
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|e| IoError::from(e).with_context(format!("writing {}", path.display())))?;
    tracing::info!(path = %path.display(), width = img.width(), height = img.height(), "biome image saved");
    Ok(())
}
