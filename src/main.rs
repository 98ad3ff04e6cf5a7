use anyhow::{Context, Result};
use clap::Parser;
use foxhollow_core::init_logging;
use foxhollow_io::{load_terrain, save_biome_image, save_terrain, write_stats};
use foxhollow_lib::app::App;
use foxhollow_lib::model::config::AppConfig;
use foxhollow_lib::model::world::World;
use foxhollow_lib::model::TerrainMap;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// What to run
    #[arg(short, long, value_enum, default_value = "headless")]
    mode: Mode,

    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Elevation at or below which a cell is deep water
    #[arg(long)]
    water: Option<f64>,
    #[arg(long)]
    shallowwater: Option<f64>,
    #[arg(long)]
    sand: Option<f64>,
    #[arg(long)]
    land: Option<f64>,
    #[arg(long)]
    mountain: Option<f64>,
    #[arg(long)]
    hugemountain: Option<f64>,

    /// Elevation noise scale
    #[arg(long)]
    scale: Option<f64>,
    #[arg(long)]
    octaves: Option<u32>,
    #[arg(long)]
    persistence: Option<f64>,
    #[arg(long)]
    lacunarity: Option<f64>,

    #[arg(long)]
    moisture_scale: Option<f64>,
    #[arg(long)]
    moisture_octaves: Option<u32>,
    #[arg(long)]
    moisture_persistence: Option<f64>,
    #[arg(long)]
    moisture_lacunarity: Option<f64>,

    /// Seed for the simulation RNG
    #[arg(long)]
    seed: Option<u64>,

    /// Stop a headless run after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Write the biome raster to this PNG
    #[arg(long)]
    terrain_image: Option<PathBuf>,

    /// Pixels per terrain cell in the biome raster
    #[arg(long, default_value_t = 1)]
    cell_size: u32,

    /// Write the terrain map to this JSON file
    #[arg(long)]
    terrain_json: Option<PathBuf>,

    /// Use a previously saved terrain map instead of generating one
    #[arg(long)]
    load_terrain: Option<PathBuf>,

    /// Write population and food statistics to this JSON file
    #[arg(long)]
    stats_out: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Mode {
    /// Generate (or load) terrain and export it
    Terrain,
    /// Run the ecosystem without rendering
    Headless,
}

impl Args {
    fn apply(&self, config: &mut AppConfig) {
        let t = &mut config.terrain.thresholds;
        override_with(&mut t.water, self.water);
        override_with(&mut t.shallowwater, self.shallowwater);
        override_with(&mut t.sand, self.sand);
        override_with(&mut t.land, self.land);
        override_with(&mut t.mountain, self.mountain);
        override_with(&mut t.hugemountain, self.hugemountain);

        let e = &mut config.terrain.elevation;
        override_with(&mut e.scale, self.scale);
        override_with(&mut e.octaves, self.octaves);
        override_with(&mut e.persistence, self.persistence);
        override_with(&mut e.lacunarity, self.lacunarity);

        let m = &mut config.terrain.moisture;
        override_with(&mut m.scale, self.moisture_scale);
        override_with(&mut m.octaves, self.moisture_octaves);
        override_with(&mut m.persistence, self.moisture_persistence);
        override_with(&mut m.lacunarity, self.moisture_lacunarity);

        if self.seed.is_some() {
            config.world.seed = self.seed;
        }
    }
}

fn override_with<T: Copy>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

fn terrain_for(args: &Args, config: &AppConfig) -> Result<TerrainMap> {
    if let Some(path) = &args.load_terrain {
        return Ok(load_terrain(path)?);
    }
    TerrainMap::generate(
        config.world.width,
        config.world.height,
        config.terrain.elevation,
        config.terrain.moisture,
        config.terrain.thresholds,
    )
    .context("generating terrain")
}

fn export_terrain(args: &Args, terrain: &TerrainMap) -> Result<()> {
    if let Some(path) = &args.terrain_image {
        save_biome_image(terrain, path, args.cell_size)?;
    }
    if let Some(path) = &args.terrain_json {
        save_terrain(terrain, path)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let mut config = AppConfig::load(&args.config)?;
    args.apply(&mut config);
    config.validate().context("invalid configuration")?;

    let terrain = terrain_for(&args, &config)?;
    export_terrain(&args, &terrain)?;

    match args.mode {
        Mode::Terrain => {
            for (biome, count) in terrain.biome_histogram() {
                println!("{biome:?}: {count}");
            }
        }
        Mode::Headless => {
            let world = World::with_terrain(&terrain, config)?;
            let mut app = App::with_world(world);
            app.max_ticks = args.max_ticks;

            let summary = app.run_headless();
            println!("{}", serde_json::to_string_pretty(&summary)?);

            if let Some(path) = &args.stats_out {
                write_stats(&app.stats, &app.world.config.fingerprint(), path)?;
            }
        }
    }
    Ok(())
}
