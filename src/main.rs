#![warn(non_snake_case)]
//! # dungeon_gen Main Entry Point
//!
//! Command line front end for the generators. It builds a
//! [`GeneratorConfig`] from a JSON file or from flags, generates one map (or a
//! batch of maps with consecutive seeds, in parallel), and prints or exports
//! the result.
//!
//! ## License
//! Licensed under the MIT License.

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Parser;
use env_logger;
use log::{info, warn};
use rayon::prelude::*;

use dungeon_gen::generator::{generate_seeded, validate, Algorithm, GeneratorConfig};
use dungeon_gen::map::Dungeon;
use dungeon_gen::utils::export;
use dungeon_gen::utils::geometry::Size;

#[derive(Parser, Debug)]
#[command(name = "dungeon_gen")]
#[command(about = "Generate dungeon maps with tunneling, random walk, cellular automata or BSP trees")]
struct Args {
    /// Generation algorithm (ignored when --config is given)
    #[arg(short, long, value_enum, default_value = "tunneling")]
    algorithm: Algorithm,

    /// JSON config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Map width in cells
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Map height in cells
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Tunneling: minimum room size, e.g. 7x7
    #[arg(long)]
    min_room: Option<Size>,

    /// Tunneling: maximum room size (exclusive), e.g. 15x15
    #[arg(long)]
    max_room: Option<Size>,

    /// Tunneling: number of room placement attempts
    #[arg(long)]
    rooms: Option<usize>,

    /// Tunneling: connect every pair of rooms instead of chaining them
    #[arg(long)]
    connect_all: bool,

    /// Random walk: number of cells to carve
    #[arg(long)]
    steps: Option<usize>,

    /// Cellular automata: initial wall probability in [0, 1]
    #[arg(long)]
    wall_percentage: Option<f32>,

    /// Cellular automata: smoothing passes
    #[arg(long)]
    depth: Option<usize>,

    /// BSP tree: leaves above this size always split
    #[arg(long)]
    max_leaf: Option<usize>,

    /// BSP tree: minimum leaf size
    #[arg(long)]
    min_leaf: Option<usize>,

    /// Number of maps to generate, using seeds seed, seed+1, ...
    #[arg(long, default_value = "1")]
    count: u64,

    /// Export the map as PNG (batches append the seed to the file name)
    #[arg(long)]
    png: Option<PathBuf>,

    /// Pixels per cell in the PNG
    #[arg(long, default_value = "4")]
    scale: u32,

    /// Print the map as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Do not print maps
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    /// Start from the config file or the algorithm defaults, then apply flags.
    fn build_config(&self) -> Result<GeneratorConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => {
                info!("Loading config from {}", path.display());
                GeneratorConfig::load(path)?
            }
            None => GeneratorConfig::for_algorithm(self.algorithm),
        };

        let size = config.map_size();
        config.set_map_size(Size::new(
            self.width.unwrap_or(size.width),
            self.height.unwrap_or(size.height),
        ));

        match &mut config {
            GeneratorConfig::Tunneling(c) => {
                c.min_room_size = self.min_room.unwrap_or(c.min_room_size);
                c.max_room_size = self.max_room.unwrap_or(c.max_room_size);
                c.rooms_amount = self.rooms.unwrap_or(c.rooms_amount);
                c.connect_all |= self.connect_all;
            }
            GeneratorConfig::RandomWalk(c) => {
                c.steps = self.steps.unwrap_or(c.steps);
            }
            GeneratorConfig::CellularAutomata(c) => {
                c.wall_percentage = self.wall_percentage.unwrap_or(c.wall_percentage);
                c.depth = self.depth.unwrap_or(c.depth);
            }
            GeneratorConfig::BspTree(c) => {
                c.max_leaf_size = self.max_leaf.unwrap_or(c.max_leaf_size);
                c.min_leaf_size = self.min_leaf.unwrap_or(c.min_leaf_size);
            }
        }
        Ok(config)
    }
}

/// `maps/out.png` becomes `maps/out_42.png` for seed 42.
fn batch_path(path: &Path, seed: u64) -> PathBuf {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("dungeon");
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("png");
    path.with_file_name(format!("{}_{}.{}", stem, seed, ext))
}

fn report(args: &Args, seed: u64, dungeon: &Dungeon) -> Result<(), Box<dyn Error>> {
    let grid = dungeon.grid();
    info!(
        "Seed {}: {} rooms, {} tunnels, {} open cells, {} regions",
        seed,
        dungeon.rooms().len(),
        dungeon.tunnels().len(),
        grid.count(dungeon_gen::Cell::Space),
        grid.space_regions()
    );

    if let Some(path) = &args.png {
        let path = if args.count > 1 { batch_path(path, seed) } else { path.clone() };
        #[cfg(feature = "png")]
        {
            export::save_png(grid, &path, args.scale)?;
            info!("Wrote {}", path.display());
        }
        #[cfg(not(feature = "png"))]
        warn!("Built without the png feature, skipping {}", path.display());
    }

    if args.quiet {
        return Ok(());
    }
    if args.json {
        println!("{}", export::to_json(dungeon)?);
    } else {
        if args.count > 1 {
            println!("seed {}", seed);
        }
        print!("{}", grid);
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging.
    env_logger::init();
    info!("dungeon_gen starting...");

    let args = Args::parse();
    let config = args.build_config()?;
    validate(&config)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    if args.count == 0 {
        warn!("--count 0, nothing to generate");
        return Ok(());
    }

    // Each map is generated on its own thread with its own RNG.
    let dungeons = (seed..seed.saturating_add(args.count))
        .into_par_iter()
        .map(|s| generate_seeded(&config, s).map(|d| (s, d)))
        .collect::<Result<Vec<_>, _>>()?;

    for (s, dungeon) in &dungeons {
        report(&args, *s, dungeon)?;
    }

    info!("dungeon_gen exiting.");
    Ok(())
}
