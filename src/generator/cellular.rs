// src/generator/cellular.rs

use log::debug;
use rand::Rng;

use crate::error::ConfigError;
use crate::generator::{check_map_size, CellularAutomataConfig, MapGenerator};
use crate::map::{Cell, Dungeon, Grid};
use crate::utils::geometry::Size;

/// Walls needed in a 3x3 window for its center to stay wall.
pub const WALL_THRESHOLD: usize = 5;

/// Random noise smoothed into caves by a 3x3 majority vote.
#[derive(Debug, Clone)]
pub struct CellularAutomataGenerator {
    config: CellularAutomataConfig,
}

impl CellularAutomataGenerator {
    pub fn new(config: CellularAutomataConfig) -> Self {
        CellularAutomataGenerator { config }
    }

    pub fn config(&self) -> &CellularAutomataConfig {
        &self.config
    }
}

/// Each cell independently becomes wall with probability `wall_percentage`.
pub fn noise<R: Rng + ?Sized>(size: Size, wall_percentage: f32, rng: &mut R) -> Grid {
    let mut grid = Grid::new(size);
    for y in 0..size.height {
        for x in 0..size.width {
            if rng.random::<f32>() >= wall_percentage {
                grid.set(x, y, Cell::Space);
            }
        }
    }
    grid
}

/// One smoothing pass into a fresh grid.
///
/// Windows are anchored at `[0, width - 3) x [0, height - 3)` and write their
/// center cell only. Anything never written stays wall, which leaves a wall
/// frame one cell thick on the top/left and two cells thick on the
/// bottom/right.
pub fn smooth(grid: &Grid) -> Grid {
    let mut next = Grid::new(grid.size());
    for wy in 0..grid.height().saturating_sub(3) {
        for wx in 0..grid.width().saturating_sub(3) {
            let mut walls = 0;
            for y in wy..wy + 3 {
                for x in wx..wx + 3 {
                    if grid.cell_at(x, y) == Cell::Wall {
                        walls += 1;
                    }
                }
            }
            if walls < WALL_THRESHOLD {
                next.set(wx + 1, wy + 1, Cell::Space);
            }
        }
    }
    next
}

impl MapGenerator for CellularAutomataGenerator {
    fn validate(&self) -> Result<(), ConfigError> {
        check_map_size(self.config.map_size)?;
        let p = self.config.wall_percentage;
        if !(0.0..=1.0).contains(&p) {
            // NaN fails the range check too
            return Err(ConfigError::WallPercentage(p));
        }
        Ok(())
    }

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Dungeon, ConfigError> {
        self.validate()?;
        let c = &self.config;

        let mut grid = noise(c.map_size, c.wall_percentage, rng);
        debug!("Seeded noise with wall ratio {:.3}", grid.wall_ratio());
        for pass in 0..c.depth {
            grid = smooth(&grid);
            debug!("Smoothing pass {}: wall ratio {:.3}", pass + 1, grid.wall_ratio());
        }

        Ok(Dungeon::from_grid(grid))
    }
}
