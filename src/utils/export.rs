//! # Map Export
//!
//! Turns a finished [`Grid`] into something a person can look at: a PNG
//! texture (behind the `png` feature) or JSON for other tools.
//!
//! The texture uses the same orientation as a game engine texture: `y = 0`
//! is the bottom pixel row, so the image reads like the map in world space.

#[cfg(feature = "png")]
use std::path::Path;

use crate::error::Result;
use crate::map::{Cell, Dungeon};
#[cfg(feature = "png")]
use crate::map::Grid;

#[cfg(feature = "png")]
use image::{ImageBuffer, Rgb, RgbImage};

pub const SPACE_COLOR: [u8; 3] = [128, 128, 128];
pub const WALL_COLOR: [u8; 3] = [0, 0, 0];

pub fn cell_color(cell: Cell) -> [u8; 3] {
    match cell {
        Cell::Space => SPACE_COLOR,
        Cell::Wall => WALL_COLOR,
    }
}

/// Render the grid with each cell drawn as a `scale`-pixel square.
///
/// A `scale` of 0 is treated as 1.
#[cfg(feature = "png")]
pub fn to_image(grid: &Grid, scale: u32) -> RgbImage {
    let scale = scale.max(1);
    let width = grid.width() as u32 * scale;
    let height = grid.height() as u32 * scale;
    ImageBuffer::from_fn(width, height, |px, py| {
        let x = (px / scale) as usize;
        // flip so that y = 0 ends up at the bottom
        let y = grid.height() - 1 - (py / scale) as usize;
        Rgb(cell_color(grid.cell_at(x, y)))
    })
}

#[cfg(feature = "png")]
pub fn save_png<P: AsRef<Path>>(grid: &Grid, path: P, scale: u32) -> Result<()> {
    to_image(grid, scale).save(path)?;
    Ok(())
}

/// The grid together with its rooms and tunnels as pretty JSON.
pub fn to_json(dungeon: &Dungeon) -> Result<String> {
    Ok(serde_json::to_string_pretty(dungeon)?)
}
