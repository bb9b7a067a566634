// src/error.rs

use crate::utils::geometry::Size;
use thiserror::Error;

/// Parameter combinations that no generator can satisfy.
///
/// These are detected before any grid is allocated, so a caller never sees a
/// half-built map.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("map size {0} is too small, at least 3x3 is required")]
    MapTooSmall(Size),

    #[error("room size must be at least 1x1, got {0}")]
    EmptyRoomSize(Size),

    #[error("minimum room size {min} exceeds maximum room size {max}")]
    RoomSizeInverted { min: Size, max: Size },

    #[error("rooms up to {room} do not fit inside a {map} map with a one-cell border")]
    RoomTooLarge { room: Size, map: Size },

    #[error("{steps} steps do not fit in {capacity} interior cells, one of which is the starting cell")]
    TooManySteps { steps: usize, capacity: usize },

    #[error("wall percentage {0} is outside [0, 1]")]
    WallPercentage(f32),

    #[error("minimum leaf size {min} exceeds maximum leaf size {max}")]
    LeafSizeInverted { min: usize, max: usize },

    #[error("minimum leaf size {0} is below 4, leaves could not hold a padded room")]
    LeafTooSmall(usize),

    #[error("map size {0} leaves no room for a BSP leaf inside the border")]
    MapTooSmallForLeaves(Size),
}

/// Crate-level error for everything around generation: loading configs and
/// writing results.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "png")]
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
