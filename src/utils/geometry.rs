// src/utils/geometry.rs
use serde::{Deserialize, Serialize};

/// A cell coordinate on the map grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance, the length of the L-shaped path between two cells
    /// minus one.
    pub fn manhattan_distance(&self, other: &Point) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// A width/height pair, used for map, room and leaf extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

impl Size {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// The size left after removing a `border`-cell frame on every side.
    pub fn shrink(&self, border: usize) -> Size {
        Size::new(
            self.width.saturating_sub(border * 2),
            self.height.saturating_sub(border * 2),
        )
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl std::str::FromStr for Size {
    type Err = String;

    /// Parses `"WxH"` (for instance `"100x80"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
        let width = w.trim().parse().map_err(|e| format!("bad width '{}': {}", w, e))?;
        let height = h.trim().parse().map_err(|e| format!("bad height '{}': {}", h, e))?;
        Ok(Size::new(width, height))
    }
}
