// src/map/mod.rs
pub mod grid;
pub mod room;
pub mod tunnel;

pub use grid::{Cell, Grid};
pub use room::Room;
pub use tunnel::{Bend, Tunnel};

use serde::{Deserialize, Serialize};

use crate::utils::geometry::Point;

/// A finished map plus the room/tunnel layout it was built from.
///
/// Tunneling and BSP generation fill in `rooms` and `tunnels`; the cave
/// generators leave them empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dungeon {
    grid: Grid,
    rooms: Vec<Room>,
    tunnels: Vec<Tunnel>,
}

impl Dungeon {
    pub fn new(grid: Grid, rooms: Vec<Room>, tunnels: Vec<Tunnel>) -> Self {
        Dungeon { grid, rooms, tunnels }
    }

    pub fn from_grid(grid: Grid) -> Self {
        Dungeon::new(grid, Vec::new(), Vec::new())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn tunnels(&self) -> &[Tunnel] {
        &self.tunnels
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Where to drop the player: the first room's center, or the first
    /// open cell of a cave map.
    pub fn spawn_point(&self) -> Option<Point> {
        match self.rooms.first() {
            Some(room) => Some(room.center()),
            None => self.grid.first_space(),
        }
    }
}
