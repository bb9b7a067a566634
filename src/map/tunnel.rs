// src/map/tunnel.rs
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::map::Grid;
use crate::utils::geometry::Point;

/// Which leg of the L is dug first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bend {
    /// Along `from.y` to `to.x`, then along `to.x` to `to.y`.
    HorizontalFirst,
    /// Along `from.x` to `to.y`, then along `to.y` to `to.x`.
    VerticalFirst,
}

impl Bend {
    /// Fair coin.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            Bend::HorizontalFirst
        } else {
            Bend::VerticalFirst
        }
    }

    /// The cell where the two legs meet.
    pub fn corner(self, from: Point, to: Point) -> Point {
        match self {
            Bend::HorizontalFirst => Point::new(to.x, from.y),
            Bend::VerticalFirst => Point::new(from.x, to.y),
        }
    }
}

/// Two points to be joined by an L-shaped run of space cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tunnel {
    pub from: Point,
    pub to: Point,
}

impl Tunnel {
    pub fn new(from: Point, to: Point) -> Self {
        Tunnel { from, to }
    }

    /// Carve the tunnel, picking the bend at random.
    pub fn carve<R: Rng + ?Sized>(&self, grid: &mut Grid, rng: &mut R) {
        self.carve_with(grid, Bend::random(rng));
    }

    pub fn carve_with(&self, grid: &mut Grid, bend: Bend) {
        let corner = bend.corner(self.from, self.to);
        carve_line(grid, self.from, corner);
        carve_line(grid, corner, self.to);
    }
}

/// Carve a straight horizontal or vertical run, both ends included.
fn carve_line(grid: &mut Grid, a: Point, b: Point) {
    debug_assert!(a.x == b.x || a.y == b.y, "line {:?} -> {:?} is not axis aligned", a, b);
    for y in a.y.min(b.y)..=a.y.max(b.y) {
        for x in a.x.min(b.x)..=a.x.max(b.x) {
            grid.carve(Point::new(x, y));
        }
    }
}
