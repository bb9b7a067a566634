// src/map/room.rs
use serde::{Deserialize, Serialize};

use crate::map::Grid;
use crate::utils::geometry::{Point, Size};

/// An axis-aligned rectangle of guaranteed space cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub position: Point,
    pub size: Size,
}

impl Room {
    pub fn new(position: Point, size: Size) -> Self {
        Room { position, size }
    }

    /// `position + size / 2`, rounded down.
    pub fn center(&self) -> Point {
        Point::new(
            self.position.x + self.size.width / 2,
            self.position.y + self.size.height / 2,
        )
    }

    /// One past the last column covered by the room.
    pub fn right(&self) -> usize {
        self.position.x + self.size.width
    }

    /// One past the last row covered by the room.
    pub fn bottom(&self) -> usize {
        self.position.y + self.size.height
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.position.x && p.x < self.right() && p.y >= self.position.y && p.y < self.bottom()
    }

    /// Overlap test used when placing rooms.
    ///
    /// Two rooms count as separate only when a full cell lies between their
    /// edges; rooms that merely touch are treated as intersecting so walls
    /// between neighbours never disappear.
    pub fn intersects(&self, other: &Room) -> bool {
        let separated = self.position.x > other.right()
            || self.right() < other.position.x
            || self.position.y > other.bottom()
            || self.bottom() < other.position.y;
        !separated
    }

    /// True when the room keeps clear of the outer wall frame of a map.
    pub fn inside_border(&self, map: Size) -> bool {
        self.position.x >= 1
            && self.position.y >= 1
            && self.right() < map.width.saturating_sub(1)
            && self.bottom() < map.height.saturating_sub(1)
    }

    pub fn carve(&self, grid: &mut Grid) {
        for y in self.position.y..self.bottom() {
            for x in self.position.x..self.right() {
                grid.carve(Point::new(x, y));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Cell;

    fn room(x: usize, y: usize, w: usize, h: usize) -> Room {
        Room::new(Point::new(x, y), Size::new(w, h))
    }

    #[test]
    fn test_center_rounds_down() {
        assert_eq!(room(2, 3, 5, 4).center(), Point::new(4, 5));
        assert_eq!(room(1, 1, 1, 1).center(), Point::new(1, 1));
    }

    #[test]
    fn test_intersection() {
        let a = room(1, 1, 4, 4);
        // overlapping
        assert!(a.intersects(&room(3, 3, 4, 4)));
        // sharing an edge line
        assert!(a.intersects(&room(5, 1, 3, 3)));
        // one column gap
        assert!(!a.intersects(&room(6, 1, 3, 3)));
        assert!(!room(6, 1, 3, 3).intersects(&a));
        // below with a gap
        assert!(!a.intersects(&room(1, 6, 2, 2)));
    }

    #[test]
    fn test_inside_border() {
        let map = Size::new(10, 10);
        assert!(room(1, 1, 7, 7).inside_border(map));
        assert!(!room(0, 1, 3, 3).inside_border(map));
        assert!(!room(1, 1, 8, 3).inside_border(map));
    }

    #[test]
    fn test_carve() {
        let mut grid = Grid::new(Size::new(6, 6));
        let r = room(1, 2, 3, 2);
        r.carve(&mut grid);
        assert_eq!(grid.count(Cell::Space), 6);
        assert_eq!(grid.cell_at(1, 2), Cell::Space);
        assert_eq!(grid.cell_at(3, 3), Cell::Space);
        assert_eq!(grid.cell_at(4, 3), Cell::Wall);
        assert_eq!(grid.cell_at(1, 4), Cell::Wall);
        assert!(r.contains(Point::new(3, 3)));
        assert!(!r.contains(Point::new(4, 3)));
    }
}
