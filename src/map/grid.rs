// src/map/grid.rs

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::geometry::{Point, Size};

/// State of a single map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Wall,
    Space,
}

impl Cell {
    pub fn glyph(self) -> char {
        match self {
            Cell::Wall => '#',
            Cell::Space => '.',
        }
    }
}

/// The generated map: `width * height` cells stored row-major.
///
/// A fresh grid is solid wall; generators only ever carve space into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridRepr")]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

/// Unchecked wire form of [`Grid`].
#[derive(Deserialize)]
struct GridRepr {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl TryFrom<GridRepr> for Grid {
    type Error = String;

    fn try_from(repr: GridRepr) -> Result<Self, Self::Error> {
        let expected = repr.width.checked_mul(repr.height);
        if expected != Some(repr.cells.len()) {
            return Err(format!(
                "{}x{} grid needs {} cells, got {}",
                repr.width,
                repr.height,
                repr.width.saturating_mul(repr.height),
                repr.cells.len()
            ));
        }
        Ok(Grid {
            width: repr.width,
            height: repr.height,
            cells: repr.cells,
        })
    }
}

impl Grid {
    /// Create a grid filled with walls.
    pub fn new(size: Size) -> Self {
        Self::filled(size, Cell::Wall)
    }

    pub fn filled(size: Size, cell: Cell) -> Self {
        Grid {
            width: size.width,
            height: size.height,
            cells: vec![cell; size.area()],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Read a cell.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the grid. Use [`Grid::get`] for a
    /// checked lookup.
    pub fn cell_at(&self, x: usize, y: usize) -> Cell {
        assert!(
            self.contains(x, y),
            "cell ({}, {}) outside {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        self.cells[self.index(x, y)]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if self.contains(x, y) {
            Some(self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, cell: Cell) {
        let idx = self.index(x, y);
        self.cells[idx] = cell;
    }

    pub(crate) fn carve(&mut self, p: Point) {
        self.set(p.x, p.y, Cell::Space);
    }

    pub fn is_space(&self, x: usize, y: usize) -> bool {
        self.get(x, y) == Some(Cell::Space)
    }

    /// Iterate over the rows, `y = 0` first.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks() rejects a zero chunk size
        self.cells.chunks(self.width.max(1))
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Fraction of cells that are walls, `1.0` for an empty grid.
    pub fn wall_ratio(&self) -> f64 {
        if self.cells.is_empty() {
            return 1.0;
        }
        self.count(Cell::Wall) as f64 / self.cells.len() as f64
    }

    /// True when every cell on the outer frame is a wall.
    pub fn is_border_sealed(&self) -> bool {
        if self.width == 0 || self.height == 0 {
            return true;
        }
        let (w, h) = (self.width, self.height);
        let horizontal = (0..w).all(|x| !self.is_space(x, 0) && !self.is_space(x, h - 1));
        let vertical = (0..h).all(|y| !self.is_space(0, y) && !self.is_space(w - 1, y));
        horizontal && vertical
    }

    /// First space cell in row-major order.
    pub fn first_space(&self) -> Option<Point> {
        self.cells
            .iter()
            .position(|&c| c == Cell::Space)
            .map(|i| Point::new(i % self.width, i / self.width))
    }

    /// Number of 4-connected regions of space cells.
    pub fn space_regions(&self) -> usize {
        let mut visited = vec![false; self.cells.len()];
        let mut queue = VecDeque::new();
        let mut regions = 0;

        for start in 0..self.cells.len() {
            if visited[start] || self.cells[start] != Cell::Space {
                continue;
            }
            regions += 1;
            visited[start] = true;
            queue.push_back(start);

            while let Some(i) = queue.pop_front() {
                let (x, y) = (i % self.width, i / self.width);
                let neighbors = [
                    (x + 1, y),
                    (x.wrapping_sub(1), y),
                    (x, y + 1),
                    (x, y.wrapping_sub(1)),
                ];
                for (nx, ny) in neighbors {
                    if !self.is_space(nx, ny) {
                        continue;
                    }
                    let ni = self.index(nx, ny);
                    if !visited[ni] {
                        visited[ni] = true;
                        queue.push_back(ni);
                    }
                }
            }
        }
        regions
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|c| c.glyph()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
