// src/generator/random_walk.rs

use log::debug;
use rand::Rng;

use crate::error::ConfigError;
use crate::generator::{check_map_size, MapGenerator, RandomWalkConfig};
use crate::map::{Dungeon, Grid};
use crate::utils::geometry::{Point, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// Whether moving from `p` would step onto the wall frame of `map`.
    fn blocked(self, p: Point, map: Size) -> bool {
        match self {
            Direction::Up => p.y + 2 >= map.height,
            Direction::Right => p.x + 2 >= map.width,
            Direction::Down => p.y <= 1,
            Direction::Left => p.x <= 1,
        }
    }

    /// Flip a direction that would leave the interior.
    ///
    /// Returns `None` when the interior is a single cell wide along this axis,
    /// so neither way is open.
    pub fn reflect(self, p: Point, map: Size) -> Option<Self> {
        if !self.blocked(p, map) {
            Some(self)
        } else if !self.opposite().blocked(p, map) {
            Some(self.opposite())
        } else {
            None
        }
    }

    fn step(self, p: Point) -> Point {
        match self {
            Direction::Up => Point::new(p.x, p.y + 1),
            Direction::Right => Point::new(p.x + 1, p.y),
            Direction::Down => Point::new(p.x, p.y - 1),
            Direction::Left => Point::new(p.x - 1, p.y),
        }
    }
}

/// Drunkard's walk: wander the interior until `steps` new cells are open.
#[derive(Debug, Clone)]
pub struct RandomWalkGenerator {
    config: RandomWalkConfig,
}

impl RandomWalkGenerator {
    pub fn new(config: RandomWalkConfig) -> Self {
        RandomWalkGenerator { config }
    }

    pub fn config(&self) -> &RandomWalkConfig {
        &self.config
    }

    /// Interior cells, the starting cell included.
    pub fn capacity(&self) -> usize {
        self.config.map_size.shrink(1).area()
    }
}

impl MapGenerator for RandomWalkGenerator {
    fn validate(&self) -> Result<(), ConfigError> {
        check_map_size(self.config.map_size)?;
        let capacity = self.capacity();
        // the starting cell takes one interior cell before the first step
        if self.config.steps >= capacity {
            return Err(ConfigError::TooManySteps {
                steps: self.config.steps,
                capacity,
            });
        }
        Ok(())
    }

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Dungeon, ConfigError> {
        self.validate()?;
        let map = self.config.map_size;
        let mut grid = Grid::new(map);

        let mut pos = Point::new(
            rng.random_range(1..map.width - 1),
            rng.random_range(1..map.height - 1),
        );
        grid.carve(pos);

        let mut remaining = self.config.steps;
        let mut moves = 0usize;
        while remaining > 0 {
            if let Some(dir) = Direction::random(rng).reflect(pos, map) {
                pos = dir.step(pos);
            }
            moves += 1;
            if !grid.is_space(pos.x, pos.y) {
                grid.carve(pos);
                remaining -= 1;
            }
        }
        debug!("Random walk carved {} cells in {} moves", self.config.steps, moves);

        Ok(Dungeon::from_grid(grid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Cell;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn generator(w: usize, h: usize, steps: usize) -> RandomWalkGenerator {
        RandomWalkGenerator::new(RandomWalkConfig {
            map_size: Size::new(w, h),
            steps,
        })
    }

    #[test]
    fn test_carves_exactly_steps_new_cells() {
        for seed in 0..10 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let dungeon = generator(30, 20, 250).generate(&mut rng).unwrap();
            // starting cell plus one per step
            assert_eq!(dungeon.grid().count(Cell::Space), 251);
            assert!(dungeon.grid().is_border_sealed());
            assert_eq!(dungeon.grid().space_regions(), 1);
        }
    }

    #[test]
    fn test_small_map_scenario() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let dungeon = generator(10, 10, 50).generate(&mut rng).unwrap();
        assert_eq!(dungeon.grid().count(Cell::Space), 51);

        assert_eq!(
            generator(10, 10, 70).generate(&mut rng),
            Err(ConfigError::TooManySteps {
                steps: 70,
                capacity: 64
            })
        );
    }

    #[test]
    fn test_fills_interior_one_short_of_capacity() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let dungeon = generator(6, 5, 11).generate(&mut rng).unwrap();
        // 4x3 interior, every cell open
        assert_eq!(dungeon.grid().count(Cell::Space), 12);
        assert!(generator(6, 5, 12).validate().is_err());
    }

    #[test]
    fn test_single_cell_wide_corridor() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let dungeon = generator(3, 9, 5).generate(&mut rng).unwrap();
        assert_eq!(dungeon.grid().count(Cell::Space), 6);
        for y in 0..9 {
            assert_eq!(dungeon.grid().cell_at(0, y), Cell::Wall);
            assert_eq!(dungeon.grid().cell_at(2, y), Cell::Wall);
        }
    }

    #[test]
    fn test_zero_steps() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let dungeon = generator(3, 3, 0).generate(&mut rng).unwrap();
        assert_eq!(dungeon.grid().count(Cell::Space), 1);
        assert!(dungeon.grid().is_space(1, 1));
    }

    #[test]
    fn test_reflection_at_edges() {
        let map = Size::new(10, 10);
        let corner = Point::new(8, 8);
        assert_eq!(Direction::Right.reflect(corner, map), Some(Direction::Left));
        assert_eq!(Direction::Up.reflect(corner, map), Some(Direction::Down));
        assert_eq!(Direction::Left.reflect(corner, map), Some(Direction::Left));

        let origin = Point::new(1, 1);
        assert_eq!(Direction::Left.reflect(origin, map), Some(Direction::Right));
        assert_eq!(Direction::Down.reflect(origin, map), Some(Direction::Up));

        let narrow = Size::new(3, 10);
        assert_eq!(Direction::Right.reflect(Point::new(1, 4), narrow), None);
    }
}
