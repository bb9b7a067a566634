// src/bsp/bsp_procedural.rs

use log::debug;
use rand::Rng;

use crate::bsp::{LeafTree, SPLIT_CHANCE};
use crate::error::ConfigError;
use crate::generator::{check_map_size, BspTreeConfig, MapGenerator};
use crate::map::{Dungeon, Grid};
use crate::utils::geometry::Point;

/// Smallest leaf that can still hold a padded room (2 cells + 1 each side).
pub const MIN_ROOM_LEAF: usize = 4;

/// Recursive partition into leaves, one room per leaf, siblings joined by tunnels.
#[derive(Debug, Clone)]
pub struct BspTreeGenerator {
    config: BspTreeConfig,
}

impl BspTreeGenerator {
    pub fn new(config: BspTreeConfig) -> Self {
        BspTreeGenerator { config }
    }

    pub fn config(&self) -> &BspTreeConfig {
        &self.config
    }

    /// Partition the map and assign rooms and tunnels, without baking.
    pub fn build_tree<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<LeafTree, ConfigError> {
        self.validate()?;
        let mut tree = self.split_leaves(rng);
        tree.create_rooms(LeafTree::ROOT, rng);
        Ok(tree)
    }

    /// Keep sweeping the unsplit leaves until a full pass splits nothing.
    fn split_leaves<R: Rng + ?Sized>(&self, rng: &mut R) -> LeafTree {
        let c = &self.config;
        let mut tree = LeafTree::new(Point::new(1, 1), c.map_size.shrink(1));

        let mut passes = 0;
        loop {
            passes += 1;
            let mut did_split = false;
            for id in tree.terminal_ids() {
                let size = tree.get(id).size;
                let oversized = size.width > c.max_leaf_size || size.height > c.max_leaf_size;
                if (oversized || rng.random_bool(SPLIT_CHANCE)) && tree.split(id, c.min_leaf_size, rng) {
                    did_split = true;
                }
            }
            if !did_split {
                break;
            }
        }
        debug!("BSP partition settled after {} passes with {} leaves", passes, tree.len());
        tree
    }
}

impl MapGenerator for BspTreeGenerator {
    fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.config;
        check_map_size(c.map_size)?;
        if c.min_leaf_size > c.max_leaf_size {
            return Err(ConfigError::LeafSizeInverted {
                min: c.min_leaf_size,
                max: c.max_leaf_size,
            });
        }
        if c.min_leaf_size < MIN_ROOM_LEAF {
            return Err(ConfigError::LeafTooSmall(c.min_leaf_size));
        }
        let root = c.map_size.shrink(1);
        if root.width < MIN_ROOM_LEAF || root.height < MIN_ROOM_LEAF {
            return Err(ConfigError::MapTooSmallForLeaves(c.map_size));
        }
        Ok(())
    }

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Dungeon, ConfigError> {
        let tree = self.build_tree(rng)?;

        let mut grid = Grid::new(self.config.map_size);
        let rooms = tree.rooms();
        for room in &rooms {
            room.carve(&mut grid);
        }
        let tunnels = tree.tunnels();
        for tunnel in &tunnels {
            tunnel.carve(&mut grid, rng);
        }
        debug!("Baked {} rooms and {} tunnels", rooms.len(), tunnels.len());

        Ok(Dungeon::new(grid, rooms, tunnels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Cell;
    use crate::utils::geometry::Size;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn generator(w: usize, h: usize, max: usize, min: usize) -> BspTreeGenerator {
        BspTreeGenerator::new(BspTreeConfig {
            map_size: Size::new(w, h),
            max_leaf_size: max,
            min_leaf_size: min,
        })
    }

    #[test]
    fn test_leaf_count_is_odd() {
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let tree = generator(80, 50, 20, 6).build_tree(&mut rng).unwrap();
            assert_eq!(tree.len() % 2, 1);
            for leaf in tree.leaves() {
                match leaf.children {
                    Some(_) => {
                        assert!(leaf.room.is_none());
                        assert_eq!(leaf.tunnels.len(), 1);
                    }
                    None => {
                        assert!(leaf.room.is_some());
                        assert!(leaf.tunnels.is_empty());
                    }
                }
            }
        }
    }

    #[test]
    fn test_leaves_tile_the_interior() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let tree = generator(64, 48, 16, 5).build_tree(&mut rng).unwrap();
        let area: usize = tree
            .terminal_ids()
            .into_iter()
            .map(|id| tree.get(id).size.area())
            .sum();
        assert_eq!(area, 62 * 46);
        for id in tree.terminal_ids() {
            let leaf = tree.get(id);
            assert!(leaf.size.width >= 5 && leaf.size.height >= 5);
        }
    }

    #[test]
    fn test_splittable_leaves_respect_max_size() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let tree = generator(100, 100, 20, 6).build_tree(&mut rng).unwrap();
        for id in tree.terminal_ids() {
            let size = tree.get(id).size;
            // an oversized leaf survives only if neither axis can be cut
            if size.width > 20 || size.height > 20 {
                assert!(size.width <= 12 || size.height <= 12, "{:?}", size);
            }
        }
    }

    #[test]
    fn test_map_is_connected_and_bordered() {
        for seed in 0..10 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let dungeon = generator(70, 40, 20, 6).generate(&mut rng).unwrap();
            assert_eq!(dungeon.grid().space_regions(), 1);
            assert!(dungeon.grid().is_border_sealed());
            for room in dungeon.rooms() {
                assert!(room.inside_border(Size::new(70, 40)));
            }
            assert_eq!(dungeon.tunnels().len() + 1, dungeon.rooms().len());
        }
    }

    #[test]
    fn test_map_smaller_than_min_leaf_keeps_single_room() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let dungeon = generator(10, 10, 20, 6).generate(&mut rng).unwrap();
        assert_eq!(dungeon.rooms().len(), 1);
        assert!(dungeon.tunnels().is_empty());
        let room = dungeon.rooms()[0];
        assert_eq!(dungeon.grid().count(Cell::Space), room.size.area());
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let g = generator(60, 60, 20, 6);
        let a = g.generate(&mut ChaCha8Rng::seed_from_u64(77)).unwrap();
        let b = g.generate(&mut ChaCha8Rng::seed_from_u64(77)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_leaf_sizes() {
        assert_eq!(
            generator(50, 50, 5, 8).validate(),
            Err(ConfigError::LeafSizeInverted { min: 8, max: 5 })
        );
        assert_eq!(
            generator(50, 50, 20, 3).validate(),
            Err(ConfigError::LeafTooSmall(3))
        );
        assert_eq!(
            generator(5, 50, 20, 6).validate(),
            Err(ConfigError::MapTooSmallForLeaves(Size::new(5, 50)))
        );
        assert_eq!(generator(6, 6, 20, 6).validate(), Ok(()));
    }
}
