// src/generator/tunneling.rs

use log::{debug, warn};
use rand::Rng;

use crate::error::ConfigError;
use crate::generator::{check_map_size, MapGenerator, TunnelingConfig};
use crate::map::{Dungeon, Grid, Room, Tunnel};
use crate::utils::geometry::{Point, Size};

/// Rooms scattered at random, rejected on overlap, joined by L-shaped tunnels.
#[derive(Debug, Clone)]
pub struct TunnelingGenerator {
    config: TunnelingConfig,
}

impl TunnelingGenerator {
    pub fn new(config: TunnelingConfig) -> Self {
        TunnelingGenerator { config }
    }

    pub fn config(&self) -> &TunnelingConfig {
        &self.config
    }

    /// Largest room the sampler can produce on each axis.
    fn largest_room(&self) -> Size {
        let (min, max) = (self.config.min_room_size, self.config.max_room_size);
        Size::new(
            largest_extent(min.width, max.width),
            largest_extent(min.height, max.height),
        )
    }

    /// Try `rooms_amount` placements and carve every room that fits.
    fn place_rooms<R: Rng + ?Sized>(&self, grid: &mut Grid, rng: &mut R) -> Vec<Room> {
        let c = &self.config;
        let mut rooms: Vec<Room> = Vec::new();

        for attempt in 0..c.rooms_amount {
            let size = Size::new(
                sample_extent(rng, c.min_room_size.width, c.max_room_size.width),
                sample_extent(rng, c.min_room_size.height, c.max_room_size.height),
            );
            // keeps at least one wall cell on the left/top and two on the right/bottom
            let position = Point::new(
                rng.random_range(1..c.map_size.width - size.width - 1),
                rng.random_range(1..c.map_size.height - size.height - 1),
            );
            let candidate = Room::new(position, size);

            if rooms.iter().any(|r| r.intersects(&candidate)) {
                debug!("Room attempt {} at {:?} overlaps, dropped", attempt, position);
                continue;
            }
            candidate.carve(grid);
            rooms.push(candidate);
        }
        rooms
    }
}

/// Pairwise tunnels when `connect_all`, otherwise a chain in placement order.
pub fn connect_rooms(rooms: &[Room], connect_all: bool) -> Vec<Tunnel> {
    if connect_all {
        let mut tunnels = Vec::with_capacity(rooms.len() * rooms.len().saturating_sub(1) / 2);
        for (i, a) in rooms.iter().enumerate() {
            for b in &rooms[i + 1..] {
                tunnels.push(Tunnel::new(a.center(), b.center()));
            }
        }
        tunnels
    } else {
        rooms
            .windows(2)
            .map(|pair| Tunnel::new(pair[0].center(), pair[1].center()))
            .collect()
    }
}

/// Uniform in `[min, max)`, or exactly `min` when the range is empty.
fn sample_extent<R: Rng + ?Sized>(rng: &mut R, min: usize, max: usize) -> usize {
    if min < max {
        rng.random_range(min..max)
    } else {
        min
    }
}

fn largest_extent(min: usize, max: usize) -> usize {
    if min < max {
        max - 1
    } else {
        min
    }
}

impl MapGenerator for TunnelingGenerator {
    fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.config;
        check_map_size(c.map_size)?;

        let (min, max) = (c.min_room_size, c.max_room_size);
        if min.width == 0 || min.height == 0 {
            return Err(ConfigError::EmptyRoomSize(min));
        }
        if min.width > max.width || min.height > max.height {
            return Err(ConfigError::RoomSizeInverted { min, max });
        }

        let largest = self.largest_room();
        if largest.width + 3 > c.map_size.width || largest.height + 3 > c.map_size.height {
            return Err(ConfigError::RoomTooLarge {
                room: largest,
                map: c.map_size,
            });
        }
        Ok(())
    }

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Dungeon, ConfigError> {
        self.validate()?;
        let c = &self.config;

        let mut grid = Grid::new(c.map_size);
        let rooms = self.place_rooms(&mut grid, rng);
        if rooms.len() < c.rooms_amount {
            warn!(
                "Placed only {} of {} rooms on the {} map",
                rooms.len(),
                c.rooms_amount,
                c.map_size
            );
        } else {
            debug!("Placed all {} rooms", rooms.len());
        }

        let tunnels = connect_rooms(&rooms, c.connect_all);
        for tunnel in &tunnels {
            tunnel.carve(&mut grid, rng);
        }
        debug!("Carved {} tunnels", tunnels.len());

        Ok(Dungeon::new(grid, rooms, tunnels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Cell;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn config(map: usize, min: usize, max: usize, rooms: usize, connect_all: bool) -> TunnelingConfig {
        TunnelingConfig {
            map_size: Size::new(map, map),
            min_room_size: Size::new(min, min),
            max_room_size: Size::new(max, max),
            rooms_amount: rooms,
            connect_all,
        }
    }

    fn run(config: TunnelingConfig, seed: u64) -> Dungeon {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        TunnelingGenerator::new(config).generate(&mut rng).unwrap()
    }

    #[test]
    fn test_rooms_respect_border() {
        for seed in 0..20 {
            let dungeon = run(config(40, 3, 9, 12, false), seed);
            for room in dungeon.rooms() {
                assert!(room.inside_border(Size::new(40, 40)), "{:?}", room);
            }
            assert!(dungeon.grid().is_border_sealed());
        }
    }

    #[test]
    fn test_accepted_rooms_do_not_overlap() {
        let dungeon = run(config(60, 4, 12, 30, false), 3);
        let rooms = dungeon.rooms();
        for (i, a) in rooms.iter().enumerate() {
            for b in &rooms[i + 1..] {
                assert!(!a.intersects(b), "{:?} overlaps {:?}", a, b);
            }
        }
        assert!(rooms.len() <= 30);
    }

    #[test]
    fn test_chain_tunnel_count() {
        for seed in 0..10 {
            let dungeon = run(config(50, 3, 8, 8, false), seed);
            let n = dungeon.rooms().len();
            assert_eq!(dungeon.tunnels().len(), n.saturating_sub(1));
            for (tunnel, pair) in dungeon.tunnels().iter().zip(dungeon.rooms().windows(2)) {
                assert_eq!(tunnel.from, pair[0].center());
                assert_eq!(tunnel.to, pair[1].center());
            }
        }
    }

    #[test]
    fn test_connect_all_tunnel_count() {
        for seed in 0..10 {
            let dungeon = run(config(50, 3, 8, 8, true), seed);
            let n = dungeon.rooms().len();
            assert_eq!(dungeon.tunnels().len(), n * (n - 1) / 2);
        }
    }

    #[test]
    fn test_rooms_are_connected() {
        for seed in 0..10 {
            let dungeon = run(config(50, 3, 8, 8, false), seed);
            assert_eq!(dungeon.grid().space_regions(), 1);
            for room in dungeon.rooms() {
                assert_eq!(dungeon.grid().cell_at(room.center().x, room.center().y), Cell::Space);
            }
        }
    }

    const SEED_1_MAP: &str = "\
####################
####################
##############....##
#######...........##
######...#####....##
######...###########
######..........####
######...######.####
###############.####
###############.####
###############.####
#############....###
#############....###
#############....###
####################
####################
####################
####################
####################
####################
";

    #[test]
    fn test_fixed_seed_scenario() {
        let params = config(20, 3, 5, 3, false);
        let dungeon = run(params.clone(), 1);

        assert_eq!(dungeon.grid().to_string(), SEED_1_MAP);
        assert_eq!(
            dungeon.rooms(),
            &[
                Room::new(Point::new(14, 2), Size::new(4, 3)),
                Room::new(Point::new(6, 4), Size::new(3, 4)),
                Room::new(Point::new(13, 11), Size::new(4, 3)),
            ]
        );
        assert_eq!(
            dungeon.tunnels(),
            &[
                Tunnel::new(Point::new(16, 3), Point::new(7, 6)),
                Tunnel::new(Point::new(7, 6), Point::new(15, 12)),
            ]
        );
        assert_eq!(dungeon.grid().space_regions(), 1);
        // the same seed reproduces the grid exactly
        assert_eq!(run(params, 1), dungeon);
    }

    #[test]
    fn test_attempts_do_not_preallocate_rooms() {
        let c = config(20, 3, 5, 100_000, false);
        let mut grid = Grid::new(c.map_size);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let rooms = TunnelingGenerator::new(c).place_rooms(&mut grid, &mut rng);
        // a 20x20 map has room for a handful of rooms, not 100k
        assert!(!rooms.is_empty() && rooms.len() < 30);
        assert!(rooms.capacity() < 1_000, "capacity {}", rooms.capacity());
    }

    #[test]
    fn test_equal_min_and_max_size() {
        let dungeon = run(config(30, 5, 5, 6, false), 11);
        assert!(!dungeon.rooms().is_empty());
        for room in dungeon.rooms() {
            assert_eq!(room.size, Size::new(5, 5));
        }
    }

    #[test]
    fn test_zero_rooms_requested() {
        let dungeon = run(config(20, 3, 5, 0, true), 0);
        assert!(dungeon.rooms().is_empty());
        assert!(dungeon.tunnels().is_empty());
        assert_eq!(dungeon.grid().count(Cell::Space), 0);
    }

    #[test]
    fn test_invalid_sizes() {
        let inverted = TunnelingGenerator::new(config(30, 8, 4, 3, false));
        assert!(matches!(inverted.validate(), Err(ConfigError::RoomSizeInverted { .. })));

        let empty = TunnelingGenerator::new(config(30, 0, 4, 3, false));
        assert!(matches!(empty.validate(), Err(ConfigError::EmptyRoomSize(_))));

        // a 9-wide room on a 10-wide map leaves no border
        let too_large = TunnelingGenerator::new(config(10, 3, 10, 3, false));
        assert_eq!(
            too_large.validate(),
            Err(ConfigError::RoomTooLarge {
                room: Size::new(9, 9),
                map: Size::new(10, 10),
            })
        );

        // largest room of 7 on a 10 map still fits
        assert_eq!(TunnelingGenerator::new(config(10, 3, 8, 3, false)).validate(), Ok(()));
    }

    #[test]
    fn test_connect_rooms_helper() {
        let rooms: Vec<Room> = (0..4)
            .map(|i| Room::new(Point::new(1 + i * 5, 1), Size::new(3, 3)))
            .collect();
        assert_eq!(connect_rooms(&rooms, false).len(), 3);
        assert_eq!(connect_rooms(&rooms, true).len(), 6);
        assert!(connect_rooms(&rooms[..1], false).is_empty());
        assert!(connect_rooms(&[], true).is_empty());
    }
}
