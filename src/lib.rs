// src/lib.rs
//! Procedural dungeon maps as wall/space grids.
//!
//! Four algorithms share one output type, [`map::Dungeon`]: the finished
//! [`map::Grid`] plus the rooms and tunnels it was carved from.
//!
//! ```
//! use dungeon_gen::generator::{generate_seeded, Algorithm, GeneratorConfig};
//! use dungeon_gen::map::Cell;
//!
//! let config = GeneratorConfig::for_algorithm(Algorithm::BspTree);
//! let dungeon = generate_seeded(&config, 42).unwrap();
//! let spawn = dungeon.spawn_point().unwrap();
//! assert_eq!(dungeon.grid().cell_at(spawn.x, spawn.y), Cell::Space);
//! ```

pub mod bsp;
pub mod error;
pub mod generator;
pub mod map;
pub mod utils;

pub use error::{ConfigError, Error};
pub use generator::{generate, generate_seeded, Algorithm, GeneratorConfig, MapGenerator};
pub use map::{Cell, Dungeon, Grid, Room, Tunnel};
