// src/bsp/mod.rs
pub mod bsp_node;
mod bsp_procedural;

pub use bsp_node::{Leaf, LeafId, LeafTree, SplitAxis};
pub use bsp_procedural::{BspTreeGenerator, MIN_ROOM_LEAF};

/// Chance that a leaf within the size limit is split anyway.
pub const SPLIT_CHANCE: f64 = 0.75;
