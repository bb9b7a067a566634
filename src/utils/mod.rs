// src/utils/mod.rs
pub mod export;
pub mod geometry;

pub use geometry::{Point, Size};
