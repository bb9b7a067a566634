// src/generator/config.rs

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::utils::geometry::Size;

/// The four generation algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Tunneling,
    RandomWalk,
    CellularAutomata,
    BspTree,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Tunneling => "tunneling",
            Algorithm::RandomWalk => "random walk",
            Algorithm::CellularAutomata => "cellular automata",
            Algorithm::BspTree => "BSP tree",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunnelingConfig {
    pub map_size: Size,
    pub min_room_size: Size,
    /// Exclusive upper bound for sampled room sizes.
    pub max_room_size: Size,
    /// Placement attempts; overlapping candidates are dropped.
    pub rooms_amount: usize,
    /// Join every pair of rooms instead of chaining them in order.
    pub connect_all: bool,
}

impl Default for TunnelingConfig {
    fn default() -> Self {
        TunnelingConfig {
            map_size: Size::new(100, 100),
            min_room_size: Size::new(7, 7),
            max_room_size: Size::new(15, 15),
            rooms_amount: 10,
            connect_all: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomWalkConfig {
    pub map_size: Size,
    /// Number of wall cells to carve, not counting the starting cell.
    pub steps: usize,
}

impl Default for RandomWalkConfig {
    fn default() -> Self {
        RandomWalkConfig {
            map_size: Size::new(100, 100),
            steps: 1500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellularAutomataConfig {
    pub map_size: Size,
    /// Probability in `[0, 1]` that a cell starts as wall.
    pub wall_percentage: f32,
    /// Smoothing passes.
    pub depth: usize,
}

impl Default for CellularAutomataConfig {
    fn default() -> Self {
        CellularAutomataConfig {
            map_size: Size::new(100, 100),
            wall_percentage: 0.47,
            depth: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BspTreeConfig {
    pub map_size: Size,
    /// Leaves larger than this on either axis always try to split.
    pub max_leaf_size: usize,
    /// Neither half of a split may be smaller than this.
    pub min_leaf_size: usize,
}

impl Default for BspTreeConfig {
    fn default() -> Self {
        BspTreeConfig {
            map_size: Size::new(100, 100),
            max_leaf_size: 20,
            min_leaf_size: 6,
        }
    }
}

/// Algorithm selection together with its parameters.
///
/// In JSON the variant is named by an `"algorithm"` key next to the
/// parameters; missing parameters fall back to their defaults:
///
/// ```json
/// { "algorithm": "bsp_tree", "map_size": { "width": 60, "height": 40 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum GeneratorConfig {
    Tunneling(TunnelingConfig),
    RandomWalk(RandomWalkConfig),
    CellularAutomata(CellularAutomataConfig),
    BspTree(BspTreeConfig),
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig::Tunneling(TunnelingConfig::default())
    }
}

impl GeneratorConfig {
    /// Default parameters for `algorithm`.
    pub fn for_algorithm(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Tunneling => GeneratorConfig::Tunneling(TunnelingConfig::default()),
            Algorithm::RandomWalk => GeneratorConfig::RandomWalk(RandomWalkConfig::default()),
            Algorithm::CellularAutomata => {
                GeneratorConfig::CellularAutomata(CellularAutomataConfig::default())
            }
            Algorithm::BspTree => GeneratorConfig::BspTree(BspTreeConfig::default()),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            GeneratorConfig::Tunneling(_) => Algorithm::Tunneling,
            GeneratorConfig::RandomWalk(_) => Algorithm::RandomWalk,
            GeneratorConfig::CellularAutomata(_) => Algorithm::CellularAutomata,
            GeneratorConfig::BspTree(_) => Algorithm::BspTree,
        }
    }

    pub fn map_size(&self) -> Size {
        match self {
            GeneratorConfig::Tunneling(c) => c.map_size,
            GeneratorConfig::RandomWalk(c) => c.map_size,
            GeneratorConfig::CellularAutomata(c) => c.map_size,
            GeneratorConfig::BspTree(c) => c.map_size,
        }
    }

    pub fn set_map_size(&mut self, size: Size) {
        match self {
            GeneratorConfig::Tunneling(c) => c.map_size = size,
            GeneratorConfig::RandomWalk(c) => c.map_size = size,
            GeneratorConfig::CellularAutomata(c) => c.map_size = size,
            GeneratorConfig::BspTree(c) => c.map_size = size,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a config from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
