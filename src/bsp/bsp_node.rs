//! src/bsp/bsp_node.rs

use rand::Rng;

use crate::map::{Room, Tunnel};
use crate::utils::geometry::{Point, Size};

/// Index of a leaf inside its [`LeafTree`].
pub type LeafId = usize;

/// Orientation of the cut that splits a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitAxis {
    /// Cut along a vertical line: left and right children.
    Vertical,
    /// Cut along a horizontal line: top and bottom children.
    Horizontal,
}

/// Aspect ratio at which the longer side is always the one cut.
pub const SQUARENESS_RATIO: f32 = 1.25;

impl SplitAxis {
    /// Cut across the longer side when the leaf is clearly elongated,
    /// otherwise flip a coin.
    pub fn choose<R: Rng + ?Sized>(size: Size, rng: &mut R) -> Self {
        let (w, h) = (size.width as f32, size.height as f32);
        if w / h >= SQUARENESS_RATIO {
            SplitAxis::Vertical
        } else if h / w >= SQUARENESS_RATIO {
            SplitAxis::Horizontal
        } else if rng.random_bool(0.5) {
            SplitAxis::Horizontal
        } else {
            SplitAxis::Vertical
        }
    }
}

/// A node in the BSP tree. Each leaf has:
/// - the rectangle it covers,
/// - either no children or exactly two,
/// - a `room` if it is terminal,
/// - the tunnels joining its two subtrees if it is not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub position: Point,
    pub size: Size,
    pub children: Option<(LeafId, LeafId)>,
    pub room: Option<Room>,
    pub tunnels: Vec<Tunnel>,
}

impl Leaf {
    pub fn new(position: Point, size: Size) -> Self {
        Leaf {
            position,
            size,
            children: None,
            room: None,
            tunnels: Vec::new(),
        }
    }

    /// Returns `true` if the leaf has not been split.
    pub fn is_terminal(&self) -> bool {
        self.children.is_none()
    }

    /// Place a room with at least one cell of padding on every side.
    ///
    /// The leaf must be at least 4 cells on both axes.
    fn random_room<R: Rng + ?Sized>(&self, rng: &mut R) -> Room {
        let width = rng.random_range(2..=self.size.width - 2);
        let height = rng.random_range(2..=self.size.height - 2);
        let x = self.position.x + rng.random_range(1..=self.size.width - width - 1);
        let y = self.position.y + rng.random_range(1..=self.size.height - height - 1);
        Room::new(Point::new(x, y), Size::new(width, height))
    }
}

/// Arena holding every leaf of one partition, root at index 0.
///
/// Leaves are appended in the order they are created, so children always
/// come after their parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafTree {
    leaves: Vec<Leaf>,
}

impl LeafTree {
    pub fn new(position: Point, size: Size) -> Self {
        LeafTree {
            leaves: vec![Leaf::new(position, size)],
        }
    }

    pub const ROOT: LeafId = 0;

    pub fn get(&self, id: LeafId) -> &Leaf {
        &self.leaves[id]
    }

    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn terminal_ids(&self) -> Vec<LeafId> {
        (0..self.leaves.len())
            .filter(|&id| self.leaves[id].is_terminal())
            .collect()
    }

    /// Try to split a terminal leaf in two.
    ///
    /// Returns `false` (and leaves the tree untouched) when the leaf already
    /// has children or the chosen axis is too short to give both halves
    /// `min_leaf_size` cells.
    pub fn split<R: Rng + ?Sized>(&mut self, id: LeafId, min_leaf_size: usize, rng: &mut R) -> bool {
        let leaf = &self.leaves[id];
        if !leaf.is_terminal() {
            return false;
        }
        let (position, size) = (leaf.position, leaf.size);

        let axis = SplitAxis::choose(size, rng);
        let length = match axis {
            SplitAxis::Vertical => size.width,
            SplitAxis::Horizontal => size.height,
        };
        if length <= min_leaf_size * 2 {
            return false;
        }
        let cut = rng.random_range(min_leaf_size..=length - min_leaf_size);

        let (first, second) = match axis {
            SplitAxis::Vertical => (
                Leaf::new(position, Size::new(cut, size.height)),
                Leaf::new(
                    Point::new(position.x + cut, position.y),
                    Size::new(size.width - cut, size.height),
                ),
            ),
            SplitAxis::Horizontal => (
                Leaf::new(position, Size::new(size.width, cut)),
                Leaf::new(
                    Point::new(position.x, position.y + cut),
                    Size::new(size.width, size.height - cut),
                ),
            ),
        };

        let first_id = self.leaves.len();
        self.leaves.push(first);
        self.leaves.push(second);
        self.leaves[id].children = Some((first_id, first_id + 1));
        true
    }

    /// Give every terminal leaf a room, then join sibling subtrees with one
    /// tunnel per internal leaf, working bottom-up from `id`.
    pub fn create_rooms<R: Rng + ?Sized>(&mut self, id: LeafId, rng: &mut R) {
        match self.leaves[id].children {
            None => {
                let room = self.leaves[id].random_room(rng);
                self.leaves[id].room = Some(room);
            }
            Some((first, second)) => {
                self.create_rooms(first, rng);
                self.create_rooms(second, rng);
                if let (Some(a), Some(b)) = (
                    self.representative_room(first, rng),
                    self.representative_room(second, rng),
                ) {
                    self.leaves[id].tunnels.push(Tunnel::new(a.center(), b.center()));
                }
            }
        }
    }

    /// The room standing in for a whole subtree: a terminal leaf's own room,
    /// otherwise a coin flip between the two children's representatives.
    pub fn representative_room<R: Rng + ?Sized>(&self, id: LeafId, rng: &mut R) -> Option<Room> {
        let leaf = &self.leaves[id];
        if let Some(room) = leaf.room {
            return Some(room);
        }
        let (first, second) = leaf.children?;
        let a = self.representative_room(first, rng);
        let b = self.representative_room(second, rng);
        match (a, b) {
            (Some(a), Some(b)) => Some(if rng.random_bool(0.5) { a } else { b }),
            (a, b) => a.or(b),
        }
    }

    /// Rooms of all terminal leaves, in arena order.
    pub fn rooms(&self) -> Vec<Room> {
        self.leaves.iter().filter_map(|leaf| leaf.room).collect()
    }

    /// Tunnels of all internal leaves, in arena order.
    pub fn tunnels(&self) -> Vec<Tunnel> {
        self.leaves
            .iter()
            .flat_map(|leaf| leaf.tunnels.iter().copied())
            .collect()
    }
}
