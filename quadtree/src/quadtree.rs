//! Fixed-depth "pseudo" quad-tree.
//!
//! The whole topology is allocated up front as a complete 4-ary tree stored
//! breadth-first in one array, so node `i`'s children always sit at
//! `1 + 4 * i ..= 4 + 4 * i`. The deepest level is a grid of cells; each cell
//! can hold at most one leaf, linked through the same field that internal
//! nodes use for their children. Leaves are placed at random, collision-free
//! positions and found again by a depth-first walk that follows the per-node
//! presence flags and can prune whole subtrees with a predicate.

mod config;
mod morton;
mod populate;
mod predicates;
mod storage;
mod traverse;
mod types;

pub use config::Config;
pub use predicates::{CircleOverlap, ViewDistance};
pub use traverse::{Leaves, TraversalCursor, Visitor};
pub use types::{Leaf, Node, NodeLink, NodeView, MAX_TREE_HEIGHT};

use common::shapes::Rectangle;

pub struct PseudoQuadTree<T> {
    nodes: Vec<Node>,
    leaves: Vec<Leaf<T>>,
    area: Rectangle,
    height: u8,
    /// Level of the cell grid, always `height + 1`.
    leaf_level: u8,
    jitter_ratio: f32,
}

impl<T> std::fmt::Debug for PseudoQuadTree<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PseudoQuadTree")
            .field("height", &self.height)
            .field("area", &self.area)
            .field("nodes", &self.nodes.len())
            .field("leaves", &self.leaves.len())
            .finish()
    }
}
