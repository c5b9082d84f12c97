pub mod error;
pub mod quadtree;

pub use error::{QuadtreeError, QuadtreeResult};
pub use quadtree::{
    CircleOverlap, Config, Leaf, Leaves, Node, NodeLink, NodeView, PseudoQuadTree,
    TraversalCursor, ViewDistance, Visitor, MAX_TREE_HEIGHT,
};
