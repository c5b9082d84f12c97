use common::shapes::Rectangle;
use smallvec::SmallVec;

pub(crate) const LINK_BITS: u32 = 28;
pub(crate) const LINK_MASK: u32 = (1 << LINK_BITS) - 1;
pub(crate) const FLAG_SHIFT: u32 = LINK_BITS;
pub(crate) const EMPTY_LINK: u32 = 0;

/// Largest height whose node count and cell count both fit in the link field.
pub const MAX_TREE_HEIGHT: u8 = 12;

/// Number of nodes in a tree of the given height: `sum(4^k)` for `k` in `0..=height + 1`.
#[inline]
pub(crate) const fn node_count(height: u8) -> u64 {
    ((1u64 << (2 * (height as u64 + 2))) - 1) / 3
}

/// Array offset of the first node at `level`.
#[inline]
pub(crate) const fn level_offset(level: u8) -> usize {
    ((1usize << (2 * level as usize)) - 1) / 3
}

/// A cell of the tree. The link field and the four presence flags share one
/// word: bits 0..28 hold the link, bit `28 + q` is set once quadrant `q` has
/// received a leaf.
#[derive(Clone, Copy, Debug, Default)]
#[repr(C)]
pub struct Node {
    pub(crate) x: f32,
    pub(crate) z: f32,
    pub(crate) packed: u32,
}

impl Node {
    #[inline(always)]
    pub fn center(&self) -> (f32, f32) {
        (self.x, self.z)
    }

    #[inline(always)]
    pub fn has_child(&self, quadrant: usize) -> bool {
        debug_assert!(quadrant < 4);
        self.packed & (1 << (FLAG_SHIFT + quadrant as u32)) != 0
    }

    /// Presence flags as a 4-bit mask, bit `q` for quadrant `q`.
    #[inline(always)]
    pub fn child_mask(&self) -> u8 {
        (self.packed >> FLAG_SHIFT) as u8
    }

    #[inline(always)]
    pub(crate) fn link(&self) -> u32 {
        self.packed & LINK_MASK
    }

    #[inline(always)]
    pub(crate) fn set_link(&mut self, link: u32) {
        debug_assert!(link <= LINK_MASK, "link {} exceeds max {}", link, LINK_MASK);
        self.packed = (self.packed & !LINK_MASK) | (link & LINK_MASK);
    }

    #[inline(always)]
    pub(crate) fn set_child(&mut self, quadrant: usize) {
        debug_assert!(quadrant < 4);
        self.packed |= 1 << (FLAG_SHIFT + quadrant as u32);
    }

    /// Leaf index stored in a cell-level link, if any.
    #[inline(always)]
    pub(crate) fn leaf_index(&self) -> Option<u32> {
        match self.link() {
            EMPTY_LINK => None,
            link => Some(link - 1),
        }
    }
}

/// Decoded link field. Which variant applies depends only on the node's level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeLink {
    /// Internal node: children live at `base..base + 4`.
    Children(u32),
    /// Cell-level node: index into the leaf array, or `None` while empty.
    Leaf(Option<u32>),
}

/// A placed payload and its jittered world position.
#[derive(Clone, Debug, PartialEq)]
pub struct Leaf<T> {
    pub value: T,
    pub x: f32,
    pub z: f32,
}

/// What a traversal predicate sees of a node: its center, the full extents of
/// its cell, and its depth (0 at the root).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeView {
    pub center_x: f32,
    pub center_z: f32,
    pub width: f32,
    pub height: f32,
    pub level: u8,
}

impl NodeView {
    #[inline]
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(self.center_x, self.center_z, self.width, self.height)
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Frame {
    pub(crate) index: u32,
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) level: u8,
}

impl Frame {
    #[inline(always)]
    pub(crate) fn view(&self, node: &Node) -> NodeView {
        NodeView {
            center_x: node.x,
            center_z: node.z,
            width: self.width,
            height: self.height,
            level: self.level,
        }
    }
}

pub(crate) type NodeStack = SmallVec<[Frame; 64]>;
