use super::types::{level_offset, EMPTY_LINK};
use super::*;
use crate::error::{QuadtreeError, QuadtreeResult};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

impl<T: Clone> PseudoQuadTree<T> {
    /// Places `count` copies of `value` in distinct, randomly chosen cells.
    ///
    /// Either every instance is placed or, when fewer than `count` cells are
    /// free, nothing is and `CapacityExceeded` is returned.
    pub fn populate(&mut self, value: T, count: u32) -> QuadtreeResult<()> {
        self.populate_with_rng(value, count, &mut rand::thread_rng())
    }

    /// `populate` with a caller-supplied random source.
    pub fn populate_with_rng<R: Rng + ?Sized>(
        &mut self,
        value: T,
        count: u32,
        rng: &mut R,
    ) -> QuadtreeResult<()> {
        let mut free = self.free_cell_codes();
        let available = free.len() as u32;
        if count > available {
            warn!(requested = count, available, "populate rejected");
            return Err(QuadtreeError::CapacityExceeded {
                requested: count,
                available,
            });
        }
        if count == 0 {
            return Ok(());
        }

        let before = self.leaves.len();
        self.leaves.reserve(count as usize);
        let (chosen, _) = free.partial_shuffle(rng, count as usize);
        for &code in chosen.iter() {
            let (cell_x, cell_z) = morton::decode(code);
            let (x, z) = self
                .cell_bounds(cell_x, cell_z)
                .random_point_within(self.jitter_ratio, rng);
            let placed = self.place(value.clone(), cell_x, cell_z, x, z);
            // Cells come from the free list and are distinct.
            assert!(placed.is_some(), "cell ({cell_x}, {cell_z}) was not free");
        }
        debug_assert_eq!(self.leaves.len(), before + count as usize);

        debug!(
            placed = count,
            leaves = self.leaves.len(),
            "populated pseudo quadtree"
        );
        Ok(())
    }

    /// Morton codes of every cell without a leaf.
    fn free_cell_codes(&self) -> Vec<u32> {
        let offset = level_offset(self.leaf_level);
        (0..self.cell_count())
            .filter(|&code| self.nodes[offset + code as usize].link() == EMPTY_LINK)
            .collect()
    }

    /// Stores a leaf at `(x, z)` in cell `(cell_x, cell_z)` and marks every
    /// quadrant on the way down to it. The cell's Morton code spells the path:
    /// two bits per level, most significant first. Returns the cell's node
    /// index, or `None` if the cell was already occupied.
    pub(crate) fn place(
        &mut self,
        value: T,
        cell_x: u32,
        cell_z: u32,
        x: f32,
        z: f32,
    ) -> Option<usize> {
        let index = self.cell_node_index(cell_x, cell_z)?;
        if self.nodes[index].link() != EMPTY_LINK {
            return None;
        }

        let code = morton::encode(cell_x, cell_z);
        let mut node = 0usize;
        for level in (0..self.leaf_level).rev() {
            let quadrant = ((code >> (2 * level as u32)) & 0b11) as usize;
            self.nodes[node].set_child(quadrant);
            node = self.nodes[node].link() as usize + quadrant;
        }
        debug_assert_eq!(node, index);

        self.leaves.push(Leaf { value, x, z });
        self.nodes[index].set_link(self.leaves.len() as u32);
        Some(index)
    }
}
