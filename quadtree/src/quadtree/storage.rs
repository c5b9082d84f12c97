use super::types::{level_offset, node_count, EMPTY_LINK};
use super::*;
use crate::error::{QuadtreeError, QuadtreeResult};
use common::shapes::Rectangle;
use tracing::debug;

impl<T> PseudoQuadTree<T> {
    pub fn new(height: u8, area: Rectangle) -> QuadtreeResult<Self> {
        Self::new_with_config(area, Config::with_height(height))
    }

    /// Builds a tree over the area whose minimum corner is `(x_origin, z_origin)`.
    pub fn with_origin(
        height: u8,
        area_width: f32,
        area_height: f32,
        x_origin: f32,
        z_origin: f32,
    ) -> QuadtreeResult<Self> {
        Self::new(
            height,
            Rectangle::from_origin(x_origin, z_origin, area_width, area_height),
        )
    }

    pub fn new_with_config(area: Rectangle, config: Config) -> QuadtreeResult<Self> {
        config.validate()?;
        validate_area(&area)?;

        let leaf_level = config.height + 1;
        let mut nodes = vec![Node::default(); node_count(config.height) as usize];
        let (x_origin, z_origin) = area.origin();

        let mut index = 0usize;
        for level in 0..=leaf_level {
            // Half-extents of one cell at this level.
            let step_x = area.width / (2u32 << level) as f32;
            let step_z = area.height / (2u32 << level) as f32;
            let level_len = 1u32 << (2 * level as u32);
            for code in 0..level_len {
                let (grid_x, grid_z) = morton::decode(code);
                let node = &mut nodes[index];
                node.x = x_origin + step_x + 2.0 * grid_x as f32 * step_x;
                node.z = z_origin + step_z + 2.0 * grid_z as f32 * step_z;
                node.set_link(if level < leaf_level {
                    1 + 4 * index as u32
                } else {
                    EMPTY_LINK
                });
                index += 1;
            }
        }
        debug_assert_eq!(index, nodes.len());

        debug!(
            height = config.height,
            nodes = nodes.len(),
            cells = 1u64 << (2 * leaf_level as u32),
            "built pseudo quadtree"
        );

        Ok(Self {
            nodes,
            leaves: Vec::new(),
            area,
            height: config.height,
            leaf_level,
            jitter_ratio: config.jitter_ratio,
        })
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn area(&self) -> Rectangle {
        self.area
    }

    pub fn jitter_ratio(&self) -> f32 {
        self.jitter_ratio
    }

    /// Number of cells along each axis of the deepest level.
    pub fn extent(&self) -> u32 {
        1 << self.leaf_level
    }

    pub fn cell_count(&self) -> u32 {
        self.extent() * self.extent()
    }

    /// Cells that have not received a leaf yet.
    pub fn free_cells(&self) -> u32 {
        self.cell_count() - self.leaves.len() as u32
    }

    /// Width and height of one cell of the deepest level.
    pub fn cell_size(&self) -> (f32, f32) {
        let extent = self.extent() as f32;
        (self.area.width / extent, self.area.height / extent)
    }

    /// World-space bounds of the cell at grid coordinate `(cell_x, cell_z)`.
    pub fn cell_bounds(&self, cell_x: u32, cell_z: u32) -> Rectangle {
        let (cell_width, cell_height) = self.cell_size();
        let (x_origin, z_origin) = self.area.origin();
        Rectangle::from_origin(
            x_origin + cell_x as f32 * cell_width,
            z_origin + cell_z as f32 * cell_height,
            cell_width,
            cell_height,
        )
    }

    /// Node index of the cell at grid coordinate `(cell_x, cell_z)`.
    pub fn cell_node_index(&self, cell_x: u32, cell_z: u32) -> Option<usize> {
        let extent = self.extent();
        if cell_x >= extent || cell_z >= extent {
            return None;
        }
        Some(level_offset(self.leaf_level) + morton::encode(cell_x, cell_z) as usize)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Level of the node at `index`, 0 for the root.
    pub fn level_of(&self, index: usize) -> Option<u8> {
        if index >= self.nodes.len() {
            return None;
        }
        (0..=self.leaf_level)
            .rev()
            .find(|&level| index >= level_offset(level))
    }

    /// Decodes the node's link field according to its level.
    pub fn link(&self, index: usize) -> Option<NodeLink> {
        let level = self.level_of(index)?;
        let node = &self.nodes[index];
        Some(if level == self.leaf_level {
            NodeLink::Leaf(node.leaf_index())
        } else {
            NodeLink::Children(node.link())
        })
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Leaves in placement order.
    pub fn leaves(&self) -> &[Leaf<T>] {
        &self.leaves
    }

    /// Grid coordinate of the cell containing `(x, z)`, or `None` outside the
    /// area. Points on the far border belong to the last cell.
    pub fn cell_at(&self, x: f32, z: f32) -> Option<(u32, u32)> {
        if !self.area.contains_point(x, z) {
            return None;
        }
        let (cell_width, cell_height) = self.cell_size();
        let (x_origin, z_origin) = self.area.origin();
        let last = self.extent() - 1;
        // Float to int casts saturate, so rounding below the origin lands on 0.
        let cell_x = (((x - x_origin) / cell_width) as u32).min(last);
        let cell_z = (((z - z_origin) / cell_height) as u32).min(last);
        Some((cell_x, cell_z))
    }

    /// Leaf stored in the cell containing `(x, z)`, if the point is inside the
    /// area and the cell is occupied.
    pub fn locate(&self, x: f32, z: f32) -> Option<&Leaf<T>> {
        let (cell_x, cell_z) = self.cell_at(x, z)?;
        let index = self.cell_node_index(cell_x, cell_z)?;
        self.nodes[index]
            .leaf_index()
            .map(|leaf| &self.leaves[leaf as usize])
    }
}

fn validate_area(area: &Rectangle) -> QuadtreeResult<()> {
    let (x, z) = area.origin();
    let valid = x.is_finite()
        && z.is_finite()
        && area.width.is_finite()
        && area.height.is_finite()
        && area.width > 0.0
        && area.height > 0.0;
    if !valid {
        return Err(QuadtreeError::InvalidArea {
            x,
            z,
            width: area.width,
            height: area.height,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(height: u8) -> PseudoQuadTree<u32> {
        PseudoQuadTree::with_origin(height, 100.0, 100.0, 0.0, 0.0).unwrap()
    }

    #[test]
    fn root_is_area_center() {
        let qt = PseudoQuadTree::<u32>::with_origin(1, 40.0, 20.0, -10.0, 5.0).unwrap();
        assert_eq!(qt.nodes()[0].center(), (10.0, 15.0));
    }

    #[test]
    fn first_level_follows_quadrant_order() {
        let qt = tree(1);
        assert_eq!(qt.nodes()[1].center(), (25.0, 25.0));
        assert_eq!(qt.nodes()[2].center(), (75.0, 25.0));
        assert_eq!(qt.nodes()[3].center(), (25.0, 75.0));
        assert_eq!(qt.nodes()[4].center(), (75.0, 75.0));
    }

    #[test]
    fn level_of_matches_offsets() {
        let qt = tree(2);
        assert_eq!(qt.level_of(0), Some(0));
        assert_eq!(qt.level_of(1), Some(1));
        assert_eq!(qt.level_of(4), Some(1));
        assert_eq!(qt.level_of(5), Some(2));
        assert_eq!(qt.level_of(21), Some(3));
        assert_eq!(qt.level_of(84), Some(3));
        assert_eq!(qt.level_of(85), None);
    }

    #[test]
    fn links_decode_by_level() {
        let qt = tree(2);
        assert_eq!(qt.link(0), Some(NodeLink::Children(1)));
        assert_eq!(qt.link(20), Some(NodeLink::Children(81)));
        assert_eq!(qt.link(21), Some(NodeLink::Leaf(None)));
        assert_eq!(qt.link(85), None);
    }

    #[test]
    fn cell_at_matches_cell_nodes() {
        let qt = tree(2);
        let (cell_width, cell_height) = qt.cell_size();
        for cell_z in 0..qt.extent() {
            for cell_x in 0..qt.extent() {
                let x = (cell_x as f32 + 0.5) * cell_width;
                let z = (cell_z as f32 + 0.5) * cell_height;
                assert_eq!(qt.cell_at(x, z), Some((cell_x, cell_z)));
                let index = qt.cell_node_index(cell_x, cell_z).unwrap();
                assert_eq!(qt.nodes()[index].center(), (x, z));
            }
        }
    }

    #[test]
    fn cell_at_edges() {
        let qt = tree(2);
        assert_eq!(qt.cell_at(0.0, 0.0), Some((0, 0)));
        assert_eq!(qt.cell_at(100.0, 100.0), Some((7, 7)));
        assert_eq!(qt.cell_at(12.5, 0.0), Some((1, 0)));
        assert_eq!(qt.cell_at(-0.1, 50.0), None);
        assert_eq!(qt.cell_at(50.0, 100.1), None);
    }

    #[test]
    fn rejects_degenerate_area() {
        for (width, height) in [(0.0, 10.0), (10.0, -1.0), (f32::INFINITY, 10.0)] {
            let result = PseudoQuadTree::<u32>::with_origin(2, width, height, 0.0, 0.0);
            assert!(matches!(result, Err(QuadtreeError::InvalidArea { .. })));
        }
    }
}
