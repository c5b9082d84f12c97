//! Ready-made traversal predicates for culling.

use super::NodeView;
use common::shapes::Circle;

/// Admits nodes whose cell contains the viewpoint or lies within `distance`
/// of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewDistance {
    pub x: f32,
    pub z: f32,
    pub distance: f32,
}

impl ViewDistance {
    pub fn new(x: f32, z: f32, distance: f32) -> Self {
        Self { x, z, distance }
    }

    #[inline]
    pub fn admits(&self, node: &NodeView) -> bool {
        node.bounds().distance_sq_to_point(self.x, self.z) <= self.distance * self.distance
    }

    /// The predicate as a closure, for `traverse_with` and `leaves_where`.
    pub fn predicate(self) -> impl FnMut(&NodeView) -> bool {
        move |node: &NodeView| self.admits(node)
    }
}

/// Admits nodes whose cell intersects a circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleOverlap {
    pub circle: Circle,
}

impl CircleOverlap {
    pub fn new(x: f32, z: f32, radius: f32) -> Self {
        Self {
            circle: Circle::new(x, z, radius),
        }
    }

    #[inline]
    pub fn admits(&self, node: &NodeView) -> bool {
        node.bounds().intersects_circle(&self.circle)
    }

    pub fn predicate(self) -> impl FnMut(&NodeView) -> bool {
        move |node: &NodeView| self.admits(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(center_x: f32, center_z: f32, size: f32) -> NodeView {
        NodeView {
            center_x,
            center_z,
            width: size,
            height: size,
            level: 3,
        }
    }

    #[test]
    fn view_distance_admits_cell_holding_the_viewpoint() {
        let view = ViewDistance::new(5.0, 5.0, 0.0);
        assert!(view.admits(&cell(4.0, 4.0, 4.0)));
        assert!(!view.admits(&cell(10.0, 4.0, 4.0)));
    }

    #[test]
    fn view_distance_measures_to_cell_boundary() {
        // Cell spans [8, 12] on x; viewpoint is 3 units left of it.
        let view = ViewDistance::new(5.0, 10.0, 3.0);
        assert!(view.admits(&cell(10.0, 10.0, 4.0)));
        let view = ViewDistance::new(5.0, 10.0, 2.9);
        assert!(!view.admits(&cell(10.0, 10.0, 4.0)));
    }

    #[test]
    fn circle_overlap_rejects_diagonal_near_miss() {
        let overlap = CircleOverlap::new(0.0, 0.0, 1.0);
        // Corner at (1, 1) is sqrt(2) away.
        assert!(!overlap.admits(&cell(2.0, 2.0, 2.0)));
        assert!(overlap.admits(&cell(1.5, 0.0, 2.0)));
    }
}
