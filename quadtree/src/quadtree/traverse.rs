use super::types::{Frame, NodeStack};
use super::*;

/// Callbacks for `PseudoQuadTree::walk`.
pub trait Visitor<T> {
    /// Called once for every node reached, and once more for an occupied cell
    /// right before its leaf is visited. Returning `false` prunes the node
    /// together with its whole subtree.
    fn enter(&mut self, _node: &NodeView) -> bool {
        true
    }

    fn visit(&mut self, leaf: &Leaf<T>);
}

/// Depth-first walk over a tree, driven one leaf at a time.
///
/// The cursor only holds the pending nodes; the predicate is supplied on each
/// call to `advance`, so different callers can decide pruning however they
/// like. Children are visited in quadrant order 00, 01, 10, 11.
pub struct TraversalCursor<'a, T> {
    tree: &'a PseudoQuadTree<T>,
    stack: NodeStack,
}

impl<'a, T> TraversalCursor<'a, T> {
    pub fn new(tree: &'a PseudoQuadTree<T>) -> Self {
        let mut stack = NodeStack::new();
        stack.push(Frame {
            index: 0,
            width: tree.area.width,
            height: tree.area.height,
            level: 0,
        });
        Self { tree, stack }
    }

    /// Runs until the next leaf admitted by `predicate`, or `None` once the
    /// walk is complete.
    pub fn advance<P>(&mut self, predicate: &mut P) -> Option<&'a Leaf<T>>
    where
        P: FnMut(&NodeView) -> bool + ?Sized,
    {
        let tree = self.tree;
        while let Some(frame) = self.stack.pop() {
            let node = &tree.nodes[frame.index as usize];
            let view = frame.view(node);
            if !predicate(&view) {
                continue;
            }

            if frame.level == tree.leaf_level {
                if let Some(leaf) = node.leaf_index() {
                    if predicate(&view) {
                        return Some(&tree.leaves[leaf as usize]);
                    }
                }
                continue;
            }

            let base = node.link();
            let width = frame.width / 2.0;
            let height = frame.height / 2.0;
            let level = frame.level + 1;
            // Reverse push so quadrant 00 is popped first.
            for quadrant in (0..4).rev() {
                if node.has_child(quadrant) {
                    self.stack.push(Frame {
                        index: base + quadrant as u32,
                        width,
                        height,
                        level,
                    });
                }
            }
        }
        None
    }

    pub fn is_finished(&self) -> bool {
        self.stack.is_empty()
    }
}

/// Lazy sequence of the leaves a predicate admits.
pub struct Leaves<'a, T, P> {
    cursor: TraversalCursor<'a, T>,
    predicate: P,
}

impl<'a, T, P> Iterator for Leaves<'a, T, P>
where
    P: FnMut(&NodeView) -> bool,
{
    type Item = &'a Leaf<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.advance(&mut self.predicate)
    }
}

fn admit_all(_: &NodeView) -> bool {
    true
}

impl<T> PseudoQuadTree<T> {
    pub fn cursor(&self) -> TraversalCursor<'_, T> {
        TraversalCursor::new(self)
    }

    /// Every leaf, depth-first.
    pub fn iter(&self) -> Leaves<'_, T, fn(&NodeView) -> bool> {
        self.leaves_where(admit_all as fn(&NodeView) -> bool)
    }

    /// Leaves whose every enclosing node satisfies `predicate`, depth-first.
    pub fn leaves_where<P>(&self, predicate: P) -> Leaves<'_, T, P>
    where
        P: FnMut(&NodeView) -> bool,
    {
        Leaves {
            cursor: self.cursor(),
            predicate,
        }
    }

    /// Calls `visitor` on every leaf.
    pub fn traverse<F>(&self, mut visitor: F)
    where
        F: FnMut(&Leaf<T>),
    {
        for leaf in self.iter() {
            visitor(leaf);
        }
    }

    /// Calls `visitor` on every leaf `predicate` admits, skipping each
    /// subtree whose root it rejects.
    pub fn traverse_with<P, F>(&self, predicate: P, mut visitor: F)
    where
        P: FnMut(&NodeView) -> bool,
        F: FnMut(&Leaf<T>),
    {
        for leaf in self.leaves_where(predicate) {
            visitor(leaf);
        }
    }

    /// `traverse` when `predicate` is `None`, `traverse_with` otherwise.
    pub fn traverse_filtered<P, F>(&self, predicate: Option<P>, visitor: F)
    where
        P: FnMut(&NodeView) -> bool,
        F: FnMut(&Leaf<T>),
    {
        match predicate {
            Some(predicate) => self.traverse_with(predicate, visitor),
            None => self.traverse(visitor),
        }
    }

    pub fn walk<V>(&self, visitor: &mut V)
    where
        V: Visitor<T> + ?Sized,
    {
        let mut cursor = self.cursor();
        loop {
            let next = {
                let mut enter = |node: &NodeView| visitor.enter(node);
                cursor.advance(&mut enter)
            };
            match next {
                Some(leaf) => visitor.visit(leaf),
                None => break,
            }
        }
    }
}

impl<'a, T> IntoIterator for &'a PseudoQuadTree<T> {
    type Item = &'a Leaf<T>;
    type IntoIter = Leaves<'a, T, fn(&NodeView) -> bool>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
