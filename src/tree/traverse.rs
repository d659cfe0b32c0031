use core::fmt;
use core::iter::FusedIterator;

use super::RbTree;
use crate::Side;
use crate::raw::NodeId;

/// An iterator over the nodes of an [`RbTree`] in order.
///
/// This `struct` is created by [`RbTree::traverse`]. Each step follows a
/// thread or descends a child subtree, so a full traversal is O(n).
///
/// # Examples
///
/// ```
/// use stable_tree::{Location, RbTree};
///
/// let mut tree = RbTree::new();
/// tree.insert_all(Location::Root, [1, 2, 3]).unwrap();
///
/// let mut nodes = tree.traverse();
/// assert_eq!(nodes.len(), 3);
/// let last = nodes.next_back().unwrap();
/// assert_eq!(tree.payload(last), Some(&3));
/// ```
pub struct Traverse<'a, P> {
    tree: &'a RbTree<P>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

/// An iterator over the payloads of an [`RbTree`] in order.
///
/// This `struct` is created by [`RbTree::iter`].
pub struct Iter<'a, P> {
    inner: Traverse<'a, P>,
}

impl<P> RbTree<P> {
    /// Returns the nodes in order. Restart by calling again.
    #[must_use]
    pub fn traverse(&self) -> Traverse<'_, P> {
        Traverse {
            tree: self,
            front: self.first(),
            back: self.last(),
            remaining: self.len(),
        }
    }

    /// Returns the payloads in order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, P> {
        Iter { inner: self.traverse() }
    }
}

impl<'a, P> IntoIterator for &'a RbTree<P> {
    type Item = &'a P;
    type IntoIter = Iter<'a, P>;

    fn into_iter(self) -> Iter<'a, P> {
        self.iter()
    }
}

impl<P> Iterator for Traverse<'_, P> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.front?;
        self.remaining -= 1;
        self.front = self.tree.in_order_neighbour(node, Side::Right);
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<P> DoubleEndedIterator for Traverse<'_, P> {
    fn next_back(&mut self) -> Option<NodeId> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.back?;
        self.remaining -= 1;
        self.back = self.tree.in_order_neighbour(node, Side::Left);
        Some(node)
    }
}

impl<P> ExactSizeIterator for Traverse<'_, P> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<P> FusedIterator for Traverse<'_, P> {}

impl<P> Clone for Traverse<'_, P> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<P> fmt::Debug for Traverse<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Traverse").field("remaining", &self.remaining).finish()
    }
}

impl<'a, P> Iterator for Iter<'a, P> {
    type Item = &'a P;

    fn next(&mut self) -> Option<&'a P> {
        let tree = self.inner.tree;
        self.inner.next().map(|node| tree.node(node).payload())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, P> DoubleEndedIterator for Iter<'a, P> {
    fn next_back(&mut self) -> Option<&'a P> {
        let tree = self.inner.tree;
        self.inner.next_back().map(|node| tree.node(node).payload())
    }
}

impl<P> ExactSizeIterator for Iter<'_, P> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<P> FusedIterator for Iter<'_, P> {}

impl<P> Clone for Iter<'_, P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<P: fmt::Debug> fmt::Debug for Iter<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
