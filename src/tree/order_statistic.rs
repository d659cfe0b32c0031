//! Rank and select over the cached subtree sizes.

use core::ops::Index;

use super::RbTree;
use crate::Rank;
use crate::Side;
use crate::raw::NodeId;

impl<P> RbTree<P> {
    /// Returns the node at zero-based in-order position `index`, or `None` if
    /// `index >= self.len()`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn select(&self, index: usize) -> Option<NodeId> {
        let mut current = self.root?;
        let mut index = index;

        loop {
            let down_rank = self.down_rank(current);
            match index.cmp(&down_rank) {
                core::cmp::Ordering::Equal => return Some(current),
                core::cmp::Ordering::Less => current = self.child(current, Side::Left)?,
                core::cmp::Ordering::Greater => {
                    index -= down_rank + 1;
                    current = self.child(current, Side::Right)?;
                }
            }
        }
    }

    /// Returns the zero-based in-order position of `node`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Panics
    ///
    /// Panics if `node` was removed.
    #[must_use]
    pub fn rank(&self, node: NodeId) -> usize {
        self.down_rank(node) + self.up_rank(node)
    }

    /// Returns the payload at zero-based in-order position `rank`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_tree::{Location, RbTree};
    ///
    /// let mut tree = RbTree::new();
    /// tree.insert_all(Location::Root, ["a", "b", "c"]).unwrap();
    /// assert_eq!(tree.get_by_rank(1), Some(&"b"));
    /// assert_eq!(tree.get_by_rank(3), None);
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<&P> {
        self.select(rank).and_then(|node| self.payload(node))
    }

    /// Number of nodes preceding `node` within its own subtree.
    fn down_rank(&self, node: NodeId) -> usize {
        self.child(node, Side::Left).map_or(0, |left| self.subtree_size(left))
    }

    /// Number of nodes preceding the subtree of `node` in the rest of the tree.
    fn up_rank(&self, node: NodeId) -> usize {
        let mut rank = 0;
        let mut current = node;

        while let Some((parent, side)) = self.locate_relatively(current) {
            if side == Side::Right {
                rank += self.down_rank(parent) + 1;
            }
            current = parent;
        }
        rank
    }
}

impl<P> Index<Rank> for RbTree<P> {
    type Output = P;

    /// Returns the payload at the given rank.
    ///
    /// # Panics
    ///
    /// Panics if the rank is out of bounds.
    fn index(&self, rank: Rank) -> &P {
        self.get_by_rank(rank.0).expect("`RbTree::index()` - rank out of bounds!")
    }
}
