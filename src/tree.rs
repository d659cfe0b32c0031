use core::fmt;

use crate::Side;
use crate::raw::{Arena, Color, DownLink, Node, NodeId};

mod balancing;
mod lookup;
mod mutation;
mod order_statistic;
mod structure;
mod traverse;
#[cfg(test)]
mod validate;

pub use lookup::Command;
pub use mutation::Removed;
pub use traverse::{Iter, Traverse};

/// An addressable slot of the tree: either the root slot, or the child slot
/// on one side of a specific parent.
///
/// A location may be occupied (a node sits there) or free (the slot is a
/// thread). [`RbTree::resolve`] tells the two apart.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Location {
    Root,
    Relative { parent: NodeId, side: Side },
}

impl Location {
    /// The parent owning this slot, `None` for the root slot.
    #[must_use]
    pub const fn parent(self) -> Option<NodeId> {
        match self {
            Location::Root => None,
            Location::Relative { parent, .. } => Some(parent),
        }
    }
}

/// A threaded red-black order-statistic tree with stable node identities.
///
/// The tree does not order its payloads by itself. Callers choose where a
/// payload goes by picking a free [`Location`], usually through one of the
/// lookup operations ([`find`](RbTree::find), [`find_with`](RbTree::find_with),
/// [`find_by`](RbTree::find_by), [`random_free_location`](RbTree::random_free_location)),
/// and the in-order sequence of nodes is the tree's order.
///
/// Every node gets a [`NodeId`] when it is attached. The identifier keeps
/// resolving to the same payload while other nodes are inserted or removed,
/// and stops resolving once its own node is removed. Removing a node with two
/// children relinks it with its neighbour instead of moving payloads around,
/// so identities never migrate between payloads.
///
/// Each node also threads its empty sides to its in-order neighbours, which
/// makes stepping to the predecessor or successor of a leaf O(1), and caches
/// its subtree size for O(log n) [`select`](RbTree::select) and
/// [`rank`](RbTree::rank).
///
/// # Examples
///
/// ```
/// use stable_tree::RbTree;
///
/// let mut tree = RbTree::new();
/// for value in [30, 10, 20] {
///     let location = tree.find(&value);
///     tree.insert(location, value).unwrap();
/// }
///
/// let ten = tree.resolve(tree.find(&10)).unwrap();
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [10, 20, 30]);
/// assert_eq!(tree.rank(ten), 0);
///
/// let thirty = tree.resolve(tree.find(&30)).unwrap();
/// tree.remove(thirty).unwrap();
/// assert_eq!(tree.payload(ten), Some(&10));
/// assert_eq!(tree.payload(thirty), None);
/// ```
///
/// # Concurrency
///
/// The tree is a plain single-owner value. Mutation requires `&mut self`, so
/// concurrent use has to be serialized by the caller (for example with a
/// lock), exactly as for the standard collections.
pub struct RbTree<P> {
    nodes: Arena<Node<P>>,
    root: Option<NodeId>,
}

impl<P> RbTree<P> {
    /// Creates an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates an empty tree with room for at least `capacity` nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_tree::RbTree;
    ///
    /// let tree: RbTree<u8> = RbTree::with_capacity(16);
    /// assert!(tree.capacity() >= 16);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of node slots allocated so far.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns the number of nodes in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.root.map_or(0, |root| self.node(root).size().to_usize())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the root node, if any.
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Removes every node. All outstanding identifiers and handles stop
    /// resolving.
    pub fn clear(&mut self) {
        log::debug!("clearing tree of {} nodes", self.nodes.len());
        self.nodes.clear();
        self.root = None;
    }

    /// Returns whether `node` is still part of this tree.
    #[must_use]
    pub fn is_valid(&self, node: NodeId) -> bool {
        self.nodes.contains(node)
    }

    /// Returns the payload of `node`, or `None` if it was removed.
    #[must_use]
    pub fn payload(&self, node: NodeId) -> Option<&P> {
        self.nodes.get(node).map(Node::payload)
    }

    /// Returns the payload of `node` mutably, or `None` if it was removed.
    ///
    /// Changing a payload never restructures the tree. If the tree is kept
    /// sorted by payload, keeping that order is up to the caller.
    #[must_use]
    pub fn payload_mut(&mut self, node: NodeId) -> Option<&mut P> {
        self.nodes.get_mut(node).map(Node::payload_mut)
    }

    /// Replaces the payload of `node`, returning the previous one.
    ///
    /// # Errors
    ///
    /// [`StructureError::InvalidatedNode`](crate::StructureError::InvalidatedNode)
    /// if `node` was removed.
    pub fn set_payload(&mut self, node: NodeId, payload: P) -> Result<P, crate::StructureError> {
        let current = self
            .payload_mut(node)
            .ok_or(crate::StructureError::InvalidatedNode(node))?;
        Ok(core::mem::replace(current, payload))
    }

    /// Returns the color of `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` was removed.
    #[must_use]
    pub fn color(&self, node: NodeId) -> Color {
        self.node(node).color()
    }

    /// Returns the number of nodes in the subtree rooted at `node`, including
    /// `node` itself.
    ///
    /// # Panics
    ///
    /// Panics if `node` was removed.
    #[must_use]
    pub fn subtree_size(&self, node: NodeId) -> usize {
        self.node(node).size().to_usize()
    }

    /// # Panics
    ///
    /// Panics if `node` was removed.
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent()
    }

    /// Returns the child of `node` on `side`.
    ///
    /// # Panics
    ///
    /// Panics if `node` was removed.
    #[must_use]
    pub fn child(&self, node: NodeId, side: Side) -> Option<NodeId> {
        self.node(node).child(side)
    }

    /// # Panics
    ///
    /// Panics if `node` was removed.
    #[must_use]
    pub fn left_child(&self, node: NodeId) -> Option<NodeId> {
        self.child(node, Side::Left)
    }

    /// # Panics
    ///
    /// Panics if `node` was removed.
    #[must_use]
    pub fn right_child(&self, node: NodeId) -> Option<NodeId> {
        self.child(node, Side::Right)
    }

    /// Returns the node occupying `location`, or `None` if it is free.
    ///
    /// # Panics
    ///
    /// Panics if the parent of a relative location was removed.
    #[must_use]
    pub fn resolve(&self, location: Location) -> Option<NodeId> {
        match location {
            Location::Root => self.root,
            Location::Relative { parent, side } => self.child(parent, side),
        }
    }

    /// Returns where `node` currently sits.
    ///
    /// # Panics
    ///
    /// Panics if `node` was removed.
    #[must_use]
    pub fn locate(&self, node: NodeId) -> Location {
        match self.locate_relatively(node) {
            Some((parent, side)) => Location::Relative { parent, side },
            None => Location::Root,
        }
    }

    /// Returns the in-order neighbour of `node` on `side`.
    ///
    /// # Complexity
    ///
    /// O(1) when `node` has no child on `side` (the thread is followed),
    /// O(log n) otherwise.
    ///
    /// # Panics
    ///
    /// Panics if `node` was removed.
    #[must_use]
    pub fn in_order_neighbour(&self, node: NodeId, side: Side) -> Option<NodeId> {
        match self.node(node).link(side) {
            DownLink::Child(child) => Some(self.side_most_descendant_or_self(child, side.opposite())),
            DownLink::Neighbour(neighbour) => neighbour,
        }
    }

    /// Returns whether `node` has an in-order neighbour on `side`.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Panics
    ///
    /// Panics if `node` was removed.
    #[must_use]
    pub fn has_in_order_neighbour(&self, node: NodeId, side: Side) -> bool {
        self.node(node).link(side) != DownLink::NIL
    }

    /// # Panics
    ///
    /// Panics if `node` was removed.
    #[must_use]
    pub fn predecessor(&self, node: NodeId) -> Option<NodeId> {
        self.in_order_neighbour(node, Side::Left)
    }

    /// # Panics
    ///
    /// Panics if `node` was removed.
    #[must_use]
    pub fn successor(&self, node: NodeId) -> Option<NodeId> {
        self.in_order_neighbour(node, Side::Right)
    }

    /// Descends from `node` along `side` children as far as possible.
    ///
    /// # Panics
    ///
    /// Panics if `node` was removed.
    #[must_use]
    pub fn side_most_descendant_or_self(&self, node: NodeId, side: Side) -> NodeId {
        let mut current = node;
        while let Some(child) = self.child(current, side) {
            current = child;
        }
        current
    }

    /// Returns the first node in order.
    #[must_use]
    pub fn first(&self) -> Option<NodeId> {
        self.side_most_free_location(Side::Left).parent()
    }

    /// Returns the last node in order.
    #[must_use]
    pub fn last(&self) -> Option<NodeId> {
        self.side_most_free_location(Side::Right).parent()
    }

    /// Returns the free location before the first node (`Left`) or after the
    /// last node (`Right`); the root slot if the tree is empty.
    #[must_use]
    pub fn side_most_free_location(&self, side: Side) -> Location {
        match self.root {
            None => Location::Root,
            Some(root) => Location::Relative {
                parent: self.side_most_descendant_or_self(root, side),
                side,
            },
        }
    }

    /// Returns the free location immediately before (`Left`) or after
    /// (`Right`) `node` in order. Attaching there makes the new node the
    /// in-order neighbour of `node` on `side`.
    ///
    /// # Panics
    ///
    /// Panics if `node` was removed.
    #[must_use]
    pub fn next_in_order_free_location(&self, node: NodeId, side: Side) -> Location {
        match self.child(node, side) {
            None => Location::Relative { parent: node, side },
            Some(child) => Location::Relative {
                parent: self.side_most_descendant_or_self(child, side.opposite()),
                side: side.opposite(),
            },
        }
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node<P> {
        self.nodes.get(id).expect("`RbTree::node()` - `NodeId` is stale!")
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<P> {
        self.nodes.get_mut(id).expect("`RbTree::node_mut()` - `NodeId` is stale!")
    }

    /// Returns the parent of `node` and the side of the parent it hangs on.
    pub(crate) fn locate_relatively(&self, node: NodeId) -> Option<(NodeId, Side)> {
        let parent = self.node(node).parent()?;
        Some((parent, self.child_side(parent, node)))
    }

    fn child_side(&self, parent: NodeId, child: NodeId) -> Side {
        let parent_node = self.node(parent);
        if parent_node.child(Side::Left) == Some(child) {
            Side::Left
        } else {
            assert!(
                parent_node.child(Side::Right) == Some(child),
                "`RbTree::child_side()` - node is not a child of its parent!"
            );
            Side::Right
        }
    }

    /// Returns the children of `node` as (child on `side`, child opposite).
    pub(crate) fn children(&self, node: NodeId, side: Side) -> (Option<NodeId>, Option<NodeId>) {
        let node = self.node(node);
        (node.child(side), node.child(side.opposite()))
    }

    /// `None` counts as a black nil node.
    pub(crate) fn is_red(&self, node: Option<NodeId>) -> bool {
        node.is_some_and(|node| self.color(node) == Color::Red)
    }
}

impl<P> Default for RbTree<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Clones the tree structure. Node identifiers of `self` resolve to the
/// corresponding nodes of the clone.
impl<P: Clone> Clone for RbTree<P> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
        }
    }
}

impl<P: fmt::Debug> fmt::Debug for RbTree<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn sorted(values: &[i32]) -> (RbTree<i32>, Vec<NodeId>) {
        let mut tree = RbTree::new();
        let ids = values
            .iter()
            .map(|&value| tree.insert(tree.find(&value), value).unwrap())
            .collect();
        (tree, ids)
    }

    #[test]
    fn empty_tree() {
        let tree: RbTree<i32> = RbTree::default();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.root(), None);
        assert_eq!(tree.first(), None);
        assert_eq!(tree.last(), None);
        assert_eq!(tree.side_most_free_location(Side::Left), Location::Root);
        assert_eq!(tree.resolve(Location::Root), None);
    }

    #[test]
    fn neighbours_follow_order() {
        let (tree, ids) = sorted(&[50, 20, 80, 10, 30, 70, 90]);
        let first = tree.first().unwrap();
        let last = tree.last().unwrap();
        assert_eq!(tree.payload(first), Some(&10));
        assert_eq!(tree.payload(last), Some(&90));
        assert!(!tree.has_in_order_neighbour(first, Side::Left));
        assert!(!tree.has_in_order_neighbour(last, Side::Right));

        let thirty = ids[4];
        assert_eq!(tree.payload(tree.successor(thirty).unwrap()), Some(&50));
        assert_eq!(tree.payload(tree.predecessor(thirty).unwrap()), Some(&20));
        tree.validate_invariants();
    }

    #[test]
    fn locate_and_resolve_agree() {
        let (tree, ids) = sorted(&[4, 2, 6, 1, 3, 5, 7]);
        for id in ids {
            assert_eq!(tree.resolve(tree.locate(id)), Some(id));
        }
        assert_eq!(tree.locate(tree.root().unwrap()), Location::Root);
    }

    #[test]
    fn next_free_location_is_adjacent() {
        let (mut tree, ids) = sorted(&[10, 20, 30, 40, 50]);
        let thirty = ids[2];
        let location = tree.next_in_order_free_location(thirty, Side::Left);
        let inserted = tree.insert(location, 25).unwrap();
        assert_eq!(tree.predecessor(thirty), Some(inserted));

        let location = tree.next_in_order_free_location(thirty, Side::Right);
        let inserted = tree.insert(location, 35).unwrap();
        assert_eq!(tree.successor(thirty), Some(inserted));
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [10, 20, 25, 30, 35, 40, 50]);
        tree.validate_invariants();
    }

    #[test]
    fn payload_replacement_keeps_identity() {
        let (mut tree, ids) = sorted(&[1, 2, 3]);
        assert_eq!(tree.set_payload(ids[1], 20), Ok(2));
        *tree.payload_mut(ids[2]).unwrap() = 30;
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 20, 30]);
        assert_eq!(tree.rank(ids[1]), 1);
    }

    #[test]
    fn clear_invalidates_ids() {
        let (mut tree, ids) = sorted(&[1, 2, 3]);
        tree.clear();
        assert!(tree.is_empty());
        for id in ids {
            assert!(!tree.is_valid(id));
            assert_eq!(
                tree.set_payload(id, 0),
                Err(crate::StructureError::InvalidatedNode(id))
            );
        }
    }

    #[test]
    #[should_panic(expected = "`RbTree::node()` - `NodeId` is stale!")]
    fn navigating_from_a_removed_node_panics() {
        let (mut tree, ids) = sorted(&[1, 2, 3]);
        tree.remove(ids[0]).unwrap();
        let _ = tree.parent(ids[0]);
    }

    #[test]
    fn clone_preserves_ids() {
        let (tree, ids) = sorted(&[3, 1, 2]);
        let copy = tree.clone();
        for id in ids {
            assert_eq!(copy.payload(id), tree.payload(id));
        }
        assert_eq!(alloc::format!("{copy:?}"), "[1, 2, 3]");
    }
}
