use super::{Location, RbTree};
use crate::raw::{Color, NodeId};
use crate::{Side, StructureError};

/// The outcome of [`RbTree::remove`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Removed<P> {
    /// The payload the removed node held.
    pub payload: P,
    /// The node that preceded the removed one in order, if any.
    ///
    /// When the removed node had two children this is the node it was swapped
    /// with before being cut out, which now sits in the removed node's former
    /// position. A caller walking the tree in order can resume from here.
    pub predecessor: Option<NodeId>,
}

impl<P> RbTree<P> {
    /// Attaches `payload` at the free `location` and rebalances.
    ///
    /// # Errors
    ///
    /// Same as [`attach`](RbTree::attach).
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, location: Location, payload: P) -> Result<NodeId, StructureError> {
        let node = self.attach(location, payload, Color::Red)?;
        self.rebalance_after_attach(node);
        Ok(node)
    }

    /// Inserts `payload` immediately before (`Left`) or after (`Right`) `node`
    /// in order.
    ///
    /// # Errors
    ///
    /// [`StructureError::InvalidatedNode`] if `node` was removed.
    pub fn insert_relative(&mut self, node: NodeId, side: Side, payload: P) -> Result<NodeId, StructureError> {
        if !self.is_valid(node) {
            return Err(StructureError::InvalidatedNode(node));
        }
        self.insert(self.next_in_order_free_location(node, side), payload)
    }

    /// Inserts `payloads` so that they appear contiguously and in iteration
    /// order, the first one at `location`.
    ///
    /// # Errors
    ///
    /// Same as [`attach`](RbTree::attach), for the first payload. Nothing is
    /// inserted in that case.
    pub fn insert_all<I>(&mut self, location: Location, payloads: I) -> Result<(), StructureError>
    where
        I: IntoIterator<Item = P>,
    {
        let mut payloads = payloads.into_iter();
        let Some(first) = payloads.next() else {
            return Ok(());
        };

        let mut previous = self.insert(location, first)?;
        for payload in payloads {
            let location = self.next_in_order_free_location(previous, Side::Right);
            previous = self
                .insert(location, payload)
                .unwrap_or_else(|error| panic!("`RbTree::insert_all()` - inconsistent structure: {error}"));
        }
        Ok(())
    }

    /// Removes `node` and rebalances.
    ///
    /// A node with two children is first swapped with its in-order
    /// predecessor, so only the removed node's identity is invalidated and
    /// every other [`NodeId`] keeps resolving to the same payload.
    ///
    /// # Errors
    ///
    /// [`StructureError::InvalidatedNode`] if `node` was removed before.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove(&mut self, node: NodeId) -> Result<Removed<P>, StructureError> {
        if !self.is_valid(node) {
            return Err(StructureError::InvalidatedNode(node));
        }

        let predecessor = self.predecessor(node);

        if let (Some(_), Some(_)) = self.children(node, Side::Left) {
            let swapped = self
                .swap(node, Side::Left)
                .unwrap_or_else(|error| panic!("`RbTree::remove()` - inconsistent structure: {error}"));
            assert!(
                Some(swapped) == predecessor,
                "`RbTree::remove()` - swapped with a node other than the predecessor!"
            );
        }

        let color = self.color(node);
        let payload = match self.children(node, Side::Left) {
            (None, None) => {
                let (location, payload) = self
                    .cut_off_leaf(node)
                    .unwrap_or_else(|error| panic!("`RbTree::remove()` - inconsistent structure: {error}"));
                if let Location::Relative { parent, side } = location {
                    self.rebalance_after_cut_off(parent, side, color);
                }
                payload
            }
            (Some(child), None) => self.collapse_and_rebalance(node, Side::Left, child, color),
            (None, Some(child)) => self.collapse_and_rebalance(node, Side::Right, child, color),
            (Some(_), Some(_)) => panic!("`RbTree::remove()` - node still has two children after the swap!"),
        };

        Ok(Removed { payload, predecessor })
    }

    /// Removes `node` and returns its payload.
    ///
    /// # Errors
    ///
    /// [`StructureError::InvalidatedNode`] if `node` was removed before.
    pub fn take_out(&mut self, node: NodeId) -> Result<P, StructureError> {
        self.remove(node).map(|removed| removed.payload)
    }

    /// Keeps only the payloads for which `keep` returns `true`, visiting them
    /// in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_tree::{RbTree, Location};
    ///
    /// let mut tree = RbTree::new();
    /// tree.insert_all(Location::Root, 1..=6).unwrap();
    /// tree.retain(|value| *value % 2 == 0);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [2, 4, 6]);
    /// ```
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&mut P) -> bool,
    {
        let mut current = self.first();
        while let Some(node) = current {
            if keep(self.node_mut(node).payload_mut()) {
                current = self.successor(node);
            } else {
                let removed = self
                    .remove(node)
                    .unwrap_or_else(|error| panic!("`RbTree::retain()` - inconsistent structure: {error}"));
                current = match removed.predecessor {
                    Some(predecessor) => self.successor(predecessor),
                    None => self.first(),
                };
            }
        }
    }

    fn collapse_and_rebalance(&mut self, top: NodeId, side: Side, child: NodeId, color: Color) -> P {
        assert!(
            color == Color::Black,
            "`RbTree::remove()` - red node with a single child!"
        );
        let (_, payload) = self
            .collapse(top, side)
            .unwrap_or_else(|error| panic!("`RbTree::remove()` - inconsistent structure: {error}"));
        self.rebalance_after_collapse(child);
        payload
    }
}
