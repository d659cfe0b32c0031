//! Invariant-preserving low-level mutations. They keep threads, parent links
//! and subtree sizes consistent but know nothing about colors beyond moving
//! them around.

use super::{Location, RbTree};
use crate::raw::{Color, DownLink, Node, NodeId, Size};
use crate::{RotationDirection, Side, StructureError};

impl<P> RbTree<P> {
    /// Attaches a new leaf with `payload` and `color` at the free `location`.
    ///
    /// The new leaf takes over the parent's thread on `side` and threads back
    /// to the parent on the opposite side. This does not rebalance; see
    /// [`insert`](RbTree::insert) for that.
    ///
    /// # Errors
    ///
    /// - [`StructureError::LocationOccupied`] if the slot already holds a node.
    /// - [`StructureError::InvalidatedNode`] if the location's parent was removed.
    ///
    /// # Complexity
    ///
    /// O(log n) for the subtree size updates.
    pub fn attach(&mut self, location: Location, payload: P, color: Color) -> Result<NodeId, StructureError> {
        match location {
            Location::Root => {
                if self.root.is_some() {
                    return Err(StructureError::LocationOccupied);
                }

                let root = self.nodes.alloc(Node::new(None, color, payload));
                self.root = Some(root);
                Ok(root)
            }
            Location::Relative { parent, side } => {
                let parent_node = self.nodes.get(parent).ok_or(StructureError::InvalidatedNode(parent))?;
                let DownLink::Neighbour(far_neighbour) = parent_node.link(side) else {
                    return Err(StructureError::LocationOccupied);
                };

                let leaf = self.nodes.alloc(Node::new(Some(parent), color, payload));
                self.link_down_child(parent, side, leaf);
                self.link_down_neighbour(leaf, side.opposite(), Some(parent));
                self.link_down_neighbour(leaf, side, far_neighbour);
                self.update_sizes_upwards(Some(parent), 1);
                Ok(leaf)
            }
        }
    }

    /// Removes `leaf` from the tree, bridging the vacated slot with the leaf's
    /// own thread. Returns the location the leaf occupied and its payload.
    ///
    /// # Errors
    ///
    /// - [`StructureError::NotALeaf`] if `leaf` has a child.
    /// - [`StructureError::InvalidatedNode`] if `leaf` was removed.
    pub fn cut_off_leaf(&mut self, leaf: NodeId) -> Result<(Location, P), StructureError> {
        let leaf_node = self.nodes.get(leaf).ok_or(StructureError::InvalidatedNode(leaf))?;
        if !leaf_node.link(Side::Left).is_thread() || !leaf_node.link(Side::Right).is_thread() {
            return Err(StructureError::NotALeaf);
        }

        let location = self.locate(leaf);
        match location {
            Location::Root => {
                assert!(
                    leaf_node.link(Side::Left) == DownLink::NIL && leaf_node.link(Side::Right) == DownLink::NIL,
                    "`RbTree::cut_off_leaf()` - lonely root has a neighbour thread!"
                );
                self.root = None;
            }
            Location::Relative { parent, side } => {
                let far_link = leaf_node.link(side);
                assert!(
                    leaf_node.link(side.opposite()) == DownLink::Neighbour(Some(parent)),
                    "`RbTree::cut_off_leaf()` - leaf does not thread back to its parent!"
                );
                self.node_mut(parent).set_link(side, far_link);
                self.update_sizes_upwards(Some(parent), -1);
            }
        }

        Ok((location, self.release(leaf)))
    }

    /// Removes `top`, which must have its only child on `side`, by splicing
    /// that child into `top`'s position.
    ///
    /// Returns the in-order neighbour of `top` on `side` (the descendant whose
    /// thread was re-pointed over `top`) and `top`'s payload.
    ///
    /// # Errors
    ///
    /// - [`StructureError::WrongChildConfiguration`] unless `top` has a child
    ///   on `side` and none on the opposite side.
    /// - [`StructureError::InvalidatedNode`] if `top` was removed.
    pub fn collapse(&mut self, top: NodeId, side: Side) -> Result<(NodeId, P), StructureError> {
        let top_node = self.nodes.get(top).ok_or(StructureError::InvalidatedNode(top))?;
        let opposite_link = top_node.link(side.opposite());
        let (DownLink::Child(single_child), true) = (top_node.link(side), opposite_link.is_thread()) else {
            return Err(StructureError::WrongChildConfiguration);
        };

        let location = self.locate(top);
        let neighbour = self.side_most_descendant_or_self(single_child, side.opposite());
        assert!(
            self.node(neighbour).link(side.opposite()) == DownLink::Neighbour(Some(top)),
            "`RbTree::collapse()` - inconsistent loop link!"
        );

        self.link_up(location, single_child);
        self.node_mut(neighbour).set_link(side.opposite(), opposite_link);
        self.update_sizes_upwards(location.parent(), -1);

        Ok((neighbour, self.release(top)))
    }

    /// Swaps `source` with its in-order neighbour on `side`, which must be a
    /// descendant of `source`.
    ///
    /// The two nodes are relinked, not their payloads exchanged: afterwards
    /// both identifiers still resolve to their original payloads, while colors
    /// and subtree sizes stay with the positions. Returns the neighbour.
    ///
    /// # Errors
    ///
    /// - [`StructureError::NoNeighbourOnSide`] if `source` has no child on `side`.
    /// - [`StructureError::InvalidatedNode`] if `source` was removed.
    pub fn swap(&mut self, source: NodeId, side: Side) -> Result<NodeId, StructureError> {
        let source_node = self.nodes.get(source).ok_or(StructureError::InvalidatedNode(source))?;
        let source_color = source_node.color();
        let source_size = source_node.size();
        let source_opposite_link = source_node.link(side.opposite());
        let source_side_child = source_node.child(side).ok_or(StructureError::NoNeighbourOnSide(side))?;
        let source_location = self.locate(source);

        let target = self.side_most_descendant_or_self(source_side_child, side.opposite());
        let target_node = self.node(target);
        let target_color = target_node.color();
        let target_size = target_node.size();
        let target_parent = target_node.parent().expect("`RbTree::swap()` - target has no parent!");
        let target_side_link = target_node.link(side);
        assert!(
            target_node.link(side.opposite()) == DownLink::Neighbour(Some(source)),
            "`RbTree::swap()` - inconsistent loop link!"
        );

        self.link_up(source_location, target);
        let target_node = self.node_mut(target);
        target_node.set_color(source_color);
        target_node.set_size(source_size);
        self.link_down_transplanting(target, side.opposite(), source_opposite_link);

        if source_side_child == target {
            // Adjacent nodes: the parent/child link between them is reversed.
            self.link_down_child(target, side, source);
        } else {
            self.link_down_child(target, side, source_side_child);
            self.link_down_child(target_parent, side.opposite(), source);
        }

        let source_node = self.node_mut(source);
        source_node.set_color(target_color);
        source_node.set_size(target_size);
        self.link_down_neighbour(source, side.opposite(), Some(target));
        self.link_down_transplanting(source, side, target_side_link);

        Ok(target)
    }

    /// Rotates the subtree at `pivot`, promoting its child on
    /// `direction.start_side()`. Returns the promoted node.
    ///
    /// # Errors
    ///
    /// - [`StructureError::NoChildOnStartSide`] if there is nothing to promote.
    /// - [`StructureError::InvalidatedNode`] if `pivot` was removed.
    pub fn rotate(&mut self, pivot: NodeId, direction: RotationDirection) -> Result<NodeId, StructureError> {
        let start_side = direction.start_side();
        let end_side = direction.end_side();

        let pivot_node = self.nodes.get(pivot).ok_or(StructureError::InvalidatedNode(pivot))?;
        let pivot_size = pivot_node.size();
        let ascending = pivot_node.child(start_side).ok_or(StructureError::NoChildOnStartSide(start_side))?;
        let pivot_location = self.locate(pivot);

        let (distant_grandchild, close_grandchild) = self.children(ascending, start_side);

        match close_grandchild {
            // The ascending node threaded back to the pivot; the pivot now threads to it.
            None => self.link_down_neighbour(pivot, start_side, Some(ascending)),
            Some(close) => self.link_down_child(pivot, start_side, close),
        }
        self.link_down_child(ascending, end_side, pivot);
        self.link_up(pivot_location, ascending);

        let distant_size = distant_grandchild.map_or(0, |distant| self.subtree_size(distant));
        self.node_mut(ascending).set_size(pivot_size);
        // The pivot lost the ascending node and its distant subtree.
        self.node_mut(pivot)
            .set_size(Size::from_usize(pivot_size.to_usize() - distant_size - 1));

        Ok(ascending)
    }

    /// Frees `node` and hands back its payload.
    fn release(&mut self, node: NodeId) -> P {
        self.nodes
            .take(node)
            .expect("`RbTree::release()` - `NodeId` is stale!")
            .into_payload()
    }

    fn link_down_child(&mut self, parent: NodeId, side: Side, child: NodeId) {
        self.node_mut(parent).set_link(side, DownLink::Child(child));
        self.node_mut(child).set_parent(Some(parent));
    }

    fn link_down_neighbour(&mut self, node: NodeId, side: Side, neighbour: Option<NodeId>) {
        self.node_mut(node).set_link(side, DownLink::Neighbour(neighbour));
    }

    /// Gives `upper` the `link` on `side`. A transplanted child gets `upper`
    /// as its parent, and the child's subtree re-threads to `upper`.
    fn link_down_transplanting(&mut self, upper: NodeId, side: Side, link: DownLink) {
        self.node_mut(upper).set_link(side, link);

        if let DownLink::Child(child) = link {
            self.node_mut(child).set_parent(Some(upper));
            let neighbour = self.side_most_descendant_or_self(child, side.opposite());
            self.link_down_neighbour(neighbour, side.opposite(), Some(upper));
        }
    }

    /// Puts `node` into `location`, which may be the root slot.
    fn link_up(&mut self, location: Location, node: NodeId) {
        match location {
            Location::Root => {
                self.root = Some(node);
                self.node_mut(node).set_parent(None);
            }
            Location::Relative { parent, side } => self.link_down_child(parent, side, node),
        }
    }

    fn update_sizes_upwards(&mut self, from: Option<NodeId>, delta: isize) {
        let mut current = from;
        while let Some(id) = current {
            let node = self.node_mut(id);
            node.set_size(node.size().offset(delta));
            current = node.parent();
        }
    }
}
