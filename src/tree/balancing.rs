//! Red-black fixups run after a leaf is attached, cut off or collapsed away.
//!
//! Both fixups are written once against a generic `side`; the mirrored cases
//! fall out of `Side::opposite` and the rotation directions.

use super::RbTree;
use crate::raw::{Color, NodeId};
use crate::{RotationDirection, Side, StructureError};

impl<P> RbTree<P> {
    /// Restores the red-black properties after `node` was attached red.
    pub(crate) fn rebalance_after_attach(&mut self, node: NodeId) {
        let mut node = node;

        loop {
            assert!(
                self.color(node) == Color::Red,
                "`RbTree::rebalance_after_attach()` - fixup must start at a red node!"
            );

            let Some((parent, side)) = self.locate_relatively(node) else {
                log::trace!("insert fixup: {node:?} is the root");
                self.paint(node, Color::Black);
                return;
            };

            if self.color(parent) == Color::Black {
                return;
            }

            let Some((grandparent, parent_side)) = self.locate_relatively(parent) else {
                log::trace!("insert fixup: red parent {parent:?} is the root");
                self.paint(parent, Color::Black);
                return;
            };

            assert!(
                self.color(grandparent) == Color::Black,
                "`RbTree::rebalance_after_attach()` - red parent under a red grandparent!"
            );

            let uncle_side = parent_side.opposite();
            let uncle = self.child(grandparent, uncle_side);

            if let Some(uncle) = uncle.filter(|&uncle| self.color(uncle) == Color::Red) {
                log::trace!("insert fixup: red uncle {uncle:?}, recoloring {grandparent:?}");
                self.paint(parent, Color::Black);
                self.paint(uncle, Color::Black);
                self.paint(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            if side == uncle_side {
                log::trace!("insert fixup: inner grandchild {node:?}, rotating at {parent:?}");
                self.rotate_internal(parent, uncle_side.direction_from());
            }

            log::trace!("insert fixup: outer grandchild, rotating at {grandparent:?}");
            let subtree_root = self.rotate_internal(grandparent, uncle_side.direction_to());
            assert!(
                subtree_root == node || subtree_root == parent,
                "`RbTree::rebalance_after_attach()` - unexpected subtree root after rotation!"
            );
            self.paint(subtree_root, Color::Black);
            self.paint(grandparent, Color::Red);
            return;
        }
    }

    /// Restores the red-black properties after a leaf of `color` was cut off
    /// from the `side` slot of `parent`.
    pub(crate) fn rebalance_after_cut_off(&mut self, parent: NodeId, side: Side, color: Color) {
        if color == Color::Black {
            self.fix_black_deficit(parent, side);
        }
    }

    /// Restores the red-black properties after a black node was collapsed and
    /// its single red child took its place.
    pub(crate) fn rebalance_after_collapse(&mut self, elevated: NodeId) {
        self.paint(elevated, Color::Black);
    }

    /// Fixes a deficit of one black node on every path through the `side`
    /// slot of `parent`. The slot may be empty on the first iteration.
    fn fix_black_deficit(&mut self, parent: NodeId, side: Side) {
        let (mut parent, mut side) = (parent, side);

        loop {
            assert!(
                !self.is_red(self.child(parent, side)),
                "`RbTree::fix_black_deficit()` - deficit slot holds a red node!"
            );

            // Red sibling: rotate it above the parent so the deficit gets a
            // black sibling (the former close nephew) under a red parent.
            let sibling = self.sibling_in_deficit(parent, side);
            let sibling_was_red = self.color(sibling) == Color::Red;
            if sibling_was_red {
                log::trace!("remove fixup: red sibling {sibling:?}, rotating at {parent:?}");
                self.rotate_internal(parent, side.direction_to());
                self.paint(parent, Color::Red);
                self.paint(sibling, Color::Black);
            }

            // Red parent, black nephews: swap the parent's and sibling's colors.
            let sibling = self.sibling_in_deficit(parent, side);
            let (close_nephew, distant_nephew) = self.children(sibling, side);
            if self.color(parent) == Color::Red && !self.is_red(close_nephew) && !self.is_red(distant_nephew) {
                assert!(
                    self.color(sibling) == Color::Black,
                    "`RbTree::fix_black_deficit()` - red sibling under a red parent!"
                );
                log::trace!("remove fixup: red parent {parent:?} with black nephews");
                self.paint(parent, Color::Black);
                self.paint(sibling, Color::Red);
                return;
            }

            // Red close nephew, black distant nephew: rotate it above the
            // sibling so the distant nephew becomes red.
            let close_nephew_was_red = self.is_red(close_nephew) && !self.is_red(distant_nephew);
            if let (true, Some(close_nephew)) = (close_nephew_was_red, close_nephew) {
                assert!(
                    self.color(sibling) == Color::Black,
                    "`RbTree::fix_black_deficit()` - red sibling with a red nephew!"
                );
                log::trace!("remove fixup: red close nephew {close_nephew:?}, rotating at {sibling:?}");
                self.rotate_internal(sibling, side.direction_from());
                self.paint(close_nephew, Color::Black);
                self.paint(sibling, Color::Red);
            }

            // Red distant nephew: rotate the sibling above the parent. Terminal.
            let sibling = self.sibling_in_deficit(parent, side);
            let (_, distant_nephew) = self.children(sibling, side);
            if let Some(distant_nephew) = distant_nephew.filter(|&nephew| self.color(nephew) == Color::Red) {
                assert!(
                    self.color(sibling) == Color::Black,
                    "`RbTree::fix_black_deficit()` - red sibling with a red nephew!"
                );
                log::trace!("remove fixup: red distant nephew {distant_nephew:?}, rotating at {parent:?}");
                let parent_color = self.color(parent);
                self.rotate_internal(parent, side.direction_to());
                self.node_mut(parent).set_color(Color::Black);
                self.node_mut(sibling).set_color(parent_color);
                self.paint(distant_nephew, Color::Black);
                return;
            }

            assert!(!sibling_was_red, "`RbTree::fix_black_deficit()` - red sibling case did not terminate!");
            assert!(
                !close_nephew_was_red,
                "`RbTree::fix_black_deficit()` - red close nephew case did not terminate!"
            );
            assert!(
                self.color(parent) == Color::Black && self.color(sibling) == Color::Black,
                "`RbTree::fix_black_deficit()` - unhandled red parent or sibling!"
            );

            // Everything around is black: paint the sibling red, which moves
            // the deficit up to the parent's own slot.
            log::trace!("remove fixup: all black around {parent:?}, pushing deficit up");
            self.paint(sibling, Color::Red);

            match self.locate_relatively(parent) {
                // The root absorbs the deficit.
                None => return,
                Some((grandparent, parent_side)) => {
                    parent = grandparent;
                    side = parent_side;
                }
            }
        }
    }

    fn sibling_in_deficit(&self, parent: NodeId, side: Side) -> NodeId {
        self.child(parent, side.opposite())
            .expect("`RbTree::fix_black_deficit()` - black deficit without a sibling!")
    }

    /// Rotation whose preconditions are guaranteed by the red-black invariants.
    fn rotate_internal(&mut self, pivot: NodeId, direction: RotationDirection) -> NodeId {
        self.rotate(pivot, direction)
            .unwrap_or_else(|error: StructureError| panic!("`RbTree::rotate()` - inconsistent structure: {error}"))
    }

    /// Recolors `node`, which must not already have `color`.
    fn paint(&mut self, node: NodeId, color: Color) {
        let node = self.node_mut(node);
        assert!(node.color() != color, "`RbTree::paint()` - node is already {color:?}!");
        node.set_color(color);
    }
}
