use alloc::string::String;
use alloc::vec::Vec;

use super::RbTree;
use crate::raw::{Color, DownLink, NodeId};
use crate::Side;

impl<P> RbTree<P> {
    /// Validates parent links, subtree sizes and threads against a naive
    /// recursive in-order walk. Panics with every violation found.
    pub(crate) fn validate_structure(&self) {
        let mut errors: Vec<String> = Vec::new();
        let mut order: Vec<NodeId> = Vec::new();

        if let Some(root) = self.root {
            if self.node(root).parent().is_some() {
                errors.push(alloc::format!("root {root:?} has a parent"));
            }
            self.collect_in_order(root, &mut order, &mut errors);
            let root_size = self.subtree_size(root);
            if root_size != order.len() {
                errors.push(alloc::format!("root size {root_size} != node count {}", order.len()));
            }
        }

        if order.len() != self.nodes.len() {
            errors.push(alloc::format!("{} reachable nodes, {} allocated", order.len(), self.nodes.len()));
        }

        for (position, &id) in order.iter().enumerate() {
            let node = self.node(id);
            for side in Side::BOTH {
                let expected = match side {
                    Side::Left => position.checked_sub(1).map(|p| order[p]),
                    Side::Right => order.get(position + 1).copied(),
                };
                if let DownLink::Neighbour(neighbour) = node.link(side)
                    && neighbour != expected
                {
                    errors.push(alloc::format!("{id:?} threads {side:?} to {neighbour:?}, expected {expected:?}"));
                }
                if self.in_order_neighbour(id, side) != expected {
                    errors.push(alloc::format!("{id:?} has the wrong in-order neighbour on {side:?}"));
                }
            }
        }

        let traversed: Vec<NodeId> = self.traverse().collect();
        if traversed != order {
            errors.push(String::from("traverse() disagrees with a recursive in-order walk"));
        }

        assert!(errors.is_empty(), "Tree structure violations:\n{}", errors.join("\n"));
    }

    fn collect_in_order(&self, id: NodeId, order: &mut Vec<NodeId>, errors: &mut Vec<String>) -> usize {
        let node = self.node(id);
        let mut size = 1;

        for side in Side::BOTH {
            if let Some(child) = node.child(side) {
                if self.node(child).parent() != Some(id) {
                    errors.push(alloc::format!("{child:?} does not point back to parent {id:?}"));
                }
            }
        }

        if let Some(left) = node.child(Side::Left) {
            size += self.collect_in_order(left, order, errors);
        }
        order.push(id);
        if let Some(right) = node.child(Side::Right) {
            size += self.collect_in_order(right, order, errors);
        }

        if node.size().to_usize() != size {
            errors.push(alloc::format!("{id:?} caches size {}, actual {size}", node.size().to_usize()));
        }
        size
    }

    /// Returns the number of black nodes on the paths down from `id`, recording
    /// red-red pairs and paths that disagree.
    fn black_height(&self, id: Option<NodeId>, errors: &mut Vec<String>) -> usize {
        let Some(id) = id else {
            return 0;
        };
        let node = self.node(id);

        if node.color() == Color::Red {
            for side in Side::BOTH {
                if self.is_red(node.child(side)) {
                    errors.push(alloc::format!("red {id:?} has a red child on {side:?}"));
                }
            }
        }

        let left = self.black_height(node.child(Side::Left), errors);
        let right = self.black_height(node.child(Side::Right), errors);
        if left != right {
            errors.push(alloc::format!("{id:?} has black heights {left} (left) and {right} (right)"));
        }

        left.max(right) + usize::from(node.color() == Color::Black)
    }
}

impl<P: Ord> RbTree<P> {
    /// Validates every structural invariant plus the red-black properties and
    /// the payload order. Intended for tests that only use balanced insertion
    /// and removal at search positions.
    pub(crate) fn validate_invariants(&self) {
        self.validate_structure();

        let mut errors: Vec<String> = Vec::new();
        if let Some(root) = self.root {
            if self.color(root) != Color::Black {
                errors.push(alloc::format!("root {root:?} is red"));
            }
        }
        self.black_height(self.root, &mut errors);

        let payloads: Vec<&P> = self.iter().collect();
        if payloads.windows(2).any(|pair| pair[0] > pair[1]) {
            errors.push(String::from("payloads are out of order"));
        }

        assert!(errors.is_empty(), "Red-black violations:\n{}", errors.join("\n"));
    }
}
