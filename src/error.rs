use thiserror::Error;

use crate::{NodeId, Side};

/// A violated precondition of one of the structural operations on
/// [`RbTree`](crate::RbTree).
///
/// Every operation returning this error checks its preconditions before it
/// touches the tree, so an `Err` leaves the structure unchanged.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum StructureError {
    /// Attaching into a slot that already holds a node.
    #[error("location is already occupied")]
    LocationOccupied,
    /// Cutting off a node that still has a child.
    #[error("node is not a leaf")]
    NotALeaf,
    /// Collapsing a node that does not have exactly one child on the given side.
    #[error("node does not have a single child on the collapsed side")]
    WrongChildConfiguration,
    /// Swapping a node that has no descendant neighbour on the given side.
    #[error("node has no in-order neighbour descendant on the {0:?} side")]
    NoNeighbourOnSide(Side),
    /// Rotating around a pivot without a child to promote.
    #[error("pivot has no child on the {0:?} side")]
    NoChildOnStartSide(Side),
    /// The node was removed from the tree earlier.
    #[error("{0:?} was already removed from the tree")]
    InvalidatedNode(NodeId),
}
