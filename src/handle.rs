use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

use crate::{NodeId, RbTree};

/// A typed capability for one payload stored in an [`RbTree`].
///
/// A handle keeps resolving to its payload while other payloads are inserted
/// and removed, and reports "removed" forever once its own payload is gone.
/// Handles are `Copy` and do not borrow the tree.
///
/// A handle must only be used with the tree that created it. Using it with
/// another tree is a logic error: it may resolve to an unrelated payload or to
/// nothing, but it never causes undefined behavior.
///
/// # Examples
///
/// ```
/// use stable_tree::RbTree;
///
/// let mut tree = RbTree::new();
/// let a = tree.insert(tree.find(&"a"), "a").unwrap();
/// let b = tree.insert(tree.find(&"b"), "b").unwrap();
/// let (a, b) = (tree.handle(a).unwrap(), tree.handle(b).unwrap());
///
/// assert_eq!(tree.remove_via(b), Some("b"));
/// assert_eq!(tree.get_via(a), Some(&"a"));
/// assert_eq!(tree.get_via(b), None);
/// assert_eq!(tree.remove_via(b), None);
/// ```
pub struct Handle<P> {
    node: NodeId,
    _marker: PhantomData<fn() -> P>,
}

impl<P> Handle<P> {
    /// The node this handle refers to. It may no longer be part of the tree.
    #[must_use]
    pub const fn node(self) -> NodeId {
        self.node
    }
}

impl<P> Clone for Handle<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for Handle<P> {}

impl<P> PartialEq for Handle<P> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<P> Eq for Handle<P> {}

impl<P> Hash for Handle<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.hash(state);
    }
}

impl<P> fmt::Debug for Handle<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&self.node).finish()
    }
}

impl<P> RbTree<P> {
    /// Wraps `node` into a handle, or returns `None` if it was removed.
    #[must_use]
    pub fn handle(&self, node: NodeId) -> Option<Handle<P>> {
        self.is_valid(node).then_some(Handle {
            node,
            _marker: PhantomData,
        })
    }

    /// Returns the payload behind `handle`, or `None` once it was removed.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn get_via(&self, handle: Handle<P>) -> Option<&P> {
        self.payload(handle.node)
    }

    #[must_use]
    pub fn get_via_mut(&mut self, handle: Handle<P>) -> Option<&mut P> {
        self.payload_mut(handle.node)
    }

    /// Removes the payload behind `handle`. Returns `None` if it was already
    /// removed, through this handle or any other way.
    pub fn remove_via(&mut self, handle: Handle<P>) -> Option<P> {
        self.take_out(handle.node).ok()
    }

    /// Returns whether the payload behind `handle` is still in the tree.
    #[must_use]
    pub fn is_live(&self, handle: Handle<P>) -> bool {
        self.is_valid(handle.node)
    }
}
