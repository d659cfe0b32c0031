/// A zero-based position in the in-order sequence of an [`RbTree`](crate::RbTree).
///
/// # Examples
///
/// ```
/// use stable_tree::{Location, RbTree, Rank};
///
/// let mut tree = RbTree::new();
/// tree.insert_all(Location::Root, [10, 20]).unwrap();
///
/// assert_eq!(tree[Rank(1)], 20);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
