//! Guided descent from the root to a location.
//!
//! Every lookup is the same walk: resolve the current location, stop at a free
//! one, otherwise ask a navigator which way to go from the occupying payload.

use core::borrow::Borrow;
use core::cmp::Ordering;

use rand::Rng;

use super::{Location, RbTree};
use crate::Side;

/// A navigator's decision at an occupied location.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Command {
    /// Descend into the child slot on this side.
    Turn(Side),
    /// The current location is the answer.
    Stop,
}

impl Command {
    /// Maps the ordering of a sought value relative to the current payload to
    /// a step: smaller values lie to the left, greater values to the right.
    #[must_use]
    pub const fn comparing(ordering: Ordering) -> Command {
        match ordering {
            Ordering::Less => Command::Turn(Side::Left),
            Ordering::Greater => Command::Turn(Side::Right),
            Ordering::Equal => Command::Stop,
        }
    }
}

impl<P> RbTree<P> {
    /// Descends from the root as `navigate` commands, until it stops or a free
    /// location is reached.
    ///
    /// # Complexity
    ///
    /// O(log n) navigator calls.
    pub fn find_location_guided<F>(&self, mut navigate: F) -> Location
    where
        F: FnMut(&P) -> Command,
    {
        let mut location = Location::Root;

        while let Some(node) = self.resolve(location) {
            match navigate(self.node(node).payload()) {
                Command::Stop => break,
                Command::Turn(side) => location = Location::Relative { parent: node, side },
            }
        }
        location
    }

    /// Finds `value` in a tree kept in natural order.
    ///
    /// Returns the occupied location of a payload equal to `value`, or the free
    /// location where `value` belongs.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_tree::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// for word in ["pear", "apple", "fig"] {
    ///     tree.insert(tree.find(word), word.to_owned()).unwrap();
    /// }
    ///
    /// let fig = tree.resolve(tree.find("fig")).unwrap();
    /// assert_eq!(tree.rank(fig), 1);
    /// assert_eq!(tree.resolve(tree.find("kiwi")), None);
    /// ```
    pub fn find<Q>(&self, value: &Q) -> Location
    where
        P: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_location_guided(|payload| Command::comparing(value.cmp(payload.borrow())))
    }

    /// Finds `value` in a tree ordered by `compare`.
    pub fn find_with<F>(&self, value: &P, mut compare: F) -> Location
    where
        F: FnMut(&P, &P) -> Ordering,
    {
        self.find_location_guided(|payload| Command::comparing(compare(value, payload)))
    }

    /// Finds `key` in a tree ordered by the keys `selector` projects out of
    /// the payloads.
    ///
    /// # Examples
    ///
    /// ```
    /// use stable_tree::RbTree;
    ///
    /// let mut tree: RbTree<(u32, char)> = RbTree::new();
    /// for (key, value) in [(3, 'c'), (1, 'a'), (2, 'b')] {
    ///     let location = tree.find_by(&key, |(key, _)| key);
    ///     tree.insert(location, (key, value)).unwrap();
    /// }
    ///
    /// let two = tree.resolve(tree.find_by(&2, |(key, _)| key)).unwrap();
    /// assert_eq!(tree.payload(two), Some(&(2, 'b')));
    /// ```
    pub fn find_by<K, F>(&self, key: &K, selector: F) -> Location
    where
        K: Ord + ?Sized,
        F: Fn(&P) -> &K,
    {
        self.find_location_guided(|payload| Command::comparing(key.cmp(selector(payload))))
    }

    /// Walks to a free location taking a random side at every node.
    ///
    /// The result is always free but not uniformly distributed: shallow free
    /// locations are more likely than deep ones.
    pub fn random_free_location<R>(&self, rng: &mut R) -> Location
    where
        R: Rng + ?Sized,
    {
        self.find_location_guided(|_| {
            let side = if rng.r#gen::<bool>() { Side::Left } else { Side::Right };
            Command::Turn(side)
        })
    }
}
