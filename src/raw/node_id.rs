use core::fmt;
use core::num::NonZero;

#[cfg(test)]
pub(crate) type RawIndex = u16;
#[cfg(not(test))]
pub(crate) type RawIndex = u32;

/// Identity of one node instance inside an [`RbTree`](crate::RbTree).
///
/// A `NodeId` pairs an arena slot with the generation the slot had when the
/// node was attached. Once the node is removed, the slot's generation moves on
/// and the identifier stops resolving, even if the slot is later reused by a
/// different node.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct NodeId {
    index: NonZero<RawIndex>,
    generation: u32,
}

impl NodeId {
    pub(crate) const MAX_INDEX: usize = (RawIndex::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn from_parts(index: usize, generation: u32) -> Self {
        assert!(index <= Self::MAX_INDEX, "`NodeId::from_parts()` - `index` > `NodeId::MAX_INDEX`!");
        // `index + 1` cannot be zero and cannot overflow.
        #[allow(clippy::cast_possible_truncation)]
        Self {
            index: NonZero::new((index + 1) as RawIndex).unwrap(),
            generation,
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        (self.index.get() - 1) as usize
    }

    #[inline]
    pub(crate) const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}v{})", self.index(), self.generation)
    }
}
