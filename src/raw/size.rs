use core::num::NonZero;

use super::node_id::{NodeId, RawIndex};

/// Cached subtree size. A subtree always contains at least its own root.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Size(NonZero<RawIndex>);

impl Size {
    pub(crate) const MAX: usize = NodeId::MAX_INDEX + 1;
    pub(crate) const ONE: Self = Self::from_usize(1);

    #[inline]
    pub(crate) const fn from_usize(size: usize) -> Self {
        assert!(size != 0, "`Size::from_usize()` - `size` == 0!");
        assert!(size <= Self::MAX, "`Size::from_usize()` - `size` > `Size::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        Self(NonZero::new(size as RawIndex).unwrap())
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0.get() as usize
    }

    /// Applies a signed change in descendant count.
    #[inline]
    pub(crate) fn offset(self, delta: isize) -> Self {
        let size = self
            .to_usize()
            .checked_add_signed(delta)
            .expect("`Size::offset()` - subtree size underflow!");
        Self::from_usize(size)
    }
}
