/// A side of a node. Everything ordered before a node lives on its left side,
/// everything ordered after it on its right side.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// The other side.
    #[must_use]
    pub const fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// The rotation that moves a parent down into the position of its child on
    /// this side.
    #[must_use]
    pub const fn direction_to(self) -> RotationDirection {
        match self {
            Side::Left => RotationDirection::CounterClockwise,
            Side::Right => RotationDirection::Clockwise,
        }
    }

    /// The rotation that promotes the child on this side into its parent's
    /// position.
    #[must_use]
    pub const fn direction_from(self) -> RotationDirection {
        self.direction_to().opposite()
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// A direction of rotation of a subtree around its pivot node.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum RotationDirection {
    /// Promotes the pivot's left child.
    Clockwise,
    /// Promotes the pivot's right child.
    CounterClockwise,
}

impl RotationDirection {
    #[must_use]
    pub const fn opposite(self) -> RotationDirection {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }

    /// The side of the pivot holding the ascending child.
    #[must_use]
    pub const fn start_side(self) -> Side {
        match self {
            RotationDirection::Clockwise => Side::Left,
            RotationDirection::CounterClockwise => Side::Right,
        }
    }

    /// The side the pivot descends to.
    #[must_use]
    pub const fn end_side(self) -> Side {
        self.start_side().opposite()
    }
}
