use super::node_id::NodeId;
use super::size::Size;
use crate::Side;

/// Red-black color of a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Color {
    Red,
    Black,
}

/// What a node holds on one side: either a child, or a thread to its in-order
/// neighbour on that side (`None` for the extremal node).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum DownLink {
    Child(NodeId),
    Neighbour(Option<NodeId>),
}

impl DownLink {
    pub(crate) const NIL: Self = DownLink::Neighbour(None);

    #[inline]
    pub(crate) const fn child(self) -> Option<NodeId> {
        match self {
            DownLink::Child(child) => Some(child),
            DownLink::Neighbour(_) => None,
        }
    }

    #[inline]
    pub(crate) const fn is_thread(self) -> bool {
        matches!(self, DownLink::Neighbour(_))
    }
}

#[derive(Clone)]
pub(crate) struct Node<P> {
    parent: Option<NodeId>,
    links: [DownLink; 2],
    color: Color,
    // Number of nodes in the subtree rooted here, including this node.
    size: Size,
    payload: P,
}

impl<P> Node<P> {
    /// Creates a detached node with nil threads on both sides.
    pub(crate) fn new(parent: Option<NodeId>, color: Color, payload: P) -> Self {
        Self {
            parent,
            links: [DownLink::NIL; 2],
            color,
            size: Size::ONE,
            payload,
        }
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) fn link(&self, side: Side) -> DownLink {
        self.links[side.index()]
    }

    #[inline]
    pub(crate) fn set_link(&mut self, side: Side, link: DownLink) {
        self.links[side.index()] = link;
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<NodeId> {
        self.link(side).child()
    }

    #[inline]
    pub(crate) fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub(crate) fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub(crate) fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    #[inline]
    pub(crate) fn payload(&self) -> &P {
        &self.payload
    }

    #[inline]
    pub(crate) fn payload_mut(&mut self) -> &mut P {
        &mut self.payload
    }

    pub(crate) fn into_payload(self) -> P {
        self.payload
    }
}
