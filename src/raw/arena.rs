use alloc::vec::Vec;

use super::node_id::NodeId;

#[derive(Clone)]
struct Slot<T> {
    generation: u32,
    element: Option<T>,
}

/// Slot storage addressed by generational [`NodeId`]s.
///
/// Freeing an element bumps its slot's generation, so identifiers handed out
/// earlier stop resolving. A slot whose generation is exhausted is retired.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn alloc(&mut self, element: T) -> NodeId {
        self.len += 1;

        if let Some(index) = self.free.pop() {
            // Reuse a free slot under its current generation.
            let slot = &mut self.slots[index];
            slot.element = Some(element);
            NodeId::from_parts(index, slot.generation)
        } else {
            assert!(
                self.slots.len() <= NodeId::MAX_INDEX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                NodeId::MAX_INDEX + 1
            );
            self.slots.push(Slot {
                generation: 0,
                element: Some(element),
            });
            NodeId::from_parts(self.slots.len() - 1, 0)
        }
    }

    #[inline]
    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> Option<&T> {
        let slot = self.slots.get(id.index())?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.element.as_ref()
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.element.as_mut()
    }

    pub(crate) fn take(&mut self, id: NodeId) -> Option<T> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation() {
            return None;
        }
        let element = slot.element.take()?;
        self.len -= 1;
        Self::retire(&mut self.free, id.index(), slot);
        Some(element)
    }

    /// Drops every element and invalidates every outstanding identifier.
    pub(crate) fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            slot.element = None;
            Self::retire(&mut self.free, index, slot);
        }
        self.len = 0;
    }

    fn retire(free: &mut Vec<usize>, index: usize, slot: &mut Slot<T>) {
        if let Some(next) = slot.generation.checked_add(1) {
            slot.generation = next;
            free.push(index);
        }
    }
}
