use core::num::NonZero;

use alloc::vec::Vec;

#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// Index of a node slot in the arena.
///
/// The index is stored shifted up by one inside a `NonZero`, so
/// `Option<Handle>` - the type of every child link in the tree - is no wider
/// than the bare index. Under test the raw type shrinks to `u16` so capacity
/// handling is actually exercised.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    /// Highest slot index the arena can hand out.
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "arena slot index not representable as a handle");
        // `index + 1` is nonzero and, by the assert above, fits in RawHandle.
        #[allow(clippy::cast_possible_truncation)]
        let raw = (index + 1) as RawHandle;
        Self(NonZero::new(raw).unwrap())
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

/// Slot arena backing the tree's nodes.
///
/// Freed slots are pushed onto a free list and reused by later allocations,
/// so a long insert/remove workload does not grow the slot table without
/// bound.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(h) = self.free.pop() {
            // Reuse a free slot/handle.
            self.slots[h.to_index()] = Some(element);
            return h;
        }
        // Refuse to grow past Handle::MAX slots: the new slot's index is the
        // current length, and it has to stay representable as a handle.
        assert!(self.slots.len() < Handle::MAX, "arena full: no slot index left to hand out");
        self.slots.push(Some(element));
        Handle::from_index(self.slots.len() - 1)
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("arena: handle points at a freed slot")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("arena: handle points at a freed slot")
    }

    /// Removes the element at `handle` and returns it, recycling the slot.
    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("arena: handle points at a freed slot");
        self.free.push(handle);
        element
    }

    pub(crate) fn free(&mut self, handle: Handle) {
        drop(self.take(handle));
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
