use crate::{FrameIndex, VirtualPage};

pub const DEFAULT_TLB_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TlbEntry {
    page: VirtualPage,
    frame: FrameIndex,
}

/// Translation-lookaside buffer: a small fully-scanned cache of
/// page -> frame mappings with strict FIFO replacement.
///
/// Replacement slot selection is `inserts % capacity` with a counter that
/// only ever grows; hits do not promote an entry, and invalidation leaves a
/// hole in place rather than compacting the ring.
pub struct Tlb {
    slots: Box<[Option<TlbEntry>]>,
    inserts: u64,
}

impl Tlb {
    /// Returns `None` for a zero capacity.
    pub fn new(capacity: usize) -> Option<Self> {
        (capacity > 0).then(|| Self { slots: vec![None; capacity].into_boxed_slice(), inserts: 0 })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Full scan; a miss is the normal signal, not a fault.
    pub fn lookup(&self, page: VirtualPage) -> Option<FrameIndex> {
        self.slots
            .iter()
            .flatten()
            .find(|entry| entry.page == page)
            .map(|entry| entry.frame)
    }

    /// Records `page -> frame` in the oldest slot of the ring.
    pub fn insert(&mut self, page: VirtualPage, frame: FrameIndex) {
        let slot = (self.inserts % self.slots.len() as u64) as usize;
        self.slots[slot] = Some(TlbEntry { page, frame });
        self.inserts += 1;
    }

    /// Iterates the currently valid `(page, frame)` pairs.
    pub fn iter_entries(&self) -> impl Iterator<Item = (VirtualPage, FrameIndex)> + '_ {
        self.slots.iter().flatten().map(|entry| (entry.page, entry.frame))
    }

    /// Drops every entry pointing at `frame`. Must run whenever the frame is
    /// reclaimed; an entry that outlives its frame's contents is a
    /// correctness bug, not a stale-cache inefficiency.
    pub fn invalidate(&mut self, frame: FrameIndex) {
        for slot in self.slots.iter_mut() {
            if slot.is_some_and(|entry| entry.frame == frame) {
                *slot = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(index: usize) -> VirtualPage {
        VirtualPage::from_index(index)
    }

    fn frame(index: usize) -> FrameIndex {
        FrameIndex::from_index(index)
    }

    #[test]
    fn rejects_zero_capacity() {
        assert!(Tlb::new(0).is_none());
    }

    #[test]
    fn fifo_ring_overwrites_oldest() {
        let mut tlb = Tlb::new(2).unwrap();
        tlb.insert(page(0), frame(0));
        tlb.insert(page(1), frame(1));
        tlb.insert(page(2), frame(2));

        assert_eq!(tlb.lookup(page(0)), None);
        assert_eq!(tlb.lookup(page(1)), Some(frame(1)));
        assert_eq!(tlb.lookup(page(2)), Some(frame(2)));
    }

    #[test]
    fn lookup_does_not_promote() {
        let mut tlb = Tlb::new(2).unwrap();
        tlb.insert(page(0), frame(0));
        tlb.insert(page(1), frame(1));

        // A hit on the oldest entry must not save it from replacement.
        assert_eq!(tlb.lookup(page(0)), Some(frame(0)));
        tlb.insert(page(2), frame(2));
        assert_eq!(tlb.lookup(page(0)), None);
    }

    #[test]
    fn invalidate_leaves_a_hole_and_the_counter_keeps_wrapping() {
        let mut tlb = Tlb::new(3).unwrap();
        tlb.insert(page(0), frame(0));
        tlb.insert(page(1), frame(1));
        tlb.insert(page(2), frame(2));

        tlb.invalidate(frame(1));
        assert_eq!(tlb.lookup(page(1)), None);

        // Next insert still targets slot 3 % 3 = 0, not the hole.
        tlb.insert(page(3), frame(3));
        assert_eq!(tlb.lookup(page(0)), None);
        assert_eq!(tlb.lookup(page(3)), Some(frame(3)));
        assert_eq!(tlb.lookup(page(2)), Some(frame(2)));
    }

    #[test]
    fn invalidate_drops_every_alias_of_the_frame() {
        let mut tlb = Tlb::new(4).unwrap();
        tlb.insert(page(0), frame(7));
        tlb.insert(page(1), frame(7));
        tlb.insert(page(2), frame(3));

        tlb.invalidate(frame(7));
        assert_eq!(tlb.lookup(page(0)), None);
        assert_eq!(tlb.lookup(page(1)), None);
        assert_eq!(tlb.lookup(page(2)), Some(frame(3)));
    }
}
