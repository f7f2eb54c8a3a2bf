use crate::{FrameIndex, VirtualPage};

/// Maps logical page numbers to physical frames.
///
/// Invariant: among mapped entries the page -> frame relation is injective.
/// `unmap_frame` must run before a reclaimed frame is handed out again so
/// the old owner never aliases the new one.
pub struct PageTable {
    entries: Box<[Option<FrameIndex>]>,
}

impl PageTable {
    pub fn new(page_count: usize) -> Self {
        Self { entries: vec![None; page_count].into_boxed_slice() }
    }

    #[inline]
    pub fn lookup(&self, page: VirtualPage) -> Option<FrameIndex> {
        self.entries[page.get()]
    }

    /// Installs `page -> frame`, overwriting any previous mapping for `page`.
    #[inline]
    pub fn map(&mut self, page: VirtualPage, frame: FrameIndex) {
        self.entries[page.get()] = Some(frame);
    }

    /// Iterates the currently mapped `(page, frame)` pairs.
    pub fn iter_mapped(&self) -> impl Iterator<Item = (VirtualPage, FrameIndex)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(page, entry)| entry.map(|frame| (VirtualPage::from_index(page), frame)))
    }

    /// Clears whichever page currently owns `frame`. Idempotent; a full
    /// reverse scan, since the table is indexed by page, not frame.
    pub fn unmap_frame(&mut self, frame: FrameIndex) {
        for entry in self.entries.iter_mut() {
            if *entry == Some(frame) {
                *entry = None;
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
    fn map_then_lookup() {
        let mut table = PageTable::new(8);
        assert_eq!(table.lookup(page(3)), None);

        table.map(page(3), frame(1));
        assert_eq!(table.lookup(page(3)), Some(frame(1)));
    }

    #[test]
    fn unmap_frame_clears_every_owner() {
        let mut table = PageTable::new(8);
        table.map(page(2), frame(0));
        table.map(page(5), frame(1));

        table.unmap_frame(frame(0));
        assert_eq!(table.lookup(page(2)), None);
        assert_eq!(table.lookup(page(5)), Some(frame(1)));
    }

    #[test]
    fn unmap_frame_is_idempotent() {
        let mut table = PageTable::new(8);
        table.map(page(2), frame(0));

        table.unmap_frame(frame(0));
        table.unmap_frame(frame(0));
        assert_eq!(table.lookup(page(2)), None);
    }
}
