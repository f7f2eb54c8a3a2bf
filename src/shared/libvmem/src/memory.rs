use crate::{AddressLayout, FrameIndex};

/// Simulated physical memory: `frame_count` frames of `page_size` signed
/// byte cells. The backing store holds signed chars, so cells are `i8` and
/// widen only for display.
pub struct PhysicalMemory {
    cells: Box<[i8]>,
    page_size: usize,
}

impl PhysicalMemory {
    pub fn new(frame_count: usize, layout: AddressLayout) -> Self {
        Self {
            cells: vec![0; frame_count * layout.page_size()].into_boxed_slice(),
            page_size: layout.page_size(),
        }
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.cells.len() / self.page_size
    }

    /// Copies one page of backing-store bytes into `frame`.
    pub fn load_frame(&mut self, frame: FrameIndex, bytes: &[u8]) {
        debug_assert_eq!(bytes.len(), self.page_size);

        let start = frame.get() * self.page_size;
        for (cell, byte) in self.cells[start..start + self.page_size].iter_mut().zip(bytes) {
            *cell = *byte as i8;
        }
    }

    /// Reads the cell at `offset` within `frame`.
    #[inline]
    pub fn read(&self, frame: FrameIndex, offset: usize) -> i8 {
        debug_assert!(offset < self.page_size);

        self.cells[frame.get() * self.page_size + offset]
    }
}
