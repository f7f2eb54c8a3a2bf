use crate::{AddressLayout, Error, Result, VirtualPage};

/// Read-only byte source that page faults are serviced from.
///
/// The store is addressed purely by page number; opening or mapping the
/// underlying file is the caller's concern. A store shorter than
/// `page_count * page_size` bytes is legal until a page beyond its end
/// actually faults.
pub struct BackingStore {
    bytes: Box<[u8]>,
}

impl BackingStore {
    pub fn new(bytes: impl Into<Box<[u8]>>) -> Self {
        Self { bytes: bytes.into() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the `page_size` bytes backing `page`.
    pub fn read_page(&self, page: VirtualPage, layout: AddressLayout) -> Result<&[u8]> {
        let offset = page.get() * layout.page_size();
        self.bytes
            .get(offset..offset + layout.page_size())
            .ok_or(Error::BackingStore { page: page.get(), offset, len: self.bytes.len() })
    }
}
