use core::fmt;

/// Bit layout of the simulated address space.
///
/// A logical address is `addr_bits` wide; its low `offset_bits` select a byte
/// within a page and the remaining high bits select the page itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressLayout {
    addr_bits: u32,
    offset_bits: u32,
}

impl AddressLayout {
    pub const DEFAULT_ADDR_BITS: u32 = 20;
    pub const DEFAULT_OFFSET_BITS: u32 = 10;

    /// Returns `None` when the widths cannot describe a paged address space:
    /// a zero-byte page, no page-number bits, or addresses wider than the
    /// host `usize`.
    pub fn new(addr_bits: u32, offset_bits: u32) -> Option<Self> {
        ((1..addr_bits).contains(&offset_bits) && addr_bits < usize::BITS)
            .then_some(Self { addr_bits, offset_bits })
    }

    #[inline]
    pub const fn addr_bits(self) -> u32 {
        self.addr_bits
    }

    #[inline]
    pub const fn offset_bits(self) -> u32 {
        self.offset_bits
    }

    #[inline]
    pub const fn page_size(self) -> usize {
        1 << self.offset_bits
    }

    #[inline]
    pub const fn page_count(self) -> usize {
        1 << (self.addr_bits - self.offset_bits)
    }

    #[inline]
    pub const fn offset_mask(self) -> usize {
        self.page_size() - 1
    }

    /// One past the largest representable logical address.
    #[inline]
    pub const fn address_limit(self) -> usize {
        1 << self.addr_bits
    }
}

impl Default for AddressLayout {
    fn default() -> Self {
        Self { addr_bits: Self::DEFAULT_ADDR_BITS, offset_bits: Self::DEFAULT_OFFSET_BITS }
    }
}

/// An address as seen by the simulated program.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LogicalAddress(usize);

impl LogicalAddress {
    /// Returns `None` when `value` falls outside the layout's address space.
    #[inline]
    pub fn new(value: usize, layout: AddressLayout) -> Option<Self> {
        (value < layout.address_limit()).then_some(Self(value))
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Decomposes the address into its page number and page offset.
    #[inline]
    pub const fn split(self, layout: AddressLayout) -> (VirtualPage, usize) {
        (VirtualPage(self.0 >> layout.offset_bits()), self.0 & layout.offset_mask())
    }
}

impl fmt::Debug for LogicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LogicalAddress").field(&self.0).finish()
    }
}

/// An address in simulated physical memory after translation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PhysicalAddress(usize);

impl PhysicalAddress {
    /// Reassembles a physical address from a frame and an in-page offset.
    #[inline]
    pub const fn compose(frame: FrameIndex, offset: usize, layout: AddressLayout) -> Self {
        Self((frame.get() << layout.offset_bits()) | offset)
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Debug for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PhysicalAddress").field(&self.0).finish()
    }
}

/// Index of a page in the logical address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct VirtualPage(usize);

impl VirtualPage {
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }
}

/// Index of a frame in simulated physical memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameIndex(usize);

impl FrameIndex {
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }
}
