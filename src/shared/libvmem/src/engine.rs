use crate::{
    AddressLayout, Allocation, BackingStore, Error, EvictionPolicy, FrameAllocator, FrameIndex,
    LogicalAddress, PageTable, PhysicalAddress, PhysicalMemory, Result, Tlb, VirtualPage,
    DEFAULT_TLB_CAPACITY,
};

/// Engine-wide configuration; the engine is a pure function of this plus
/// the address stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub layout: AddressLayout,
    pub tlb_capacity: usize,
    pub frame_count: usize,
    pub policy: EvictionPolicy,
}

impl Default for EngineConfig {
    /// 20-bit addresses, 1 KiB pages, a 16-entry
    /// TLB, and as many frames as pages (so nothing ever needs evicting).
    fn default() -> Self {
        let layout = AddressLayout::default();
        Self {
            layout,
            tlb_capacity: DEFAULT_TLB_CAPACITY,
            frame_count: layout.page_count(),
            policy: EvictionPolicy::None,
        }
    }
}

/// Which stage of the lookup chain resolved an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    TlbHit,
    PageTableHit,
    PageFault,
}

/// One resolved address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    pub logical: LogicalAddress,
    pub physical: PhysicalAddress,
    pub value: i8,
    pub outcome: Outcome,
}

/// Running counters for the end-of-run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub total: u64,
    pub tlb_hits: u64,
    pub page_faults: u64,
}

impl Stats {
    pub fn fault_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.page_faults as f64 / self.total as f64
        }
    }

    pub fn hit_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.tlb_hits as f64 / self.total as f64
        }
    }
}

/// Owns every piece of translation state: TLB, page table, physical memory,
/// frame allocator, and the backing store faults are serviced from.
///
/// Strictly sequential; the per-address sequence number that FIFO/LRU
/// bookkeeping hangs off is only meaningful under one ordered stream.
pub struct TranslationEngine {
    layout: AddressLayout,
    tlb: Tlb,
    table: PageTable,
    memory: PhysicalMemory,
    allocator: FrameAllocator,
    store: BackingStore,
    stats: Stats,
}

impl TranslationEngine {
    /// Returns `None` when the configuration is degenerate (zero TLB
    /// capacity or zero frames).
    pub fn new(config: EngineConfig, store: BackingStore) -> Option<Self> {
        let engine = Self {
            layout: config.layout,
            tlb: Tlb::new(config.tlb_capacity)?,
            table: PageTable::new(config.layout.page_count()),
            memory: PhysicalMemory::new(config.frame_count, config.layout),
            allocator: FrameAllocator::new(config.policy, config.frame_count)?,
            store,
            stats: Stats::default(),
        };

        debug!(
            "engine: {}-bit addresses, {} pages of {} bytes, {} frames, {}-entry TLB, {:?} eviction",
            engine.layout.addr_bits(),
            engine.layout.page_count(),
            engine.layout.page_size(),
            config.frame_count,
            config.tlb_capacity,
            config.policy
        );

        Some(engine)
    }

    #[inline]
    pub fn layout(&self) -> AddressLayout {
        self.layout
    }

    #[inline]
    pub fn stats(&self) -> Stats {
        self.stats
    }

    #[inline]
    pub fn view_page_table(&self) -> &PageTable {
        &self.table
    }

    #[inline]
    pub fn view_tlb(&self) -> &Tlb {
        &self.tlb
    }

    /// Resolves one logical address to its physical address and stored value.
    ///
    /// Lookup chain: TLB, then page table (backfilling the TLB), then the
    /// fault path. Every successful resolution refreshes the frame's recency
    /// stamp, so LRU treats hits as usage.
    pub fn translate(&mut self, address: usize) -> Result<Translation> {
        let logical = LogicalAddress::new(address, self.layout)
            .ok_or(Error::InvalidAddress { address, limit: self.layout.address_limit() })?;

        self.stats.total += 1;
        let now = self.stats.total;
        let (page, offset) = logical.split(self.layout);

        let (frame, outcome) = if let Some(frame) = self.tlb.lookup(page) {
            self.stats.tlb_hits += 1;
            trace!("page {} -> frame {}: TLB hit", page.get(), frame.get());
            (frame, Outcome::TlbHit)
        } else if let Some(frame) = self.table.lookup(page) {
            self.tlb.insert(page, frame);
            trace!("page {} -> frame {}: page table hit", page.get(), frame.get());
            (frame, Outcome::PageTableHit)
        } else {
            let frame = self.fault(page, now)?;
            (frame, Outcome::PageFault)
        };

        self.allocator.touch(frame, now);

        let physical = PhysicalAddress::compose(frame, offset, self.layout);
        let value = self.memory.read(frame, offset);

        Ok(Translation { logical, physical, value, outcome })
    }

    /// Fault path: pick a frame (tearing down any evicted mapping), copy the
    /// page in from the backing store, then install the new mapping.
    fn fault(&mut self, page: VirtualPage, now: u64) -> Result<FrameIndex> {
        // Read before allocating, so a truncated backing store cannot leave a
        // half-torn-down mapping behind.
        let bytes = self.store.read_page(page, self.layout)?;

        let Allocation { frame, evicted } = self.allocator.allocate(now)?;
        if evicted {
            debug!("evicting frame {} for page {}", frame.get(), page.get());
            self.table.unmap_frame(frame);
            self.tlb.invalidate(frame);
        }

        self.memory.load_frame(frame, bytes);
        self.table.map(page, frame);
        self.tlb.insert(page, frame);
        self.stats.page_faults += 1;

        trace!("page {} -> frame {}: page fault", page.get(), frame.get());
        Ok(frame)
    }
}
