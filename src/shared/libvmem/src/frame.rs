use crate::{Error, FrameIndex, Result};
use bitvec::vec::BitVec;

/// How a frame is reclaimed once physical memory is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvictionPolicy {
    /// Never reclaim. Allocation fails once every frame has been handed out.
    #[default]
    None,
    /// Cycle through frames in allocation order, reclaiming whatever the
    /// next slot holds regardless of how recently it was touched.
    Fifo,
    /// Reclaim the frame with the oldest `last_used` stamp; hits count as
    /// usage, and ties go to the lowest frame index.
    Lru,
}

/// Result of one allocation: the frame to load into, and whether its
/// previous mapping must be torn down first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    pub frame: FrameIndex,
    pub evicted: bool,
}

/// Hands out physical frames for faulting pages, reclaiming per the
/// configured policy. The allocator only picks frames; tearing down the
/// victim's page-table and TLB state is the caller's job, and must complete
/// before the frame is reused.
pub struct FrameAllocator {
    policy: EvictionPolicy,
    occupied: BitVec,
    last_used: Box<[u64]>,
    allocations: u64,
}

impl FrameAllocator {
    /// Returns `None` for a zero frame count.
    pub fn new(policy: EvictionPolicy, frame_count: usize) -> Option<Self> {
        (frame_count > 0).then(|| Self {
            policy,
            occupied: BitVec::repeat(false, frame_count),
            last_used: vec![0; frame_count].into_boxed_slice(),
            allocations: 0,
        })
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.occupied.len()
    }

    /// Stamps `frame` as used at sequence number `now`. Called on every
    /// successful resolution, so LRU sees hits as usage, not just faults.
    #[inline]
    pub fn touch(&mut self, frame: FrameIndex, now: u64) {
        self.last_used[frame.get()] = now;
    }

    /// Picks the frame a faulting page will be loaded into.
    pub fn allocate(&mut self, now: u64) -> Result<Allocation> {
        let frame_count = self.frame_count();

        let allocation = match self.policy {
            EvictionPolicy::None => {
                let index = usize::try_from(self.allocations).unwrap_or(usize::MAX);
                if index >= frame_count {
                    return Err(Error::FramesExhausted { frame_count });
                }
                Allocation { frame: FrameIndex::from_index(index), evicted: false }
            }
            EvictionPolicy::Fifo => {
                let index = (self.allocations % frame_count as u64) as usize;
                Allocation { frame: FrameIndex::from_index(index), evicted: self.occupied[index] }
            }
            EvictionPolicy::Lru => match self.occupied.first_zero() {
                Some(index) => Allocation { frame: FrameIndex::from_index(index), evicted: false },
                None => {
                    // Global recency scan; lowest index wins ties.
                    let victim = self
                        .last_used
                        .iter()
                        .enumerate()
                        .min_by_key(|(_, stamp)| **stamp)
                        .map(|(index, _)| index)
                        .unwrap_or(0);
                    Allocation { frame: FrameIndex::from_index(victim), evicted: true }
                }
            },
        };

        let index = allocation.frame.get();
        self.occupied.set(index, true);
        self.last_used[index] = now;
        self.allocations += 1;

        trace!(
            "allocated frame {index} (policy {:?}, evicted {})",
            self.policy,
            allocation.evicted
        );

        Ok(allocation)
    }
}
