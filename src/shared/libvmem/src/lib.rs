//! Demand-paged address translation: a TLB in front of a page table, with
//! faults serviced from a backing store and frames reclaimed by a
//! configurable eviction policy.

#[macro_use]
extern crate log;

mod addr;
pub use addr::*;

mod engine;
pub use engine::*;

mod error;
pub use error::*;

mod frame;
pub use frame::*;

mod memory;
pub use memory::*;

mod store;
pub use store::*;

mod table;
pub use table::*;

mod tlb;
pub use tlb::*;
