use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Failures a translation can surface. All three are deterministic
/// functions of the configuration and the address stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The logical address does not fit the configured address width.
    #[error("logical address {address} is outside the address space (limit {limit})")]
    InvalidAddress { address: usize, limit: usize },

    /// A page copy would run past the end of the backing store.
    #[error("backing store is {len} bytes; page {page} starts at byte {offset}")]
    BackingStore { page: usize, offset: usize, len: usize },

    /// Every frame is in use and no eviction policy is configured.
    #[error("all {frame_count} physical frames are in use and no eviction policy is configured")]
    FramesExhausted { frame_count: usize },
}
