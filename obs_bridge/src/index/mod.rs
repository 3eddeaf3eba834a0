//! Handle index allocation
//!
//! Provides the range-based allocator used by object managers to hand out
//! small, reusable `u32` handles for live native objects.

mod index_allocator;
mod index_config;
mod index_range;

pub use index_allocator::IndexAllocator;
pub use index_config::IndexConfig;
pub use index_range::IndexRange;

/// Wire value reported to remote callers when no handle could be allocated
pub const INVALID_HANDLE: u32 = u32::MAX;
