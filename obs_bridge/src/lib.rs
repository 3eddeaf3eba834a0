/*!
# OBS Bridge

Handle bookkeeping for the OBS client/server bridge.

Native objects living in the OBS server process (sources, scenes, services,
encoders, ...) are referred to across the IPC boundary by small `u32`
handles. This crate provides the pieces that hand those handles out and
resolve them again.

## Architecture

- **IndexAllocator**: range-based allocator of reusable `u32` ids
- **IndexConfig**: the id window an allocator works in
- **ObjectManager**: thread-safe handle -> object registry built on an allocator
- **Bridge**: replaceable process-wide logger
*/

// Internal modules
mod error;
mod bridge;
pub mod log;
pub mod index;
pub mod manager;

// Main osn namespace module
pub mod osn {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging hub
    pub use crate::bridge::Bridge;

    // Handle allocation
    pub use crate::index::{IndexAllocator, IndexConfig, IndexRange, INVALID_HANDLE};

    // Handle -> object registry
    pub use crate::manager::ObjectManager;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }
}
