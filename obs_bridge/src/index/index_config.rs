/// Index window and storage hints for an [`super::IndexAllocator`].

use crate::error::{Error, Result};

/// Allocator configuration
///
/// The window `[first_index, last_index]` bounds every id the allocator will
/// hand out or accept as used. Bridges that reserve handle `0` as "null" use
/// `IndexConfig::starting_at(1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    /// Lowest id that can be allocated (inclusive)
    pub first_index: u32,
    /// Highest id that can be allocated (inclusive)
    pub last_index: u32,
    /// Number of range slots reserved up front
    pub reserve: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            first_index: 0,
            last_index: u32::MAX,
            reserve: 256,
        }
    }
}

impl IndexConfig {
    /// Full window starting at `first_index`
    pub fn starting_at(first_index: u32) -> Self {
        Self {
            first_index,
            ..Self::default()
        }
    }

    /// Window `[first_index, last_index]`
    pub fn window(first_index: u32, last_index: u32) -> Self {
        Self {
            first_index,
            last_index,
            ..Self::default()
        }
    }

    /// Check that the window is not empty
    pub fn validate(&self) -> Result<()> {
        if self.first_index > self.last_index {
            return Err(Error::InvalidConfig(format!(
                "first_index {} > last_index {}",
                self.first_index, self.last_index
            )));
        }
        Ok(())
    }

    /// Number of ids in the window
    pub fn capacity(&self) -> u64 {
        u64::from(self.last_index.saturating_sub(self.first_index)) + 1
    }

    /// Whether `id` lies inside the window
    pub fn contains(&self, id: u32) -> bool {
        self.first_index <= id && id <= self.last_index
    }
}

#[cfg(test)]
#[path = "index_config_tests.rs"]
mod tests;
