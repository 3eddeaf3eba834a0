//! Range-based handle allocator

use std::ops::RangeInclusive;
use crate::error::Result;
use crate::bridge_warn;
use super::index_config::IndexConfig;
use super::index_range::IndexRange;

const SOURCE: &str = "osn::IndexAllocator";

/// Used ids are stored as a sorted list of inclusive [`IndexRange`]s that are
/// kept disjoint and maximally merged: no two ranges overlap or touch. The
/// list therefore grows with the number of holes in the used set, not with
/// the number of ids handed out. All operations are O(ranges).
///
/// New ids are taken from the low end of the window first: the first range
/// is extended downward while there is room below it, then upward.
///
/// # Example
///
/// ```
/// use obs_bridge::osn::IndexAllocator;
///
/// let mut index = IndexAllocator::new();
/// assert_eq!(index.allocate(), Some(0));
/// assert_eq!(index.allocate(), Some(1));
/// index.mark(0, false);
/// assert!(!index.is_used(0));
/// assert_eq!(index.allocate(), Some(0)); // recycled
/// assert_eq!(index.count(true), 2);
/// ```
pub struct IndexAllocator {
    /// Used ids, sorted by `min`, disjoint and non-adjacent
    ranges: Vec<IndexRange>,
    config: IndexConfig,
}

impl IndexAllocator {
    /// Create an empty allocator over the full `u32` space, starting at 0
    pub fn new() -> Self {
        let config = IndexConfig::default();
        Self {
            ranges: Vec::with_capacity(config.reserve),
            config,
        }
    }

    /// Create an empty allocator over a custom index window
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if `first_index > last_index`.
    pub fn with_config(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            ranges: Vec::with_capacity(config.reserve),
            config,
        })
    }

    /// Take a free id and mark it used
    ///
    /// Returns `None` when every id in the window is already used. Nothing is
    /// modified in that case.
    pub fn allocate(&mut self) -> Option<u32> {
        if self.ranges.is_empty() {
            let id = self.config.first_index;
            self.ranges.push(IndexRange::single(id));
            return Some(id);
        }

        let first = &mut self.ranges[0];

        if first.min > self.config.first_index {
            first.min -= 1;
            return Some(first.min);
        }

        if first.max >= self.config.last_index {
            bridge_warn!(SOURCE, "Index window {}..={} exhausted",
                self.config.first_index, self.config.last_index);
            return None;
        }

        first.max += 1;
        let id = first.max;
        self.merge_with_next(0);
        Some(id)
    }

    /// Set whether `id` is used
    ///
    /// Idempotent: marking an id with the status it already has changes
    /// nothing. Ids outside the configured window are never stored; marking
    /// one used is ignored with a warning.
    pub fn mark(&mut self, id: u32, used: bool) {
        if used {
            self.mark_used(id);
        } else {
            self.mark_free(id);
        }
    }

    /// Release `id`; same as `mark(id, false)`
    pub fn free(&mut self, id: u32) {
        self.mark_free(id);
    }

    /// Set the status of every id in `ids` at once
    ///
    /// Equivalent to calling [`mark`](Self::mark) for each id, but runs in a
    /// single pass over the range list.
    pub fn mark_range(&mut self, ids: RangeInclusive<u32>, used: bool) {
        let (start, end) = ids.into_inner();
        if start > end {
            return;
        }

        if used {
            self.mark_range_used(start, end);
        } else {
            self.mark_range_free(start, end);
        }
    }

    /// Whether `id` is currently used
    pub fn is_used(&self, id: u32) -> bool {
        let index = self.ranges.partition_point(|r| r.max < id);
        self.ranges.get(index).is_some_and(|r| r.min <= id)
    }

    /// Whether the status of `id` equals `used`
    pub fn is(&self, id: u32, used: bool) -> bool {
        self.is_used(id) == used
    }

    /// Number of used ids, or of free ids in the window when `used` is false
    pub fn count(&self, used: bool) -> u64 {
        let used_count: u64 = self.ranges.iter().map(IndexRange::len).sum();
        if used {
            used_count
        } else {
            self.config.capacity() - used_count
        }
    }

    /// Number of ids in the configured window
    pub fn capacity(&self) -> u64 {
        self.config.capacity()
    }

    /// Current range list, in canonical form
    pub fn ranges(&self) -> &[IndexRange] {
        &self.ranges
    }

    /// Whether no id is used
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Release every id
    pub fn clear(&mut self) {
        self.ranges.clear();
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    // ===== INTERNAL =====

    fn mark_used(&mut self, id: u32) {
        if !self.config.contains(id) {
            bridge_warn!(SOURCE, "Ignoring id {} outside index window {}..={}",
                id, self.config.first_index, self.config.last_index);
            return;
        }

        // First range that ends at or after id
        let index = self.ranges.partition_point(|r| r.max < id);
        if self.ranges.get(index).is_some_and(|r| r.min <= id) {
            return;
        }

        // ranges[index - 1].max < id and id < ranges[index].min, so neither
        // side of these comparisons can overflow
        let joins_prev = index > 0 && self.ranges[index - 1].max + 1 == id;
        let joins_next = self.ranges.get(index).is_some_and(|r| id + 1 == r.min);

        match (joins_prev, joins_next) {
            (true, true) => {
                self.ranges[index - 1].max = self.ranges[index].max;
                self.ranges.remove(index);
            }
            (true, false) => self.ranges[index - 1].max = id,
            (false, true) => self.ranges[index].min = id,
            (false, false) => self.ranges.insert(index, IndexRange::single(id)),
        }
    }

    fn mark_free(&mut self, id: u32) {
        let index = self.ranges.partition_point(|r| r.max < id);
        let Some(range) = self.ranges.get_mut(index) else {
            return;
        };
        if range.min > id {
            return;
        }

        if range.min == range.max {
            self.ranges.remove(index);
        } else if id == range.min {
            range.min += 1;
        } else if id == range.max {
            range.max -= 1;
        } else {
            let upper = IndexRange::new(id + 1, range.max);
            range.max = id - 1;
            self.ranges.insert(index + 1, upper);
        }
    }

    fn mark_range_used(&mut self, start: u32, end: u32) {
        let lo_bound = start.max(self.config.first_index);
        let hi_bound = end.min(self.config.last_index);
        if lo_bound != start || hi_bound != end {
            bridge_warn!(SOURCE, "Ignoring part of {}..={} outside index window {}..={}",
                start, end, self.config.first_index, self.config.last_index);
        }
        if lo_bound > hi_bound {
            return;
        }

        // Every range in lo..hi overlaps or touches lo_bound..=hi_bound
        let lo = self.ranges.partition_point(|r| r.max.saturating_add(1) < lo_bound);
        let hi = self.ranges.partition_point(|r| r.min <= hi_bound.saturating_add(1));

        let merged = if lo < hi {
            IndexRange::new(
                lo_bound.min(self.ranges[lo].min),
                hi_bound.max(self.ranges[hi - 1].max),
            )
        } else {
            IndexRange::new(lo_bound, hi_bound)
        };
        self.ranges.splice(lo..hi, std::iter::once(merged));
    }

    fn mark_range_free(&mut self, start: u32, end: u32) {
        // Every range in lo..hi overlaps start..=end
        let lo = self.ranges.partition_point(|r| r.max < start);
        let hi = self.ranges.partition_point(|r| r.min <= end);
        if lo >= hi {
            return;
        }

        let head = self.ranges[lo];
        let tail = self.ranges[hi - 1];
        let keep_head = (head.min < start).then(|| IndexRange::new(head.min, start - 1));
        let keep_tail = (tail.max > end).then(|| IndexRange::new(end + 1, tail.max));
        self.ranges.splice(lo..hi, keep_head.into_iter().chain(keep_tail));
    }

    /// Fold `ranges[index + 1]` into `ranges[index]` if they touch
    fn merge_with_next(&mut self, index: usize) {
        let touching = match (self.ranges.get(index), self.ranges.get(index + 1)) {
            (Some(current), Some(next)) => current.touches(next),
            _ => false,
        };
        if touching {
            self.ranges[index].max = self.ranges[index + 1].max;
            self.ranges.remove(index + 1);
        }
    }
}

impl Default for IndexAllocator {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "index_allocator_tests.rs"]
mod tests;
