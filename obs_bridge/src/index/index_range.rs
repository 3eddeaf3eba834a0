/// Inclusive span of used ids.
///
/// Invariant: `min <= max`. Ranges held by an [`super::IndexAllocator`] are
/// additionally disjoint and never touch each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexRange {
    pub min: u32,
    pub max: u32,
}

impl IndexRange {
    /// Range covering `min..=max`
    pub fn new(min: u32, max: u32) -> Self {
        debug_assert!(min <= max, "inverted index range: {}..={}", min, max);
        Self { min, max }
    }

    /// Range covering a single id
    pub fn single(id: u32) -> Self {
        Self { min: id, max: id }
    }

    /// Whether `id` lies inside this range
    pub fn contains(&self, id: u32) -> bool {
        self.min <= id && id <= self.max
    }

    /// Number of ids covered (always at least 1)
    pub fn len(&self) -> u64 {
        u64::from(self.max - self.min) + 1
    }

    /// Whether this range ends exactly one id before `other` starts
    pub fn touches(&self, other: &IndexRange) -> bool {
        self.max < other.min && self.max + 1 == other.min
    }
}
