/// Z-ordering key for draw items.
///
/// Higher values appear on top of lower values.
#[derive(Debug, Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash, Default)]
pub struct ZIndex(pub i32);

impl ZIndex {
    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }
}

/// Stable sort key for draw items.
///
/// The derived ordering is field order: `z` ascending (back-to-front), then
/// `order` ascending (insertion order within a z-layer).
#[derive(Debug, Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct SortKey {
    /// Z-layer. Lower values are drawn first (further back).
    pub z: ZIndex,
    /// Insertion index within the same z-layer, ensuring stable ordering.
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(z: ZIndex, order: u32) -> Self {
        Self { z, order }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn z_dominates_order() {
        let low = SortKey::new(ZIndex::new(-1), 99);
        let high = SortKey::new(ZIndex::new(2), 0);
        assert!(low < high);
    }

    #[test]
    fn insertion_order_breaks_z_ties() {
        let first = SortKey::new(ZIndex::new(3), 0);
        let second = SortKey::new(ZIndex::new(3), 1);
        assert!(first < second);
    }
}
