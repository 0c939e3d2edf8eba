// SPDX-License-Identifier: MIT OR Apache-2.0

use bitflags::bitflags;

bitflags! {
    /// What changed on a control since its last layout pass.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DirtyFlags: u8 {
        /// Requested sizes changed (hint, min, max or content).
        const MEASURE = 0b0001;
        /// Placement of the control or its children changed.
        const ARRANGE = 0b0010;
        /// Children changed (added, removed, reordered).
        const CHILDREN = 0b0100;
        /// Everything changed.
        const ALL = Self::MEASURE.bits() | Self::ARRANGE.bits() | Self::CHILDREN.bits();
    }
}

impl Default for DirtyFlags {
    fn default() -> Self {
        Self::ALL
    }
}

impl DirtyFlags {
    /// The flags an ancestor receives when one of its descendants changes.
    ///
    /// A descendant's new size can change every requested size up the chain.
    pub fn propagated(self) -> Self {
        if self.intersects(Self::MEASURE | Self::CHILDREN) {
            Self::MEASURE | Self::ARRANGE
        } else {
            Self::ARRANGE
        }
    }
}

/// Counters for the layout passes of a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvalidationMetrics {
    /// Number of controls marked dirty, ancestors included.
    pub controls_invalidated: usize,
    /// Number of measurements computed by a layout.
    pub measure_runs: usize,
    /// Number of measurements served from a cache.
    pub cache_hits: usize,
    /// Number of arrange passes run by a layout.
    pub arrange_runs: usize,
}

impl InvalidationMetrics {
    /// Reset every counter to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_propagated_flags() {
        assert_eq!(DirtyFlags::MEASURE.propagated(), DirtyFlags::MEASURE | DirtyFlags::ARRANGE);
        assert_eq!(DirtyFlags::CHILDREN.propagated(), DirtyFlags::MEASURE | DirtyFlags::ARRANGE);
        assert_eq!(DirtyFlags::ARRANGE.propagated(), DirtyFlags::ARRANGE);
    }

    #[test]
    fn test_reset_metrics() {
        let mut metrics = InvalidationMetrics {
            measure_runs: 3,
            cache_hits: 2,
            ..Default::default()
        };
        metrics.reset();
        assert_eq!(metrics, InvalidationMetrics::default());
    }
}
