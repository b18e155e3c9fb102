//! Date interval filtering of block lists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::block::{BlockStatus, BlockSummary};

/// Closed interval between two instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateInterval {
    /// Creates an interval, swapping the bounds if they are reversed.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        if end < start {
            Self { start: end, end: start }
        } else {
            Self { start, end }
        }
    }

    /// Returns true if the instant lies within the interval.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Returns true if the two intervals share at least one instant.
    pub fn overlaps(&self, other: &DateInterval) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// Filter criteria for block lists.
#[derive(Debug, Clone, Default)]
pub struct BlockFilter {
    /// Keep blocks whose observation window overlaps this interval.
    pub interval: Option<DateInterval>,
    /// Keep blocks with this status.
    pub status: Option<BlockStatus>,
}

impl BlockFilter {
    /// Creates a new empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the interval filter.
    pub fn with_interval(mut self, interval: DateInterval) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Sets the status filter.
    pub fn with_status(mut self, status: BlockStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns true if the block matches this filter.
    ///
    /// Blocks without an observation window never match an interval filter.
    pub fn matches(&self, block: &BlockSummary) -> bool {
        if let Some(ref interval) = self.interval {
            match block.observation_window {
                Some(ref window) if window.overlaps(interval) => {}
                _ => return false,
            }
        }

        if let Some(status) = self.status {
            if block.status != status {
                return false;
            }
        }

        true
    }

    /// Returns the matching blocks, preserving order.
    pub fn apply<'a>(&self, blocks: &'a [BlockSummary]) -> Vec<&'a BlockSummary> {
        blocks.iter().filter(|b| self.matches(b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::BlockId;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, d, 0, 0, 0).unwrap()
    }

    fn make_block(id: i64, window: Option<(u32, u32)>, status: BlockStatus) -> BlockSummary {
        BlockSummary {
            id: BlockId::new(id),
            name: format!("block-{}", id),
            status,
            observation_window: window.map(|(s, e)| DateInterval::new(day(s), day(e))),
        }
    }

    #[test]
    fn test_interval_new_orders_bounds() {
        let interval = DateInterval::new(day(10), day(2));
        assert_eq!(interval.start, day(2));
        assert_eq!(interval.end, day(10));
    }

    #[test]
    fn test_interval_contains_is_inclusive() {
        let interval = DateInterval::new(day(2), day(10));
        assert!(interval.contains(day(2)));
        assert!(interval.contains(day(10)));
        assert!(!interval.contains(day(11)));
    }

    #[test]
    fn test_interval_overlaps() {
        let a = DateInterval::new(day(1), day(5));
        assert!(a.overlaps(&DateInterval::new(day(5), day(9))));
        assert!(a.overlaps(&DateInterval::new(day(2), day(3))));
        assert!(!a.overlaps(&DateInterval::new(day(6), day(9))));
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let filter = BlockFilter::new();
        assert!(filter.matches(&make_block(1, None, BlockStatus::Deleted)));
    }

    #[test]
    fn test_filter_by_interval() {
        let filter = BlockFilter::new().with_interval(DateInterval::new(day(10), day(20)));

        assert!(filter.matches(&make_block(1, Some((15, 25)), BlockStatus::Active)));
        assert!(!filter.matches(&make_block(2, Some((1, 5)), BlockStatus::Active)));
        assert!(!filter.matches(&make_block(3, None, BlockStatus::Active)));
    }

    #[test]
    fn test_combined_filters_preserve_order() {
        let filter = BlockFilter::new()
            .with_interval(DateInterval::new(day(1), day(30)))
            .with_status(BlockStatus::Active);

        let blocks = vec![
            make_block(3, Some((2, 3)), BlockStatus::Active),
            make_block(1, Some((2, 3)), BlockStatus::Completed),
            make_block(2, Some((4, 8)), BlockStatus::Active),
        ];

        let ids: Vec<i64> = filter.apply(&blocks).iter().map(|b| b.id.value()).collect();
        assert_eq!(ids, vec![3, 2]);
    }
}
