use anchor_lang::prelude::*;

/// One point of a pool's rate or APY time series.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RateEntry {
    pub timestamp: i64,
    pub value: u64,
}

impl RateEntry {
    pub const LEN: usize = 8 + 8;
}

/// Value in force at `timestamp`.
///
/// Histories are appended with a monotonic clock, so they are sorted by
/// timestamp and a binary search finds the last entry at or before the
/// query. Several entries sharing a timestamp resolve to the latest one.
/// A query older than the whole series answers with the earliest entry.
pub fn value_at(history: &[RateEntry], timestamp: i64) -> Option<u64> {
    match history.partition_point(|entry| entry.timestamp <= timestamp) {
        0 => history.first().map(|entry| entry.value),
        idx => Some(history[idx - 1].value),
    }
}

/// First timestamp strictly after `timestamp` at which the series changes.
pub fn next_change(history: &[RateEntry], timestamp: i64) -> Option<i64> {
    let idx = history.partition_point(|entry| entry.timestamp <= timestamp);
    history.get(idx).map(|entry| entry.timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(i64, u64)]) -> Vec<RateEntry> {
        points
            .iter()
            .map(|&(timestamp, value)| RateEntry { timestamp, value })
            .collect()
    }

    #[test]
    fn test_value_at_picks_latest_not_after_query() {
        let history = series(&[(100, 1), (200, 2), (300, 3)]);
        assert_eq!(value_at(&history, 100), Some(1));
        assert_eq!(value_at(&history, 199), Some(1));
        assert_eq!(value_at(&history, 250), Some(2));
        assert_eq!(value_at(&history, 10_000), Some(3));
    }

    #[test]
    fn test_value_at_ties_resolve_to_last_appended() {
        let history = series(&[(100, 1), (200, 2), (200, 5), (200, 7)]);
        assert_eq!(value_at(&history, 200), Some(7));
    }

    #[test]
    fn test_value_at_before_history_returns_earliest() {
        let history = series(&[(100, 4), (200, 2)]);
        assert_eq!(value_at(&history, 0), Some(4));
        assert_eq!(value_at(&[], 50), None);
    }

    #[test]
    fn test_next_change() {
        let history = series(&[(100, 1), (200, 2), (200, 3)]);
        assert_eq!(next_change(&history, 50), Some(100));
        assert_eq!(next_change(&history, 100), Some(200));
        assert_eq!(next_change(&history, 200), None);
    }
}
