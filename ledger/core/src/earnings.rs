//! Earnings Calculator
//!
//! Computes the proportional reward owed to a seat over a half-open range
//! of snapshot indices by walking the history backward. Pending earnings
//! are never stored; they are always recomputed from history, which makes
//! the walk's cost and exactness central to the whole ledger.

use crate::errors::{LedgerError, LedgerResult};
use crate::history::SnapshotHistory;
use crate::math::mul_div;
use crate::types::Seat;

/// A half-open range `[start, end)` of snapshot indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EarningsRange {
    pub start: usize,
    pub end: usize,
}

impl EarningsRange {
    /// The default range for a claim that gives no explicit bounds:
    /// the newest `window` snapshots.
    ///
    /// This bounds the walk to a constant number of snapshots regardless
    /// of total history length.
    pub fn default_for(history_len: usize, window: u32) -> Self {
        Self {
            start: history_len.saturating_sub(window as usize),
            end: history_len,
        }
    }

    /// Number of snapshots the range covers
    pub fn span(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

/// Compute the reward owed to `seat` over `range`.
///
/// Walks indices from `range.end - 1` down to `range.start`, accumulating
/// `reward_received * seat.shares / total_shares` (truncating division) for
/// every snapshot not older than the seat's settlement time. The walk stops
/// at the first snapshot older than the settlement time: history is
/// time-ordered, so every earlier snapshot is excluded as well. The early
/// stop is required for exactness, not an optimization; without it a
/// settled snapshot would be counted twice.
///
/// A visited snapshot with a nonzero reward but zero total shares cannot
/// be produced by correct ledger operation and fails closed with
/// `InvalidSnapshot` instead of being skipped.
pub fn compute_earnings(
    seat: &Seat,
    history: &SnapshotHistory,
    range: EarningsRange,
) -> LedgerResult<u64> {
    if range.start > range.end || range.end > history.len() {
        return Err(LedgerError::InvalidRange {
            start: range.start,
            end: range.end,
            len: history.len(),
        });
    }

    if seat.shares == 0 {
        return Ok(0);
    }

    let mut total: u128 = 0;
    for index in (range.start..range.end).rev() {
        let snapshot = history.get(index).ok_or(LedgerError::InvalidRange {
            start: range.start,
            end: range.end,
            len: history.len(),
        })?;

        if snapshot.timestamp < seat.settlement_time {
            break;
        }
        if snapshot.reward_received == 0 {
            // Genesis carries no reward; nothing to divide
            continue;
        }
        if snapshot.total_shares == 0 {
            return Err(LedgerError::InvalidSnapshot { index });
        }

        let part = mul_div(snapshot.reward_received, seat.shares, snapshot.total_shares)?;
        total += part as u128;
    }

    u64::try_from(total).map_err(|_| LedgerError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::ShareDelta;
    use crate::types::Snapshot;

    fn seat(shares: u64, settlement_time: u64) -> Seat {
        Seat {
            settlement_time,
            shares,
        }
    }

    /// Genesis at t=0, then rewards (10, t=100, total=100) and
    /// (20, t=200, total=200).
    fn two_reward_history() -> SnapshotHistory {
        let mut history = SnapshotHistory::new(0);
        history.bump_latest_total_shares(100, ShareDelta::Increase).unwrap();
        history.append(100, 10);
        history.bump_latest_total_shares(100, ShareDelta::Increase).unwrap();
        history.append(200, 20);
        history
    }

    #[test]
    fn test_full_range_sum() {
        let history = two_reward_history();
        // 100 shares held since t=0: 10*100/100 + 20*100/200 = 10 + 10
        let earned =
            compute_earnings(&seat(100, 0), &history, EarningsRange { start: 0, end: 3 })
                .unwrap();
        assert_eq!(earned, 20);
    }

    #[test]
    fn test_settlement_time_stops_walk() {
        let history = two_reward_history();
        // Settled at t=150: only the t=200 snapshot counts
        let earned =
            compute_earnings(&seat(100, 150), &history, EarningsRange { start: 0, end: 3 })
                .unwrap();
        assert_eq!(earned, 10);
    }

    #[test]
    fn test_zero_shares_short_circuits() {
        let history = two_reward_history();
        let earned =
            compute_earnings(&seat(0, 0), &history, EarningsRange { start: 0, end: 3 })
                .unwrap();
        assert_eq!(earned, 0);
    }

    #[test]
    fn test_genesis_contributes_nothing() {
        let history = SnapshotHistory::new(0);
        let earned =
            compute_earnings(&seat(100, 0), &history, EarningsRange { start: 0, end: 1 })
                .unwrap();
        assert_eq!(earned, 0);
    }

    #[test]
    fn test_narrow_range_excludes_older_rewards() {
        let history = two_reward_history();
        let earned =
            compute_earnings(&seat(100, 0), &history, EarningsRange { start: 2, end: 3 })
                .unwrap();
        assert_eq!(earned, 10);
    }

    #[test]
    fn test_invalid_range_bounds() {
        let history = two_reward_history();
        assert!(matches!(
            compute_earnings(&seat(100, 0), &history, EarningsRange { start: 2, end: 1 }),
            Err(LedgerError::InvalidRange { .. })
        ));
        assert!(matches!(
            compute_earnings(&seat(100, 0), &history, EarningsRange { start: 0, end: 4 }),
            Err(LedgerError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_zero_total_shares_fails_closed() {
        // Hand-built corrupt entry: nonzero reward over zero shares
        let entries = vec![
            Snapshot::genesis(0),
            Snapshot::reward(100, 10, 0),
        ];
        let history = SnapshotHistory::from_entries(entries).unwrap();

        assert_eq!(
            compute_earnings(&seat(100, 0), &history, EarningsRange { start: 0, end: 2 }),
            Err(LedgerError::InvalidSnapshot { index: 1 })
        );
    }

    #[test]
    fn test_truncating_division() {
        let mut history = SnapshotHistory::new(0);
        history.bump_latest_total_shares(300, ShareDelta::Increase).unwrap();
        history.append(100, 10);

        // 10 * 100 / 300 = 3 (truncated)
        let earned =
            compute_earnings(&seat(100, 0), &history, EarningsRange { start: 0, end: 2 })
                .unwrap();
        assert_eq!(earned, 3);
    }

    #[test]
    fn test_default_range_window() {
        assert_eq!(
            EarningsRange::default_for(400, 365),
            EarningsRange { start: 35, end: 400 }
        );
        assert_eq!(
            EarningsRange::default_for(10, 365),
            EarningsRange { start: 0, end: 10 }
        );
    }
}
