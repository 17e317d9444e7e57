//! Snapshot History
//!
//! Append-only ordered sequence of pool-state snapshots. The history is
//! never empty (a genesis entry is created at initialization), timestamps
//! are non-decreasing, and only the last entry's `total_shares` field is
//! mutable. Once a newer snapshot is appended, the previous entry becomes
//! immutable history, which keeps the backward-walk earnings calculation
//! deterministic regardless of later stake/withdraw activity.

use crate::errors::{LedgerError, LedgerResult};
use crate::types::{Snapshot, Timestamp};
use crate::Vec;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Direction of an in-place share-total amendment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareDelta {
    /// Stake: add to the latest total
    Increase,
    /// Withdraw: subtract from the latest total
    Decrease,
}

/// The append-only pool-state history
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct SnapshotHistory {
    entries: Vec<Snapshot>,
}

impl SnapshotHistory {
    /// Create a history containing only the genesis entry
    pub fn new(now: Timestamp) -> Self {
        let mut entries = Vec::new();
        entries.push(Snapshot::genesis(now));
        Self { entries }
    }

    /// Rebuild a history from persisted entries.
    ///
    /// Fails if the sequence is empty or timestamps are out of order.
    pub fn from_entries(entries: Vec<Snapshot>) -> LedgerResult<Self> {
        let history = Self { entries };
        history.check_well_formed()?;
        Ok(history)
    }

    /// Append a new snapshot for a reward deposit.
    ///
    /// The share total is copied from the current latest entry (shares do
    /// not change merely because a reward was deposited). The stored
    /// timestamp is clamped to the previous entry's so the monotonicity
    /// invariant survives a misbehaving clock. Returns the new index.
    pub fn append(&mut self, now: Timestamp, reward_received: u64) -> usize {
        let ts = now.max(self.latest().timestamp);
        let total = self.total_shares();
        self.entries.push(Snapshot::reward(ts, reward_received, total));
        self.entries.len() - 1
    }

    /// In-place add/subtract on the last entry's `total_shares` only.
    ///
    /// Returns the new total. Fails with `InvariantViolation` if the
    /// subtraction would drive total shares negative.
    pub fn bump_latest_total_shares(
        &mut self,
        delta: u64,
        direction: ShareDelta,
    ) -> LedgerResult<u64> {
        let last = self
            .entries
            .last_mut()
            .ok_or(LedgerError::InvariantViolation {
                detail: "history is empty",
            })?;

        let next = match direction {
            ShareDelta::Increase => last
                .total_shares
                .checked_add(delta)
                .ok_or(LedgerError::Overflow)?,
            ShareDelta::Decrease => last.total_shares.checked_sub(delta).ok_or(
                LedgerError::InvariantViolation {
                    detail: "total shares would go negative",
                },
            )?,
        };

        last.total_shares = next;
        Ok(next)
    }

    /// The latest snapshot
    pub fn latest(&self) -> &Snapshot {
        // Never empty by construction
        &self.entries[self.entries.len() - 1]
    }

    /// Index of the latest snapshot
    pub fn latest_index(&self) -> usize {
        self.entries.len() - 1
    }

    /// Number of snapshots, genesis included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The history is never empty; kept for API completeness
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total shares outstanding (= the latest entry's field)
    pub fn total_shares(&self) -> u64 {
        self.latest().total_shares
    }

    /// Snapshot at `index`, if within bounds
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.entries.get(index)
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[Snapshot] {
        &self.entries
    }

    /// Structural validation: non-empty and time-ordered
    pub fn check_well_formed(&self) -> LedgerResult<()> {
        if self.entries.is_empty() {
            return Err(LedgerError::InvariantViolation {
                detail: "history is empty",
            });
        }
        for pair in self.entries.windows(2) {
            if pair[0].timestamp > pair[1].timestamp {
                return Err(LedgerError::InvariantViolation {
                    detail: "history timestamps out of order",
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genesis_only() {
        let history = SnapshotHistory::new(100);
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest_index(), 0);
        assert_eq!(history.total_shares(), 0);
        assert_eq!(history.latest().reward_received, 0);
    }

    #[test]
    fn test_append_copies_latest_total() {
        let mut history = SnapshotHistory::new(100);
        history.bump_latest_total_shares(50, ShareDelta::Increase).unwrap();

        let index = history.append(200, 10);

        assert_eq!(index, 1);
        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().reward_received, 10);
        assert_eq!(history.latest().total_shares, 50);
        // The superseded entry kept its own total
        assert_eq!(history.get(0).unwrap().total_shares, 50);
    }

    #[test]
    fn test_append_clamps_timestamp() {
        let mut history = SnapshotHistory::new(100);
        // Clock went backwards; the entry must not
        let index = history.append(50, 10);
        assert_eq!(history.get(index).unwrap().timestamp, 100);
        assert!(history.check_well_formed().is_ok());
    }

    #[test]
    fn test_bump_decrease_underflow() {
        let mut history = SnapshotHistory::new(100);
        history.bump_latest_total_shares(30, ShareDelta::Increase).unwrap();

        let result = history.bump_latest_total_shares(31, ShareDelta::Decrease);
        assert!(matches!(
            result,
            Err(LedgerError::InvariantViolation { .. })
        ));
        // Failed bump left the total untouched
        assert_eq!(history.total_shares(), 30);
    }

    #[test]
    fn test_bump_increase_overflow() {
        let mut history = SnapshotHistory::new(100);
        history
            .bump_latest_total_shares(u64::MAX, ShareDelta::Increase)
            .unwrap();
        assert_eq!(
            history.bump_latest_total_shares(1, ShareDelta::Increase),
            Err(LedgerError::Overflow)
        );
    }

    #[test]
    fn test_bump_only_touches_latest() {
        let mut history = SnapshotHistory::new(100);
        history.bump_latest_total_shares(100, ShareDelta::Increase).unwrap();
        history.append(200, 10);
        history.bump_latest_total_shares(50, ShareDelta::Increase).unwrap();

        assert_eq!(history.get(0).unwrap().total_shares, 100);
        assert_eq!(history.get(1).unwrap().total_shares, 150);
    }

    #[test]
    fn test_from_entries_rejects_disorder() {
        let entries = vec![
            Snapshot::genesis(100),
            Snapshot::reward(90, 10, 100),
        ];
        assert!(SnapshotHistory::from_entries(entries).is_err());

        assert!(SnapshotHistory::from_entries(Vec::new()).is_err());
    }
}
