//! Core Types for the poolshare Ledger
//!
//! The two persisted record types (seats and snapshots) plus the
//! fundamental aliases shared by every module.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Type alias for participant addresses (32-byte hash)
pub type Address = [u8; 32];

/// Type alias for monotonic wall-clock timestamps
pub type Timestamp = u64;

// ============ Seat ============

/// A participant's seat in the pool.
///
/// Created on first stake and never deleted; shares may fall back to zero
/// on a full withdrawal. Owned exclusively by the participant registry and
/// mutated only through ledger operations.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
)]
pub struct Seat {
    /// Timestamp of the participant's last settlement (claim or forced
    /// settlement on stake/withdraw); advances monotonically
    pub settlement_time: Timestamp,
    /// Current balance of pool shares owned
    pub shares: u64,
}

impl Seat {
    /// Returns true if the seat currently holds any shares
    pub fn is_staked(&self) -> bool {
        self.shares > 0
    }
}

// ============ Snapshot ============

/// One entry in the pool-state history.
///
/// A snapshot is appended per reward deposit (plus one genesis entry at
/// initialization). `timestamp` and `reward_received` are immutable once
/// appended; `total_shares` is mutated in place by stake/withdraw only
/// while the entry remains the latest. The timestamp always records the
/// creation time: moving it on a share amendment would let a participant
/// whose settlement equals the amendment time re-include an already
/// settled snapshot in a later claim.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
)]
pub struct Snapshot {
    /// Time the snapshot was created
    pub timestamp: Timestamp,
    /// Reward deposited at this snapshot's creation (0 for genesis)
    pub reward_received: u64,
    /// Total shares outstanding as of this snapshot
    pub total_shares: u64,
}

impl Snapshot {
    /// The genesis entry: no reward, no shares outstanding
    pub fn genesis(now: Timestamp) -> Self {
        Self {
            timestamp: now,
            reward_received: 0,
            total_shares: 0,
        }
    }

    /// A reward snapshot carrying the prior latest share total forward
    pub fn reward(now: Timestamp, reward_received: u64, total_shares: u64) -> Self {
        Self {
            timestamp: now,
            reward_received,
            total_shares,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_defaults_to_unstaked() {
        let seat = Seat::default();
        assert_eq!(seat.shares, 0);
        assert_eq!(seat.settlement_time, 0);
        assert!(!seat.is_staked());
    }

    #[test]
    fn test_genesis_snapshot() {
        let genesis = Snapshot::genesis(1_000);
        assert_eq!(genesis.timestamp, 1_000);
        assert_eq!(genesis.reward_received, 0);
        assert_eq!(genesis.total_shares, 0);
    }

    #[test]
    fn test_snapshot_borsh_round_trip() {
        let snap = Snapshot::reward(42, 10, 200);
        let bytes = borsh::to_vec(&snap).unwrap();
        let restored: Snapshot = borsh::from_slice(&bytes).unwrap();
        assert_eq!(snap, restored);
    }
}
