//! Ledger Events
//!
//! Events are emitted during ledger execution and can be indexed off-ledger
//! for building UIs, analytics, and notifications.

use crate::types::{Address, Timestamp};
use crate::Vec;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Event types for indexing and filtering
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
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum EventType {
    // Seat events (0x01 - 0x0F)
    Staked = 0x01,
    Withdrawn = 0x02,

    // Reward events (0x10 - 0x1F)
    RewardAdded = 0x10,
    RewardPaid = 0x11,
    ClaimWindowTruncated = 0x12,

    // Ledger events (0x20 - 0x2F)
    Halted = 0x20,
}

/// Main event enum containing all possible ledger events
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub enum LedgerEvent {
    /// Emitted when a participant stakes into the pool
    Staked {
        participant: Address,
        amount: u64,
        new_shares: u64,
        pool_total: u64,
        timestamp: Timestamp,
    },

    /// Emitted when a participant withdraws stake
    Withdrawn {
        participant: Address,
        amount: u64,
        remaining_shares: u64,
        pool_total: u64,
        timestamp: Timestamp,
    },

    /// Emitted when an issuer deposits a reward, appending a snapshot
    RewardAdded {
        issuer: Address,
        amount: u64,
        snapshot_index: u64,
        pool_total: u64,
        timestamp: Timestamp,
    },

    /// Emitted when a settlement pays out nonzero earnings
    RewardPaid {
        participant: Address,
        amount: u64,
        range_start: u64,
        range_end: u64,
        timestamp: Timestamp,
    },

    /// Emitted when a default-range claim could not reach snapshots older
    /// than the claim window that the participant had not yet settled.
    /// Those rewards stay claimable only through the explicit-range path.
    ClaimWindowTruncated {
        participant: Address,
        window_start: u64,
        settlement_time: Timestamp,
        timestamp: Timestamp,
    },

    /// Emitted once when the ledger latches halted after detecting
    /// corruption; all later mutating calls fail
    Halted { timestamp: Timestamp },
}

impl LedgerEvent {
    /// Get the event type for filtering
    pub fn event_type(&self) -> EventType {
        match self {
            Self::Staked { .. } => EventType::Staked,
            Self::Withdrawn { .. } => EventType::Withdrawn,
            Self::RewardAdded { .. } => EventType::RewardAdded,
            Self::RewardPaid { .. } => EventType::RewardPaid,
            Self::ClaimWindowTruncated { .. } => EventType::ClaimWindowTruncated,
            Self::Halted { .. } => EventType::Halted,
        }
    }

    /// Get the timestamp when the event occurred
    pub fn timestamp(&self) -> Timestamp {
        match self {
            Self::Staked { timestamp, .. } => *timestamp,
            Self::Withdrawn { timestamp, .. } => *timestamp,
            Self::RewardAdded { timestamp, .. } => *timestamp,
            Self::RewardPaid { timestamp, .. } => *timestamp,
            Self::ClaimWindowTruncated { timestamp, .. } => *timestamp,
            Self::Halted { timestamp } => *timestamp,
        }
    }

    /// Serialize event to bytes for storage/transmission
    pub fn to_bytes(&self) -> Vec<u8> {
        borsh::to_vec(self).unwrap_or_default()
    }

    /// Deserialize event from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        borsh::from_slice(bytes).ok()
    }
}

/// Event log for collecting events during execution
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<LedgerEvent>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Emit an event (add to log)
    pub fn emit(&mut self, event: LedgerEvent) {
        self.events.push(event);
    }

    /// Get all events
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Take ownership of all events
    pub fn into_events(self) -> Vec<LedgerEvent> {
        self.events
    }

    /// Filter events by type
    pub fn filter_by_type(&self, event_type: EventType) -> Vec<&LedgerEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Check if any events were emitted
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Get number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true when no events are logged
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
