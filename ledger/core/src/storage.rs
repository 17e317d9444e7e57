//! Durable Ledger State
//!
//! The snapshot sequence and the seat table must survive process restarts
//! when the ledger does not run inside an externally-persisted execution
//! environment. `LedgerState` is the borsh-encoded durable layout; a
//! restore revalidates the structural invariants before handing back a
//! live ledger.

use crate::collaborators::{AccessControl, AssetTransfer, Clock};
use crate::errors::{LedgerError, LedgerResult};
use crate::events::EventLog;
use crate::history::SnapshotHistory;
use crate::ledger::{Ledger, LedgerConfig};
use crate::registry::ParticipantRegistry;
use crate::types::{Address, Seat, Snapshot};
use crate::{BTreeMap, Vec};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Everything the ledger persists across restarts.
///
/// Collaborators and the event log are deliberately absent: assets and
/// roles live with their own systems, and events are an emission stream,
/// not state.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct LedgerState {
    /// The full snapshot history, oldest first
    pub snapshots: Vec<Snapshot>,
    /// The seat table
    pub seats: BTreeMap<Address, Seat>,
    /// Configured parameters
    pub config: LedgerConfig,
    /// Whether the ledger had latched halted
    pub halted: bool,
}

impl LedgerState {
    /// Serialize to the durable byte layout
    pub fn to_bytes(&self) -> Vec<u8> {
        borsh::to_vec(self).unwrap_or_default()
    }

    /// Deserialize and structurally validate the durable byte layout
    pub fn from_bytes(bytes: &[u8]) -> LedgerResult<Self> {
        let state: Self = borsh::from_slice(bytes).map_err(|_| LedgerError::CorruptState)?;
        state.validate()?;
        Ok(state)
    }

    /// Structural checks: non-empty time-ordered history and share
    /// conservation between the seat table and the latest snapshot
    pub fn validate(&self) -> LedgerResult<()> {
        let history = SnapshotHistory::from_entries(self.snapshots.clone())?;

        let seat_total: u128 = self.seats.values().map(|s| s.shares as u128).sum();
        if seat_total != history.total_shares() as u128 {
            return Err(LedgerError::InvariantViolation {
                detail: "seat shares do not sum to pool total",
            });
        }
        Ok(())
    }
}

impl<S, R, G, C> Ledger<S, R, G, C>
where
    S: AssetTransfer,
    R: AssetTransfer,
    G: AccessControl,
    C: Clock,
{
    /// Snapshot the durable state for persistence
    pub fn export_state(&self) -> LedgerState {
        LedgerState {
            snapshots: self.history.entries().to_vec(),
            seats: self.registry.iter().map(|(a, s)| (*a, *s)).collect(),
            config: self.config,
            halted: self.halted,
        }
    }

    /// Rebuild a ledger around fresh collaborators after a restart.
    ///
    /// The state is revalidated; a ledger that was halted comes back
    /// halted.
    pub fn restore(
        state: LedgerState,
        stake_asset: S,
        reward_asset: R,
        access: G,
        clock: C,
    ) -> LedgerResult<Self> {
        state.validate()?;
        let history = SnapshotHistory::from_entries(state.snapshots)?;
        Ok(Self {
            config: state.config,
            history,
            registry: ParticipantRegistry::from_seats(state.seats),
            events: EventLog::new(),
            stake_asset,
            reward_asset,
            access,
            clock,
            in_turn: false,
            halted: state.halted,
        })
    }
}
