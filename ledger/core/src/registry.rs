//! Participant Registry
//!
//! Maps participant identity to a seat record. The registry exclusively
//! owns all seats; field writers here perform no validation because every
//! precondition is checked by the ledger operations before a write.

use crate::types::{Address, Seat, Timestamp};
use crate::BTreeMap;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// The seat table, keyed by participant address
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
)]
pub struct ParticipantRegistry {
    seats: BTreeMap<Address, Seat>,
}

impl ParticipantRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a registry from a persisted seat table
    pub fn from_seats(seats: BTreeMap<Address, Seat>) -> Self {
        Self { seats }
    }

    /// The seat for `id`, zero-valued if absent.
    ///
    /// Absence is not an error: it represents a participant who never
    /// staked.
    pub fn seat(&self, id: &Address) -> Seat {
        self.seats.get(id).copied().unwrap_or_default()
    }

    /// Overwrite the share balance for `id`, creating the seat if needed
    pub fn set_shares(&mut self, id: &Address, shares: u64) {
        self.seats.entry(*id).or_default().shares = shares;
    }

    /// Advance the settlement time for `id`, creating the seat if needed.
    ///
    /// Settlement time only ever moves forward; an older timestamp is a
    /// no-op rather than a regression.
    pub fn advance_settlement_time(&mut self, id: &Address, t: Timestamp) {
        let seat = self.seats.entry(*id).or_default();
        if t > seat.settlement_time {
            seat.settlement_time = t;
        }
    }

    /// Number of seats ever created
    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    /// Sum of all seats' shares, widened to avoid overflow
    pub fn total_seat_shares(&self) -> u128 {
        self.seats.values().map(|s| s.shares as u128).sum()
    }

    /// Iterate over all (address, seat) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&Address, &Seat)> {
        self.seats.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: Address = [1u8; 32];

    #[test]
    fn test_absent_seat_is_zero_valued() {
        let registry = ParticipantRegistry::new();
        let seat = registry.seat(&ALICE);
        assert_eq!(seat, Seat::default());
        assert_eq!(registry.seat_count(), 0);
    }

    #[test]
    fn test_set_shares_creates_seat() {
        let mut registry = ParticipantRegistry::new();
        registry.set_shares(&ALICE, 100);

        assert_eq!(registry.seat(&ALICE).shares, 100);
        assert_eq!(registry.seat_count(), 1);
        assert_eq!(registry.total_seat_shares(), 100);
    }

    #[test]
    fn test_seat_survives_zero_shares() {
        let mut registry = ParticipantRegistry::new();
        registry.set_shares(&ALICE, 100);
        registry.set_shares(&ALICE, 0);

        assert_eq!(registry.seat_count(), 1);
        assert!(!registry.seat(&ALICE).is_staked());
    }

    #[test]
    fn test_settlement_time_never_decreases() {
        let mut registry = ParticipantRegistry::new();
        registry.advance_settlement_time(&ALICE, 50);
        registry.advance_settlement_time(&ALICE, 40);

        assert_eq!(registry.seat(&ALICE).settlement_time, 50);

        registry.advance_settlement_time(&ALICE, 60);
        assert_eq!(registry.seat(&ALICE).settlement_time, 60);
    }
}
