//! Error Types for the poolshare Ledger
//!
//! Typed errors with stable codes for logging and clear feedback for
//! callers. Every precondition failure is surfaced before any state
//! mutation; corruption-class errors additionally halt the ledger.

use crate::types::Address;

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Main error enum for all ledger operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    // ============ Amount Errors ============
    /// Invalid amount provided on a mutating call
    InvalidAmount { amount: u64, reason: AmountErrorReason },

    // ============ Seat Errors ============
    /// Participant has never staked or holds zero shares
    NoSeat { participant: Address },

    /// Withdrawal beyond current holdings
    InsufficientShares { available: u64, requested: u64 },

    // ============ Authorization Errors ============
    /// Caller does not hold the reward-issuer role
    Unauthorized { caller: Address },

    // ============ Turn Errors ============
    /// Nested mutating call within one execution turn
    ReentrancyViolation,

    /// Ledger has latched halted after detecting corruption
    LedgerHalted,

    // ============ Range / Snapshot Errors ============
    /// Earnings range bounds are out of order or beyond history length
    InvalidRange { start: usize, end: usize, len: usize },

    /// A snapshot with zero total shares carries a nonzero reward
    InvalidSnapshot { index: usize },

    // ============ Math Errors ============
    /// Division by zero during reward calculation
    DivisionByZero,

    /// Arithmetic overflow occurred
    Overflow,

    // ============ Bookkeeping Errors ============
    /// Internal bookkeeping invariant would be broken; indicates a bug
    InvariantViolation { detail: &'static str },

    /// Reward deposit against a pool with no shares outstanding
    EmptyPool,

    // ============ Collaborator Errors ============
    /// Asset source lacks balance for a pull into custody
    InsufficientBalance {
        owner: Address,
        available: u64,
        requested: u64,
    },

    /// Asset push out of custody failed
    TransferFailed { to: Address, amount: u64 },

    // ============ Storage Errors ============
    /// Persisted ledger state failed to decode or validate
    CorruptState,
}

/// Reasons for amount-related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountErrorReason {
    /// Amount is zero when non-zero required
    Zero,
    /// Amount would overflow pool or seat bookkeeping
    TooLarge,
}

impl LedgerError {
    /// Returns a stable error code for logging/debugging
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidAmount { .. } => "E001_INVALID_AMOUNT",
            Self::NoSeat { .. } => "E002_NO_SEAT",
            Self::InsufficientShares { .. } => "E003_INSUFFICIENT_SHARES",
            Self::Unauthorized { .. } => "E010_UNAUTHORIZED",
            Self::ReentrancyViolation => "E020_REENTRANCY",
            Self::LedgerHalted => "E021_LEDGER_HALTED",
            Self::InvalidRange { .. } => "E030_INVALID_RANGE",
            Self::InvalidSnapshot { .. } => "E031_INVALID_SNAPSHOT",
            Self::DivisionByZero => "E032_DIV_ZERO",
            Self::Overflow => "E033_OVERFLOW",
            Self::InvariantViolation { .. } => "E040_INVARIANT",
            Self::EmptyPool => "E041_EMPTY_POOL",
            Self::InsufficientBalance { .. } => "E050_INSUFFICIENT_BALANCE",
            Self::TransferFailed { .. } => "E051_TRANSFER_FAILED",
            Self::CorruptState => "E060_CORRUPT_STATE",
        }
    }

    /// Returns true if this error is recoverable (caller can fix inputs
    /// and reissue the operation)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount { .. }
                | Self::InsufficientShares { .. }
                | Self::InsufficientBalance { .. }
                | Self::InvalidRange { .. }
                | Self::EmptyPool
        )
    }

    /// Returns true if this error indicates internal corruption.
    ///
    /// Corruption-class failures halt further mutating operations on the
    /// ledger rather than being silently absorbed.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::InvariantViolation { .. }
                | Self::InvalidSnapshot { .. }
                | Self::DivisionByZero
                | Self::CorruptState
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_error_codes_unique() {
        let errors = [
            LedgerError::InvalidAmount {
                amount: 0,
                reason: AmountErrorReason::Zero,
            },
            LedgerError::NoSeat {
                participant: [0u8; 32],
            },
            LedgerError::InsufficientShares {
                available: 1,
                requested: 2,
            },
            LedgerError::Unauthorized { caller: [0u8; 32] },
            LedgerError::ReentrancyViolation,
            LedgerError::LedgerHalted,
            LedgerError::InvalidRange {
                start: 2,
                end: 1,
                len: 3,
            },
            LedgerError::InvalidSnapshot { index: 1 },
            LedgerError::DivisionByZero,
            LedgerError::Overflow,
            LedgerError::InvariantViolation { detail: "x" },
            LedgerError::EmptyPool,
            LedgerError::InsufficientBalance {
                owner: [0u8; 32],
                available: 1,
                requested: 2,
            },
            LedgerError::TransferFailed {
                to: [0u8; 32],
                amount: 1,
            },
            LedgerError::CorruptState,
        ];

        let codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        let unique: BTreeSet<_> = codes.iter().collect();
        assert_eq!(codes.len(), unique.len(), "Error codes must be unique");
    }

    #[test]
    fn test_corruption_classification() {
        assert!(LedgerError::DivisionByZero.is_corruption());
        assert!(LedgerError::InvalidSnapshot { index: 0 }.is_corruption());
        assert!(LedgerError::InvariantViolation { detail: "t" }.is_corruption());
        assert!(!LedgerError::ReentrancyViolation.is_corruption());
        assert!(!LedgerError::EmptyPool.is_corruption());
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(LedgerError::EmptyPool.is_recoverable());
        assert!(!LedgerError::LedgerHalted.is_recoverable());
        assert!(!LedgerError::InvariantViolation { detail: "t" }.is_recoverable());
    }
}
