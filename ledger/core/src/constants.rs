//! Ledger Constants
//!
//! All magic numbers and configuration defaults for the poolshare ledger.

/// Token units
pub mod token {
    /// Decimal places for both the staked and reward assets
    pub const DECIMALS: u8 = 8;
    /// One unit with decimals (1 token = 100_000_000 base units)
    pub const ONE: u64 = 100_000_000;
}

/// Claim-range configuration
pub mod claim {
    /// Default number of snapshots a range-less claim walks backward over.
    ///
    /// Bounds the cost of the default claim path to a constant regardless of
    /// total history length. Rewards older than the window are reachable only
    /// through the explicit-range entry point.
    pub const DEFAULT_WINDOW: u32 = 365;
}
