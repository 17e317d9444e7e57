//! External Collaborators
//!
//! Abstract contracts the ledger core depends on but does not implement:
//! asset custody transfers, the reward-issuer role check, and the time
//! source. The in-memory implementations here are complete enough to run
//! the ledger standalone and are what the test suites drive.

use crate::errors::{LedgerError, LedgerResult};
use crate::math::checked_add;
use crate::types::{Address, Timestamp};
use crate::BTreeMap;
use crate::Vec;

// ============================================================================
// Contracts
// ============================================================================

/// Moves a fungible asset in and out of ledger custody.
///
/// Two independent instances are used: one for the staked asset and one
/// for the reward asset (which may be the same asset kind or different).
pub trait AssetTransfer {
    /// Move `amount` from `from` into ledger custody
    fn pull(&mut self, from: Address, amount: u64) -> LedgerResult<()>;

    /// Move `amount` out of ledger custody to `to`
    fn push(&mut self, to: Address, amount: u64) -> LedgerResult<()>;
}

/// Gates the privileged reward-deposit operation
pub trait AccessControl {
    /// Whether `caller` holds the reward-issuer role
    fn is_authorized_issuer(&self, caller: &Address) -> bool;
}

/// Monotonic wall-clock time source
pub trait Clock {
    fn now(&self) -> Timestamp;
}

// ============================================================================
// In-memory implementations
// ============================================================================

/// Balance-table asset with explicit custody tracking.
///
/// Conservation holds by construction: every pull debits an owner and
/// credits custody, every push does the reverse.
#[derive(Debug, Clone, Default)]
pub struct TokenVault {
    balances: BTreeMap<Address, u64>,
    custody: u64,
}

impl TokenVault {
    /// Create an empty vault
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: seed an owner balance
    pub fn with_balance(mut self, owner: Address, amount: u64) -> Self {
        self.credit(owner, amount);
        self
    }

    /// Credit an owner directly (faucet for tests and bootstrap)
    pub fn credit(&mut self, owner: Address, amount: u64) {
        let balance = self.balances.entry(owner).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    /// Current balance of `owner`
    pub fn balance_of(&self, owner: &Address) -> u64 {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    /// Amount currently held in ledger custody
    pub fn custody(&self) -> u64 {
        self.custody
    }
}

impl AssetTransfer for TokenVault {
    fn pull(&mut self, from: Address, amount: u64) -> LedgerResult<()> {
        let available = self.balance_of(&from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                owner: from,
                available,
                requested: amount,
            });
        }
        let new_custody = checked_add(self.custody, amount)?;
        self.balances.insert(from, available - amount);
        self.custody = new_custody;
        Ok(())
    }

    fn push(&mut self, to: Address, amount: u64) -> LedgerResult<()> {
        let new_custody = self
            .custody
            .checked_sub(amount)
            .ok_or(LedgerError::TransferFailed { to, amount })?;
        let new_balance = checked_add(self.balance_of(&to), amount)?;
        self.custody = new_custody;
        self.balances.insert(to, new_balance);
        Ok(())
    }
}

/// Allow-list of reward issuers
#[derive(Debug, Clone, Default)]
pub struct IssuerSet {
    issuers: Vec<Address>,
}

impl IssuerSet {
    /// Create an empty set (nobody may deposit rewards)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: grant the issuer role
    pub fn with_issuer(mut self, issuer: Address) -> Self {
        if !self.issuers.contains(&issuer) {
            self.issuers.push(issuer);
        }
        self
    }
}

impl AccessControl for IssuerSet {
    fn is_authorized_issuer(&self, caller: &Address) -> bool {
        self.issuers.contains(caller)
    }
}

/// Deterministic clock driven by the embedding host (or a test)
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now: Timestamp,
}

impl ManualClock {
    /// Start the clock at `now`
    pub fn at(now: Timestamp) -> Self {
        Self { now }
    }

    /// Jump forward by `delta`
    pub fn advance(&mut self, delta: u64) {
        self.now = self.now.saturating_add(delta);
    }

    /// Set an absolute time; never moves backward
    pub fn set(&mut self, t: Timestamp) {
        if t > self.now {
            self.now = t;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now
    }
}

/// Wall-clock seconds since the Unix epoch
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}
