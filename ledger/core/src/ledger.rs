//! Ledger Operations
//!
//! The mutating protocol over the snapshot history and participant
//! registry: stake, withdraw, exit, deposit-reward and claim. Each
//! operation composes the history, registry and earnings calculator,
//! enforces the invariants, and runs inside the single-turn guard.
//!
//! ## Atomicity
//!
//! Every operation is structured validate -> compute -> instruct
//! collaborators -> commit bookkeeping. Precondition failures surface
//! before anything moves; a failed collaborator transfer aborts before the
//! share/snapshot bookkeeping commits, so ledger state is never left
//! half-applied.
//!
//! ## Turn guard
//!
//! At most one mutating entry point may execute per turn. The asset
//! collaborators invoked mid-operation may call back into the embedding
//! host; an explicit in-progress flag rejects any nested mutating call
//! with `ReentrancyViolation` instead of letting it interleave with
//! uncommitted bookkeeping. Corruption-class errors latch the ledger
//! halted: mutating calls fail from then on, reads stay available.

use crate::collaborators::{AccessControl, AssetTransfer, Clock};
use crate::constants::claim;
use crate::earnings::{compute_earnings, EarningsRange};
use crate::errors::{AmountErrorReason, LedgerError, LedgerResult};
use crate::events::{EventLog, LedgerEvent};
use crate::history::{ShareDelta, SnapshotHistory};
use crate::registry::ParticipantRegistry;
use crate::types::{Address, Timestamp};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Tunable ledger parameters
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
pub struct LedgerConfig {
    /// Number of snapshots a range-less claim walks backward over
    pub claim_window: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            claim_window: claim::DEFAULT_WINDOW,
        }
    }
}

/// The reward-distribution ledger.
///
/// Owns the snapshot history, the seat registry and the event log, and
/// drives the injected collaborators: `S` custodies the staked asset, `R`
/// the reward asset, `G` answers the issuer-role check and `C` supplies
/// time.
#[derive(Debug)]
pub struct Ledger<S, R, G, C> {
    pub(crate) config: LedgerConfig,
    pub(crate) history: SnapshotHistory,
    pub(crate) registry: ParticipantRegistry,
    pub(crate) events: EventLog,
    pub(crate) stake_asset: S,
    pub(crate) reward_asset: R,
    pub(crate) access: G,
    pub(crate) clock: C,
    pub(crate) in_turn: bool,
    pub(crate) halted: bool,
}

impl<S, R, G, C> Ledger<S, R, G, C>
where
    S: AssetTransfer,
    R: AssetTransfer,
    G: AccessControl,
    C: Clock,
{
    /// Initialize a fresh ledger: one genesis snapshot, zero total shares
    pub fn new(config: LedgerConfig, stake_asset: S, reward_asset: R, access: G, clock: C) -> Self {
        let genesis_time = clock.now();
        Self {
            config,
            history: SnapshotHistory::new(genesis_time),
            registry: ParticipantRegistry::new(),
            events: EventLog::new(),
            stake_asset,
            reward_asset,
            access,
            clock,
            in_turn: false,
            halted: false,
        }
    }

    // ========================================================================
    // Mutating protocol
    // ========================================================================

    /// Stake `amount` of the staked asset for `caller`.
    ///
    /// Pending earnings are settled first (the settlement timestamp
    /// advance would otherwise silently forfeit unclaimed history), then
    /// the seat and the latest snapshot's share total grow by `amount`
    /// and the staked asset is pulled into custody.
    pub fn stake(&mut self, caller: Address, amount: u64) -> LedgerResult<()> {
        self.run_turn(|ledger| ledger.stake_in_turn(caller, amount))
    }

    /// Withdraw `amount` shares back to `caller` as staked asset
    pub fn withdraw(&mut self, caller: Address, amount: u64) -> LedgerResult<()> {
        self.run_turn(|ledger| ledger.withdraw_in_turn(caller, amount))
    }

    /// Withdraw the caller's full current balance
    pub fn exit(&mut self, caller: Address) -> LedgerResult<()> {
        self.run_turn(|ledger| {
            let seat = ledger.registry.seat(&caller);
            if seat.shares == 0 {
                return Err(LedgerError::NoSeat { participant: caller });
            }
            ledger.withdraw_in_turn(caller, seat.shares)
        })
    }

    /// Deposit `amount` of reward, appending a new snapshot.
    ///
    /// Privileged: `caller` must hold the reward-issuer role. Rejected
    /// with `EmptyPool` while no shares are outstanding, so a snapshot
    /// with a nonzero reward over zero shares can never be created.
    pub fn deposit_reward(&mut self, caller: Address, amount: u64) -> LedgerResult<()> {
        self.run_turn(|ledger| ledger.deposit_reward_in_turn(caller, amount))
    }

    /// Settle the caller's earnings over the default (bounded) range.
    ///
    /// Returns the amount paid out. The settlement timestamp advances to
    /// now even when earnings are zero.
    pub fn claim(&mut self, caller: Address) -> LedgerResult<u64> {
        self.run_turn(|ledger| {
            let now = ledger.clock.now();
            ledger.settle_in_turn(caller, None, now)
        })
    }

    /// Settle the caller's earnings over an explicit snapshot range.
    ///
    /// **Forfeiture hazard**: the settlement timestamp advances to now
    /// regardless of the range chosen. A range narrower than "everything
    /// since last settlement" silently forfeits any reward lying outside
    /// it, with no way to recover it later. Callers opt into this risk.
    pub fn claim_with_range(
        &mut self,
        caller: Address,
        range: EarningsRange,
    ) -> LedgerResult<u64> {
        self.run_turn(|ledger| {
            let now = ledger.clock.now();
            ledger.settle_in_turn(caller, Some(range), now)
        })
    }

    // ========================================================================
    // Read-only surface
    // ========================================================================

    /// Current share balance of `id`
    pub fn share_of(&self, id: &Address) -> u64 {
        self.registry.seat(id).shares
    }

    /// Total shares outstanding
    pub fn total_share(&self) -> u64 {
        self.history.total_shares()
    }

    /// Last-settlement timestamp of `id` (zero if never staked)
    pub fn settlement_time_of(&self, id: &Address) -> Timestamp {
        self.registry.seat(id).settlement_time
    }

    /// Pending earnings of `id` over the default (bounded) range
    pub fn earnings_of(&self, id: &Address) -> LedgerResult<u64> {
        self.earnings_of_range(id, self.default_range())
    }

    /// Pending earnings of `id` over an explicit range
    pub fn earnings_of_range(&self, id: &Address, range: EarningsRange) -> LedgerResult<u64> {
        let seat = self.registry.seat(id);
        compute_earnings(&seat, &self.history, range)
    }

    /// Number of snapshots in the history, genesis included
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Whether the ledger has latched halted
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Configured parameters
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Events emitted so far
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Drain the event log, handing ownership to the caller
    pub fn take_events(&mut self) -> EventLog {
        core::mem::take(&mut self.events)
    }

    /// The staked-asset collaborator
    pub fn stake_asset(&self) -> &S {
        &self.stake_asset
    }

    /// The reward-asset collaborator
    pub fn reward_asset(&self) -> &R {
        &self.reward_asset
    }

    /// Mutable clock access for hosts that drive time explicitly
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Serialize one mutating operation per execution turn.
    ///
    /// The flag is cleared on every exit path; a corruption-class error
    /// latches the halted state before returning.
    fn run_turn<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> LedgerResult<T>,
    ) -> LedgerResult<T> {
        if self.halted {
            return Err(LedgerError::LedgerHalted);
        }
        if self.in_turn {
            return Err(LedgerError::ReentrancyViolation);
        }
        self.in_turn = true;
        let out = op(self);
        self.in_turn = false;

        if let Err(err) = &out {
            if err.is_corruption() {
                self.halted = true;
                self.events.emit(LedgerEvent::Halted {
                    timestamp: self.clock.now(),
                });
            }
        }
        out
    }

    fn default_range(&self) -> EarningsRange {
        EarningsRange::default_for(self.history.len(), self.config.claim_window)
    }

    fn stake_in_turn(&mut self, caller: Address, amount: u64) -> LedgerResult<()> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount {
                amount,
                reason: AmountErrorReason::Zero,
            });
        }

        let now = self.clock.now();
        self.settle_in_turn(caller, None, now)?;

        let seat = self.registry.seat(&caller);
        let new_shares = seat
            .shares
            .checked_add(amount)
            .ok_or(LedgerError::InvalidAmount {
                amount,
                reason: AmountErrorReason::TooLarge,
            })?;
        // Pre-validate the pool-total bump so the commit below cannot fail
        // after the asset has moved
        self.history
            .total_shares()
            .checked_add(amount)
            .ok_or(LedgerError::InvalidAmount {
                amount,
                reason: AmountErrorReason::TooLarge,
            })?;

        self.stake_asset.pull(caller, amount)?;

        self.registry.set_shares(&caller, new_shares);
        let pool_total = self
            .history
            .bump_latest_total_shares(amount, ShareDelta::Increase)?;
        self.events.emit(LedgerEvent::Staked {
            participant: caller,
            amount,
            new_shares,
            pool_total,
            timestamp: now,
        });
        Ok(())
    }

    fn withdraw_in_turn(&mut self, caller: Address, amount: u64) -> LedgerResult<()> {
        let seat = self.registry.seat(&caller);
        if seat.shares == 0 {
            return Err(LedgerError::NoSeat { participant: caller });
        }
        if amount == 0 {
            return Err(LedgerError::InvalidAmount {
                amount,
                reason: AmountErrorReason::Zero,
            });
        }
        if amount > seat.shares {
            return Err(LedgerError::InsufficientShares {
                available: seat.shares,
                requested: amount,
            });
        }
        // Conservation gives pool total >= any seat's shares; anything
        // else is corrupted bookkeeping, caught before assets move
        if self.history.total_shares() < amount {
            return Err(LedgerError::InvariantViolation {
                detail: "seat shares exceed pool total",
            });
        }

        let now = self.clock.now();
        self.settle_in_turn(caller, None, now)?;

        let remaining_shares = self.registry.seat(&caller).shares - amount;

        self.stake_asset.push(caller, amount)?;

        self.registry.set_shares(&caller, remaining_shares);
        let pool_total = self
            .history
            .bump_latest_total_shares(amount, ShareDelta::Decrease)?;
        self.events.emit(LedgerEvent::Withdrawn {
            participant: caller,
            amount,
            remaining_shares,
            pool_total,
            timestamp: now,
        });
        Ok(())
    }

    fn deposit_reward_in_turn(&mut self, caller: Address, amount: u64) -> LedgerResult<()> {
        if !self.access.is_authorized_issuer(&caller) {
            return Err(LedgerError::Unauthorized { caller });
        }
        if amount == 0 {
            return Err(LedgerError::InvalidAmount {
                amount,
                reason: AmountErrorReason::Zero,
            });
        }
        if self.history.total_shares() == 0 {
            return Err(LedgerError::EmptyPool);
        }

        let now = self.clock.now();
        self.reward_asset.pull(caller, amount)?;

        let snapshot_index = self.history.append(now, amount);
        self.events.emit(LedgerEvent::RewardAdded {
            issuer: caller,
            amount,
            snapshot_index: snapshot_index as u64,
            pool_total: self.history.total_shares(),
            timestamp: now,
        });
        Ok(())
    }

    /// Compute and pay out earnings, then advance the settlement time.
    ///
    /// The timestamp advance is unconditional (zero earnings and partial
    /// ranges included) and is exactly why stake/withdraw settle first. A
    /// failed payout aborts before the advance, so a transfer failure
    /// never forfeits anything.
    fn settle_in_turn(
        &mut self,
        caller: Address,
        range: Option<EarningsRange>,
        now: Timestamp,
    ) -> LedgerResult<u64> {
        let seat = self.registry.seat(&caller);
        let used_default = range.is_none();
        let range = range.unwrap_or_else(|| self.default_range());

        let earned = compute_earnings(&seat, &self.history, range)?;

        if earned > 0 {
            self.reward_asset.push(caller, earned)?;
        }

        self.registry.advance_settlement_time(&caller, now);

        if earned > 0 {
            self.events.emit(LedgerEvent::RewardPaid {
                participant: caller,
                amount: earned,
                range_start: range.start as u64,
                range_end: range.end as u64,
                timestamp: now,
            });
        }

        // Default-window stranding signal: the youngest pre-window entry
        // carries the greatest pre-window timestamp, and every non-genesis
        // entry carries a reward, so one O(1) probe decides whether this
        // claim left older unsettled rewards behind.
        if used_default && seat.shares > 0 && range.start > 1 {
            if let Some(prev) = self.history.get(range.start - 1) {
                if prev.timestamp >= seat.settlement_time {
                    self.events.emit(LedgerEvent::ClaimWindowTruncated {
                        participant: caller,
                        window_start: range.start as u64,
                        settlement_time: seat.settlement_time,
                        timestamp: now,
                    });
                }
            }
        }

        Ok(earned)
    }
}
