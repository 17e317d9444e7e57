//! poolshare Core Library
//!
//! Snapshot-based accounting engine for a proportional reward-distribution
//! pool: participants stake a fungible asset into a shared pool and later
//! claim rewards proportional to their share of the pool at the time each
//! reward was deposited.
//!
//! ## Key Pieces
//!
//! - **Snapshot History**: append-only log of pool states; only the latest
//!   entry's share total is mutable
//! - **Participant Registry**: per-participant seat records (shares +
//!   last-settlement time)
//! - **Earnings Calculator**: backward walk over a snapshot range, bounded
//!   by a configurable claim window
//! - **Ledger Operations**: stake / withdraw / exit / deposit-reward / claim,
//!   serialized per execution turn with an explicit reentrancy guard
//! - **Collaborators**: injected asset-transfer, access-control and clock
//!   contracts; the core never moves tokens itself
//! - **Storage**: borsh round-trip of the durable ledger state
//!
//! This crate is `no_std` compatible for embedded/WASM targets when built
//! without the default `std` feature.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Re-export collection types for submodules based on feature
#[cfg(not(feature = "std"))]
pub use alloc::collections::BTreeMap;
#[cfg(not(feature = "std"))]
pub use alloc::vec::Vec;
#[cfg(feature = "std")]
pub use std::collections::BTreeMap;
#[cfg(feature = "std")]
pub use std::vec::Vec;

pub mod constants;
pub mod errors;
pub mod types;
pub mod math;
pub mod events;
pub mod history;
pub mod registry;
pub mod earnings;
pub mod collaborators;
pub mod ledger;
pub mod storage;


// Re-exports for convenience
pub use constants::*;
pub use errors::*;
pub use types::*;
pub use math::*;
pub use events::*;
pub use history::*;
pub use registry::*;
pub use earnings::*;
pub use collaborators::*;
pub use ledger::*;
pub use storage::*;
