#![no_std]

pub mod ttl;
pub mod utils;

use soroban_sdk::{contracttype, Address};

/// Length of one staking day, in seconds.
pub const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Basis points denominator (100% = 10_000 bps).
pub const BPS_DENOMINATOR: u64 = 10_000;

/// A tokenized stake position issued by the partner protocol. The ledger only reads it
/// and asks the partner protocol to consume it on buy-back.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExternalPosition {
    /// Current holder of the position receipt
    pub owner: Address,
    /// Shares the position was credited with when it was started
    pub stake_shares: u128,
    /// Committed length of the position, in days
    pub staked_days: u64,
}
