#![no_std]
mod buyback;
mod clock;
mod contract;
mod error;
mod ledger;
mod math;
mod msg;
mod partner;
mod payout;
mod penalty;
mod storage;

pub use contract::{Staking, StakingClient};
