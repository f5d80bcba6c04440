use soroban_sdk::Env;
use tessera::SECONDS_PER_DAY;

use crate::storage::Config;

/// Whole days elapsed between launch and `timestamp`. Timestamps before launch count as day 0.
pub fn day_index(timestamp: u64, launch_timestamp: u64) -> u64 {
    timestamp.saturating_sub(launch_timestamp) / SECONDS_PER_DAY
}

pub fn current_day(env: &Env, config: &Config) -> u64 {
    day_index(env.ledger().timestamp(), config.launch_timestamp)
}
