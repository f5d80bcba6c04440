use soroban_sdk::contracttype;

use crate::storage::{Config, PoolParams};

/// Emission and curve of every pool, set at launch.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolsInitInfo {
    pub collateral_pool: PoolParams,
    pub partner_pool: PoolParams,
    pub native_pool: PoolParams,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigResponse {
    pub config: Config,
}

/// Outcome of ending a partner pool position; every amount is in the system token.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PartnerStakePayout {
    pub payable: i128,
    pub penalty: i128,
    pub bonus: i128,
}

/// Outcome of ending a native pool position, which earns from both reward streams.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NativeStakePayout {
    /// System token rewards after penalty
    pub payable_native: i128,
    /// Partner asset rewards after penalty
    pub payable_partner: i128,
    /// System token rewards forfeited by an early end
    pub penalty: i128,
    /// Partner asset rewards forfeited by an early end
    pub penalty_partner: i128,
    pub bonus_native: i128,
    pub bonus_partner: i128,
}
