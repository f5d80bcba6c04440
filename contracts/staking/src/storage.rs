use soroban_sdk::{
    contracttype, log, panic_with_error, symbol_short, Address, Env, Symbol, Vec,
};
use tessera::ttl::{
    INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL, PERSISTENT_RENEWAL_THRESHOLD,
    PERSISTENT_TARGET_TTL,
};

use crate::error::ContractError;

pub const ADMIN: Symbol = symbol_short!("ADMIN");
const CONFIG: Symbol = symbol_short!("CONFIG");
const INITIALIZED: Symbol = symbol_short!("INIT");

/// The independent staking programs kept by the ledger.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Pool {
    /// Collateral-backed positions, one receipt per position id
    Collateral = 0,
    /// Positions funded with the partner protocol's token
    Partner = 1,
    /// Positions funded with the system token
    Native = 2,
}

/// What a position was funded with.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AssetKind {
    NativeAsset = 0,
    PartnerAsset = 1,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolParams {
    /// System tokens emitted to the pool for every day
    pub daily_emission: i128,
    /// Stake points per unit of partner asset principal, in bps
    pub partner_multiplier_bps: u64,
    /// Stake points per unit of native principal, in bps
    pub native_multiplier_bps: u64,
    /// Days a position has to be held before early-end penalties stop
    pub commitment_days: u64,
    /// Days after the commitment during which neither penalty nor bonus applies
    pub grace_days: u64,
    /// Bonus gained for every day held past the grace window, in bps
    pub bonus_per_day_bps: u64,
    /// Cap of the late bonus, in bps
    pub max_bonus_bps: u64,
}

impl PoolParams {
    pub fn multiplier_bps(&self, asset: AssetKind) -> u64 {
        match asset {
            AssetKind::NativeAsset => self.native_multiplier_bps,
            AssetKind::PartnerAsset => self.partner_multiplier_bps,
        }
    }

    pub fn validate(&self, env: &Env) -> Result<(), ContractError> {
        tessera::validate_bps!(self.bonus_per_day_bps, self.max_bonus_bps);
        if self.daily_emission < 0 {
            log!(env, "Staking: Validate pool: daily emission can not be negative");
            return Err(ContractError::InvalidConfig);
        }
        if self.partner_multiplier_bps == 0 && self.native_multiplier_bps == 0 {
            log!(env, "Staking: Validate pool: at least one multiplier must be set");
            return Err(ContractError::InvalidConfig);
        }

        Ok(())
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// The system token; this contract is its minting admin
    pub token: Address,
    /// Token of the partner protocol, principal of the partner pool
    pub partner_token: Address,
    /// Native currency accepted as collateral
    pub native_currency: Address,
    /// Issuer of the external stake positions that can be sold to the ledger
    pub partner_protocol: Address,
    /// Receives the collateral of collateral pool positions
    pub treasury: Address,
    /// Timestamp of day 0
    pub launch_timestamp: u64,
    /// Collateral positions can only be opened during the first `launch_window_days` days
    pub launch_window_days: u64,
    pub collateral_pool: PoolParams,
    pub partner_pool: PoolParams,
    pub native_pool: PoolParams,
}

impl Config {
    pub fn pool_params(&self, pool: Pool) -> &PoolParams {
        match pool {
            Pool::Collateral => &self.collateral_pool,
            Pool::Partner => &self.partner_pool,
            Pool::Native => &self.native_pool,
        }
    }

    pub fn set_pool_params(&mut self, pool: Pool, params: PoolParams) {
        match pool {
            Pool::Collateral => self.collateral_pool = params,
            Pool::Partner => self.partner_pool = params,
            Pool::Native => self.native_pool = params,
        }
    }

    /// Maps a collateral address onto the kind of asset it is.
    pub fn asset_kind(&self, env: &Env, asset: &Address) -> Result<AssetKind, ContractError> {
        if asset == &self.native_currency {
            Ok(AssetKind::NativeAsset)
        } else if asset == &self.partner_token {
            Ok(AssetKind::PartnerAsset)
        } else {
            log!(env, "Staking: Asset kind: {} is not accepted as collateral", asset);
            Err(ContractError::UnsupportedAsset)
        }
    }
}

pub fn get_config(env: &Env) -> Config {
    let config = env.storage().instance().get(&CONFIG).unwrap_or_else(|| {
        log!(env, "Staking: Config not set");
        panic_with_error!(env, ContractError::ConfigNotSet)
    });
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);

    config
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().instance().set(&CONFIG, config);
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);
}

/// A day-stamped amount of points a position added to its pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PointCredit {
    pub day: u64,
    pub points: u128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Stake {
    /// Holder of the position
    pub owner: Address,
    /// Receipt id in the collateral pool, 0 everywhere else
    pub position_id: u64,
    /// What the principal was paid in
    pub asset: AssetKind,
    /// Amount of locked value
    pub principal: i128,
    /// Weight of the position in the daily emission of its pool
    pub stake_points: u128,
    /// Day the position started accruing; never changes
    pub start_day: u64,
    /// Principal weighted day of all capital additions, the anchor for penalties and bonus
    pub capital_added_day: u64,
    /// Value of the pool's system token accumulator when the points were last changed
    pub native_debt: u128,
    /// Value of the pool's partner asset accumulator when the points were last changed
    pub partner_debt: u128,
    /// System token rewards accrued before the last capital addition
    pub banked_native: u128,
    /// Partner asset rewards accrued before the last capital addition
    pub banked_partner: u128,
    /// Every credit this position made to the per-day pool points
    pub credits: Vec<PointCredit>,
}

/// Key of a position inside its pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StakeId {
    Position(u64),
    Owner(Address),
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Stake(Pool, StakeId),
    PositionCounter,
}

pub fn get_stake(env: &Env, pool: Pool, id: &StakeId) -> Option<Stake> {
    let key = DataKey::Stake(pool, id.clone());
    let stake = env.storage().persistent().get(&key);
    if stake.is_some() {
        env.storage().persistent().extend_ttl(
            &key,
            PERSISTENT_RENEWAL_THRESHOLD,
            PERSISTENT_TARGET_TTL,
        );
    }

    stake
}

pub fn has_stake(env: &Env, pool: Pool, id: &StakeId) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Stake(pool, id.clone()))
}

pub fn save_stake(env: &Env, pool: Pool, id: &StakeId, stake: &Stake) {
    let key = DataKey::Stake(pool, id.clone());
    env.storage().persistent().set(&key, stake);
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_RENEWAL_THRESHOLD,
        PERSISTENT_TARGET_TTL,
    );
}

pub fn remove_stake(env: &Env, pool: Pool, id: &StakeId) -> Result<(), ContractError> {
    let key = DataKey::Stake(pool, id.clone());
    if !env.storage().persistent().has(&key) {
        log!(env, "Staking: Remove stake: Stake does not exist");
        return Err(ContractError::StakeNotFound);
    }
    env.storage().persistent().remove(&key);

    Ok(())
}

/// Id the next collateral position will receive. Ids start at 1 and are never reused.
pub fn next_position_id(env: &Env) -> u64 {
    env.storage()
        .persistent()
        .get::<_, u64>(&DataKey::PositionCounter)
        .unwrap_or(0)
        + 1
}

pub fn save_position_counter(env: &Env, last_id: u64) {
    env.storage()
        .persistent()
        .set(&DataKey::PositionCounter, &last_id);
    env.storage().persistent().extend_ttl(
        &DataKey::PositionCounter,
        PERSISTENT_RENEWAL_THRESHOLD,
        PERSISTENT_TARGET_TTL,
    );
}

pub mod utils {
    use super::*;

    pub fn is_initialized(e: &Env) -> bool {
        e.storage()
            .instance()
            .get(&INITIALIZED)
            .unwrap_or(false)
    }

    pub fn set_initialized(e: &Env) {
        e.storage().instance().set(&INITIALIZED, &true);
        e.storage()
            .instance()
            .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);
    }

    pub fn save_admin(e: &Env, address: &Address) {
        e.storage().instance().set(&ADMIN, address);
        e.storage()
            .instance()
            .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);
    }

    pub fn get_admin(e: &Env) -> Address {
        e.storage()
            .instance()
            .extend_ttl(INSTANCE_RENEWAL_THRESHOLD, INSTANCE_TARGET_TTL);

        e.storage().instance().get(&ADMIN).unwrap_or_else(|| {
            log!(e, "Staking: Admin not set");
            panic_with_error!(&e, ContractError::AdminNotSet)
        })
    }
}
