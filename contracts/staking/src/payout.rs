use soroban_decimal::Decimal;
use soroban_sdk::{log, vec, Address, Env};
use tessera::BPS_DENOMINATOR;

use crate::{
    error::ContractError,
    ledger::PoolLedger,
    math::{mul_div, to_u128},
    penalty::{adjust, weighted_anchor, Adjustment},
    storage::{AssetKind, PointCredit, PoolParams, Stake},
};

/// Rewards of a closed position, split per stream.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Settlement {
    pub native: Adjustment,
    pub partner: Adjustment,
}

pub fn daily_emission(params: &PoolParams) -> Result<u128, ContractError> {
    to_u128(params.daily_emission)
}

/// Weight of `principal` in a pool, `principal * multiplier`.
pub fn stake_points(principal: i128, multiplier_bps: u64) -> Result<u128, ContractError> {
    Decimal::bps(multiplier_bps)
        .checked_mul_int(to_u128(principal)?)
        .ok_or(ContractError::ContractMathError)
}

/// Builds a new position accruing from `today` and credits its points to the ledger.
#[allow(clippy::too_many_arguments)]
pub fn open_stake(
    env: &Env,
    ledger: &mut PoolLedger,
    params: &PoolParams,
    today: u64,
    owner: Address,
    position_id: u64,
    asset: AssetKind,
    principal: i128,
) -> Result<Stake, ContractError> {
    ledger.roll_forward(today, daily_emission(params)?)?;

    let points = stake_points(principal, params.multiplier_bps(asset))?;
    if points == 0 {
        log!(env, "Staking: Open stake: principal {} earns no points", principal);
        return Err(ContractError::InvalidAmount);
    }
    ledger.credit(today, points)?;

    Ok(Stake {
        owner,
        position_id,
        asset,
        principal,
        stake_points: points,
        start_day: today,
        capital_added_day: today,
        native_debt: ledger.state.native.accumulator,
        partner_debt: ledger.state.partner.accumulator,
        banked_native: 0,
        banked_partner: 0,
        credits: vec![env, PointCredit { day: today, points }],
    })
}

/// Grows a position by `extra` principal from `today` on and returns its new points.
///
/// Rewards accrued with the old points are banked first, so days that already ended
/// keep the weight they were staked with.
pub fn add_capital(
    env: &Env,
    ledger: &mut PoolLedger,
    params: &PoolParams,
    today: u64,
    stake: &mut Stake,
    extra: i128,
) -> Result<u128, ContractError> {
    ledger.roll_forward(today, daily_emission(params)?)?;

    let (earned_native, earned_partner) = earned(env, ledger, stake)?;
    stake.banked_native = stake
        .banked_native
        .checked_add(earned_native)
        .ok_or(ContractError::ContractMathError)?;
    stake.banked_partner = stake
        .banked_partner
        .checked_add(earned_partner)
        .ok_or(ContractError::ContractMathError)?;

    let principal = stake
        .principal
        .checked_add(extra)
        .ok_or(ContractError::ContractMathError)?;
    let points = stake_points(principal, params.multiplier_bps(stake.asset))?;
    let increment = points
        .checked_sub(stake.stake_points)
        .ok_or(ContractError::ContractMathError)?;
    if increment > 0 {
        ledger.credit(today, increment)?;
        stake.credits.push_back(PointCredit {
            day: today,
            points: increment,
        });
    }

    stake.capital_added_day = weighted_anchor(
        stake.capital_added_day,
        to_u128(stake.principal)?,
        today,
        to_u128(extra)?,
    )?;
    stake.principal = principal;
    stake.stake_points = points;
    stake.native_debt = ledger.state.native.accumulator;
    stake.partner_debt = ledger.state.partner.accumulator;

    Ok(points)
}

/// Settles a position at `today` and takes its points out of the pool.
///
/// Penalties go back to the pending rewards of their stream. The partner asset
/// bonus is paid out of the pool's bonus reserve and never exceeds it.
pub fn close_stake(
    env: &Env,
    ledger: &mut PoolLedger,
    params: &PoolParams,
    today: u64,
    stake: &Stake,
) -> Result<Settlement, ContractError> {
    ledger.roll_forward(today, daily_emission(params)?)?;

    let (earned_native, earned_partner) = earned(env, ledger, stake)?;
    let gross_native = stake
        .banked_native
        .checked_add(earned_native)
        .ok_or(ContractError::ContractMathError)?;
    let gross_partner = stake
        .banked_partner
        .checked_add(earned_partner)
        .ok_or(ContractError::ContractMathError)?;

    let effective_days = today.saturating_sub(stake.capital_added_day);
    let native = adjust(gross_native, effective_days, params)?;
    let mut partner = adjust(gross_partner, effective_days, params)?;
    partner.bonus = ledger.state.draw_bonus(partner.bonus);

    ledger.state.native.queue(native.penalty)?;
    ledger.state.partner.queue(partner.penalty)?;
    ledger.debit(&stake.credits)?;

    Ok(Settlement { native, partner })
}

/// Splits partner asset sale proceeds between the stakers of a pool and its bonus
/// reserve, and returns the reserved part.
///
/// The reserve takes `max_bonus / (1 + max_bonus)` of the proceeds, enough to pay the
/// capped bonus on everything that is distributed.
pub fn queue_sale_proceeds(
    env: &Env,
    ledger: &mut PoolLedger,
    params: &PoolParams,
    today: u64,
    received: u128,
) -> Result<u128, ContractError> {
    ledger.roll_forward(today, daily_emission(params)?)?;

    let max_bonus = u128::from(params.max_bonus_bps);
    let reserved = mul_div(
        env,
        received,
        max_bonus,
        u128::from(BPS_DENOMINATOR) + max_bonus,
    )?;
    ledger.state.reserve_bonus(reserved)?;
    ledger.state.partner.queue(received - reserved)?;

    Ok(reserved)
}

fn earned(env: &Env, ledger: &PoolLedger, stake: &Stake) -> Result<(u128, u128), ContractError> {
    let native = ledger
        .state
        .native
        .earned(env, stake.stake_points, stake.native_debt)?;
    let partner = ledger
        .state
        .partner
        .earned(env, stake.stake_points, stake.partner_debt)?;

    Ok((native, partner))
}
