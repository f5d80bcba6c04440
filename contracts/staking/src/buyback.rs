use soroban_sdk::{log, Address, Env};
use tessera::ExternalPosition;

use crate::{error::ContractError, partner::PartnerProtocolClient, storage::Config};

/// Price of an external position in the system token.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Quote {
    /// Partner asset the partner protocol pays for the position
    pub borrowable: u128,
    /// System token minted to the seller
    pub token_amount: u128,
}

/// `borrowable = shares * days` and `token_amount = floor(borrowable / share_rate)`.
pub fn quote(
    env: &Env,
    position: &ExternalPosition,
    share_rate: i128,
) -> Result<Quote, ContractError> {
    if share_rate <= 0 {
        log!(env, "Staking: Hex stake sell: share rate {} is not positive", share_rate);
        return Err(ContractError::InvalidShareRate);
    }

    let borrowable = position
        .stake_shares
        .checked_mul(u128::from(position.staked_days))
        .ok_or(ContractError::ContractMathError)?;
    let token_amount = borrowable / share_rate.unsigned_abs();
    if token_amount == 0 {
        log!(env, "Staking: Hex stake sell: position is worth nothing");
        return Err(ContractError::InvalidAmount);
    }

    Ok(Quote {
        borrowable,
        token_amount,
    })
}

/// Looks up a position `seller` owns and prices it at the current share rate.
pub fn prepare_sale(
    env: &Env,
    config: &Config,
    seller: &Address,
    position_id: u64,
) -> Result<Quote, ContractError> {
    let partner = PartnerProtocolClient::new(env, &config.partner_protocol);

    let position = partner.query_position(&position_id).ok_or_else(|| {
        log!(env, "Staking: Hex stake sell: position {} does not exist", position_id);
        ContractError::ExternalPositionNotFound
    })?;
    if &position.owner != seller {
        log!(
            env,
            "Staking: Hex stake sell: position {} is not owned by the seller",
            position_id
        );
        return Err(ContractError::PositionNotOwned);
    }

    quote(env, &position, partner.query_share_rate())
}
