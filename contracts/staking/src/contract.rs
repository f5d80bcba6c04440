use soroban_sdk::{
    contract, contractimpl, contractmeta, log,
    token::{StellarAssetClient, TokenClient},
    Address, BytesN, Env,
};

use crate::{
    buyback::prepare_sale,
    clock,
    error::ContractError,
    ledger::PoolLedger,
    math::{to_i128, to_u128},
    msg::{ConfigResponse, NativeStakePayout, PartnerStakePayout, PoolsInitInfo},
    partner::PartnerProtocolClient,
    payout::{
        add_capital, close_stake, daily_emission, open_stake, queue_sale_proceeds, Settlement,
    },
    storage::{
        get_config, get_stake, has_stake, next_position_id, remove_stake, save_config,
        save_position_counter, save_stake,
        utils::{self, get_admin, is_initialized},
        AssetKind, Config, Pool, PoolParams, Stake, StakeId,
    },
};

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "Tessera multi-asset staking ledger"
);

#[contract]
pub struct Staking;

pub trait StakingTrait {
    // Launches the program; day 0 starts at the current ledger timestamp
    fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        partner_token: Address,
        native_currency: Address,
        partner_protocol: Address,
        treasury: Address,
        launch_window_days: u64,
        pools: PoolsInitInfo,
    ) -> Result<(), ContractError>;

    // Collateral pool

    fn nft_stake_start(
        env: Env,
        sender: Address,
        amount: i128,
        asset: Address,
    ) -> Result<u128, ContractError>;

    fn nft_stake_end(env: Env, sender: Address, position_id: u64) -> Result<i128, ContractError>;

    fn nft_transfer(
        env: Env,
        from: Address,
        to: Address,
        position_id: u64,
    ) -> Result<(), ContractError>;

    // Partner pool

    fn hdrn_stake_start(env: Env, sender: Address, amount: i128) -> Result<u128, ContractError>;

    fn hdrn_stake_add_capital(
        env: Env,
        sender: Address,
        amount: i128,
    ) -> Result<u128, ContractError>;

    fn hdrn_stake_end(env: Env, sender: Address) -> Result<PartnerStakePayout, ContractError>;

    // Native pool

    fn icsa_stake_start(env: Env, sender: Address, amount: i128) -> Result<u128, ContractError>;

    fn icsa_stake_add_capital(
        env: Env,
        sender: Address,
        amount: i128,
    ) -> Result<u128, ContractError>;

    fn icsa_stake_end(env: Env, sender: Address) -> Result<NativeStakePayout, ContractError>;

    // Buy-back of external positions

    fn hex_stake_sell(env: Env, sender: Address, position_id: u64) -> Result<i128, ContractError>;

    // ADMIN

    fn update_pool_params(
        env: Env,
        sender: Address,
        pool: Pool,
        params: PoolParams,
    ) -> Result<(), ContractError>;

    fn upgrade(env: Env, new_wasm_hash: BytesN<32>) -> Result<(), ContractError>;

    // QUERIES

    fn query_config(env: Env) -> Result<ConfigResponse, ContractError>;

    fn query_admin(env: Env) -> Result<Address, ContractError>;

    fn current_day(env: Env) -> u64;

    fn nft_stakes(env: Env, position_id: u64) -> Result<Stake, ContractError>;

    fn hdrn_stakes(env: Env, owner: Address) -> Result<Stake, ContractError>;

    fn icsa_stakes(env: Env, owner: Address) -> Result<Stake, ContractError>;

    fn nft_pool_points(env: Env, day: u64) -> Result<u128, ContractError>;

    fn hdrn_pool_points(env: Env, day: u64) -> Result<u128, ContractError>;

    fn icsa_pool_points(env: Env, day: u64) -> Result<u128, ContractError>;

    // Previews, returning what the matching call would return right now

    fn simulate_nft_stake_start(
        env: Env,
        sender: Address,
        amount: i128,
        asset: Address,
    ) -> Result<u128, ContractError>;

    fn simulate_nft_stake_end(
        env: Env,
        sender: Address,
        position_id: u64,
    ) -> Result<i128, ContractError>;

    fn simulate_hdrn_stake_start(
        env: Env,
        sender: Address,
        amount: i128,
    ) -> Result<u128, ContractError>;

    fn simulate_hdrn_stake_end(
        env: Env,
        sender: Address,
    ) -> Result<PartnerStakePayout, ContractError>;

    fn simulate_icsa_stake_start(
        env: Env,
        sender: Address,
        amount: i128,
    ) -> Result<u128, ContractError>;

    fn simulate_icsa_stake_end(
        env: Env,
        sender: Address,
    ) -> Result<NativeStakePayout, ContractError>;

    fn simulate_hex_stake_sell(
        env: Env,
        sender: Address,
        position_id: u64,
    ) -> Result<i128, ContractError>;
}

#[contractimpl]
impl StakingTrait for Staking {
    fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        partner_token: Address,
        native_currency: Address,
        partner_protocol: Address,
        treasury: Address,
        launch_window_days: u64,
        pools: PoolsInitInfo,
    ) -> Result<(), ContractError> {
        if is_initialized(&env) {
            log!(&env, "Staking: Initialize: initializing contract twice is not allowed");
            return Err(ContractError::AlreadyInitialized);
        }

        tessera::validate_int_parameters!(launch_window_days as i128);
        let PoolsInitInfo {
            collateral_pool,
            partner_pool,
            native_pool,
        } = pools;
        for params in [&collateral_pool, &partner_pool, &native_pool] {
            params.validate(&env)?;
        }

        let config = Config {
            token,
            partner_token,
            native_currency,
            partner_protocol,
            treasury,
            launch_timestamp: env.ledger().timestamp(),
            launch_window_days,
            collateral_pool,
            partner_pool,
            native_pool,
        };
        save_config(&env, &config);

        for pool in [Pool::Collateral, Pool::Partner, Pool::Native] {
            PoolLedger::start_at(&env, pool, 0);
        }

        utils::save_admin(&env, &admin);
        utils::set_initialized(&env);

        env.events()
            .publish(("initialize", "token"), &config.token);

        Ok(())
    }

    fn nft_stake_start(
        env: Env,
        sender: Address,
        amount: i128,
        asset: Address,
    ) -> Result<u128, ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        let (ledger, stake) = prepare_nft_stake_start(&env, &config, &sender, amount, &asset)?;

        // collateral backs the system token and stays with the treasury
        TokenClient::new(&env, &asset).transfer(&sender, &config.treasury, &amount);

        save_stake(
            &env,
            Pool::Collateral,
            &StakeId::Position(stake.position_id),
            &stake,
        );
        save_position_counter(&env, stake.position_id);
        ledger.save();

        env.events().publish(("nft_stake_start", "user"), &sender);
        env.events()
            .publish(("nft_stake_start", "position_id"), stake.position_id);
        env.events().publish(("nft_stake_start", "asset"), &asset);
        env.events().publish(("nft_stake_start", "amount"), amount);

        Ok(stake.stake_points)
    }

    fn nft_stake_end(env: Env, sender: Address, position_id: u64) -> Result<i128, ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        let (ledger, payout) = prepare_nft_stake_end(&env, &config, &sender, position_id)?;

        remove_stake(&env, Pool::Collateral, &StakeId::Position(position_id))?;
        ledger.save();
        mint(&env, &config, &sender, payout);

        env.events().publish(("nft_stake_end", "user"), &sender);
        env.events()
            .publish(("nft_stake_end", "position_id"), position_id);
        env.events().publish(("nft_stake_end", "payout"), payout);

        Ok(payout)
    }

    fn nft_transfer(
        env: Env,
        from: Address,
        to: Address,
        position_id: u64,
    ) -> Result<(), ContractError> {
        from.require_auth();

        let id = StakeId::Position(position_id);
        let mut stake = load_stake(&env, Pool::Collateral, &id)?;
        if stake.owner != from {
            log!(
                &env,
                "Staking: Nft transfer: position {} is not owned by the sender",
                position_id
            );
            return Err(ContractError::Unauthorized);
        }

        stake.owner = to.clone();
        save_stake(&env, Pool::Collateral, &id, &stake);

        env.events().publish(("nft_transfer", "from"), &from);
        env.events().publish(("nft_transfer", "to"), &to);
        env.events()
            .publish(("nft_transfer", "position_id"), position_id);

        Ok(())
    }

    fn hdrn_stake_start(env: Env, sender: Address, amount: i128) -> Result<u128, ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        let (ledger, stake) = prepare_stake_start(&env, &config, Pool::Partner, &sender, amount)?;

        TokenClient::new(&env, &config.partner_token).transfer(
            &sender,
            &env.current_contract_address(),
            &amount,
        );
        save_stake(&env, Pool::Partner, &StakeId::Owner(sender.clone()), &stake);
        ledger.save();

        env.events().publish(("hdrn_stake_start", "user"), &sender);
        env.events().publish(("hdrn_stake_start", "amount"), amount);

        Ok(stake.stake_points)
    }

    fn hdrn_stake_add_capital(
        env: Env,
        sender: Address,
        amount: i128,
    ) -> Result<u128, ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        let points = add_stake_capital(&env, &config, Pool::Partner, &sender, amount)?;

        TokenClient::new(&env, &config.partner_token).transfer(
            &sender,
            &env.current_contract_address(),
            &amount,
        );

        env.events()
            .publish(("hdrn_stake_add_capital", "user"), &sender);
        env.events()
            .publish(("hdrn_stake_add_capital", "amount"), amount);

        Ok(points)
    }

    fn hdrn_stake_end(env: Env, sender: Address) -> Result<PartnerStakePayout, ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        let (ledger, stake, settlement) =
            prepare_stake_end(&env, &config, Pool::Partner, &sender)?;
        let payout = partner_payout(&settlement)?;

        remove_stake(&env, Pool::Partner, &StakeId::Owner(sender.clone()))?;
        ledger.save();

        TokenClient::new(&env, &config.partner_token).transfer(
            &env.current_contract_address(),
            &sender,
            &stake.principal,
        );
        mint(&env, &config, &sender, payout.payable + payout.bonus);

        env.events().publish(("hdrn_stake_end", "user"), &sender);
        env.events()
            .publish(("hdrn_stake_end", "payable"), payout.payable);
        env.events()
            .publish(("hdrn_stake_end", "penalty"), payout.penalty);
        env.events().publish(("hdrn_stake_end", "bonus"), payout.bonus);

        Ok(payout)
    }

    fn icsa_stake_start(env: Env, sender: Address, amount: i128) -> Result<u128, ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        let (ledger, stake) = prepare_stake_start(&env, &config, Pool::Native, &sender, amount)?;

        TokenClient::new(&env, &config.token).transfer(
            &sender,
            &env.current_contract_address(),
            &amount,
        );
        save_stake(&env, Pool::Native, &StakeId::Owner(sender.clone()), &stake);
        ledger.save();

        env.events().publish(("icsa_stake_start", "user"), &sender);
        env.events().publish(("icsa_stake_start", "amount"), amount);

        Ok(stake.stake_points)
    }

    fn icsa_stake_add_capital(
        env: Env,
        sender: Address,
        amount: i128,
    ) -> Result<u128, ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        let points = add_stake_capital(&env, &config, Pool::Native, &sender, amount)?;

        TokenClient::new(&env, &config.token).transfer(
            &sender,
            &env.current_contract_address(),
            &amount,
        );

        env.events()
            .publish(("icsa_stake_add_capital", "user"), &sender);
        env.events()
            .publish(("icsa_stake_add_capital", "amount"), amount);

        Ok(points)
    }

    fn icsa_stake_end(env: Env, sender: Address) -> Result<NativeStakePayout, ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        let (ledger, stake, settlement) = prepare_stake_end(&env, &config, Pool::Native, &sender)?;
        let payout = native_payout(&settlement)?;

        remove_stake(&env, Pool::Native, &StakeId::Owner(sender.clone()))?;
        ledger.save();

        let contract = env.current_contract_address();
        TokenClient::new(&env, &config.token).transfer(&contract, &sender, &stake.principal);
        mint(
            &env,
            &config,
            &sender,
            payout.payable_native + payout.bonus_native,
        );
        let partner_amount = payout.payable_partner + payout.bonus_partner;
        if partner_amount > 0 {
            TokenClient::new(&env, &config.partner_token).transfer(
                &contract,
                &sender,
                &partner_amount,
            );
        }

        env.events().publish(("icsa_stake_end", "user"), &sender);
        env.events()
            .publish(("icsa_stake_end", "payable_native"), payout.payable_native);
        env.events()
            .publish(("icsa_stake_end", "payable_partner"), payout.payable_partner);
        env.events()
            .publish(("icsa_stake_end", "penalty"), payout.penalty);
        env.events()
            .publish(("icsa_stake_end", "penalty_partner"), payout.penalty_partner);
        env.events()
            .publish(("icsa_stake_end", "bonus_native"), payout.bonus_native);
        env.events()
            .publish(("icsa_stake_end", "bonus_partner"), payout.bonus_partner);

        Ok(payout)
    }

    fn hex_stake_sell(env: Env, sender: Address, position_id: u64) -> Result<i128, ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        let quote = prepare_sale(&env, &config, &sender, position_id)?;

        let contract = env.current_contract_address();
        let partner_token = TokenClient::new(&env, &config.partner_token);
        let balance_before = partner_token.balance(&contract);
        PartnerProtocolClient::new(&env, &config.partner_protocol).redeem(
            &sender,
            &position_id,
            &contract,
        );
        let received = to_u128(partner_token.balance(&contract) - balance_before)?;
        if received < quote.borrowable {
            log!(
                &env,
                "Staking: Hex stake sell: received {} of the partner asset, expected {}",
                received,
                quote.borrowable
            );
            return Err(ContractError::TransferFailed);
        }

        // sale proceeds become partner asset rewards of the native pool
        let mut ledger = PoolLedger::load(&env, Pool::Native);
        let reserved = queue_sale_proceeds(
            &env,
            &mut ledger,
            &config.native_pool,
            clock::current_day(&env, &config),
            received,
        )?;
        ledger.save();

        let token_amount = to_i128(quote.token_amount)?;
        mint(&env, &config, &sender, token_amount);

        env.events().publish(("hex_stake_sell", "user"), &sender);
        env.events()
            .publish(("hex_stake_sell", "position_id"), position_id);
        env.events()
            .publish(("hex_stake_sell", "token_amount"), token_amount);
        env.events()
            .publish(("hex_stake_sell", "bonus_reserve"), reserved);

        Ok(token_amount)
    }

    fn update_pool_params(
        env: Env,
        sender: Address,
        pool: Pool,
        params: PoolParams,
    ) -> Result<(), ContractError> {
        sender.require_auth();

        if sender != get_admin(&env) {
            log!(&env, "Staking: Update pool params: You are not authorized!");
            return Err(ContractError::Unauthorized);
        }
        params.validate(&env)?;

        let mut config = get_config(&env);
        // days that already ended are paid with the emission they were staked under
        let mut ledger = PoolLedger::load(&env, pool);
        ledger.roll_forward(
            clock::current_day(&env, &config),
            daily_emission(config.pool_params(pool))?,
        )?;
        ledger.save();

        env.events()
            .publish(("update_pool_params", "daily_emission"), params.daily_emission);
        config.set_pool_params(pool, params);
        save_config(&env, &config);

        Ok(())
    }

    fn upgrade(env: Env, new_wasm_hash: BytesN<32>) -> Result<(), ContractError> {
        let admin: Address = get_admin(&env);
        admin.require_auth();

        env.deployer().update_current_contract_wasm(new_wasm_hash);
        Ok(())
    }

    fn query_config(env: Env) -> Result<ConfigResponse, ContractError> {
        Ok(ConfigResponse {
            config: get_config(&env),
        })
    }

    fn query_admin(env: Env) -> Result<Address, ContractError> {
        Ok(get_admin(&env))
    }

    fn current_day(env: Env) -> u64 {
        clock::current_day(&env, &get_config(&env))
    }

    fn nft_stakes(env: Env, position_id: u64) -> Result<Stake, ContractError> {
        load_stake(&env, Pool::Collateral, &StakeId::Position(position_id))
    }

    fn hdrn_stakes(env: Env, owner: Address) -> Result<Stake, ContractError> {
        load_stake(&env, Pool::Partner, &StakeId::Owner(owner))
    }

    fn icsa_stakes(env: Env, owner: Address) -> Result<Stake, ContractError> {
        load_stake(&env, Pool::Native, &StakeId::Owner(owner))
    }

    fn nft_pool_points(env: Env, day: u64) -> Result<u128, ContractError> {
        PoolLedger::load(&env, Pool::Collateral).points_on_day(day)
    }

    fn hdrn_pool_points(env: Env, day: u64) -> Result<u128, ContractError> {
        PoolLedger::load(&env, Pool::Partner).points_on_day(day)
    }

    fn icsa_pool_points(env: Env, day: u64) -> Result<u128, ContractError> {
        PoolLedger::load(&env, Pool::Native).points_on_day(day)
    }

    fn simulate_nft_stake_start(
        env: Env,
        sender: Address,
        amount: i128,
        asset: Address,
    ) -> Result<u128, ContractError> {
        let config = get_config(&env);
        let (_, stake) = prepare_nft_stake_start(&env, &config, &sender, amount, &asset)?;

        Ok(stake.stake_points)
    }

    fn simulate_nft_stake_end(
        env: Env,
        sender: Address,
        position_id: u64,
    ) -> Result<i128, ContractError> {
        let config = get_config(&env);
        let (_, payout) = prepare_nft_stake_end(&env, &config, &sender, position_id)?;

        Ok(payout)
    }

    fn simulate_hdrn_stake_start(
        env: Env,
        sender: Address,
        amount: i128,
    ) -> Result<u128, ContractError> {
        let config = get_config(&env);
        let (_, stake) = prepare_stake_start(&env, &config, Pool::Partner, &sender, amount)?;

        Ok(stake.stake_points)
    }

    fn simulate_hdrn_stake_end(
        env: Env,
        sender: Address,
    ) -> Result<PartnerStakePayout, ContractError> {
        let config = get_config(&env);
        let (_, _, settlement) = prepare_stake_end(&env, &config, Pool::Partner, &sender)?;

        partner_payout(&settlement)
    }

    fn simulate_icsa_stake_start(
        env: Env,
        sender: Address,
        amount: i128,
    ) -> Result<u128, ContractError> {
        let config = get_config(&env);
        let (_, stake) = prepare_stake_start(&env, &config, Pool::Native, &sender, amount)?;

        Ok(stake.stake_points)
    }

    fn simulate_icsa_stake_end(
        env: Env,
        sender: Address,
    ) -> Result<NativeStakePayout, ContractError> {
        let config = get_config(&env);
        let (_, _, settlement) = prepare_stake_end(&env, &config, Pool::Native, &sender)?;

        native_payout(&settlement)
    }

    fn simulate_hex_stake_sell(
        env: Env,
        sender: Address,
        position_id: u64,
    ) -> Result<i128, ContractError> {
        let config = get_config(&env);
        let quote = prepare_sale(&env, &config, &sender, position_id)?;

        to_i128(quote.token_amount)
    }
}

fn validate_amount(env: &Env, amount: i128) -> Result<(), ContractError> {
    if amount <= 0 {
        log!(env, "Staking: Validate amount: {} must be bigger than 0", amount);
        return Err(ContractError::InvalidAmount);
    }
    Ok(())
}

fn load_stake(env: &Env, pool: Pool, id: &StakeId) -> Result<Stake, ContractError> {
    get_stake(env, pool, id).ok_or_else(|| {
        log!(env, "Staking: Load stake: Stake does not exist");
        ContractError::StakeNotFound
    })
}

fn mint(env: &Env, config: &Config, to: &Address, amount: i128) {
    if amount > 0 {
        StellarAssetClient::new(env, &config.token).mint(to, &amount);
    }
}

fn partner_payout(settlement: &Settlement) -> Result<PartnerStakePayout, ContractError> {
    Ok(PartnerStakePayout {
        payable: to_i128(settlement.native.payable)?,
        penalty: to_i128(settlement.native.penalty)?,
        bonus: to_i128(settlement.native.bonus)?,
    })
}

fn native_payout(settlement: &Settlement) -> Result<NativeStakePayout, ContractError> {
    Ok(NativeStakePayout {
        payable_native: to_i128(settlement.native.payable)?,
        payable_partner: to_i128(settlement.partner.payable)?,
        penalty: to_i128(settlement.native.penalty)?,
        penalty_partner: to_i128(settlement.partner.penalty)?,
        bonus_native: to_i128(settlement.native.bonus)?,
        bonus_partner: to_i128(settlement.partner.bonus)?,
    })
}

fn prepare_nft_stake_start(
    env: &Env,
    config: &Config,
    sender: &Address,
    amount: i128,
    asset: &Address,
) -> Result<(PoolLedger, Stake), ContractError> {
    validate_amount(env, amount)?;

    let today = clock::current_day(env, config);
    if today >= config.launch_window_days {
        log!(
            env,
            "Staking: Nft stake start: launch window closed on day {}",
            config.launch_window_days
        );
        return Err(ContractError::LaunchWindowClosed);
    }
    let kind = config.asset_kind(env, asset)?;

    let mut ledger = PoolLedger::load(env, Pool::Collateral);
    let stake = open_stake(
        env,
        &mut ledger,
        &config.collateral_pool,
        today,
        sender.clone(),
        next_position_id(env),
        kind,
        amount,
    )?;

    Ok((ledger, stake))
}

fn prepare_nft_stake_end(
    env: &Env,
    config: &Config,
    sender: &Address,
    position_id: u64,
) -> Result<(PoolLedger, i128), ContractError> {
    let stake = load_stake(env, Pool::Collateral, &StakeId::Position(position_id))?;
    if &stake.owner != sender {
        log!(
            env,
            "Staking: Nft stake end: position {} is not owned by the sender",
            position_id
        );
        return Err(ContractError::Unauthorized);
    }

    let mut ledger = PoolLedger::load(env, Pool::Collateral);
    let settlement = close_stake(
        env,
        &mut ledger,
        &config.collateral_pool,
        clock::current_day(env, config),
        &stake,
    )?;
    let payout = settlement
        .native
        .payable
        .checked_add(settlement.native.bonus)
        .ok_or(ContractError::ContractMathError)?;

    Ok((ledger, to_i128(payout)?))
}

fn single_position_asset(pool: Pool) -> AssetKind {
    match pool {
        Pool::Partner => AssetKind::PartnerAsset,
        Pool::Native | Pool::Collateral => AssetKind::NativeAsset,
    }
}

fn prepare_stake_start(
    env: &Env,
    config: &Config,
    pool: Pool,
    sender: &Address,
    amount: i128,
) -> Result<(PoolLedger, Stake), ContractError> {
    validate_amount(env, amount)?;

    if has_stake(env, pool, &StakeId::Owner(sender.clone())) {
        log!(env, "Staking: Stake start: Stake already exists");
        return Err(ContractError::StakeAlreadyExists);
    }

    let mut ledger = PoolLedger::load(env, pool);
    let stake = open_stake(
        env,
        &mut ledger,
        config.pool_params(pool),
        clock::current_day(env, config),
        sender.clone(),
        0,
        single_position_asset(pool),
        amount,
    )?;

    Ok((ledger, stake))
}

fn add_stake_capital(
    env: &Env,
    config: &Config,
    pool: Pool,
    sender: &Address,
    amount: i128,
) -> Result<u128, ContractError> {
    validate_amount(env, amount)?;

    let id = StakeId::Owner(sender.clone());
    let mut stake = load_stake(env, pool, &id)?;
    let mut ledger = PoolLedger::load(env, pool);
    let points = add_capital(
        env,
        &mut ledger,
        config.pool_params(pool),
        clock::current_day(env, config),
        &mut stake,
        amount,
    )?;

    save_stake(env, pool, &id, &stake);
    ledger.save();

    Ok(points)
}

fn prepare_stake_end(
    env: &Env,
    config: &Config,
    pool: Pool,
    sender: &Address,
) -> Result<(PoolLedger, Stake, Settlement), ContractError> {
    let stake = load_stake(env, pool, &StakeId::Owner(sender.clone()))?;

    let mut ledger = PoolLedger::load(env, pool);
    let settlement = close_stake(
        env,
        &mut ledger,
        config.pool_params(pool),
        clock::current_day(env, config),
        &stake,
    )?;

    Ok((ledger, stake, settlement))
}
