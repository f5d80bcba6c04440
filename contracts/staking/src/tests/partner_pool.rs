use pretty_assertions::assert_eq;
use soroban_sdk::{testutils::Address as _, vec, Address};

use super::setup::{deploy_staking_contract, DAILY_EMISSION, ONE};
use crate::{
    error::ContractError,
    msg::PartnerStakePayout,
    storage::{PointCredit, Stake},
};

#[test]
fn one_position_per_owner() {
    let deployment = deploy_staking_contract();
    let user = Address::generate(&deployment.env);
    deployment.fund_partner_asset(&user, 2 * ONE);

    assert_eq!(
        deployment.staking.simulate_hdrn_stake_start(&user, &ONE),
        ONE as u128
    );
    // a preview leaves nothing behind
    assert_eq!(
        deployment.staking.try_hdrn_stakes(&user),
        Err(Ok(ContractError::StakeNotFound))
    );

    assert_eq!(deployment.staking.hdrn_stake_start(&user, &ONE), ONE as u128);
    assert_eq!(deployment.partner_token.balance(&user), ONE);
    assert_eq!(
        deployment.partner_token.balance(&deployment.staking.address),
        ONE
    );

    assert_eq!(
        deployment.staking.try_hdrn_stake_start(&user, &ONE),
        Err(Ok(ContractError::StakeAlreadyExists))
    );
    assert_eq!(
        deployment.staking.try_simulate_hdrn_stake_start(&user, &ONE),
        Err(Ok(ContractError::StakeAlreadyExists))
    );
}

#[test]
fn opening_day_end_returns_only_the_principal() {
    let deployment = deploy_staking_contract();
    let user = Address::generate(&deployment.env);
    deployment.fund_partner_asset(&user, ONE);

    deployment.staking.hdrn_stake_start(&user, &ONE);

    assert_eq!(
        deployment.staking.hdrn_stake_end(&user),
        PartnerStakePayout::default()
    );
    assert_eq!(deployment.partner_token.balance(&user), ONE);
    assert_eq!(deployment.token.balance(&user), 0);

    assert_eq!(
        deployment.staking.try_hdrn_stake_end(&user),
        Err(Ok(ContractError::StakeNotFound))
    );
}

#[test]
fn early_end_is_penalized() {
    let deployment = deploy_staking_contract();
    let user = Address::generate(&deployment.env);
    deployment.fund_partner_asset(&user, ONE);

    deployment.staking.hdrn_stake_start(&user, &ONE);
    deployment.jump_to_day(1);

    let expected = PartnerStakePayout {
        payable: 33_333_333_333_333_334_000,
        penalty: 966_666_666_666_666_666_000,
        bonus: 0,
    };
    assert_eq!(deployment.staking.simulate_hdrn_stake_end(&user), expected);
    assert_eq!(deployment.staking.hdrn_stake_end(&user), expected);

    assert_eq!(deployment.token.balance(&user), expected.payable);
    assert_eq!(deployment.partner_token.balance(&user), ONE);
}

#[test]
fn penalties_are_paid_to_the_remaining_stakers() {
    let deployment = deploy_staking_contract();
    let env = &deployment.env;
    let quitter = Address::generate(env);
    let holder = Address::generate(env);
    deployment.fund_partner_asset(&quitter, ONE);
    deployment.fund_partner_asset(&holder, ONE);

    deployment.staking.hdrn_stake_start(&quitter, &ONE);
    deployment.jump_to_day(1);
    let forfeited = deployment.staking.hdrn_stake_end(&quitter).penalty;
    deployment.staking.hdrn_stake_start(&holder, &ONE);

    deployment.jump_to_day(2);
    let payout = deployment.staking.simulate_hdrn_stake_end(&holder);

    // one day of emission plus the forfeited rewards, down to accumulator precision
    let gross = payout.payable + payout.penalty;
    assert_eq!(gross, 1_966_666_666_666_666_000_000);
    assert!(gross > DAILY_EMISSION + forfeited - 1_000_000);
}

#[test]
fn payout_never_decreases_with_days_held() {
    let deployment = deploy_staking_contract();
    let user = Address::generate(&deployment.env);
    deployment.fund_partner_asset(&user, ONE);

    deployment.staking.hdrn_stake_start(&user, &ONE);

    let mut previous = 0;
    for day in 0..100 {
        deployment.jump_to_day(day);
        let payout = deployment.staking.simulate_hdrn_stake_end(&user);
        let total = payout.payable + payout.bonus;
        assert!(total >= previous);
        previous = total;
    }
}

#[test]
fn capital_is_never_retroactive() {
    let deployment = deploy_staking_contract();
    let env = &deployment.env;
    let user = Address::generate(env);
    deployment.fund_partner_asset(&user, 2 * ONE);

    deployment.staking.hdrn_stake_start(&user, &ONE);
    deployment.jump_to_day(10);

    assert_eq!(
        deployment.staking.hdrn_stake_add_capital(&user, &ONE),
        2 * ONE as u128
    );

    assert_eq!(deployment.staking.hdrn_pool_points(&0), ONE as u128);
    assert_eq!(deployment.staking.hdrn_pool_points(&9), ONE as u128);
    assert_eq!(deployment.staking.hdrn_pool_points(&10), 2 * ONE as u128);
    assert_eq!(deployment.staking.hdrn_pool_points(&50), 2 * ONE as u128);

    assert_eq!(
        deployment.staking.hdrn_stakes(&user),
        Stake {
            owner: user.clone(),
            position_id: 0,
            asset: crate::storage::AssetKind::PartnerAsset,
            principal: 2 * ONE,
            stake_points: 2 * ONE as u128,
            start_day: 0,
            capital_added_day: 5,
            native_debt: 10 * 1_000 * 1_000_000_000_000,
            partner_debt: 0,
            banked_native: 10 * DAILY_EMISSION as u128,
            banked_partner: 0,
            credits: vec![
                env,
                PointCredit {
                    day: 0,
                    points: ONE as u128
                },
                PointCredit {
                    day: 10,
                    points: ONE as u128
                },
            ],
        }
    );
    assert_eq!(
        deployment.partner_token.balance(&deployment.staking.address),
        2 * ONE
    );
}

#[test]
fn capital_addition_moves_the_bonus_window() {
    let deployment = deploy_staking_contract();
    let user = Address::generate(&deployment.env);
    deployment.fund_partner_asset(&user, 2 * ONE);

    deployment.staking.hdrn_stake_start(&user, &ONE);

    // 120 days held, 32 of them past the grace window
    deployment.jump_to_day(120);
    let before = deployment.staking.simulate_hdrn_stake_end(&user);
    assert_eq!(
        before,
        PartnerStakePayout {
            payable: 120_000 * ONE,
            penalty: 0,
            bonus: 38_400 * ONE,
        }
    );

    // the anchor moves from day 0 to day 24
    deployment.staking.hdrn_stake_add_capital(&user, &(ONE / 4));
    assert_eq!(deployment.staking.hdrn_stakes(&user).capital_added_day, 24);
    assert_eq!(deployment.staking.hdrn_stakes(&user).start_day, 0);

    let after = deployment.staking.simulate_hdrn_stake_end(&user);
    assert_eq!(
        after,
        PartnerStakePayout {
            payable: 120_000 * ONE,
            penalty: 0,
            bonus: 9_600 * ONE,
        }
    );
    assert!(after.bonus < before.bonus);

    // another day held raises the bonus again
    deployment.jump_to_day(121);
    let next_day = deployment.staking.simulate_hdrn_stake_end(&user);
    assert_eq!(
        next_day,
        PartnerStakePayout {
            payable: 121_000 * ONE,
            penalty: 0,
            bonus: 10_890 * ONE,
        }
    );

    // and it stops growing at the cap
    deployment.jump_to_day(500);
    let capped = deployment.staking.simulate_hdrn_stake_end(&user);
    assert_eq!(capped.bonus, capped.payable / 2);

    assert_eq!(deployment.staking.hdrn_stake_end(&user), capped);
    assert_eq!(
        deployment.token.balance(&user),
        capped.payable + capped.bonus
    );
    assert_eq!(deployment.partner_token.balance(&user), 2 * ONE);
}

#[test]
fn adding_capital_needs_an_open_position() {
    let deployment = deploy_staking_contract();
    let user = Address::generate(&deployment.env);
    deployment.fund_partner_asset(&user, ONE);

    assert_eq!(
        deployment.staking.try_hdrn_stake_add_capital(&user, &ONE),
        Err(Ok(ContractError::StakeNotFound))
    );

    deployment.staking.hdrn_stake_start(&user, &(ONE / 2));
    assert_eq!(
        deployment.staking.try_hdrn_stake_add_capital(&user, &-1),
        Err(Ok(ContractError::InvalidAmount))
    );
}

#[test]
fn a_pool_left_idle_for_years_still_settles() {
    let deployment = deploy_staking_contract();
    let user = Address::generate(&deployment.env);
    deployment.fund_partner_asset(&user, ONE);

    deployment.staking.hdrn_stake_start(&user, &ONE);

    deployment.jump_to_day(1_500);
    deployment.env.cost_estimate().budget().reset_default();
    let expected = PartnerStakePayout {
        payable: 1_500 * DAILY_EMISSION,
        penalty: 0,
        bonus: 750 * DAILY_EMISSION,
    };
    assert_eq!(deployment.staking.hdrn_stake_end(&user), expected);
    assert!(deployment.env.cost_estimate().budget().cpu_instruction_cost() < 100_000_000);
    assert_eq!(deployment.partner_token.balance(&user), ONE);
}
