use soroban_decimal::Decimal;

use crate::{error::ContractError, storage::PoolParams};

/// Split of a gross reward once the holding time is known.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Adjustment {
    /// Part of the gross reward paid to the holder
    pub payable: u128,
    /// Part of the gross reward forfeited by an early end
    pub penalty: u128,
    /// Extra reward for holding past the grace window
    pub bonus: u128,
}

/// Applies the early end penalty or the late bonus of a pool to `gross`.
///
/// `effective_days` counts from the capital weighted anchor of the position, not
/// from its start day.
pub fn adjust(
    gross: u128,
    effective_days: u64,
    params: &PoolParams,
) -> Result<Adjustment, ContractError> {
    let commitment = params.commitment_days;
    let grace_end = commitment
        .checked_add(params.grace_days)
        .ok_or(ContractError::ContractMathError)?;

    if effective_days < commitment {
        let remaining = u128::from(commitment - effective_days);
        let penalty = Decimal::checked_from_ratio(remaining, u128::from(commitment))
            .and_then(|ratio| ratio.checked_mul_int(gross))
            .ok_or(ContractError::ContractMathError)?;

        return Ok(Adjustment {
            payable: gross - penalty,
            penalty,
            bonus: 0,
        });
    }

    if effective_days <= grace_end {
        return Ok(Adjustment {
            payable: gross,
            ..Adjustment::default()
        });
    }

    let late_days = effective_days - grace_end;
    let bonus_bps = late_days
        .saturating_mul(params.bonus_per_day_bps)
        .min(params.max_bonus_bps);
    let bonus = Decimal::bps(bonus_bps)
        .checked_mul_int(gross)
        .ok_or(ContractError::ContractMathError)?;

    Ok(Adjustment {
        payable: gross,
        penalty: 0,
        bonus,
    })
}

/// Moves the effective-term anchor towards `today`, weighted by the principal
/// already locked and the capital being added.
pub fn weighted_anchor(
    anchor: u64,
    principal: u128,
    today: u64,
    extra: u128,
) -> Result<u64, ContractError> {
    let total = principal
        .checked_add(extra)
        .ok_or(ContractError::ContractMathError)?;
    if total == 0 {
        return Ok(today);
    }

    let weighted = u128::from(anchor)
        .checked_mul(principal)
        .and_then(|old| {
            u128::from(today)
                .checked_mul(extra)
                .and_then(|new| old.checked_add(new))
        })
        .ok_or(ContractError::ContractMathError)?;

    u64::try_from(weighted / total).map_err(|_| ContractError::ContractMathError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    const ONE: u128 = 1_000_000_000_000_000_000;

    fn curve() -> PoolParams {
        PoolParams {
            daily_emission: 1_000,
            partner_multiplier_bps: 10_000,
            native_multiplier_bps: 0,
            commitment_days: 30,
            grace_days: 58,
            bonus_per_day_bps: 100,
            max_bonus_bps: 5_000,
        }
    }

    #[test]
    fn opening_day_forfeits_everything() {
        assert_eq!(adjust(0, 0, &curve()), Ok(Adjustment::default()));
        assert_eq!(
            adjust(1_000, 0, &curve()),
            Ok(Adjustment {
                payable: 0,
                penalty: 1_000,
                bonus: 0
            })
        );
    }

    #[test]
    fn first_day_keeps_one_thirtieth() {
        let adjustment = adjust(1_000 * ONE, 1, &curve()).unwrap();

        assert_eq!(adjustment.penalty, 966_666_666_666_666_666_000);
        assert_eq!(adjustment.payable, 33_333_333_333_333_334_000);
        assert_eq!(adjustment.bonus, 0);
    }

    #[test]
    fn penalty_ratio_strictly_decreases_until_the_commitment_ends() {
        let gross = 1_000 * ONE;
        let mut previous = gross + 1;
        for day in 0..30 {
            let adjustment = adjust(gross, day, &curve()).unwrap();
            assert!(adjustment.penalty < previous);
            assert_eq!(adjustment.payable + adjustment.penalty, gross);
            previous = adjustment.penalty;
        }
        assert_eq!(adjust(gross, 30, &curve()).unwrap().penalty, 0);
    }

    #[test_case(30, 0 ; "commitment reached")]
    #[test_case(88, 0 ; "last day of grace")]
    #[test_case(89, 100 ; "first late day")]
    #[test_case(97, 900 ; "nine days late")]
    #[test_case(138, 5_000 ; "reaches the cap")]
    #[test_case(1_000, 5_000 ; "stays at the cap")]
    fn late_bonus_grows_per_day_up_to_the_cap(effective_days: u64, expected_bps: u128) {
        let gross = 10_000 * ONE;
        let adjustment = adjust(gross, effective_days, &curve()).unwrap();

        assert_eq!(adjustment.payable, gross);
        assert_eq!(adjustment.penalty, 0);
        assert_eq!(adjustment.bonus, gross * expected_bps / 10_000);
    }

    #[test]
    fn pool_without_a_curve_pays_gross() {
        let params = PoolParams {
            commitment_days: 0,
            grace_days: 0,
            bonus_per_day_bps: 0,
            max_bonus_bps: 0,
            ..curve()
        };
        for day in [0, 1, 50, 5_000] {
            assert_eq!(
                adjust(777, day, &params),
                Ok(Adjustment {
                    payable: 777,
                    penalty: 0,
                    bonus: 0
                })
            );
        }
    }

    #[test_case(0, ONE, 121, ONE / 4, 24 ; "quarter added late")]
    #[test_case(10, ONE, 10, ONE, 10 ; "same day")]
    #[test_case(0, ONE, 100, ONE, 50 ; "doubling halfway")]
    #[test_case(5, 0, 9, ONE, 9 ; "no earlier principal")]
    fn capital_pulls_the_anchor_towards_today(
        anchor: u64,
        principal: u128,
        today: u64,
        extra: u128,
        expected: u64,
    ) {
        assert_eq!(weighted_anchor(anchor, principal, today, extra), Ok(expected));
    }
}
