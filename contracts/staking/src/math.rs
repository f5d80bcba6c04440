use soroban_sdk::{Env, U256};

use crate::error::ContractError;

/// Scale of the per-point reward accumulators.
pub const ACC_PRECISION: u128 = 1_000_000_000_000;

/// floor(a * b / c), computed on 256 bits so the product can not overflow.
pub fn mul_div(env: &Env, a: u128, b: u128, c: u128) -> Result<u128, ContractError> {
    if c == 0 {
        return Err(ContractError::ContractMathError);
    }
    U256::from_u128(env, a)
        .mul(&U256::from_u128(env, b))
        .div(&U256::from_u128(env, c))
        .to_u128()
        .ok_or(ContractError::ContractMathError)
}

pub fn to_u128(amount: i128) -> Result<u128, ContractError> {
    u128::try_from(amount).map_err(|_| ContractError::ContractMathError)
}

pub fn to_i128(amount: u128) -> Result<i128, ContractError> {
    i128::try_from(amount).map_err(|_| ContractError::ContractMathError)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_div_keeps_wide_intermediates() {
        let env = Env::default();
        // the product needs more than 128 bits
        assert_eq!(
            mul_div(&env, u128::MAX, 1_000, 1_000),
            Ok(u128::MAX)
        );
        assert_eq!(mul_div(&env, 10, 10, 3), Ok(33));
    }

    #[test]
    fn mul_div_reports_division_by_zero_and_overflow() {
        let env = Env::default();
        assert_eq!(
            mul_div(&env, 1, 1, 0),
            Err(ContractError::ContractMathError)
        );
        assert_eq!(
            mul_div(&env, u128::MAX, 2, 1),
            Err(ContractError::ContractMathError)
        );
    }

    #[test]
    fn conversions_reject_out_of_range_amounts() {
        assert_eq!(to_u128(-1), Err(ContractError::ContractMathError));
        assert_eq!(to_u128(5), Ok(5));
        assert_eq!(to_i128(u128::MAX), Err(ContractError::ContractMathError));
    }
}
