// A lot of this code is taken from the cosmwasm-std crate, which is licensed under the Apache
// License 2.0 - https://github.com/CosmWasm/cosmwasm.

#![no_std]

/// Unsigned fixed-point number with 18 decimal places.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct Decimal(u128);

impl Decimal {
    const DECIMAL_FRACTIONAL: u128 = 1_000_000_000_000_000_000u128; // 1*10**18
    /// The number of decimal places. Since decimal types are fixed-point rather than
    /// floating-point, this is a constant.
    pub const DECIMAL_PLACES: u32 = 18;

    /// Convert basis points (x/10000) into Decimal
    pub fn bps(x: u64) -> Self {
        Self((x as u128) * 100_000_000_000_000)
    }

    /// Returns the ratio (numerator / denominator) as a Decimal, or `None` when the
    /// denominator is zero or the result does not fit.
    pub fn checked_from_ratio(numerator: u128, denominator: u128) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        mul_div_floor(numerator, Self::DECIMAL_FRACTIONAL, denominator).map(Self)
    }

    /// Multiplies an integer amount by this decimal, rounding down.
    ///
    /// Returns `None` instead of wrapping when the product does not fit into `u128`.
    pub fn checked_mul_int(self, value: u128) -> Option<u128> {
        mul_div_floor(value, self.0, Self::DECIMAL_FRACTIONAL)
    }
}

// floor(value * numerator / denominator) without an intermediate that is wider than
// the final result: value = q * denominator + r, so the product splits into
// q * numerator + r * numerator / denominator.
fn mul_div_floor(value: u128, numerator: u128, denominator: u128) -> Option<u128> {
    let quotient = value / denominator;
    let remainder = value % denominator;
    let whole = quotient.checked_mul(numerator)?;
    let fraction = remainder.checked_mul(numerator)? / denominator;
    whole.checked_add(fraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn decimal_bps() {
        assert_eq!(Decimal::bps(5_000).0, Decimal::DECIMAL_FRACTIONAL / 2);
        assert_eq!(Decimal::bps(10_000).0, Decimal::DECIMAL_FRACTIONAL);
        assert_eq!(Decimal::bps(0).0, 0);
    }

    #[test]
    fn from_ratio_rounds_down() {
        assert_eq!(
            Decimal::checked_from_ratio(1, 3),
            Some(Decimal(333_333_333_333_333_333))
        );
        assert_eq!(Decimal::checked_from_ratio(30, 60), Some(Decimal::bps(5_000)));
        assert_eq!(Decimal::checked_from_ratio(1, 0), None);
    }

    #[test]
    fn multiplying_rounds_down() {
        assert_eq!(Decimal::bps(1_000).checked_mul_int(1), Some(0));
        assert_eq!(Decimal::bps(1_000).checked_mul_int(100), Some(10));
        assert_eq!(Decimal::bps(5_000).checked_mul_int(999), Some(499));
        assert_eq!(Decimal::bps(20_000).checked_mul_int(1_000), Some(2_000));
    }

    #[test_case(u128::MAX, Decimal::bps(10_000), Some(u128::MAX) ; "identity on the largest amount")]
    #[test_case(u128::MAX, Decimal::bps(5_000), Some(u128::MAX / 2) ; "halving the largest amount")]
    #[test_case(u128::MAX, Decimal::bps(20_000), None ; "doubling the largest amount overflows")]
    #[test_case(10u128.pow(30), Decimal::bps(15_000), Some(15 * 10u128.pow(29)) ; "large principal with multiplier")]
    fn checked_mul_int(value: u128, multiplier: Decimal, expected: Option<u128>) {
        assert_eq!(multiplier.checked_mul_int(value), expected);
    }
}
