// Validate if int value is bigger then 0
#[macro_export]
macro_rules! validate_int_parameters {
    ($($arg:expr),*) => {
        {
            $(
                let value: Option<i128> = Into::<Option<_>>::into($arg);
                if let Some(val) = value {
                    if val <= 0 {
                        panic!("value cannot be less than or equal zero")
                    }
                }
            )*
        }
    };
}

// Validate that every value is a share expressed in bps, between 0 and 100%
#[macro_export]
macro_rules! validate_bps {
    ($($value:expr),+) => {
        {
            const MAX_BPS: u64 = $crate::BPS_DENOMINATOR;
            $(
                // if not in the valid range, panic with the name of the offending field
                if ($value as u64) > MAX_BPS {
                    panic!("The value {} is out of range. Must be between 0 and {} bps.", stringify!($value), MAX_BPS);
                }
            )+
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_validate_int_parameters() {
        // The macro should not panic for valid parameters.
        validate_int_parameters!(1, 2, 3);
        validate_int_parameters!(1i128, 2i128, 3i128, Some(4i128), None::<i128>);
        validate_int_parameters!(None::<i128>, None::<i128>);
    }

    #[test]
    #[should_panic]
    fn should_panic_when_value_less_than_zero() {
        validate_int_parameters!(1, -2, 3);
    }

    #[test]
    #[should_panic]
    fn should_panic_when_some_equals_zero() {
        validate_int_parameters!(Some(0i128), None::<i128>);
    }

    #[test]
    fn validate_bps_accepts_full_range() {
        let max_bonus_bps = 10_000u64;
        let bonus_per_day_bps = 0u64;
        validate_bps!(max_bonus_bps, bonus_per_day_bps);
    }

    #[test]
    #[should_panic(expected = "The value max_bonus_bps is out of range")]
    fn validate_bps_rejects_more_than_hundred_percent() {
        let max_bonus_bps = 10_001u64;
        validate_bps!(max_bonus_bps);
    }
}
