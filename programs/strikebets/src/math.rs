use anchor_lang::prelude::*;
use crate::errors::StrikeBetsError;

/// Fixed-point scale: all prices, fees and the skew limit are fractions
/// of this unit. Monetary amounts are plain lamports.
pub const UNIT: u64 = 1_000_000_000;

/// Multiply two fixed-point quantities, rounding a half-increment result
/// up. The rounding bias never favors an individual caller over the pool.
pub fn mul_unit(a: u64, b: u64) -> Result<u64> {
    let product = (a as u128)
        .checked_mul(b as u128)
        .ok_or(StrikeBetsError::MathOverflow)?
        .checked_add((UNIT / 2) as u128)
        .ok_or(StrikeBetsError::MathOverflow)?
        / UNIT as u128;
    u64::try_from(product).map_err(|_| StrikeBetsError::MathOverflow.into())
}

/// Divide two fixed-point quantities, rounding a half-increment result up.
pub fn div_unit(a: u64, b: u64) -> Result<u64> {
    require!(b != 0, StrikeBetsError::DivisionByZero);
    let quotient = ((a as u128)
        .checked_mul(UNIT as u128)
        .ok_or(StrikeBetsError::MathOverflow)?
        .checked_add((b / 2) as u128)
        .ok_or(StrikeBetsError::MathOverflow)?)
        / b as u128;
    u64::try_from(quotient).map_err(|_| StrikeBetsError::MathOverflow.into())
}

/// Subtraction floored at zero. Used on the paths where a computed payout
/// or refund may legitimately be non-positive; everywhere else
/// subtraction is checked and underflow is a fatal invariant violation.
pub fn sub_to_zero(a: u64, b: u64) -> u64 {
    a.saturating_sub(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_rounds_half_up() {
        // 5 * 0.1 = 0.5 -> rounds up to 1
        assert_eq!(mul_unit(5, UNIT / 10).unwrap(), 1);
        // 3 * 0.1 = 0.3 -> rounds down to 0
        assert_eq!(mul_unit(3, UNIT / 10).unwrap(), 0);
        // 7 * 0.1 = 0.7 -> rounds up to 1
        assert_eq!(mul_unit(7, UNIT / 10).unwrap(), 1);
        // exact products are untouched
        assert_eq!(mul_unit(100, UNIT / 4).unwrap(), 25);
        assert_eq!(mul_unit(1_000_000_000, UNIT).unwrap(), 1_000_000_000);
    }

    #[test]
    fn test_div_rounds_half_up() {
        assert_eq!(div_unit(1, 2).unwrap(), UNIT / 2);
        // 1 / 3 rounds down, 2 / 3 rounds up
        assert_eq!(div_unit(1, 3).unwrap(), 333_333_333);
        assert_eq!(div_unit(2, 3).unwrap(), 666_666_667);
    }

    #[test]
    fn test_div_by_zero_fails() {
        assert!(div_unit(1, 0).is_err());
    }

    #[test]
    fn test_mul_overflow_fails() {
        assert!(mul_unit(u64::MAX, u64::MAX).is_err());
    }

    #[test]
    fn test_sub_to_zero_floors() {
        assert_eq!(sub_to_zero(10, 3), 7);
        assert_eq!(sub_to_zero(3, 10), 0);
        assert_eq!(sub_to_zero(5, 5), 0);
    }
}
