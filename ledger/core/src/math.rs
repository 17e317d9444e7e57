//! Mathematical Utilities for the poolshare Ledger
//!
//! Safe arithmetic for proportional reward calculations.

use crate::errors::{LedgerError, LedgerResult};

/// Compute `value * numerator / denominator` with a u128 intermediate,
/// truncating toward zero.
///
/// This is the proportional-share primitive: a snapshot's reward times the
/// seat's shares over the snapshot's total shares.
pub fn mul_div(value: u64, numerator: u64, denominator: u64) -> LedgerResult<u64> {
    if denominator == 0 {
        return Err(LedgerError::DivisionByZero);
    }

    let product = (value as u128)
        .checked_mul(numerator as u128)
        .ok_or(LedgerError::Overflow)?;

    let quotient = product / denominator as u128;

    u64::try_from(quotient).map_err(|_| LedgerError::Overflow)
}

/// Checked u64 addition surfacing `Overflow`
pub fn checked_add(a: u64, b: u64) -> LedgerResult<u64> {
    a.checked_add(b).ok_or(LedgerError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_div_truncates() {
        // 10 * 100 / 300 = 3.33.. -> 3
        assert_eq!(mul_div(10, 100, 300).unwrap(), 3);
    }

    #[test]
    fn test_mul_div_exact() {
        assert_eq!(mul_div(10, 100, 100).unwrap(), 10);
        assert_eq!(mul_div(20, 100, 200).unwrap(), 10);
    }

    #[test]
    fn test_mul_div_zero_denominator() {
        assert_eq!(mul_div(10, 100, 0), Err(LedgerError::DivisionByZero));
    }

    #[test]
    fn test_mul_div_wide_intermediate() {
        // u64::MAX * 2 overflows u64 but not the u128 intermediate
        assert_eq!(mul_div(u64::MAX, 2, 2).unwrap(), u64::MAX);
    }

    #[test]
    fn test_mul_div_result_overflow() {
        assert_eq!(mul_div(u64::MAX, 2, 1), Err(LedgerError::Overflow));
    }

    #[test]
    fn test_checked_add() {
        assert_eq!(checked_add(1, 2).unwrap(), 3);
        assert_eq!(checked_add(u64::MAX, 1), Err(LedgerError::Overflow));
    }
}
