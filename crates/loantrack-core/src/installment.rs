//! Closed-form equated monthly installment (EMI) calculation.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::types::{Money, Percent};

/// Fixed monthly installment covering principal plus interest over
/// `term_months` at `annual_rate_percent`.
///
/// Fails soft: a non-positive principal or zero term yields zero. A
/// non-positive rate degrades to straight-line principal repayment.
/// Rounded to 2 decimal places.
pub fn compute_installment(
    principal: Money,
    annual_rate_percent: Percent,
    term_months: u32,
) -> Money {
    if principal <= Decimal::ZERO || term_months == 0 {
        return Decimal::ZERO;
    }

    let term = Decimal::from(term_months);
    if annual_rate_percent <= Decimal::ZERO {
        return (principal / term).round_dp(2);
    }

    // EMI = P * r * (1 + r)^n / ((1 + r)^n - 1)
    let monthly_rate = annual_rate_percent / dec!(12) / dec!(100);
    let factor = (Decimal::ONE + monthly_rate).powi(term_months as i64);
    (principal * monthly_rate * factor / (factor - Decimal::ONE)).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_installment_known_answer() {
        // 100k over 12 months at 10% p.a.
        assert_eq!(compute_installment(dec!(100000), dec!(10), 12), dec!(8791.59));
    }

    #[test]
    fn test_installment_twenty_year_loan() {
        // 2.5M over 240 months at 9% p.a. ≈ 22493.11
        let emi = compute_installment(dec!(2500000), dec!(9), 240);
        assert!((emi - dec!(22493.11)).abs() < dec!(0.02));
    }

    #[test]
    fn test_installment_zero_rate_is_straight_line() {
        assert_eq!(compute_installment(dec!(12000), dec!(0), 12), dec!(1000));
        assert_eq!(compute_installment(dec!(10000), dec!(-1), 12), dec!(833.33));
    }

    #[test]
    fn test_installment_degenerate_input_is_zero() {
        assert_eq!(compute_installment(dec!(0), dec!(10), 12), Decimal::ZERO);
        assert_eq!(compute_installment(dec!(-5000), dec!(10), 12), Decimal::ZERO);
        assert_eq!(compute_installment(dec!(100000), dec!(10), 0), Decimal::ZERO);
    }
}
