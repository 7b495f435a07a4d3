//! Bounded running totals of tax-deductible principal and interest.

use rust_decimal::Decimal;

use crate::loan::LoanDetails;
use crate::types::Money;

/// Per-financial-year deduction limits taken from the loan's details.
#[derive(Debug, Clone, Copy)]
pub struct DeductionCaps {
    pub principal_limit: Money,
    pub interest_limit: Money,
    pub enabled: bool,
}

impl DeductionCaps {
    pub fn from_details(details: &LoanDetails) -> Self {
        DeductionCaps {
            principal_limit: details.principal_deduction_limit,
            interest_limit: details.interest_deduction_limit,
            enabled: details.tax_deductible,
        }
    }
}

/// Accumulates deductible principal/interest within one financial year.
///
/// Each year is capped independently; resetting at an FY boundary discards
/// unused headroom rather than carrying it over.
#[derive(Debug, Clone)]
pub struct DeductionAccumulator {
    caps: DeductionCaps,
    principal_accrued: Decimal,
    interest_accrued: Decimal,
}

impl DeductionAccumulator {
    pub fn new(caps: DeductionCaps) -> Self {
        DeductionAccumulator {
            caps,
            principal_accrued: Decimal::ZERO,
            interest_accrued: Decimal::ZERO,
        }
    }

    pub fn record(&mut self, principal: Money, interest: Money) {
        self.principal_accrued += principal;
        self.interest_accrued += interest;
    }

    pub fn capped_principal(&self) -> Money {
        if !self.caps.enabled {
            return Decimal::ZERO;
        }
        self.principal_accrued.min(self.caps.principal_limit)
    }

    pub fn capped_interest(&self) -> Money {
        if !self.caps.enabled {
            return Decimal::ZERO;
        }
        self.interest_accrued.min(self.caps.interest_limit)
    }

    /// Start a new financial year.
    pub fn reset(&mut self) {
        self.principal_accrued = Decimal::ZERO;
        self.interest_accrued = Decimal::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn caps(enabled: bool) -> DeductionCaps {
        DeductionCaps {
            principal_limit: dec!(150000),
            interest_limit: dec!(200000),
            enabled,
        }
    }

    #[test]
    fn test_caps_apply_independently() {
        let mut acc = DeductionAccumulator::new(caps(true));
        acc.record(dec!(100000), dec!(250000));
        assert_eq!(acc.capped_principal(), dec!(100000));
        assert_eq!(acc.capped_interest(), dec!(200000));

        acc.record(dec!(90000), dec!(0));
        assert_eq!(acc.capped_principal(), dec!(150000));
    }

    #[test]
    fn test_reset_discards_headroom() {
        let mut acc = DeductionAccumulator::new(caps(true));
        acc.record(dec!(10000), dec!(10000));
        acc.reset();
        assert_eq!(acc.capped_principal(), Decimal::ZERO);
        acc.record(dec!(200000), dec!(300000));
        assert_eq!(acc.capped_principal(), dec!(150000));
        assert_eq!(acc.capped_interest(), dec!(200000));
    }

    #[test]
    fn test_disabled_loan_deducts_nothing() {
        let mut acc = DeductionAccumulator::new(caps(false));
        acc.record(dec!(100000), dec!(100000));
        assert_eq!(acc.capped_principal(), Decimal::ZERO);
        assert_eq!(acc.capped_interest(), Decimal::ZERO);
    }
}
