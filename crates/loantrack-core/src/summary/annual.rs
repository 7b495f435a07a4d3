//! Per-financial-year aggregation of a schedule.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LoanTrackError;
use crate::loan::LoanDetails;
use crate::schedule::AmortizationEntry;
use crate::summary::deduction::{DeductionAccumulator, DeductionCaps};
use crate::types::Money;
use crate::LoanTrackResult;

/// April, the conventional financial-year start.
pub const DEFAULT_FY_START_MONTH: u32 = 4;

/// Totals for one financial year of the schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualSummary {
    /// Display label, e.g. "FY 2024-25".
    pub label: String,
    /// Calendar year the financial year starts in.
    pub start_year: i32,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub total_payment: Money,
    /// Capped at the loan's per-year principal limit; zero when the loan is
    /// not tax-deductible.
    pub deductible_principal: Money,
    /// Capped at the loan's per-year interest limit.
    pub deductible_interest: Money,
}

/// Group schedule entries by financial year and total them.
///
/// `fy_start_month` is 1-based (4 = April). Entries are assumed
/// chronological, as the simulator emits them.
pub fn annual_summary(
    entries: &[AmortizationEntry],
    details: &LoanDetails,
    fy_start_month: u32,
) -> LoanTrackResult<Vec<AnnualSummary>> {
    if !(1..=12).contains(&fy_start_month) {
        return Err(LoanTrackError::InvalidInput {
            field: "fy_start_month".into(),
            reason: "must be between 1 and 12".into(),
        });
    }

    let caps = DeductionCaps::from_details(details);
    let mut rows: Vec<AnnualSummary> = Vec::new();
    let mut current: Option<YearTotals> = None;

    for entry in entries {
        let fy = fy_start_year(entry.payment_date, fy_start_month);
        match &mut current {
            Some(year) if year.start_year == fy => year.record(entry),
            slot => {
                if let Some(done) = slot.take() {
                    rows.push(done.finish());
                }
                let mut year = YearTotals::new(fy, caps);
                year.record(entry);
                *slot = Some(year);
            }
        }
    }
    if let Some(done) = current.take() {
        rows.push(done.finish());
    }

    Ok(rows)
}

/// Calendar year in which the financial year containing `date` starts.
fn fy_start_year(date: NaiveDate, fy_start_month: u32) -> i32 {
    if date.month() >= fy_start_month {
        date.year()
    } else {
        date.year() - 1
    }
}

fn fy_label(start_year: i32) -> String {
    format!("FY {}-{:02}", start_year, (start_year + 1).rem_euclid(100))
}

struct YearTotals {
    start_year: i32,
    principal: Decimal,
    interest: Decimal,
    total: Decimal,
    deductions: DeductionAccumulator,
}

impl YearTotals {
    fn new(start_year: i32, caps: DeductionCaps) -> Self {
        YearTotals {
            start_year,
            principal: Decimal::ZERO,
            interest: Decimal::ZERO,
            total: Decimal::ZERO,
            deductions: DeductionAccumulator::new(caps),
        }
    }

    fn record(&mut self, entry: &AmortizationEntry) {
        self.principal += entry.principal_paid;
        self.interest += entry.interest_paid;
        self.total += entry.emi;
        self.deductions.record(entry.principal_paid, entry.interest_paid);
    }

    fn finish(self) -> AnnualSummary {
        AnnualSummary {
            label: fy_label(self.start_year),
            start_year: self.start_year,
            principal_paid: self.principal.round_dp(2),
            interest_paid: self.interest.round_dp(2),
            total_payment: self.total.round_dp(2),
            deductible_principal: self.deductions.capped_principal().round_dp(2),
            deductible_interest: self.deductions.capped_interest().round_dp(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fy_start_year_boundaries() {
        let march = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let april = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        assert_eq!(fy_start_year(march, 4), 2023);
        assert_eq!(fy_start_year(april, 4), 2024);
        // Calendar-year grouping.
        assert_eq!(fy_start_year(march, 1), 2024);
    }

    #[test]
    fn test_fy_label_wraps_century() {
        assert_eq!(fy_label(2024), "FY 2024-25");
        assert_eq!(fy_label(1999), "FY 1999-00");
        assert_eq!(fy_label(2099), "FY 2099-00");
    }
}
