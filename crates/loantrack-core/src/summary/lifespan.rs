//! Whole-of-life aggregation of a schedule.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::loan::LoanDetails;
use crate::schedule::AmortizationEntry;
use crate::summary::annual::annual_summary;
use crate::types::Money;
use crate::LoanTrackResult;

/// Totals over the entire schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifespanSummary {
    pub total_principal: Money,
    pub total_interest: Money,
    pub total_payment: Money,
    /// Sum of per-year capped deductions.
    pub total_deductible_principal: Money,
    pub total_deductible_interest: Money,
    /// Length of the generated schedule; differs from the original tenure
    /// after prepayments or rate changes.
    pub actual_tenure_months: u32,
    pub original_tenure_months: u32,
}

/// Sum the annual rows into lifetime totals.
pub fn lifespan_summary(
    entries: &[AmortizationEntry],
    details: &LoanDetails,
    fy_start_month: u32,
) -> LoanTrackResult<LifespanSummary> {
    let rows = annual_summary(entries, details, fy_start_month)?;

    let mut summary = LifespanSummary {
        total_principal: Decimal::ZERO,
        total_interest: Decimal::ZERO,
        total_payment: Decimal::ZERO,
        total_deductible_principal: Decimal::ZERO,
        total_deductible_interest: Decimal::ZERO,
        actual_tenure_months: entries.len() as u32,
        original_tenure_months: details.original_tenure_months,
    };
    for row in &rows {
        summary.total_principal += row.principal_paid;
        summary.total_interest += row.interest_paid;
        summary.total_payment += row.total_payment;
        summary.total_deductible_principal += row.deductible_principal;
        summary.total_deductible_interest += row.deductible_interest;
    }
    Ok(summary)
}
