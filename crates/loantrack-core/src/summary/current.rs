//! Aggregation restricted to months that have already fallen due.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::schedule::AmortizationEntry;
use crate::types::Money;

/// Position of the loan as of a given date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentSummary {
    pub as_of: NaiveDate,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub total_payment: Money,
    /// Closing balance of the last elapsed month, or the first month's
    /// opening balance when none has elapsed yet.
    pub outstanding_balance: Money,
    pub months_elapsed: u32,
}

/// Totals over entries with `payment_date <= as_of`.
///
/// Pure in `as_of`: callers wanting "today" pass the current date in.
pub fn current_summary(entries: &[AmortizationEntry], as_of: NaiveDate) -> CurrentSummary {
    let mut summary = CurrentSummary {
        as_of,
        principal_paid: Decimal::ZERO,
        interest_paid: Decimal::ZERO,
        total_payment: Decimal::ZERO,
        outstanding_balance: entries
            .first()
            .map(|e| e.opening_balance)
            .unwrap_or(Decimal::ZERO),
        months_elapsed: 0,
    };

    // Entries are chronological, so the elapsed months are a prefix.
    for entry in entries.iter().take_while(|e| e.payment_date <= as_of) {
        summary.principal_paid += entry.principal_paid;
        summary.interest_paid += entry.interest_paid;
        summary.total_payment += entry.emi;
        summary.outstanding_balance = entry.closing_balance;
        summary.months_elapsed += 1;
    }

    summary.principal_paid = summary.principal_paid.round_dp(2);
    summary.interest_paid = summary.interest_paid.round_dp(2);
    summary.total_payment = summary.total_payment.round_dp(2);
    summary
}
