//! Month-by-month schedule replay.
//!
//! Walks from the earliest disbursement, applying the normalized event
//! stream to a single local state accumulator, and emits one
//! `AmortizationEntry` per elapsed month until payoff or the iteration cap.
//! The schedule is a pure function of the loan's event logs: it is fully
//! recomputed on every call and never persisted as authoritative state.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanTrackError;
use crate::events::{normalize_events, ScheduleEvent};
use crate::installment::compute_installment;
use crate::loan::{AdjustmentPreference, Loan};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::LoanTrackResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Balance below which the loan is considered fully paid.
const BALANCE_EPSILON: Decimal = dec!(0.01);

/// Hard iteration cap: 50 years of monthly entries. Bounds worst-case work
/// when the installment cannot cover monthly interest.
const MAX_SCHEDULE_MONTHS: u32 = 600;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Indicators for structural events that fell due in a month.
///
/// Amount-bearing kinds accumulate when several events of the same kind
/// land in one month; rate and installment indicators keep the last value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthEvents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disbursed: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepaid: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_changed_to: Option<Percent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emi_changed_to: Option<Money>,
}

impl MonthEvents {
    pub fn is_empty(&self) -> bool {
        self.disbursed.is_none()
            && self.prepaid.is_none()
            && self.rate_changed_to.is_none()
            && self.emi_changed_to.is_none()
    }
}

/// One elapsed month of the schedule. All money fields rounded to 2 dp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    /// 1-based month counter.
    pub month_number: u32,
    pub payment_date: NaiveDate,
    pub opening_balance: Money,
    /// Actual amount paid this month (installment plus any prepayment).
    pub emi: Money,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub closing_balance: Money,
    #[serde(default, skip_serializing_if = "MonthEvents::is_empty")]
    pub events: MonthEvents,
}

/// Full replay result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub entries: Vec<AmortizationEntry>,
    /// False when the iteration cap was reached with balance outstanding.
    pub fully_amortized: bool,
    /// Installment in force when the schedule ended.
    pub final_emi: Money,
    pub total_principal: Money,
    pub total_interest: Money,
}

// ---------------------------------------------------------------------------
// Simulation state
// ---------------------------------------------------------------------------

/// Running state threaded through one replay. Local to a single call;
/// balances keep full precision between months.
struct SimulationState {
    balance: Decimal,
    annual_rate: Percent,
    emi: Money,
    month: u32,
    date: NaiveDate,
}

impl SimulationState {
    fn monthly_rate(&self) -> Decimal {
        self.annual_rate / dec!(12) / dec!(100)
    }
}

/// Remaining term used when recomputing the installment mid-schedule,
/// floored at one month.
fn remaining_term(original_tenure_months: u32, month: u32) -> u32 {
    original_tenure_months.saturating_sub(month).max(1)
}

fn next_month(date: NaiveDate) -> LoanTrackResult<NaiveDate> {
    date.checked_add_months(Months::new(1))
        .ok_or_else(|| LoanTrackError::DateError(format!("cannot advance one month past {date}")))
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Replay a loan's event logs into a full amortization schedule.
pub fn build_schedule(loan: &Loan) -> LoanTrackResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();
    let (output, warnings) = compute_schedule(loan)?;
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Event-Driven Amortization Replay",
        loan,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Replay loop
// ---------------------------------------------------------------------------

fn compute_schedule(loan: &Loan) -> LoanTrackResult<(ScheduleOutput, Vec<String>)> {
    let details = &loan.details;
    let mut warnings: Vec<String> = Vec::new();

    let Some(seed) = details.first_disbursement() else {
        // No drawdowns: a valid empty schedule, not an error.
        return Ok((
            ScheduleOutput {
                entries: Vec::new(),
                fully_amortized: true,
                final_emi: Decimal::ZERO,
                total_principal: Decimal::ZERO,
                total_interest: Decimal::ZERO,
            },
            warnings,
        ));
    };

    let events = normalize_events(loan);
    let mut next_event = 0usize;

    let mut state = SimulationState {
        balance: seed.amount,
        annual_rate: details.original_interest_rate,
        emi: compute_installment(
            seed.amount,
            details.original_interest_rate,
            details.original_tenure_months,
        ),
        month: 1,
        date: seed.date,
    };

    // Pre-EMI needs an explicit end date; without one the phase could never
    // hand over to amortization.
    let pre_emi_until = if details.started_with_pre_emi {
        details.emi_start_date
    } else {
        None
    };

    let mut entries: Vec<AmortizationEntry> = Vec::new();
    let mut total_principal = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;

    while state.balance > BALANCE_EPSILON && state.month <= MAX_SCHEDULE_MONTHS {
        let mut interest = state.balance * state.monthly_rate();
        let mut prepaid = Decimal::ZERO;
        let mut month_events = MonthEvents::default();

        // Apply every event that has fallen due, in normalizer order.
        while next_event < events.len() && events[next_event].date() <= state.date {
            match &events[next_event] {
                ScheduleEvent::Disbursement { amount, .. } => {
                    state.balance += *amount;
                    state.emi = compute_installment(
                        state.balance,
                        state.annual_rate,
                        remaining_term(details.original_tenure_months, state.month),
                    );
                    *month_events.disbursed.get_or_insert(Decimal::ZERO) += *amount;
                }
                ScheduleEvent::Prepayment { amount, .. } => {
                    // Reduces principal immediately: this month's interest
                    // accrues on the reduced balance, at the rate in force.
                    prepaid += *amount;
                    let reduced = (state.balance - prepaid).max(Decimal::ZERO);
                    interest = reduced * state.monthly_rate();
                    *month_events.prepaid.get_or_insert(Decimal::ZERO) += *amount;
                }
                ScheduleEvent::RateChange {
                    id,
                    new_rate,
                    preference,
                    new_emi,
                    ..
                } => {
                    state.annual_rate = *new_rate;
                    match preference {
                        AdjustmentPreference::AdjustTenure => {}
                        AdjustmentPreference::AdjustEmi => {
                            state.emi = compute_installment(
                                state.balance,
                                state.annual_rate,
                                remaining_term(details.original_tenure_months, state.month),
                            );
                        }
                        AdjustmentPreference::CustomEmi => match new_emi {
                            Some(emi) => state.emi = *emi,
                            None => warnings.push(format!(
                                "rate change {id} requests a custom EMI without an amount; \
                                 installment left unchanged"
                            )),
                        },
                    }
                    month_events.rate_changed_to = Some(*new_rate);
                }
                ScheduleEvent::EmiChange { new_emi, .. } => {
                    state.emi = *new_emi;
                    month_events.emi_changed_to = Some(*new_emi);
                }
            }
            next_event += 1;
        }

        // Pre-EMI months pay interest only; prepayments still reduce
        // principal since they are structural, not scheduled.
        let in_pre_emi = pre_emi_until.is_some_and(|until| state.date < until);
        let (mut principal, mut actual_payment) = if in_pre_emi {
            (prepaid, interest + prepaid)
        } else {
            let scheduled = (state.emi - interest).max(Decimal::ZERO);
            (scheduled + prepaid, state.emi + prepaid)
        };

        // Terminal clamp: never overshoot into a negative balance, and
        // close out exactly once within epsilon of zero.
        if state.balance - principal <= BALANCE_EPSILON {
            principal = state.balance;
            actual_payment = principal + interest;
        }

        let closing = state.balance - principal;

        entries.push(AmortizationEntry {
            month_number: state.month,
            payment_date: state.date,
            opening_balance: state.balance.round_dp(2),
            emi: actual_payment.round_dp(2),
            principal_paid: principal.round_dp(2),
            interest_paid: interest.round_dp(2),
            closing_balance: closing.round_dp(2),
            events: month_events,
        });

        total_principal += principal;
        total_interest += interest;
        state.balance = closing;
        state.date = next_month(state.date)?;
        state.month += 1;
    }

    let fully_amortized = state.balance <= BALANCE_EPSILON;
    if !fully_amortized {
        warnings.push(format!(
            "schedule reached the {MAX_SCHEDULE_MONTHS}-month cap with {} outstanding; \
             the installment does not cover monthly interest",
            state.balance.round_dp(2)
        ));
    }

    Ok((
        ScheduleOutput {
            entries,
            fully_amortized,
            final_emi: state.emi,
            total_principal: total_principal.round_dp(2),
            total_interest: total_interest.round_dp(2),
        },
        warnings,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_term_floors_at_one_month() {
        assert_eq!(remaining_term(240, 5), 235);
        assert_eq!(remaining_term(12, 12), 1);
        assert_eq!(remaining_term(12, 300), 1);
    }

    #[test]
    fn test_month_events_empty() {
        let mut ev = MonthEvents::default();
        assert!(ev.is_empty());
        ev.prepaid = Some(dec!(100));
        assert!(!ev.is_empty());
    }
}
