//! Event normalization: merges the four heterogeneous event logs into one
//! chronologically ordered stream for replay.
//!
//! Ordering is by date ascending. Events sharing a date process in kind
//! order — disbursement, then prepayment, then rate change, then EMI
//! change — with insertion order breaking any remaining ties. The sort is
//! stable, so replay is deterministic regardless of how the source arrays
//! were accumulated.

use chrono::NaiveDate;

use crate::loan::{AdjustmentPreference, Loan, PaymentType};
use crate::types::{Money, Percent};

/// A structural event applied during schedule replay.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleEvent {
    /// Drawdown raising the outstanding balance mid-schedule.
    Disbursement {
        id: String,
        date: NaiveDate,
        amount: Money,
    },
    /// Out-of-schedule principal reduction.
    Prepayment {
        id: String,
        date: NaiveDate,
        amount: Money,
    },
    /// Rate revision with its recalculation policy.
    RateChange {
        id: String,
        date: NaiveDate,
        new_rate: Percent,
        preference: AdjustmentPreference,
        new_emi: Option<Money>,
    },
    /// Voluntary installment override.
    EmiChange {
        id: String,
        date: NaiveDate,
        new_emi: Money,
    },
}

impl ScheduleEvent {
    pub fn date(&self) -> NaiveDate {
        match self {
            ScheduleEvent::Disbursement { date, .. }
            | ScheduleEvent::Prepayment { date, .. }
            | ScheduleEvent::RateChange { date, .. }
            | ScheduleEvent::EmiChange { date, .. } => *date,
        }
    }

    /// Same-day processing order.
    fn kind_rank(&self) -> u8 {
        match self {
            ScheduleEvent::Disbursement { .. } => 0,
            ScheduleEvent::Prepayment { .. } => 1,
            ScheduleEvent::RateChange { .. } => 2,
            ScheduleEvent::EmiChange { .. } => 3,
        }
    }
}

/// Merge a loan's event logs into a single ordered stream.
///
/// The seeding disbursement (earliest) establishes initial state and is
/// excluded; `EMI`-typed payment records are informational and excluded.
pub fn normalize_events(loan: &Loan) -> Vec<ScheduleEvent> {
    let seed = loan.details.first_disbursement_index();
    let mut events: Vec<ScheduleEvent> = Vec::new();

    for (i, d) in loan.details.disbursements.iter().enumerate() {
        if Some(i) == seed {
            continue;
        }
        events.push(ScheduleEvent::Disbursement {
            id: d.id.clone(),
            date: d.date,
            amount: d.amount,
        });
    }

    for p in &loan.payment_history {
        if p.payment_type != PaymentType::Prepayment {
            continue;
        }
        events.push(ScheduleEvent::Prepayment {
            id: p.id.clone(),
            date: p.date,
            amount: p.amount,
        });
    }

    for rc in &loan.interest_rate_changes {
        events.push(ScheduleEvent::RateChange {
            id: rc.id.clone(),
            date: rc.date,
            new_rate: rc.new_rate,
            preference: rc.adjustment_preference,
            new_emi: rc.new_emi,
        });
    }

    for ec in &loan.custom_emi_changes {
        events.push(ScheduleEvent::EmiChange {
            id: ec.id.clone(),
            date: ec.date,
            new_emi: ec.new_emi,
        });
    }

    events.sort_by_key(|e| (e.date(), e.kind_rank()));
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::{
        CustomEmiChange, Disbursement, InterestRateChange, LoanDetails, Payment,
    };
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn loan_with_same_day_events() -> Loan {
        Loan {
            id: "l1".into(),
            name: "test".into(),
            details: LoanDetails {
                disbursements: vec![
                    Disbursement {
                        id: "seed".into(),
                        date: date(2024, 1, 1),
                        amount: dec!(100000),
                        remarks: None,
                    },
                    Disbursement {
                        id: "d2".into(),
                        date: date(2024, 6, 1),
                        amount: dec!(50000),
                        remarks: None,
                    },
                ],
                original_interest_rate: dec!(10),
                original_tenure_months: 24,
                start_date: date(2024, 1, 1),
                started_with_pre_emi: false,
                emi_start_date: None,
                tax_deductible: false,
                principal_deduction_limit: Decimal::ZERO,
                interest_deduction_limit: Decimal::ZERO,
            },
            payment_history: vec![
                Payment {
                    id: "emi-log".into(),
                    date: date(2024, 3, 1),
                    amount: dec!(4614.49),
                    payment_type: PaymentType::Emi,
                    principal_paid: None,
                    interest_paid: None,
                    balance_after_payment: None,
                    remarks: None,
                },
                Payment {
                    id: "p1".into(),
                    date: date(2024, 6, 1),
                    amount: dec!(30000),
                    payment_type: PaymentType::Prepayment,
                    principal_paid: None,
                    interest_paid: None,
                    balance_after_payment: None,
                    remarks: None,
                },
            ],
            interest_rate_changes: vec![InterestRateChange {
                id: "r1".into(),
                date: date(2024, 6, 1),
                new_rate: dec!(12),
                adjustment_preference: AdjustmentPreference::AdjustTenure,
                new_emi: None,
            }],
            custom_emi_changes: vec![CustomEmiChange {
                id: "c1".into(),
                date: date(2024, 6, 1),
                new_emi: dec!(7000),
                remarks: None,
            }],
        }
    }

    #[test]
    fn test_seed_and_emi_records_excluded() {
        let events = normalize_events(&loan_with_same_day_events());
        assert_eq!(events.len(), 4);
        assert!(events.iter().all(|e| match e {
            ScheduleEvent::Disbursement { id, .. } => id != "seed",
            ScheduleEvent::Prepayment { id, .. } => id != "emi-log",
            _ => true,
        }));
    }

    #[test]
    fn test_same_day_events_sort_in_kind_order() {
        let events = normalize_events(&loan_with_same_day_events());
        let kinds: Vec<u8> = events.iter().map(|e| e.kind_rank()).collect();
        assert_eq!(kinds, vec![0, 1, 2, 3]);
        assert_eq!(events[0].date(), date(2024, 6, 1));
    }

    #[test]
    fn test_events_sorted_by_date_across_kinds() {
        let mut loan = loan_with_same_day_events();
        // A later prepayment must not jump ahead of an earlier EMI change.
        loan.payment_history.push(Payment {
            id: "p2".into(),
            date: date(2025, 1, 1),
            amount: dec!(10000),
            payment_type: PaymentType::Prepayment,
            principal_paid: None,
            interest_paid: None,
            balance_after_payment: None,
            remarks: None,
        });
        let events = normalize_events(&loan);
        let dates: Vec<NaiveDate> = events.iter().map(|e| e.date()).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }
}
