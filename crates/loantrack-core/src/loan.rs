//! Persisted loan state: disbursement and event logs.
//!
//! A `Loan` and its four event collections are the engine's only input; the
//! schedule is always re-derived from them in full, so edits or deletions
//! anywhere in history recompute every subsequent month. Dates deserialize
//! from ISO-8601 strings and IDs are opaque strings, matching loans
//! reconstructed from stored JSON.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};

/// A drawdown of loan principal at a point in time.
///
/// The earliest disbursement seeds the simulation (initial balance and start
/// date); later ones are structural events that raise the balance
/// mid-schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disbursement {
    pub id: String,
    pub date: NaiveDate,
    pub amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Discriminates scheduled installments from out-of-schedule prepayments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentType {
    #[serde(rename = "EMI")]
    Emi,
    Prepayment,
}

/// A recorded payment.
///
/// Only `Prepayment` records participate in replay. The stored split fields
/// are log entries from the time of payment; the simulator recomputes the
/// authoritative split and never trusts them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub date: NaiveDate,
    pub amount: Money,
    pub payment_type: PaymentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal_paid: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_paid: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance_after_payment: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// How the installment reacts to a rate revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdjustmentPreference {
    /// Installment unchanged; the tenure absorbs the rate change.
    AdjustTenure,
    /// Installment recomputed over the remaining term at the new rate.
    AdjustEmi,
    /// Installment set to an explicitly supplied amount.
    CustomEmi,
}

/// A rate revision effective on `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestRateChange {
    pub id: String,
    pub date: NaiveDate,
    pub new_rate: Percent,
    pub adjustment_preference: AdjustmentPreference,
    /// Required by `CustomEmi`, ignored otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_emi: Option<Money>,
}

/// A voluntary installment override independent of any rate change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomEmiChange {
    pub id: String,
    pub date: NaiveDate,
    pub new_emi: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Structural terms of the loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanDetails {
    pub disbursements: Vec<Disbursement>,
    /// Annual rate in percent at inception.
    pub original_interest_rate: Percent,
    pub original_tenure_months: u32,
    /// Nominal start of the loan; the simulation itself starts at the
    /// earliest disbursement date.
    pub start_date: NaiveDate,
    /// Interest-only phase runs from the first disbursement until
    /// `emi_start_date` when set.
    #[serde(default)]
    pub started_with_pre_emi: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emi_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub tax_deductible: bool,
    /// Per-financial-year cap on deductible principal.
    #[serde(default)]
    pub principal_deduction_limit: Money,
    /// Per-financial-year cap on deductible interest.
    #[serde(default)]
    pub interest_deduction_limit: Money,
}

/// The sole unit of persisted state the engine consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: String,
    pub name: String,
    pub details: LoanDetails,
    #[serde(default)]
    pub payment_history: Vec<Payment>,
    #[serde(default)]
    pub interest_rate_changes: Vec<InterestRateChange>,
    #[serde(default)]
    pub custom_emi_changes: Vec<CustomEmiChange>,
}

impl LoanDetails {
    /// Index of the seeding disbursement: earliest date, ties broken by
    /// position in the vector.
    pub(crate) fn first_disbursement_index(&self) -> Option<usize> {
        self.disbursements
            .iter()
            .enumerate()
            .min_by_key(|(i, d)| (d.date, *i))
            .map(|(i, _)| i)
    }

    /// The disbursement that seeds the simulation, if any.
    pub fn first_disbursement(&self) -> Option<&Disbursement> {
        self.first_disbursement_index()
            .map(|i| &self.disbursements[i])
    }

    /// Sum of all drawdowns.
    pub fn total_disbursed(&self) -> Money {
        self.disbursements
            .iter()
            .map(|d| d.amount)
            .fold(Decimal::ZERO, |acc, x| acc + x)
    }
}

impl Loan {
    /// Payments that reduce the balance at replay time.
    pub fn prepayments(&self) -> impl Iterator<Item = &Payment> {
        self.payment_history
            .iter()
            .filter(|p| p.payment_type == PaymentType::Prepayment)
    }
}
