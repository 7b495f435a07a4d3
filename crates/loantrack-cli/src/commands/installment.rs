use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use loantrack_core::installment::compute_installment;

/// Arguments for installment calculation
#[derive(Args)]
pub struct InstallmentArgs {
    /// Principal amount outstanding
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate in percent (e.g. 8.5 for 8.5%)
    #[arg(long)]
    pub rate: Decimal,

    /// Tenure in months
    #[arg(long)]
    pub term: u32,
}

pub fn run_installment(args: InstallmentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let emi = compute_installment(args.principal, args.rate, args.term);
    Ok(json!({
        "result": {
            "emi": emi,
            "principal": args.principal,
            "annual_rate_percent": args.rate,
            "term_months": args.term,
        }
    }))
}
