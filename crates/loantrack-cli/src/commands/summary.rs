use chrono::{Local, NaiveDate};
use clap::Args;
use serde_json::{json, Value};

use loantrack_core::schedule::build_schedule;
use loantrack_core::summary::{
    annual_summary, current_summary, lifespan_summary, DEFAULT_FY_START_MONTH,
};

use crate::input;

/// Arguments for the annual (financial-year) summary
#[derive(Args)]
pub struct AnnualArgs {
    /// Path to a loan file (JSON or YAML); falls back to piped stdin
    #[arg(long)]
    pub input: Option<String>,

    /// First month of the financial year (1-12; 4 = April)
    #[arg(long, default_value_t = DEFAULT_FY_START_MONTH)]
    pub fy_start_month: u32,
}

/// Arguments for the lifespan summary
#[derive(Args)]
pub struct LifespanArgs {
    /// Path to a loan file (JSON or YAML); falls back to piped stdin
    #[arg(long)]
    pub input: Option<String>,

    /// First month of the financial year (1-12; 4 = April)
    #[arg(long, default_value_t = DEFAULT_FY_START_MONTH)]
    pub fy_start_month: u32,
}

/// Arguments for the to-date summary
#[derive(Args)]
pub struct StatusArgs {
    /// Path to a loan file (JSON or YAML); falls back to piped stdin
    #[arg(long)]
    pub input: Option<String>,

    /// Report the position as of this date (default: today)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
}

pub fn run_annual(args: AnnualArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = input::load_loan(args.input.as_deref())?;
    let output = build_schedule(&loan)?;
    let rows = annual_summary(&output.result.entries, &loan.details, args.fy_start_month)?;
    Ok(json!({ "result": rows, "warnings": output.warnings }))
}

pub fn run_lifespan(args: LifespanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = input::load_loan(args.input.as_deref())?;
    let output = build_schedule(&loan)?;
    let summary = lifespan_summary(&output.result.entries, &loan.details, args.fy_start_month)?;
    Ok(json!({ "result": summary, "warnings": output.warnings }))
}

pub fn run_status(args: StatusArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = input::load_loan(args.input.as_deref())?;
    let output = build_schedule(&loan)?;
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let summary = current_summary(&output.result.entries, as_of);
    Ok(json!({ "result": summary, "warnings": output.warnings }))
}
