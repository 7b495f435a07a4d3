use clap::Args;
use serde_json::Value;

use loantrack_core::schedule::build_schedule;

use crate::input;

/// Arguments for schedule generation
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to a loan file (JSON or YAML); falls back to piped stdin
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = input::load_loan(args.input.as_deref())?;
    let output = build_schedule(&loan)?;
    Ok(serde_json::to_value(&output)?)
}
