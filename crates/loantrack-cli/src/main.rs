mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::installment::InstallmentArgs;
use commands::schedule::ScheduleArgs;
use commands::summary::{AnnualArgs, LifespanArgs, StatusArgs};

/// Loan amortization schedules from event-logged loan state
#[derive(Parser)]
#[command(
    name = "emi",
    version,
    about = "Loan amortization schedules and summaries",
    long_about = "Replays a loan's disbursement, prepayment, rate-change and \
                  EMI-override logs into a month-by-month amortization schedule, \
                  plus per-financial-year, whole-of-life and to-date summaries. \
                  All arithmetic in decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the fixed monthly installment for a principal, rate and term
    Installment(InstallmentArgs),
    /// Replay a loan into its full amortization schedule
    Schedule(ScheduleArgs),
    /// Per-financial-year principal, interest and deduction totals
    Annual(AnnualArgs),
    /// Whole-of-life totals and actual tenure
    Lifespan(LifespanArgs),
    /// Totals to date and current outstanding balance
    Status(StatusArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Installment(args) => commands::installment::run_installment(args),
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Annual(args) => commands::summary::run_annual(args),
        Commands::Lifespan(args) => commands::summary::run_lifespan(args),
        Commands::Status(args) => commands::summary::run_status(args),
        Commands::Version => {
            println!("emi {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
