pub mod file;

use loantrack_core::loan::Loan;
use serde_json::Value;
use std::io::{self, Read};

/// Load a loan from `--input`, or from stdin when data is piped in.
pub fn load_loan(path: Option<&str>) -> Result<Loan, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return file::read_loan(path);
    }
    if let Some(value) = read_piped_stdin()? {
        return Ok(serde_json::from_value(value)?);
    }
    Err("provide --input <loan file> or pipe a loan JSON on stdin".into())
}

/// JSON from stdin if data is being piped; None when stdin is a TTY.
fn read_piped_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(trimmed)?;
    Ok(Some(value))
}
