pub mod error;
pub mod events;
pub mod installment;
pub mod loan;
pub mod schedule;
pub mod summary;
pub mod types;

pub use error::LoanTrackError;
pub use types::*;

/// Standard result type for all loantrack operations
pub type LoanTrackResult<T> = Result<T, LoanTrackError>;
