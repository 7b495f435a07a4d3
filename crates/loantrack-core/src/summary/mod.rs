//! Read-only reducers over a generated schedule: per-financial-year,
//! whole-lifespan, and to-date summaries, plus the capped deduction
//! accumulator they share.

pub mod annual;
pub mod current;
pub mod deduction;
pub mod lifespan;

pub use annual::{annual_summary, AnnualSummary, DEFAULT_FY_START_MONTH};
pub use current::{current_summary, CurrentSummary};
pub use deduction::{DeductionAccumulator, DeductionCaps};
pub use lifespan::{lifespan_summary, LifespanSummary};
