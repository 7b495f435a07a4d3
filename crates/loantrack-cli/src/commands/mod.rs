pub mod installment;
pub mod schedule;
pub mod summary;
