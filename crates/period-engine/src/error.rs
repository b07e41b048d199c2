//! Error types for period-engine operations.
//!
//! Almost everything in this crate is a total function: invalid intervals,
//! out-of-range indices, and empty groups are modeled with sentinel results,
//! not errors. The only hard failures come from the calendar arithmetic
//! itself, when an operation would push an instant past the representable
//! range or name a date that does not exist.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Instant arithmetic overflow: {0}")]
    ArithmeticOverflow(String),

    #[error("Invalid date components: {0}")]
    InvalidComponents(String),

    #[error("Unresolvable local time: {0}")]
    UnresolvableLocalTime(String),
}

pub type Result<T> = std::result::Result<T, PeriodError>;
