use thiserror::Error;

/// Errors raised by fallible interval-set operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntervalSetError {
    #[error("no interval covering [{start}, {end}) was found")]
    NotFound { start: i64, end: i64 },

    #[error("{count} intervals cover [{start}, {end}), expected exactly one")]
    NotUnique { start: i64, end: i64, count: usize },
}
