//! Date range error types.

use thiserror::Error;

/// Errors raised while reading a date range from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateRangeError {
    /// A date was not `YYYY-MM-DD`.
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// The start falls after the end.
    #[error("Start date {start} is after end date {end}")]
    Inverted {
        /// Start as given.
        start: String,
        /// End as given.
        end: String,
    },
}
