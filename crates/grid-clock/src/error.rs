//! Error types for clock and interval operations.

use thiserror::Error;

/// Errors raised by clock and interval operations.
///
/// Every variant is raised synchronously at the point of violation — nothing
/// is deferred or retried internally. Each failing operation leaves no
/// observable partial effect.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    /// A literal did not match the accepted shape, or a field was out of range.
    #[error("parse error: {0}")]
    Parse(String),

    /// An interval was constructed with its end before its start.
    #[error("interval ordering violated: start {start} is after end {end}")]
    Ordering { start: String, end: String },

    /// A required parameter was missing (e.g., the week-start day).
    #[error("missing required parameter: {0}")]
    Config(&'static str),

    /// A unit/operation combination that is not implemented. Fatal.
    #[error("unit {unit} is not supported by {operation}")]
    NotSupported {
        unit: &'static str,
        operation: &'static str,
    },
}

/// Convenience alias used throughout grid-clock.
pub type Result<T> = std::result::Result<T, ClockError>;
