//! Period error types.

use chrono::NaiveDateTime;
use dispatch_shared::AppError;
use thiserror::Error;

use super::types::Period;

/// Errors that can occur while reconciling billing periods.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// Requested range ends before it starts.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange {
        /// Start of the range.
        start: NaiveDateTime,
        /// End of the range.
        end: NaiveDateTime,
    },

    /// A persisted period ends before it starts.
    #[error("Persisted period starts after it ends: {period}")]
    InvalidPeriod {
        /// The inverted period.
        period: Period,
    },

    /// Two persisted periods cover the same instant.
    #[error("Persisted periods overlap: {first} and {second}")]
    OverlappingPeriods {
        /// Earlier period.
        first: Period,
        /// Later period.
        second: Period,
    },
}

impl From<PeriodError> for AppError {
    fn from(err: PeriodError) -> Self {
        match err {
            PeriodError::InvalidRange { .. } => Self::Validation(err.to_string()),
            PeriodError::InvalidPeriod { .. } | PeriodError::OverlappingPeriods { .. } => {
                Self::BusinessRule(err.to_string())
            }
        }
    }
}
