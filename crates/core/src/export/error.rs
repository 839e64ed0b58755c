//! Export error types.

use dispatch_shared::AppError;
use thiserror::Error;

use crate::billing::BillingError;
use crate::period::Period;

/// Errors that can occur while building or writing export rows.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A row was built without a reference number.
    #[error("A reference number is required")]
    RefNumberRequired,

    /// A row was built without a required column.
    #[error("Export row is missing {0}")]
    MissingField(&'static str),

    /// An amount could not be computed.
    #[error(transparent)]
    Billing(#[from] BillingError),

    /// A document was formatted against a period other than its own.
    #[error("Export period {expected} does not match document period {found}")]
    PeriodMismatch {
        /// Period passed to the formatter.
        expected: Period,
        /// Period the document was computed for.
        found: Period,
    },

    /// A row could not be written as CSV.
    #[error("Failed to write export: {0}")]
    Csv(#[from] ::csv::Error),

    /// The sink rejected the write.
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Billing(err) => err.into(),
            ExportError::Io(err) => Self::Internal(err.to_string()),
            ExportError::Csv(_) | ExportError::PeriodMismatch { .. } => {
                Self::Internal(err.to_string())
            }
            ExportError::RefNumberRequired | ExportError::MissingField(_) => {
                Self::Validation(err.to_string())
            }
        }
    }
}
