//! Import error types.

use dispatch_shared::AppError;
use thiserror::Error;

use crate::billing::BillingError;

/// Errors that can occur while importing a ride row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// No client has the row's client name.
    #[error("Client not found: {0}")]
    ClientNotFound(String),

    /// No courier has the row's call number.
    #[error("Courier not found: {0}")]
    CourierNotFound(String),

    /// The directory could not answer a lookup.
    #[error("Directory lookup failed: {0}")]
    Directory(String),

    /// The row does not describe a valid ride.
    #[error(transparent)]
    Invalid(#[from] BillingError),
}

impl From<ImportError> for AppError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::ClientNotFound(_) | ImportError::CourierNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            ImportError::Directory(msg) => Self::Internal(msg),
            ImportError::Invalid(err) => err.into(),
        }
    }
}
