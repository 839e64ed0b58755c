//! Billing error types.

use dispatch_shared::AppError;
use thiserror::Error;

/// Errors that can occur while computing fees or validating billing input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingError {
    /// Admin fee type is neither fixed nor scale.
    #[error("Don't know how to calculate an admin fee of type: {0}")]
    UnknownAdminFeeType(String),

    /// Payment type has no billing rules.
    #[error("Don't know how to calculate fees for payment type: {0}")]
    UnknownPaymentType(String),

    /// Courier status does not map to a payout account.
    #[error("Don't know which account to post payouts for courier status: {0}")]
    UnknownAccountMapping(String),

    /// Delivery status is not one the dispatch system reports.
    #[error("Unknown delivery status: {0}")]
    UnknownDeliveryStatus(String),

    /// A fixed admin fee was configured without an amount.
    #[error("Client {0} has a fixed admin fee but no amount")]
    MissingFixedAdminFee(String),

    /// A completed ride lacks a field required for billing.
    #[error("Ride {job_id} is complete but has no {field}")]
    MissingRideField {
        /// Job identifier of the ride.
        job_id: String,
        /// Name of the missing field.
        field: &'static str,
    },
}

impl From<BillingError> for AppError {
    fn from(err: BillingError) -> Self {
        Self::Validation(err.to_string())
    }
}
