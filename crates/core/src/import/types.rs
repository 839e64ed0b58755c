//! Import row types.

use chrono::NaiveDateTime;
use dispatch_shared::types::{ClientId, CourierId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::billing::{BillingError, Ride};

/// One ride as exported by the dispatch system.
///
/// Clients are named and couriers identified by radio call number; the
/// delivery status is free text until the row is converted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RideImportRow {
    /// Dispatch job identifier.
    pub job_id: String,
    /// Client display name.
    pub client_name: String,
    /// Courier radio call number.
    pub courier_number: String,
    /// When the job was ready.
    pub ready_time: NaiveDateTime,
    /// Delivery status as reported.
    pub delivery_status: String,
    /// Order value.
    #[serde(default)]
    pub order_total: Option<Decimal>,
    /// Amount billable to the client.
    #[serde(default)]
    pub billable_total: Option<Decimal>,
    /// Tip.
    #[serde(default)]
    pub tip: Option<Decimal>,
    /// Delivery fee.
    #[serde(default)]
    pub delivery_fee: Option<Decimal>,
    /// Pickup address.
    #[serde(default)]
    pub pickup_address: Option<String>,
    /// First line of the destination address.
    #[serde(default)]
    pub destination_address1: Option<String>,
    /// Dispatcher notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl RideImportRow {
    /// Converts the row into a validated ride for the resolved client and courier.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::UnknownDeliveryStatus` for an unrecognised status and
    /// `BillingError::MissingRideField` for a complete ride lacking an amount.
    pub fn into_ride(self, client: ClientId, courier: CourierId) -> Result<Ride, BillingError> {
        let ride = Ride {
            delivery_status: self.delivery_status.parse()?,
            job_id: self.job_id,
            client,
            courier,
            ready_time: self.ready_time,
            order_total: self.order_total,
            billable_total: self.billable_total,
            tip: self.tip,
            delivery_fee: self.delivery_fee,
            pickup_address: self.pickup_address,
            destination_address1: self.destination_address1,
            notes: self.notes,
        };
        ride.validate()?;
        Ok(ride)
    }
}
