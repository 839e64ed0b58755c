//! Billing domain types.
//!
//! Clients and couriers arrive as loosely typed records and are validated once
//! at the ingestion boundary; everything downstream works on closed enums.

use chrono::NaiveDateTime;
use dispatch_shared::types::{ClientId, CourierId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::BillingError;

/// How a client settles delivery charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    /// Tips and delivery fees are invoiced to the client.
    Invoiced,
    /// The client's customers pay at the door.
    Paid,
    /// Imported from the previous system; no billing rules apply.
    Legacy,
}

impl PaymentType {
    /// Returns the stored name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Invoiced => "invoiced",
            Self::Paid => "paid",
            Self::Legacy => "legacy",
        }
    }
}

impl std::fmt::Display for PaymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentType {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "invoiced" => Ok(Self::Invoiced),
            "paid" => Ok(Self::Paid),
            "legacy" => Ok(Self::Legacy),
            _ => Err(BillingError::UnknownPaymentType(s.to_string())),
        }
    }
}

/// Monthly admin fee arrangement. A fixed amount only exists for fixed fees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminFee {
    /// The same amount every month.
    Fixed(Decimal),
    /// Tiered by the number of rides in the month.
    Scale,
}

impl AdminFee {
    /// Returns the stored type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Fixed(_) => "fixed",
            Self::Scale => "scale",
        }
    }
}

/// A billed client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ClientRecord", into = "ClientRecord")]
pub struct Client {
    /// Unique identifier.
    pub id: ClientId,
    /// Display name, also the name used by the dispatch export.
    pub name: String,
    /// How delivery charges are settled.
    pub payment_type: PaymentType,
    /// Admin fee arrangement.
    pub admin_fee: AdminFee,
    /// Free-form description of the negotiated delivery fee structure.
    pub delivery_fee_structure: Option<String>,
}

/// A client as stored or submitted, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRecord {
    /// Unique identifier.
    pub id: ClientId,
    /// Display name.
    pub name: String,
    /// Payment type name.
    pub payment_type: String,
    /// Admin fee type name.
    pub admin_fee_type: String,
    /// Fixed admin fee, required for fixed fees.
    #[serde(default)]
    pub fixed_admin_fee: Option<Decimal>,
    /// Delivery fee structure description.
    #[serde(default)]
    pub delivery_fee_structure: Option<String>,
}

impl TryFrom<ClientRecord> for Client {
    type Error = BillingError;

    fn try_from(record: ClientRecord) -> Result<Self, Self::Error> {
        let payment_type = record.payment_type.parse()?;
        let admin_fee = match record.admin_fee_type.trim().to_lowercase().as_str() {
            "fixed" => AdminFee::Fixed(
                record
                    .fixed_admin_fee
                    .ok_or_else(|| BillingError::MissingFixedAdminFee(record.name.clone()))?,
            ),
            // a stale fixed amount is dropped
            "scale" => AdminFee::Scale,
            _ => return Err(BillingError::UnknownAdminFeeType(record.admin_fee_type)),
        };

        Ok(Self {
            id: record.id,
            name: record.name,
            payment_type,
            admin_fee,
            delivery_fee_structure: record.delivery_fee_structure,
        })
    }
}

impl From<Client> for ClientRecord {
    fn from(client: Client) -> Self {
        let fixed_admin_fee = match client.admin_fee {
            AdminFee::Fixed(amount) => Some(amount),
            AdminFee::Scale => None,
        };

        Self {
            id: client.id,
            name: client.name,
            payment_type: client.payment_type.as_str().to_string(),
            admin_fee_type: client.admin_fee.type_name().to_string(),
            fixed_admin_fee,
            delivery_fee_structure: client.delivery_fee_structure,
        }
    }
}

/// Courier membership status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourierStatus {
    /// Cooperative member.
    Member,
    /// Guest courier.
    Guest,
}

impl CourierStatus {
    /// Returns the stored name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Guest => "guest",
        }
    }

    /// Ledger account payouts for this status are posted to.
    #[must_use]
    pub const fn payout_account(self) -> &'static str {
        match self {
            Self::Member => "Member Courier Payouts",
            Self::Guest => "Guest Courier Payouts",
        }
    }
}

impl std::str::FromStr for CourierStatus {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "member" => Ok(Self::Member),
            "guest" => Ok(Self::Guest),
            _ => Err(BillingError::UnknownAccountMapping(s.to_string())),
        }
    }
}

/// A paid courier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CourierRecord", into = "CourierRecord")]
pub struct Courier {
    /// Unique identifier.
    pub id: CourierId,
    /// Display name.
    pub name: String,
    /// Radio call number, the identifier used by the dispatch export.
    pub call_number: String,
    /// Membership status.
    pub status: CourierStatus,
    /// Whether the courier rents a radio by the month.
    pub monthly_radio_rental: bool,
}

/// A courier as stored or submitted, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourierRecord {
    /// Unique identifier.
    pub id: CourierId,
    /// Display name.
    pub name: String,
    /// Radio call number.
    pub call_number: String,
    /// Status name.
    pub status: String,
    /// Whether the courier rents a radio by the month.
    #[serde(default)]
    pub monthly_radio_rental: bool,
}

impl TryFrom<CourierRecord> for Courier {
    type Error = BillingError;

    fn try_from(record: CourierRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            status: record.status.parse()?,
            id: record.id,
            name: record.name,
            call_number: record.call_number,
            monthly_radio_rental: record.monthly_radio_rental,
        })
    }
}

impl From<Courier> for CourierRecord {
    fn from(courier: Courier) -> Self {
        Self {
            id: courier.id,
            name: courier.name,
            call_number: courier.call_number,
            status: courier.status.as_str().to_string(),
            monthly_radio_rental: courier.monthly_radio_rental,
        }
    }
}

/// Dispatch state of a ride.
///
/// Deserializes through `FromStr`, so ride files accept the same spellings as
/// the import rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum DeliveryStatus {
    /// Assigned to a courier.
    Assigned,
    /// Acknowledged by the courier.
    Acknowledged,
    /// Could not be delivered.
    Undeliverable,
    /// Picked up from the client.
    #[serde(rename = "picked up")]
    PickedUp,
    /// Handed to the recipient.
    Delivered,
    /// Closed out with final amounts.
    Complete,
    /// Cancelled before delivery.
    Cancelled,
}

impl std::str::FromStr for DeliveryStatus {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', " ").as_str() {
            "assigned" => Ok(Self::Assigned),
            "acknowledged" => Ok(Self::Acknowledged),
            "undeliverable" => Ok(Self::Undeliverable),
            "picked up" => Ok(Self::PickedUp),
            "delivered" => Ok(Self::Delivered),
            "complete" => Ok(Self::Complete),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(BillingError::UnknownDeliveryStatus(s.to_string())),
        }
    }
}

impl TryFrom<String> for DeliveryStatus {
    type Error = BillingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A delivery record.
///
/// Deserialization runs [`Ride::validate`], so a completed ride missing an
/// amount never leaves a ride file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RideRecord")]
pub struct Ride {
    /// Dispatch job identifier, unique across imports.
    pub job_id: String,
    /// Billed client.
    pub client: ClientId,
    /// Courier who ran the job.
    pub courier: CourierId,
    /// When the job was ready; decides which period bills it.
    pub ready_time: NaiveDateTime,
    /// Dispatch state.
    pub delivery_status: DeliveryStatus,
    /// Order value collected for the client.
    pub order_total: Option<Decimal>,
    /// Amount billable to the client.
    pub billable_total: Option<Decimal>,
    /// Tip.
    pub tip: Option<Decimal>,
    /// Delivery fee.
    pub delivery_fee: Option<Decimal>,
    /// Pickup address.
    pub pickup_address: Option<String>,
    /// First line of the destination address.
    pub destination_address1: Option<String>,
    /// Dispatcher notes.
    pub notes: Option<String>,
}

#[derive(Deserialize)]
struct RideRecord {
    job_id: String,
    client: ClientId,
    courier: CourierId,
    ready_time: NaiveDateTime,
    delivery_status: DeliveryStatus,
    #[serde(default)]
    order_total: Option<Decimal>,
    #[serde(default)]
    billable_total: Option<Decimal>,
    #[serde(default)]
    tip: Option<Decimal>,
    #[serde(default)]
    delivery_fee: Option<Decimal>,
    #[serde(default)]
    pickup_address: Option<String>,
    #[serde(default)]
    destination_address1: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

impl TryFrom<RideRecord> for Ride {
    type Error = BillingError;

    fn try_from(record: RideRecord) -> Result<Self, Self::Error> {
        let ride = Self {
            job_id: record.job_id,
            client: record.client,
            courier: record.courier,
            ready_time: record.ready_time,
            delivery_status: record.delivery_status,
            order_total: record.order_total,
            billable_total: record.billable_total,
            tip: record.tip,
            delivery_fee: record.delivery_fee,
            pickup_address: record.pickup_address,
            destination_address1: record.destination_address1,
            notes: record.notes,
        };
        ride.validate()?;
        Ok(ride)
    }
}

impl Ride {
    /// Checks that completed rides carry every amount billing relies on.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::MissingRideField` naming the first missing field.
    pub fn validate(&self) -> Result<(), BillingError> {
        if self.delivery_status != DeliveryStatus::Complete {
            return Ok(());
        }

        let required = [
            ("order_total", self.order_total.is_some()),
            ("billable_total", self.billable_total.is_some()),
            ("tip", self.tip.is_some()),
            ("delivery_fee", self.delivery_fee.is_some()),
            ("destination_address1", self.destination_address1.is_some()),
        ];

        match required.into_iter().find(|(_, present)| !present) {
            Some((field, _)) => Err(BillingError::MissingRideField {
                job_id: self.job_id.clone(),
                field,
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn client_record(admin_fee_type: &str, fixed: Option<Decimal>) -> ClientRecord {
        ClientRecord {
            id: ClientId::new(),
            name: "Corner Deli".to_string(),
            payment_type: "invoiced".to_string(),
            admin_fee_type: admin_fee_type.to_string(),
            fixed_admin_fee: fixed,
            delivery_fee_structure: None,
        }
    }

    fn complete_ride() -> Ride {
        Ride {
            job_id: "J-100".to_string(),
            client: ClientId::new(),
            courier: CourierId::new(),
            ready_time: NaiveDate::from_ymd_opt(2024, 1, 5)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            delivery_status: DeliveryStatus::Complete,
            order_total: Some(dec!(42.00)),
            billable_total: Some(dec!(8.50)),
            tip: Some(dec!(3.00)),
            delivery_fee: Some(dec!(5.50)),
            pickup_address: Some("1 Main St".to_string()),
            destination_address1: Some("9 Elm St".to_string()),
            notes: None,
        }
    }

    #[test]
    fn test_fixed_admin_fee_requires_amount() {
        let client = Client::try_from(client_record("fixed", Some(dec!(60)))).unwrap();
        assert_eq!(client.admin_fee, AdminFee::Fixed(dec!(60)));

        let err = Client::try_from(client_record("fixed", None)).unwrap_err();
        assert!(matches!(err, BillingError::MissingFixedAdminFee(_)));
    }

    #[test]
    fn test_scale_admin_fee_clears_fixed_amount() {
        let client = Client::try_from(client_record("Scale", Some(dec!(60)))).unwrap();
        assert_eq!(client.admin_fee, AdminFee::Scale);

        let record = ClientRecord::from(client);
        assert_eq!(record.fixed_admin_fee, None);
        assert_eq!(record.admin_fee_type, "scale");
    }

    #[test]
    fn test_unknown_admin_fee_type_is_named() {
        let err = Client::try_from(client_record("percentage", None)).unwrap_err();
        assert_eq!(err, BillingError::UnknownAdminFeeType("percentage".to_string()));
        assert!(err.to_string().to_lowercase().contains("don't know how to calculate"));
        assert!(err.to_string().contains("percentage"));
    }

    #[rstest]
    #[case("invoiced", PaymentType::Invoiced)]
    #[case(" Paid ", PaymentType::Paid)]
    #[case("LEGACY", PaymentType::Legacy)]
    fn test_payment_type_parsing(#[case] input: &str, #[case] expected: PaymentType) {
        assert_eq!(input.parse::<PaymentType>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_payment_type() {
        assert!(matches!(
            "barter".parse::<PaymentType>(),
            Err(BillingError::UnknownPaymentType(_))
        ));
    }

    #[test]
    fn test_courier_status_maps_to_account() {
        assert_eq!(
            "member".parse::<CourierStatus>().unwrap().payout_account(),
            "Member Courier Payouts"
        );
        assert_eq!(
            "guest".parse::<CourierStatus>().unwrap().payout_account(),
            "Guest Courier Payouts"
        );
        assert!(matches!(
            "contractor".parse::<CourierStatus>(),
            Err(BillingError::UnknownAccountMapping(_))
        ));
    }

    #[rstest]
    #[case("picked up", DeliveryStatus::PickedUp)]
    #[case("picked_up", DeliveryStatus::PickedUp)]
    #[case("Complete", DeliveryStatus::Complete)]
    #[case("canceled", DeliveryStatus::Cancelled)]
    fn test_delivery_status_parsing(#[case] input: &str, #[case] expected: DeliveryStatus) {
        assert_eq!(input.parse::<DeliveryStatus>().unwrap(), expected);
    }

    #[test]
    fn test_complete_ride_validation() {
        assert!(complete_ride().validate().is_ok());

        let mut ride = complete_ride();
        ride.tip = None;
        assert_eq!(
            ride.validate(),
            Err(BillingError::MissingRideField {
                job_id: "J-100".to_string(),
                field: "tip",
            })
        );
    }

    #[test]
    fn test_ride_file_rejects_complete_ride_without_amounts() {
        let json = serde_json::json!({
            "job_id": "J-7",
            "client": ClientId::new(),
            "courier": CourierId::new(),
            "ready_time": "2024-01-05T09:00:00",
            "delivery_status": "complete",
            "destination_address1": "9 Elm St"
        });

        let err = serde_json::from_value::<Ride>(json).unwrap_err();

        assert!(err.to_string().contains("Ride J-7 is complete but has no order_total"));
    }

    #[test]
    fn test_ride_round_trips_through_json() {
        let ride = complete_ride();

        let json = serde_json::to_value(&ride).unwrap();

        assert_eq!(json["delivery_status"], "complete");
        assert_eq!(serde_json::from_value::<Ride>(json).unwrap(), ride);
    }

    #[rstest]
    #[case("Picked_Up", DeliveryStatus::PickedUp)]
    #[case("canceled", DeliveryStatus::Cancelled)]
    #[case(" DELIVERED ", DeliveryStatus::Delivered)]
    fn test_ride_file_accepts_import_status_spellings(
        #[case] status: &str,
        #[case] expected: DeliveryStatus,
    ) {
        let json = serde_json::json!({
            "job_id": "J-8",
            "client": ClientId::new(),
            "courier": CourierId::new(),
            "ready_time": "2024-01-05T09:00:00",
            "delivery_status": status
        });

        let ride = serde_json::from_value::<Ride>(json).unwrap();

        assert_eq!(ride.delivery_status, expected);
    }

    #[test]
    fn test_picked_up_serializes_with_space() {
        assert_eq!(
            serde_json::to_value(DeliveryStatus::PickedUp).unwrap(),
            "picked up"
        );
    }

    #[test]
    fn test_incomplete_ride_needs_no_amounts() {
        let mut ride = complete_ride();
        ride.delivery_status = DeliveryStatus::Assigned;
        ride.order_total = None;
        ride.destination_address1 = None;
        assert!(ride.validate().is_ok());
    }
}
