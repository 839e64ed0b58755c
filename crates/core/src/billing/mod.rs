//! Fee computation for client invoices and courier paystubs.
//!
//! Each accounting entity wraps one client or courier, one billing period and
//! the rides that fall in it. Every fee has an explainable form returning the
//! rationale alongside the amount.

pub mod accounting;
pub mod error;
pub mod explain;
pub mod invoice;
pub mod paystub;
pub mod run;
pub mod schedule;
pub mod types;


pub use accounting::AccountingPeriod;
pub use error::BillingError;
pub use explain::Explained;
pub use invoice::{ClientInvoice, InvoiceSummary};
pub use paystub::{CourierPaystub, PaystubSummary};
pub use run::BillingRun;
pub use schedule::{FeeSchedule, ScaleTier};
pub use types::{
    AdminFee, Client, ClientRecord, Courier, CourierRecord, CourierStatus, DeliveryStatus,
    PaymentType, Ride,
};
