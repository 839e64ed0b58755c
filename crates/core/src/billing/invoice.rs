//! Client invoice fee rules.

use dispatch_shared::types::round_currency;
use rust_decimal::Decimal;
use serde::Serialize;

use super::accounting::AccountingPeriod;
use super::error::BillingError;
use super::explain::Explained;
use super::schedule::FeeSchedule;
use super::types::{AdminFee, Client, PaymentType, Ride};
use crate::period::Period;

/// A client's charges for one billing period.
#[derive(Debug, Clone)]
pub struct ClientInvoice<'a> {
    client: &'a Client,
    accounting: AccountingPeriod<'a>,
    schedule: &'a FeeSchedule,
}

/// Every charge of an invoice with its rationale.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceSummary {
    /// Client name.
    pub client: String,
    /// Period billed.
    pub period: Period,
    /// Number of rides billed.
    pub ride_count: usize,
    /// Monthly admin fee.
    pub admin_fee: Explained<Decimal>,
    /// Tips.
    pub tip_total: Explained<Decimal>,
    /// Delivery fees.
    pub fee_total: Explained<Decimal>,
    /// Tips plus delivery fees.
    pub delivery_fee_total: Explained<Decimal>,
    /// Amount due.
    pub invoice_total: Decimal,
}

impl<'a> ClientInvoice<'a> {
    /// Builds the invoice of `client` for `period` from the full ride list.
    pub fn new(
        client: &'a Client,
        period: Period,
        rides: &'a [Ride],
        schedule: &'a FeeSchedule,
    ) -> Self {
        let accounting = AccountingPeriod::new(period, rides, |ride| ride.client == client.id);
        Self {
            client,
            accounting,
            schedule,
        }
    }

    /// The invoiced client.
    #[must_use]
    pub const fn client(&self) -> &'a Client {
        self.client
    }

    /// The rides behind the invoice.
    #[must_use]
    pub const fn accounting(&self) -> &AccountingPeriod<'a> {
        &self.accounting
    }

    /// Admin fee with its rationale.
    ///
    /// Charged once a month, on the month-end invoice only.
    #[must_use]
    pub fn admin_fee_explained(&self) -> Explained<Decimal> {
        if !self.accounting.is_month_end() {
            return Explained::because(Decimal::ZERO, "This is a mid-month invoice");
        }

        match self.client.admin_fee {
            AdminFee::Fixed(amount) => Explained::because(round_currency(amount), "Fixed fee"),
            AdminFee::Scale => Explained::plain(round_currency(
                self.schedule
                    .scale_admin_fee(self.accounting.rides_in_month().len()),
            )),
        }
    }

    /// Admin fee.
    #[must_use]
    pub fn admin_fee(&self) -> Decimal {
        self.admin_fee_explained().into_value()
    }

    /// Tips with their rationale.
    pub fn tip_total_explained(&self) -> Result<Explained<Decimal>, BillingError> {
        self.by_payment_type(self.accounting.tip_sum())
    }

    /// Tips billed to the client.
    pub fn tip_total(&self) -> Result<Decimal, BillingError> {
        self.tip_total_explained().map(Explained::into_value)
    }

    /// Delivery fees with their rationale.
    pub fn fee_total_explained(&self) -> Result<Explained<Decimal>, BillingError> {
        self.by_payment_type(self.accounting.delivery_fee_sum())
    }

    /// Delivery fees billed to the client.
    pub fn fee_total(&self) -> Result<Decimal, BillingError> {
        self.fee_total_explained().map(Explained::into_value)
    }

    /// Tips plus delivery fees with their rationale.
    pub fn delivery_fee_total_explained(&self) -> Result<Explained<Decimal>, BillingError> {
        let total = self.tip_total()? + self.fee_total()?;
        Ok(Explained::because(round_currency(total), "Tips + fees"))
    }

    /// Tips plus delivery fees.
    pub fn delivery_fee_total(&self) -> Result<Decimal, BillingError> {
        self.delivery_fee_total_explained().map(Explained::into_value)
    }

    /// Amount due: admin fee plus delivery fee total.
    pub fn invoice_total(&self) -> Result<Decimal, BillingError> {
        Ok(round_currency(self.admin_fee() + self.delivery_fee_total()?))
    }

    /// Collects every charge for display or export.
    pub fn summary(&self) -> Result<InvoiceSummary, BillingError> {
        Ok(InvoiceSummary {
            client: self.client.name.clone(),
            period: self.accounting.period(),
            ride_count: self.accounting.rides_in_period().len(),
            admin_fee: self.admin_fee_explained(),
            tip_total: self.tip_total_explained()?,
            fee_total: self.fee_total_explained()?,
            delivery_fee_total: self.delivery_fee_total_explained()?,
            invoice_total: self.invoice_total()?,
        })
    }

    fn by_payment_type(&self, invoiced: Decimal) -> Result<Explained<Decimal>, BillingError> {
        match self.client.payment_type {
            PaymentType::Invoiced => Ok(Explained::plain(round_currency(invoiced))),
            PaymentType::Paid => Ok(Explained::because(Decimal::ZERO, "This is a paid client")),
            PaymentType::Legacy => Err(BillingError::UnknownPaymentType(
                PaymentType::Legacy.to_string(),
            )),
        }
    }
}
