//! Courier paystub fee rules.

use dispatch_shared::types::round_currency;
use rust_decimal::Decimal;
use serde::Serialize;

use super::accounting::AccountingPeriod;
use super::explain::Explained;
use super::schedule::FeeSchedule;
use super::types::{Courier, Ride};
use crate::period::Period;

/// A courier's earnings for one billing period.
#[derive(Debug, Clone)]
pub struct CourierPaystub<'a> {
    courier: &'a Courier,
    accounting: AccountingPeriod<'a>,
    schedule: &'a FeeSchedule,
}

/// Every line of a paystub with its rationale.
#[derive(Debug, Clone, Serialize)]
pub struct PaystubSummary {
    /// Courier name.
    pub courier: String,
    /// Ledger account the payout is posted to.
    pub account: &'static str,
    /// Period paid.
    pub period: Period,
    /// Number of rides paid.
    pub ride_count: usize,
    /// Tips earned.
    pub tip_total: Explained<Decimal>,
    /// Delivery fees earned.
    pub fee_total: Explained<Decimal>,
    /// Tips plus delivery fees.
    pub delivery_fee_total: Explained<Decimal>,
    /// Radio rental withheld.
    pub radio_fee: Explained<Decimal>,
    /// Amount paid out.
    pub paystub_total: Decimal,
}

impl<'a> CourierPaystub<'a> {
    /// Builds the paystub of `courier` for `period` from the full ride list.
    pub fn new(
        courier: &'a Courier,
        period: Period,
        rides: &'a [Ride],
        schedule: &'a FeeSchedule,
    ) -> Self {
        let accounting = AccountingPeriod::new(period, rides, |ride| ride.courier == courier.id);
        Self {
            courier,
            accounting,
            schedule,
        }
    }

    /// The paid courier.
    #[must_use]
    pub const fn courier(&self) -> &'a Courier {
        self.courier
    }

    /// The rides behind the paystub.
    #[must_use]
    pub const fn accounting(&self) -> &AccountingPeriod<'a> {
        &self.accounting
    }

    /// Ledger account the payout is posted to.
    #[must_use]
    pub const fn account(&self) -> &'static str {
        self.courier.status.payout_account()
    }

    /// Tips earned in the period.
    #[must_use]
    pub fn tip_total_explained(&self) -> Explained<Decimal> {
        Explained::plain(round_currency(self.accounting.tip_sum()))
    }

    /// Tips earned in the period.
    #[must_use]
    pub fn tip_total(&self) -> Decimal {
        self.tip_total_explained().into_value()
    }

    /// Delivery fees earned in the period.
    #[must_use]
    pub fn fee_total_explained(&self) -> Explained<Decimal> {
        Explained::plain(round_currency(self.accounting.delivery_fee_sum()))
    }

    /// Delivery fees earned in the period.
    #[must_use]
    pub fn fee_total(&self) -> Decimal {
        self.fee_total_explained().into_value()
    }

    /// Tips plus delivery fees with their rationale.
    #[must_use]
    pub fn delivery_fee_total_explained(&self) -> Explained<Decimal> {
        Explained::because(
            round_currency(self.tip_total() + self.fee_total()),
            "Tips + fees",
        )
    }

    /// Tips plus delivery fees.
    #[must_use]
    pub fn delivery_fee_total(&self) -> Decimal {
        self.delivery_fee_total_explained().into_value()
    }

    /// Radio rental withheld, with its rationale.
    ///
    /// Withheld once a month, on the month-end paystub only.
    #[must_use]
    pub fn radio_fee_explained(&self) -> Explained<Decimal> {
        if !self.accounting.is_month_end() {
            return Explained::because(Decimal::ZERO, "This is a mid-month paystub");
        }
        if !self.courier.monthly_radio_rental {
            return Explained::because(Decimal::ZERO, "Courier does not rent a radio");
        }
        Explained::because(
            round_currency(self.schedule.radio_rental),
            "Monthly radio rental",
        )
    }

    /// Radio rental withheld.
    #[must_use]
    pub fn radio_fee(&self) -> Decimal {
        self.radio_fee_explained().into_value()
    }

    /// Admin fee from the courier's side: the radio rental as a deduction.
    #[must_use]
    pub fn admin_fee_explained(&self) -> Explained<Decimal> {
        self.radio_fee_explained().map(|fee| Decimal::ZERO - fee)
    }

    /// Admin fee from the courier's side, never positive.
    #[must_use]
    pub fn admin_fee(&self) -> Decimal {
        self.admin_fee_explained().into_value()
    }

    /// Amount paid out: admin fee plus delivery fee total.
    #[must_use]
    pub fn paystub_total(&self) -> Decimal {
        round_currency(self.admin_fee() + self.delivery_fee_total())
    }

    /// Collects every line for display or export.
    #[must_use]
    pub fn summary(&self) -> PaystubSummary {
        PaystubSummary {
            courier: self.courier.name.clone(),
            account: self.account(),
            period: self.accounting.period(),
            ride_count: self.accounting.rides_in_period().len(),
            tip_total: self.tip_total_explained(),
            fee_total: self.fee_total_explained(),
            delivery_fee_total: self.delivery_fee_total_explained(),
            radio_fee: self.radio_fee_explained(),
            paystub_total: self.paystub_total(),
        }
    }
}
