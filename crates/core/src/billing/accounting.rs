//! Rides selected for one billing period.

use chrono::Datelike;
use dispatch_shared::types::sum_amounts;
use rust_decimal::Decimal;

use super::types::Ride;
use crate::period::Period;

/// The rides of one client or courier, split by period and by calendar month.
#[derive(Debug, Clone)]
pub struct AccountingPeriod<'a> {
    period: Period,
    rides_in_period: Vec<&'a Ride>,
    rides_in_month: Vec<&'a Ride>,
}

impl<'a> AccountingPeriod<'a> {
    /// Selects the rides accepted by `belongs` for `period`.
    ///
    /// A ride is in the period when `period_start <= ready_time < period_end`,
    /// and in the month when its ready time falls in the calendar month that
    /// contains `period_end`.
    pub fn new<F>(period: Period, rides: &'a [Ride], belongs: F) -> Self
    where
        F: Fn(&Ride) -> bool,
    {
        let month_of = |ride: &Ride| {
            let ready = ride.ready_time.date();
            let end = period.end_date();
            ready.year() == end.year() && ready.month() == end.month()
        };

        let mut rides_in_period = Vec::new();
        let mut rides_in_month = Vec::new();

        for ride in rides.iter().filter(|ride| belongs(ride)) {
            if period.contains(ride.ready_time) {
                rides_in_period.push(ride);
            }
            if month_of(ride) {
                rides_in_month.push(ride);
            }
        }

        Self {
            period,
            rides_in_period,
            rides_in_month,
        }
    }

    /// The billing period.
    #[must_use]
    pub const fn period(&self) -> Period {
        self.period
    }

    /// Rides billed in this period.
    #[must_use]
    pub fn rides_in_period(&self) -> &[&'a Ride] {
        &self.rides_in_period
    }

    /// Rides in the calendar month containing the period end.
    #[must_use]
    pub fn rides_in_month(&self) -> &[&'a Ride] {
        &self.rides_in_month
    }

    /// Returns true if the period closes the month.
    #[must_use]
    pub fn is_month_end(&self) -> bool {
        self.period.is_month_end()
    }

    /// Sum of tips over the period, missing tips counting as zero.
    #[must_use]
    pub fn tip_sum(&self) -> Decimal {
        sum_amounts(self.rides_in_period.iter().map(|ride| ride.tip))
    }

    /// Sum of delivery fees over the period, missing fees counting as zero.
    #[must_use]
    pub fn delivery_fee_sum(&self) -> Decimal {
        sum_amounts(self.rides_in_period.iter().map(|ride| ride.delivery_fee))
    }
}
