//! Billing period types.

use chrono::{NaiveDate, NaiveDateTime};
use dispatch_shared::types::{ClientId, InvoiceId, PayrollId};
use serde::{Deserialize, Serialize};

use super::calendar;

/// A billing window.
///
/// Canonical periods start at the beginning of a day and end at the last
/// millisecond of a day. Invariant: `period_start <= period_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    /// First instant of the period.
    pub period_start: NaiveDateTime,
    /// Last instant of the period.
    pub period_end: NaiveDateTime,
}

/// A sub-range of a request not covered by any persisted period.
pub type Gap = Period;

impl Period {
    /// Creates a new period.
    #[must_use]
    pub const fn new(period_start: NaiveDateTime, period_end: NaiveDateTime) -> Self {
        Self {
            period_start,
            period_end,
        }
    }

    /// Creates a period spanning whole days, from the start of `start` to the end of `end`.
    #[must_use]
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(calendar::start_of_day(start), calendar::end_of_day(end))
    }

    /// Returns true if the instant is billed in this period.
    ///
    /// The upper bound is exclusive: `period_start <= instant < period_end`.
    #[must_use]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.period_start && instant < self.period_end
    }

    /// Returns true if the two periods share at least one instant.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.period_start <= other.period_end && other.period_start <= self.period_end
    }

    /// Calendar date of the first day.
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.period_start.date()
    }

    /// Calendar date of the last day.
    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.period_end.date()
    }

    /// Returns true if the period ends on the last day of its month.
    #[must_use]
    pub fn is_month_end(&self) -> bool {
        calendar::is_month_end(self.end_date())
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start_date(), self.end_date())
    }
}

/// Anything that occupies a billing period.
pub trait BillingPeriod {
    /// The period covered.
    fn period(&self) -> Period;
}

impl BillingPeriod for Period {
    fn period(&self) -> Period {
        *self
    }
}

/// A computed period that has not been generated yet. Carries no identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotentialPeriod {
    /// First instant of the period.
    pub period_start: NaiveDateTime,
    /// Last instant of the period.
    pub period_end: NaiveDateTime,
}

impl From<Period> for PotentialPeriod {
    fn from(period: Period) -> Self {
        Self {
            period_start: period.period_start,
            period_end: period.period_end,
        }
    }
}

impl BillingPeriod for PotentialPeriod {
    fn period(&self) -> Period {
        Period::new(self.period_start, self.period_end)
    }
}

/// A generated client invoice.
///
/// Recorded only after its export artifact has been stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier.
    pub id: InvoiceId,
    /// Client the invoice was issued to.
    pub client_id: ClientId,
    /// Period covered.
    #[serde(flatten)]
    pub period: Period,
    /// Location of the generated artifact.
    pub file_path: String,
}

impl BillingPeriod for Invoice {
    fn period(&self) -> Period {
        self.period
    }
}

/// A generated courier payroll run.
///
/// Recorded only after its export artifact has been stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payroll {
    /// Unique identifier.
    pub id: PayrollId,
    /// Period covered.
    #[serde(flatten)]
    pub period: Period,
    /// Location of the generated artifact.
    pub file_path: String,
}

impl BillingPeriod for Payroll {
    fn period(&self) -> Period {
        self.period
    }
}
