//! Semi-monthly billing period management.
//!
//! Billing runs on a fixed grid of two periods per month: the 1st to the 15th
//! and the 16th to the last day of the month. This module provides:
//! - Calendar arithmetic for the canonical grid
//! - Gap detection between persisted periods and a requested range
//! - Partitioning of gaps into canonical periods
//! - Projection of potential (not yet generated) periods
//! - A combined overview of generated and potential periods

pub mod calendar;
pub mod error;
pub mod gaps;
pub mod overview;
pub mod partition;
pub mod projector;
pub mod types;

#[cfg(test)]
mod tests;

pub use calendar::{
    end_of_day, is_month_end, last_day_of_month, nearest_period_end_rounded_up,
    nearest_period_start_rounded_down, next_day_start, start_of_day,
};
pub use error::PeriodError;
pub use gaps::find_gaps;
pub use overview::{PeriodRow, period_overview};
pub use partition::partition;
pub use projector::{PeriodProjector, ProjectionStrategy};
pub use types::{BillingPeriod, Gap, Invoice, Payroll, Period, PotentialPeriod};
