//! Combined view of generated and potential periods for a date range.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::calendar::{nearest_period_end_rounded_up, nearest_period_start_rounded_down};
use super::error::PeriodError;
use super::projector::{PeriodProjector, ProjectionStrategy};
use super::types::{BillingPeriod, Period, PotentialPeriod};

/// One row of a period listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PeriodRow<T> {
    /// A period already generated and persisted.
    Generated(T),
    /// A period that could be generated.
    Potential(PotentialPeriod),
}

impl<T: BillingPeriod> BillingPeriod for PeriodRow<T> {
    fn period(&self) -> Period {
        match self {
            Self::Generated(record) => record.period(),
            Self::Potential(potential) => potential.period(),
        }
    }
}

/// Lists generated and potential periods overlapping `[from, to]`, newest first.
///
/// # Errors
///
/// Propagates `PeriodError` from the projection.
pub fn period_overview<T>(
    existing: &[T],
    from: NaiveDateTime,
    to: NaiveDateTime,
    strategy: ProjectionStrategy,
) -> Result<Vec<PeriodRow<T>>, PeriodError>
where
    T: BillingPeriod + Clone,
{
    let periods: Vec<Period> = existing.iter().map(BillingPeriod::period).collect();
    let potential = PeriodProjector::project(strategy, &periods, from, to)?;

    let range = Period::new(
        nearest_period_start_rounded_down(from),
        nearest_period_end_rounded_up(to),
    );

    let mut rows: Vec<PeriodRow<T>> = existing
        .iter()
        .filter(|record| record.period().overlaps(&range))
        .cloned()
        .map(PeriodRow::Generated)
        .chain(potential.into_iter().map(PeriodRow::Potential))
        .collect();

    rows.sort_by(|a, b| b.period().period_start.cmp(&a.period().period_start));

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::types::Payroll;
    use chrono::NaiveDate;
    use dispatch_shared::types::PayrollId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn payroll(start: NaiveDate, end: NaiveDate) -> Payroll {
        Payroll {
            id: PayrollId::new(),
            period: Period::from_dates(start, end),
            file_path: format!("payroll/{start}.csv"),
        }
    }

    #[test]
    fn test_overview_merges_newest_first() {
        let existing = vec![
            payroll(date(2024, 1, 1), date(2024, 1, 15)),
            payroll(date(2023, 12, 16), date(2023, 12, 31)),
        ];

        let rows = period_overview(
            &existing,
            date(2024, 1, 1).and_hms_opt(0, 0, 0).unwrap(),
            date(2024, 2, 10).and_hms_opt(0, 0, 0).unwrap(),
            ProjectionStrategy::GapReconciliation,
        )
        .unwrap();

        let starts: Vec<NaiveDate> = rows.iter().map(|row| row.period().start_date()).collect();
        assert_eq!(
            starts,
            vec![date(2024, 2, 1), date(2024, 1, 16), date(2024, 1, 1)]
        );
        assert!(matches!(rows[2], PeriodRow::Generated(_)));
        assert!(matches!(rows[0], PeriodRow::Potential(_)));
    }

    #[test]
    fn test_overview_forward_iteration_without_history() {
        let rows: Vec<PeriodRow<Payroll>> = period_overview(
            &[],
            date(2024, 1, 1).and_hms_opt(0, 0, 0).unwrap(),
            date(2024, 1, 1).and_hms_opt(0, 0, 0).unwrap(),
            ProjectionStrategy::ForwardIteration,
        )
        .unwrap();

        assert_eq!(rows.len(), 1);
        assert!(matches!(rows[0], PeriodRow::Potential(_)));
    }
}
