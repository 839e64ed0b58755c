//! Property-based tests for period module.

use chrono::{Datelike, Days, Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;

use super::calendar::{
    last_day_of_month, nearest_period_end_rounded_up, nearest_period_start_rounded_down,
    next_day_start, start_of_day,
};
use super::partition::partition;
use super::projector::PeriodProjector;
use super::types::{BillingPeriod, Period};

/// Instants between 2000-01-01 and roughly 2030 with millisecond precision.
fn instant_strategy() -> impl Strategy<Value = NaiveDateTime> {
    (0i64..365 * 30, 0i64..86_400_000).prop_map(|(day, ms)| {
        let base = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        start_of_day(base + Duration::days(day)) + Duration::milliseconds(ms)
    })
}

fn canonical_grid(from: NaiveDateTime, to: NaiveDateTime) -> Vec<Period> {
    PeriodProjector::project_forward(None, from, to)
        .unwrap()
        .iter()
        .map(BillingPeriod::period)
        .collect()
}

fn assert_contiguous(periods: &[Period]) -> Result<(), TestCaseError> {
    for pair in periods.windows(2) {
        prop_assert_eq!(next_day_start(pair[0].period_end), pair[1].period_start);
    }
    Ok(())
}

proptest! {
    /// Every instant lies inside the canonical period it rounds to.
    #[test]
    fn prop_rounding_brackets_instant(instant in instant_strategy()) {
        let start = nearest_period_start_rounded_down(instant);
        let end = nearest_period_end_rounded_up(instant);

        prop_assert!(start <= instant);
        prop_assert!(instant <= end);
    }

    /// The canonical period is either 1st-15th or 16th-end-of-month.
    #[test]
    fn prop_canonical_period_shape(instant in instant_strategy()) {
        let start = nearest_period_start_rounded_down(instant).date();
        let end = nearest_period_end_rounded_up(instant).date();

        prop_assert_eq!((start.year(), start.month()), (end.year(), end.month()));
        match start.day() {
            1 => prop_assert_eq!(end.day(), 15),
            16 => prop_assert_eq!(end, last_day_of_month(end)),
            other => prop_assert!(false, "unexpected period start day {}", other),
        }
    }

    /// Partitioning a day-aligned gap yields contiguous periods covering exactly the gap.
    #[test]
    fn prop_partition_covers_gap(
        gap_start in instant_strategy(),
        span_days in 0u64..200,
    ) {
        let first_day = gap_start.date();
        let gap = Period::from_dates(first_day, first_day + Days::new(span_days));

        let periods = partition(&gap);

        prop_assert!(!periods.is_empty());
        prop_assert_eq!(periods[0].period_start, gap.period_start);
        prop_assert_eq!(periods[periods.len() - 1].period_end, gap.period_end);
        for period in &periods[..periods.len() - 1] {
            prop_assert_eq!(period.period_end, nearest_period_end_rounded_up(period.period_end));
        }
        assert_contiguous(&periods)?;
    }

    /// Persisted and potential periods tile the rounded range with no overlap.
    #[test]
    fn prop_projection_tiles_range(
        from in instant_strategy(),
        span_days in 0i64..400,
        mask in prop::collection::vec(any::<bool>(), 1..32),
    ) {
        let to = from + Duration::days(span_days);
        let grid = canonical_grid(from, to);
        let existing: Vec<Period> = grid
            .iter()
            .zip(mask.iter().cycle())
            .filter(|(_, keep)| **keep)
            .map(|(period, _)| *period)
            .collect();

        let potential = PeriodProjector::project_potential_periods(&existing, from, to).unwrap();

        let mut all: Vec<Period> = existing
            .iter()
            .copied()
            .chain(potential.iter().map(BillingPeriod::period))
            .collect();
        all.sort_by_key(|period| period.period_start);

        prop_assert_eq!(all.len(), grid.len());
        prop_assert_eq!(all[0].period_start, nearest_period_start_rounded_down(from));
        prop_assert_eq!(all[all.len() - 1].period_end, nearest_period_end_rounded_up(to));
        assert_contiguous(&all)?;
    }

    /// With nothing generated, both strategies agree.
    #[test]
    fn prop_strategies_agree_without_history(
        from in instant_strategy(),
        span_days in 0i64..400,
    ) {
        let to = from + Duration::days(span_days);

        let by_gaps = PeriodProjector::project_potential_periods(&[], from, to).unwrap();
        let forward = PeriodProjector::project_forward(None, from, to).unwrap();

        prop_assert_eq!(by_gaps, forward);
    }
}
