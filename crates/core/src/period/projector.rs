//! Projection of potential (not yet generated) billing periods.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::calendar::{
    nearest_period_end_rounded_up, nearest_period_start_rounded_down, next_day_start,
};
use super::error::PeriodError;
use super::gaps::find_gaps;
use super::partition::partition;
use super::types::{Period, PotentialPeriod};

/// How potential periods are derived from persisted ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionStrategy {
    /// Fill every gap between persisted periods inside the requested range.
    #[default]
    GapReconciliation,
    /// Walk forward one canonical period at a time from the latest persisted period.
    ForwardIteration,
}

impl std::str::FromStr for ProjectionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gap" | "gaps" | "gap_reconciliation" => Ok(Self::GapReconciliation),
            "forward" | "forward_iteration" => Ok(Self::ForwardIteration),
            _ => Err(format!("Unknown projection strategy: {s}")),
        }
    }
}

/// Service projecting potential billing periods.
pub struct PeriodProjector;

impl PeriodProjector {
    /// Projects potential periods for `[from, to]` using the given strategy.
    ///
    /// # Errors
    ///
    /// Propagates `PeriodError` from the selected strategy.
    pub fn project(
        strategy: ProjectionStrategy,
        existing: &[Period],
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<PotentialPeriod>, PeriodError> {
        match strategy {
            ProjectionStrategy::GapReconciliation => {
                Self::project_potential_periods(existing, from, to)
            }
            ProjectionStrategy::ForwardIteration => {
                let latest_end = existing.iter().map(|period| period.period_end).max();
                Self::project_forward(latest_end, from, to)
            }
        }
    }

    /// Projects the periods missing from `existing` within the canonical range
    /// `[round_down(from), round_up(to)]`.
    ///
    /// Together with `existing`, the result tiles the range with no gaps and no
    /// overlaps.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidRange` if `from > to`,
    /// `PeriodError::InvalidPeriod` if a persisted period is inverted and
    /// `PeriodError::OverlappingPeriods` if persisted periods overlap.
    pub fn project_potential_periods(
        existing: &[Period],
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<PotentialPeriod>, PeriodError> {
        let range_start = nearest_period_start_rounded_down(from);
        let range_end = nearest_period_end_rounded_up(to);

        let gaps = find_gaps(existing, range_start, range_end)?;

        Ok(gaps
            .iter()
            .flat_map(partition)
            .map(PotentialPeriod::from)
            .collect())
    }

    /// Projects canonical periods forward from the day after `latest_end`.
    ///
    /// Without a persisted period the walk starts at `round_down(from)`. One
    /// period is emitted at a time until the next period would start after `to`.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidRange` if `from > to`.
    pub fn project_forward(
        latest_end: Option<NaiveDateTime>,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<PotentialPeriod>, PeriodError> {
        if from > to {
            return Err(PeriodError::InvalidRange {
                start: from,
                end: to,
            });
        }

        let mut periods = Vec::new();
        let mut period_start =
            latest_end.map_or_else(|| nearest_period_start_rounded_down(from), next_day_start);

        while period_start <= to {
            let period_end = nearest_period_end_rounded_up(period_start);
            periods.push(PotentialPeriod::from(Period::new(period_start, period_end)));
            period_start = next_day_start(period_end);
        }

        Ok(periods)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(10, 30, 0).unwrap()
    }

    fn potential(start: (u32, u32), end: (u32, u32)) -> PotentialPeriod {
        Period::from_dates(date(2024, start.0, start.1), date(2024, end.0, end.1)).into()
    }

    #[test]
    fn test_gap_reconciliation_rounds_range_outward() {
        let projected =
            PeriodProjector::project_potential_periods(&[], at(2024, 1, 10), at(2024, 2, 20))
                .unwrap();

        assert_eq!(
            projected,
            vec![
                potential((1, 1), (1, 15)),
                potential((1, 16), (1, 31)),
                potential((2, 1), (2, 15)),
                potential((2, 16), (2, 29)),
            ]
        );
    }

    #[test]
    fn test_gap_reconciliation_skips_generated_periods() {
        let existing = [
            Period::from_dates(date(2024, 1, 16), date(2024, 1, 31)),
            Period::from_dates(date(2024, 2, 16), date(2024, 2, 29)),
        ];

        let projected =
            PeriodProjector::project_potential_periods(&existing, at(2024, 1, 1), at(2024, 2, 29))
                .unwrap();

        assert_eq!(
            projected,
            vec![potential((1, 1), (1, 15)), potential((2, 1), (2, 15))]
        );
    }

    #[test]
    fn test_gap_reconciliation_rejects_inverted_history() {
        let inverted = Period::new(
            Period::from_dates(date(2024, 1, 20), date(2024, 1, 20)).period_start,
            Period::from_dates(date(2024, 1, 10), date(2024, 1, 10)).period_end,
        );

        let result =
            PeriodProjector::project_potential_periods(&[inverted], at(2024, 1, 1), at(2024, 1, 31));

        assert_eq!(result, Err(PeriodError::InvalidPeriod { period: inverted }));
    }

    #[test]
    fn test_forward_iteration_starts_after_latest_period() {
        let latest = Period::from_dates(date(2024, 1, 1), date(2024, 1, 15)).period_end;

        let projected =
            PeriodProjector::project_forward(Some(latest), at(2024, 1, 1), at(2024, 2, 3))
                .unwrap();

        assert_eq!(
            projected,
            vec![potential((1, 16), (1, 31)), potential((2, 1), (2, 15))]
        );
    }

    #[test]
    fn test_forward_iteration_with_nothing_generated() {
        let projected =
            PeriodProjector::project_forward(None, at(2024, 1, 20), at(2024, 1, 20)).unwrap();

        assert_eq!(projected, vec![potential((1, 16), (1, 31))]);
    }

    #[test]
    fn test_forward_iteration_rejects_inverted_range() {
        let result = PeriodProjector::project_forward(None, at(2024, 2, 1), at(2024, 1, 1));
        assert!(matches!(result, Err(PeriodError::InvalidRange { .. })));
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!(
            "gap".parse::<ProjectionStrategy>().unwrap(),
            ProjectionStrategy::GapReconciliation
        );
        assert_eq!(
            "Forward".parse::<ProjectionStrategy>().unwrap(),
            ProjectionStrategy::ForwardIteration
        );
        assert!("sideways".parse::<ProjectionStrategy>().is_err());
    }
}
