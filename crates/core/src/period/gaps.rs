//! Gap detection between persisted periods and a requested range.

use chrono::{Days, Duration, NaiveDateTime};

use super::calendar::{end_of_day, start_of_day};
use super::error::PeriodError;
use super::types::{Gap, Period};

/// Finds the sub-ranges of `[start_date, end_date]` not covered by `existing`.
///
/// Between consecutive persisted periods the candidate gap runs from the start
/// of the day after the earlier period to the end of the day before the later
/// one. The first candidate starts at `start_date` and the last ends at
/// `end_date`; candidates are clipped to the range and only kept when they
/// span more than one millisecond.
///
/// # Errors
///
/// Returns `PeriodError::InvalidRange` if `start_date > end_date`,
/// `PeriodError::InvalidPeriod` if a persisted period ends before it starts
/// and `PeriodError::OverlappingPeriods` if two persisted periods overlap.
pub fn find_gaps(
    existing: &[Period],
    start_date: NaiveDateTime,
    end_date: NaiveDateTime,
) -> Result<Vec<Gap>, PeriodError> {
    if start_date > end_date {
        return Err(PeriodError::InvalidRange {
            start: start_date,
            end: end_date,
        });
    }

    if let Some(period) = existing
        .iter()
        .find(|period| period.period_start > period.period_end)
    {
        return Err(PeriodError::InvalidPeriod { period: *period });
    }

    let mut sorted = existing.to_vec();
    sorted.sort_by_key(|period| period.period_start);

    if let Some(pair) = sorted.windows(2).find(|pair| pair[0].overlaps(&pair[1])) {
        return Err(PeriodError::OverlappingPeriods {
            first: pair[0],
            second: pair[1],
        });
    }

    let mut gaps = Vec::new();
    let mut gap_start = start_date;

    for period in &sorted {
        let gap_end = end_of_day(period.start_date() - Days::new(1));
        push_gap(&mut gaps, gap_start, gap_end.min(end_date));
        gap_start = gap_start.max(start_of_day(period.end_date() + Days::new(1)));
    }
    push_gap(&mut gaps, gap_start, end_date);

    Ok(gaps)
}

fn push_gap(gaps: &mut Vec<Gap>, gap_start: NaiveDateTime, gap_end: NaiveDateTime) {
    if gap_end - gap_start > Duration::milliseconds(1) {
        gaps.push(Period::new(gap_start, gap_end));
    }
}
