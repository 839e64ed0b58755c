//! Partitioning of gaps into canonical periods.

use super::calendar::{nearest_period_end_rounded_up, next_day_start};
use super::types::{Gap, Period};

/// Splits a gap into consecutive canonical semi-monthly periods.
///
/// Every period ends on a canonical boundary except possibly the last, which
/// ends exactly at `gap.period_end`. The periods are contiguous and their
/// union is the gap.
#[must_use]
pub fn partition(gap: &Gap) -> Vec<Period> {
    let mut periods = Vec::new();
    let mut period_start = gap.period_start;
    let mut period_end = nearest_period_end_rounded_up(period_start);

    while period_end < gap.period_end {
        periods.push(Period::new(period_start, period_end));
        period_start = next_day_start(period_end);
        period_end = nearest_period_end_rounded_up(period_start);
    }

    if period_start < gap.period_end {
        periods.push(Period::new(period_start, gap.period_end));
    }

    periods
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn days(start: (u32, u32), end: (u32, u32)) -> Period {
        Period::from_dates(date(2024, start.0, start.1), date(2024, end.0, end.1))
    }

    #[test]
    fn test_partition_with_partial_first_and_last() {
        let periods = partition(&days((1, 10), (2, 20)));

        assert_eq!(
            periods,
            vec![
                days((1, 10), (1, 15)),
                days((1, 16), (1, 31)),
                days((2, 1), (2, 15)),
                days((2, 16), (2, 20)),
            ]
        );
    }

    #[test]
    fn test_partition_of_canonical_period_is_identity() {
        let canonical = days((2, 16), (2, 29));
        assert_eq!(partition(&canonical), vec![canonical]);
    }

    #[test]
    fn test_partition_ending_on_month_end() {
        let periods = partition(&days((1, 1), (1, 31)));

        assert_eq!(periods, vec![days((1, 1), (1, 15)), days((1, 16), (1, 31))]);
    }

    #[test]
    fn test_partition_within_one_half() {
        let periods = partition(&days((1, 3), (1, 7)));
        assert_eq!(periods, vec![days((1, 3), (1, 7))]);
    }

    #[test]
    fn test_partition_across_year_boundary() {
        let gap = Period::from_dates(date(2023, 12, 20), date(2024, 1, 5));

        let periods = partition(&gap);

        assert_eq!(
            periods,
            vec![
                Period::from_dates(date(2023, 12, 20), date(2023, 12, 31)),
                Period::from_dates(date(2024, 1, 1), date(2024, 1, 5)),
            ]
        );
    }
}
