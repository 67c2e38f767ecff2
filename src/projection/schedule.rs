//! Month-end date sequence

use chrono::{Datelike, NaiveDate};

/// Last calendar day of the month containing `date`
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Iterator over every month-end `d` with `start <= d <= end`
#[derive(Debug, Clone)]
pub struct MonthEnds {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for MonthEnds {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next.filter(|d| *d <= self.end)?;
        self.next = current.succ_opt().map(month_end);
        Some(current)
    }
}

/// Month-ends between `start` and `end`, both inclusive
pub fn month_ends(start: NaiveDate, end: NaiveDate) -> MonthEnds {
    MonthEnds { next: Some(month_end(start)), end }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_end() {
        assert_eq!(month_end(date(2024, 2, 10)), date(2024, 2, 29));
        assert_eq!(month_end(date(2023, 2, 1)), date(2023, 2, 28));
        assert_eq!(month_end(date(2024, 12, 31)), date(2024, 12, 31));
        assert_eq!(month_end(date(2024, 4, 30)), date(2024, 4, 30));
    }

    #[test]
    fn test_full_year_from_first_of_month() {
        let dates: Vec<_> = month_ends(date(2024, 1, 1), date(2024, 12, 31)).collect();
        assert_eq!(dates.len(), 12);
        assert_eq!(dates[0], date(2024, 1, 31));
        assert_eq!(dates[1], date(2024, 2, 29));
        assert_eq!(dates[11], date(2024, 12, 31));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        // Start on a month-end: it is the first point
        let dates: Vec<_> = month_ends(date(2024, 3, 31), date(2024, 5, 31)).collect();
        assert_eq!(dates, [date(2024, 3, 31), date(2024, 4, 30), date(2024, 5, 31)]);
    }

    #[test]
    fn test_end_mid_month_drops_partial_month() {
        let dates: Vec<_> = month_ends(date(2025, 1, 15), date(2026, 1, 15)).collect();
        assert_eq!(dates.len(), 12);
        assert_eq!(dates.last(), Some(&date(2025, 12, 31)));
    }

    #[test]
    fn test_empty_when_no_month_end_in_range() {
        assert_eq!(month_ends(date(2024, 1, 2), date(2024, 1, 30)).count(), 0);
        assert_eq!(month_ends(date(2024, 6, 1), date(2024, 1, 1)).count(), 0);
    }
}
