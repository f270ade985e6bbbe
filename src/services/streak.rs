use chrono::NaiveDate;

/// Length of the longest run of calendar-consecutive dates.
///
/// `dates` must be sorted ascending. Repeated dates neither extend nor
/// break a run.
pub fn longest_streak(dates: &[NaiveDate]) -> u32 {
    let mut longest = 0u32;
    let mut current = 0u32;
    let mut prev: Option<NaiveDate> = None;

    for &date in dates {
        current = match prev {
            Some(p) if p == date => current,
            Some(p) if p.succ_opt() == Some(date) => current + 1,
            _ => 1,
        };
        longest = longest.max(current);
        prev = Some(date);
    }

    longest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(longest_streak(&[]), 0);
    }

    #[test]
    fn test_single_date() {
        assert_eq!(longest_streak(&[d(2024, 6, 1)]), 1);
    }

    #[test]
    fn test_gap_resets_run() {
        let dates = [d(2024, 1, 1), d(2024, 1, 2), d(2024, 1, 3), d(2024, 1, 5)];
        assert_eq!(longest_streak(&dates), 3);
    }

    #[test]
    fn test_later_run_wins() {
        let dates = [
            d(2024, 1, 1),
            d(2024, 1, 3),
            d(2024, 1, 4),
            d(2024, 1, 5),
            d(2024, 1, 6),
        ];
        assert_eq!(longest_streak(&dates), 4);
    }

    #[test]
    fn test_run_across_month_and_year_boundary() {
        let dates = [d(2023, 12, 30), d(2023, 12, 31), d(2024, 1, 1)];
        assert_eq!(longest_streak(&dates), 3);
    }

    #[test]
    fn test_leap_day_is_consecutive() {
        let dates = [d(2024, 2, 28), d(2024, 2, 29), d(2024, 3, 1)];
        assert_eq!(longest_streak(&dates), 3);
        let dates = [d(2023, 2, 28), d(2023, 3, 1)];
        assert_eq!(longest_streak(&dates), 2);
    }

    #[test]
    fn test_duplicates_do_not_break_run() {
        let dates = [d(2024, 1, 1), d(2024, 1, 1), d(2024, 1, 2)];
        assert_eq!(longest_streak(&dates), 2);
    }
}
