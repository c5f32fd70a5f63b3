use chrono::NaiveDate;

use super::week::{previous_week, week_start};

/// Count consecutive weeks with an entry, walking back from the week that
/// contains `today`. No entry this week means a streak of zero.
pub fn current_streak(week_starts: &[NaiveDate], today: NaiveDate) -> u32 {
    let current_week = week_start(today);

    let mut weeks: Vec<NaiveDate> = week_starts
        .iter()
        .copied()
        .filter(|w| *w <= current_week)
        .collect();
    weeks.sort_unstable_by(|a, b| b.cmp(a));
    weeks.dedup();

    let mut streak = 0u32;
    let mut check_week = current_week;

    for week in &weeks {
        if *week == check_week {
            streak += 1;
            check_week = previous_week(check_week);
        } else {
            break;
        }
    }

    streak
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    fn weeks_back(n: u32) -> NaiveDate {
        (0..n).fold(monday(), |w, _| previous_week(w))
    }

    #[test]
    fn no_entries_is_zero() {
        assert_eq!(current_streak(&[], monday()), 0);
    }

    #[test]
    fn stops_at_first_gap() {
        let weeks = [weeks_back(0), weeks_back(1), weeks_back(2), weeks_back(4)];
        assert_eq!(current_streak(&weeks, monday()), 3);
    }

    #[test]
    fn missing_current_week_gives_zero() {
        let weeks = [weeks_back(1), weeks_back(2)];
        assert_eq!(current_streak(&weeks, monday()), 0);
    }

    #[test]
    fn order_and_duplicates_do_not_matter() {
        let weeks = [weeks_back(1), weeks_back(0), weeks_back(1)];
        assert_eq!(current_streak(&weeks, monday()), 2);
    }

    #[test]
    fn today_on_sunday_counts_its_own_week() {
        let sunday = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
        assert_eq!(current_streak(&[monday()], sunday), 1);
    }

    #[test]
    fn future_weeks_are_ignored() {
        let next = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert_eq!(current_streak(&[next, monday()], monday()), 1);
    }
}
