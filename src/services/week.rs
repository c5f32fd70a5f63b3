//! Week bucketing. Weeks run Monday through Sunday; every entry is keyed by
//! the Monday that opens its week.

use chrono::{Datelike, Duration, Local, NaiveDate};

/// Monday of the week containing `date`. Sunday closes the week that began
/// six days earlier.
///
/// Only for dates known to lie well inside chrono's range, such as today;
/// use [`checked_week_start`] for anything that came from a client.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    checked_week_start(date).unwrap_or(date)
}

/// Like [`week_start`], but `None` when the Monday would fall before the
/// earliest representable date.
pub fn checked_week_start(date: NaiveDate) -> Option<NaiveDate> {
    let days_since_monday = date.weekday().num_days_from_monday();
    date.checked_sub_signed(Duration::days(days_since_monday as i64))
}

/// Sunday closing the week that starts on `monday`.
pub fn week_end(monday: NaiveDate) -> NaiveDate {
    monday + Duration::days(6)
}

pub fn previous_week(monday: NaiveDate) -> NaiveDate {
    monday - Duration::days(7)
}

/// Today in the server's local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn current_week_start() -> NaiveDate {
    week_start(today())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn monday_maps_to_itself() {
        assert_eq!(week_start(date(2024, 6, 3)), date(2024, 6, 3));
    }

    #[test]
    fn midweek_rolls_back_to_monday() {
        assert_eq!(week_start(date(2024, 6, 5)), date(2024, 6, 3));
        assert_eq!(week_start(date(2024, 6, 8)), date(2024, 6, 3));
    }

    #[test]
    fn sunday_belongs_to_previous_monday() {
        assert_eq!(week_start(date(2024, 6, 9)), date(2024, 6, 3));
    }

    #[test]
    fn crosses_month_and_year_boundaries() {
        assert_eq!(week_start(date(2024, 3, 2)), date(2024, 2, 26));
        assert_eq!(week_start(date(2025, 1, 1)), date(2024, 12, 30));
    }

    #[test]
    fn always_latest_monday_on_or_before() {
        let mut day = date(2023, 12, 1);
        while day < date(2024, 3, 1) {
            let monday = week_start(day);
            assert_eq!(monday.weekday(), Weekday::Mon);
            assert!(monday <= day);
            assert!((day - monday).num_days() < 7);
            day += Duration::days(1);
        }
    }

    #[test]
    fn checked_week_start_reports_underflow() {
        assert_eq!(checked_week_start(date(2024, 6, 9)), Some(date(2024, 6, 3)));

        let mut day = NaiveDate::MIN;
        for _ in 0..7 {
            match checked_week_start(day) {
                Some(monday) => assert_eq!(monday.weekday(), Weekday::Mon),
                None => assert_ne!(day.weekday(), Weekday::Mon),
            }
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn week_end_and_previous_week() {
        let monday = date(2024, 6, 3);
        assert_eq!(week_end(monday), date(2024, 6, 9));
        assert_eq!(previous_week(monday), date(2024, 5, 27));
    }
}
