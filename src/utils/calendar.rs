use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Storage day numbers run 1=Sunday..7=Saturday.
pub fn storage_weekday(date: NaiveDate) -> u8 {
    date.weekday().number_from_sunday() as u8
}

/// UI day (1=Monday..7=Sunday) to storage day (1=Sunday..7=Saturday).
pub fn ui_to_storage_day(ui_day: u8) -> u8 {
    if ui_day == 7 { 1 } else { ui_day + 1 }
}

/// Storage day (1=Sunday..7=Saturday) to UI day (1=Monday..7=Sunday).
pub fn storage_to_ui_day(storage_day: u8) -> u8 {
    if storage_day == 1 { 7 } else { storage_day - 1 }
}

pub fn same_day<A: Datelike, B: Datelike>(a: &A, b: &B) -> bool {
    a.year() == b.year() && a.ordinal() == b.ordinal()
}

/// The seven dates (Monday first) of the week containing `today`, shifted by
/// `week_offset` whole weeks. `None` when that week leaves chrono's date range.
pub fn week_dates(today: NaiveDate, week_offset: i64) -> Option<[NaiveDate; 7]> {
    let back = Duration::days(today.weekday().num_days_from_monday() as i64);
    let monday = today
        .checked_sub_signed(back)?
        .checked_add_signed(Duration::try_weeks(week_offset)?)?;
    monday.checked_add_signed(Duration::days(6))?;
    Some(std::array::from_fn(|i| monday + Duration::days(i as i64)))
}

/// `count` consecutive days ending at `today`, oldest first.
pub fn last_n_days(today: NaiveDate, count: u32) -> Vec<NaiveDate> {
    (0..count as i64)
        .rev()
        .map(|back| today - Duration::days(back))
        .collect()
}

pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("Bad date '{}' (expected YYYY-MM-DD): {}", s, e))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn short_weekday(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn storage_weekday_is_sunday_first() {
        // 2025-05-18 is a Sunday
        assert_eq!(storage_weekday(d(2025, 5, 18)), 1);
        assert_eq!(storage_weekday(d(2025, 5, 19)), 2);
        assert_eq!(storage_weekday(d(2025, 5, 24)), 7);
    }

    #[test]
    fn day_conversion_round_trips() {
        for ui in 1..=7u8 {
            let storage = ui_to_storage_day(ui);
            assert!((1..=7).contains(&storage));
            assert_eq!(storage_to_ui_day(storage), ui);
        }
        assert_eq!(ui_to_storage_day(1), 2); // Monday
        assert_eq!(ui_to_storage_day(7), 1); // Sunday
        assert_eq!(storage_to_ui_day(7), 6); // Saturday
    }

    #[test]
    fn same_day_ignores_time_of_day() {
        let morning = d(2025, 5, 20).and_hms_opt(6, 0, 0).unwrap();
        let night = d(2025, 5, 20).and_hms_opt(23, 59, 59).unwrap();
        assert!(same_day(&morning, &night));
        assert!(same_day(&morning, &d(2025, 5, 20)));
        assert!(!same_day(&morning, &d(2026, 5, 20)));
    }

    #[test]
    fn week_dates_start_on_monday() {
        // Wednesday
        let week = week_dates(d(2025, 5, 21), 0).unwrap();
        assert_eq!(week[0], d(2025, 5, 19));
        assert_eq!(week[6], d(2025, 5, 25));

        let previous = week_dates(d(2025, 5, 21), -1).unwrap();
        assert_eq!(previous[0], d(2025, 5, 12));

        // Sunday belongs to the week that started six days earlier
        assert_eq!(week_dates(d(2025, 5, 25), 0).unwrap()[0], d(2025, 5, 19));
    }

    #[test]
    fn week_dates_out_of_range_is_none() {
        assert_eq!(week_dates(d(2025, 5, 19), 100_000_000), None);
        assert_eq!(week_dates(d(2025, 5, 19), i64::MIN), None);
        assert_eq!(week_dates(NaiveDate::MAX, 1), None);
    }

    #[test]
    fn last_n_days_is_oldest_first() {
        let days = last_n_days(d(2025, 3, 2), 3);
        assert_eq!(days, vec![d(2025, 2, 28), d(2025, 3, 1), d(2025, 3, 2)]);
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert_eq!(parse_date("2025-05-19").unwrap(), d(2025, 5, 19));
        assert!(parse_date("19/05/2025").is_err());
    }
}
