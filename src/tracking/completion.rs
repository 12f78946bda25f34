use chrono::NaiveDate;

use crate::models::{DayStatus, Habit, HabitRecord, HabitType};
use crate::utils::calendar::same_day;

/// The record for `date`, if any. With more than one record on the same day
/// the first one found wins; which one that is is not guaranteed.
pub fn record_for(records: &[HabitRecord], date: NaiveDate) -> Option<&HabitRecord> {
    records.iter().find(|r| same_day(&r.date, &date))
}

pub fn is_completed(record: &HabitRecord, habit: &Habit) -> bool {
    match habit.habit_type {
        Some(HabitType::Quantitative) => record.is_completed,
        Some(HabitType::Qualitative) => record.quantity >= habit.target_value,
        Some(HabitType::Scalable) => record.scale_value > 0,
        None => false,
    }
}

/// Chart value of a day's record.
pub fn daily_value(record: &HabitRecord, habit: &Habit) -> f64 {
    match habit.habit_type {
        Some(HabitType::Quantitative) => {
            if record.is_completed {
                1.0
            } else {
                0.0
            }
        }
        Some(HabitType::Qualitative) => record.quantity as f64,
        Some(HabitType::Scalable) => record.scale_value as f64,
        None => 0.0,
    }
}

pub fn day_status(records: &[HabitRecord], habit: &Habit, date: NaiveDate) -> DayStatus {
    match record_for(records, date) {
        None => DayStatus::Empty,
        Some(_) if habit.habit_type.is_none() => DayStatus::NotTracked,
        Some(r) if is_completed(r, habit) => DayStatus::Completed,
        Some(_) => DayStatus::Failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::test_support::{date, habit, record};

    #[test]
    fn qualitative_records_compare_against_target() {
        let mut h = habit(HabitType::Qualitative, "daily");
        h.target_value = 3;
        let quantities = [3, 1, 3];
        let results: Vec<bool> = quantities
            .iter()
            .map(|q| {
                let mut r = record(date(2025, 5, 19));
                r.quantity = *q;
                is_completed(&r, &h)
            })
            .collect();
        assert_eq!(results, vec![true, false, true]);
    }

    #[test]
    fn each_type_reads_its_own_field() {
        let mut r = record(date(2025, 5, 19));
        r.is_completed = true;
        assert!(is_completed(&r, &habit(HabitType::Quantitative, "daily")));
        assert!(!is_completed(&r, &habit(HabitType::Scalable, "daily")));

        r.scale_value = 2;
        assert!(is_completed(&r, &habit(HabitType::Scalable, "daily")));
        assert_eq!(daily_value(&r, &habit(HabitType::Scalable, "daily")), 2.0);
        assert_eq!(daily_value(&r, &habit(HabitType::Quantitative, "daily")), 1.0);

        let mut untyped = habit(HabitType::Quantitative, "daily");
        untyped.habit_type = None;
        assert!(!is_completed(&r, &untyped));
        assert_eq!(daily_value(&r, &untyped), 0.0);
    }

    #[test]
    fn lookup_matches_calendar_day() {
        let records = vec![record(date(2025, 5, 18)), record(date(2025, 5, 19))];
        assert_eq!(
            record_for(&records, date(2025, 5, 19)).map(|r| r.date),
            Some(date(2025, 5, 19))
        );
        assert!(record_for(&records, date(2025, 5, 20)).is_none());
    }

    #[test]
    fn status_of_a_day() {
        let h = habit(HabitType::Quantitative, "daily");
        let mut done = record(date(2025, 5, 19));
        done.is_completed = true;
        let records = vec![done, record(date(2025, 5, 20))];

        assert_eq!(day_status(&records, &h, date(2025, 5, 19)), DayStatus::Completed);
        assert_eq!(day_status(&records, &h, date(2025, 5, 20)), DayStatus::Failed);
        assert_eq!(day_status(&records, &h, date(2025, 5, 21)), DayStatus::Empty);

        let mut untyped = h.clone();
        untyped.habit_type = None;
        assert_eq!(day_status(&records, &untyped, date(2025, 5, 19)), DayStatus::NotTracked);
    }
}
