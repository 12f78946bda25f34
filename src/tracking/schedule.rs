use chrono::NaiveDate;

use crate::models::Habit;

/// Whether `habit` is scheduled on `date`.
///
/// A habit whose stored type is unrecognized is never active.
pub fn is_active(habit: &Habit, date: NaiveDate) -> bool {
    habit.habit_type.is_some() && habit.frequency.contains_date(date)
}

/// Habits scheduled on `date`, in the order given.
pub fn habits_for_date(habits: &[Habit], date: NaiveDate) -> Vec<&Habit> {
    habits.iter().filter(|h| is_active(h, date)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::test_support::{date, habit};
    use crate::models::{HabitType, WeekdaySet};

    #[test]
    fn active_only_on_scheduled_weekdays() {
        let h = habit(HabitType::Quantitative, "mon,wed,fri");
        // 2025-05-19 is a Monday
        let expected = [true, false, true, false, true, false, false];
        for (i, want) in expected.iter().enumerate() {
            assert_eq!(is_active(&h, date(2025, 5, 19 + i as u32)), *want, "day {}", i);
        }
    }

    #[test]
    fn untyped_or_unscheduled_habits_fail_closed() {
        let mut h = habit(HabitType::Scalable, "daily");
        h.habit_type = None;
        assert!(!is_active(&h, date(2025, 5, 19)));

        let mut h = habit(HabitType::Scalable, "daily");
        h.frequency = WeekdaySet::empty();
        assert!(!is_active(&h, date(2025, 5, 19)));
    }

    #[test]
    fn agenda_filters_by_weekday() {
        let habits = vec![
            habit(HabitType::Quantitative, "weekdays"),
            habit(HabitType::Quantitative, "weekends"),
        ];
        let saturday = date(2025, 5, 24);
        let agenda = habits_for_date(&habits, saturday);
        assert_eq!(agenda.len(), 1);
        assert_eq!(agenda[0].frequency.ui_days(), vec![6, 7]);
    }
}
