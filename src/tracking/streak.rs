use chrono::NaiveDate;

use crate::models::{Habit, HabitRecord, Streak};
use crate::tracking::completion::{is_completed, record_for};
use crate::tracking::schedule::is_active;

/// Upper bound on how many days `current_streak` walks back.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 3650;

/// Consecutive completed scheduled days, walking backward from `as_of`.
///
/// A scheduled day with an incomplete record ends the streak. A scheduled
/// day without a record ends it only when it lies before `as_of`; `as_of`
/// itself may still be unmarked. Unscheduled days never count and never
/// break. The walk stops at the earliest record date or after
/// `max_lookback_days` days, whichever comes first.
pub fn current_streak(
    habit: &Habit,
    records: &[HabitRecord],
    as_of: NaiveDate,
    max_lookback_days: u32,
) -> u32 {
    if habit.frequency.is_empty() || habit.habit_type.is_none() {
        return 0;
    }
    let Some(earliest) = records.iter().map(|r| r.date).min() else {
        return 0;
    };

    let mut count = 0u32;
    let mut day = as_of;
    for _ in 0..max_lookback_days {
        if day < earliest {
            break;
        }
        if is_active(habit, day) {
            match record_for(records, day) {
                Some(r) if is_completed(r, habit) => count += 1,
                Some(_) => break,
                None if day < as_of => break,
                None => {}
            }
        }
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    count
}

/// Longest run of completed scheduled days between the first and last record.
pub fn best_streak(habit: &Habit, records: &[HabitRecord]) -> u32 {
    let first = records.iter().map(|r| r.date).min();
    let last = records.iter().map(|r| r.date).max();
    let (Some(first), Some(last)) = (first, last) else {
        return 0;
    };

    let mut best = 0u32;
    let mut running = 0u32;
    for day in first.iter_days().take_while(|d| *d <= last) {
        if !is_active(habit, day) {
            continue;
        }
        match record_for(records, day) {
            Some(r) if is_completed(r, habit) => {
                running += 1;
                best = best.max(running);
            }
            _ => running = 0,
        }
    }
    best
}

pub fn streak(
    habit: &Habit,
    records: &[HabitRecord],
    today: NaiveDate,
    max_lookback_days: u32,
) -> Streak {
    Streak {
        current: current_streak(habit, records, today, max_lookback_days),
        best: best_streak(habit, records),
    }
}
