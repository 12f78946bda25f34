use chrono::NaiveDate;
use std::collections::HashSet;

use crate::models::{DayStatus, Habit, HabitRecord, HabitStats, OverallSummary};
use crate::tracking::completion::{daily_value, day_status, is_completed, record_for};
use crate::tracking::streak::{current_streak, streak};
use crate::utils::calendar::{last_n_days, week_dates};

/// A habit together with every record it owns.
#[derive(Debug, Clone)]
pub struct HabitHistory {
    pub habit: Habit,
    pub records: Vec<HabitRecord>,
}

/// Share of records that are completed, rounded down. Schedule is ignored.
pub fn completion_percentage(habit: &Habit, records: &[HabitRecord]) -> u32 {
    if records.is_empty() {
        return 0;
    }
    let done = records.iter().filter(|r| is_completed(r, habit)).count();
    (done * 100 / records.len()) as u32
}

pub fn total_quantity(records: &[HabitRecord]) -> i64 {
    records.iter().map(|r| r.quantity as i64).sum()
}

pub fn average_rating(records: &[HabitRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let sum: i64 = records.iter().map(|r| r.scale_value as i64).sum();
    sum as f64 / records.len() as f64
}

pub fn total_days(records: &[HabitRecord]) -> u32 {
    records.len() as u32
}

fn value_on(habit: &Habit, records: &[HabitRecord], date: NaiveDate) -> f64 {
    record_for(records, date)
        .map(|r| daily_value(r, habit))
        .unwrap_or(0.0)
}

/// Daily values for the Monday-first week `week_offset` weeks from today's.
/// A week outside the representable calendar has no records, so all zeros.
pub fn weekly_series(
    habit: &Habit,
    records: &[HabitRecord],
    today: NaiveDate,
    week_offset: i64,
) -> [f64; 7] {
    match week_dates(today, week_offset) {
        Some(dates) => dates.map(|d| value_on(habit, records, d)),
        None => [0.0; 7],
    }
}

/// Per-week averages of the last four weeks, oldest first.
///
/// Only strictly positive daily values enter an average, so days without a
/// record (and genuine zero ratings) do not pull a week down.
pub fn monthly_series(habit: &Habit, records: &[HabitRecord], today: NaiveDate) -> [f64; 4] {
    std::array::from_fn(|i| {
        let offset = i as i64 - 3;
        positive_mean(&weekly_series(habit, records, today, offset))
    })
}

fn positive_mean(values: &[f64]) -> f64 {
    let positive: Vec<f64> = values.iter().copied().filter(|v| *v > 0.0).collect();
    if positive.is_empty() {
        0.0
    } else {
        positive.iter().sum::<f64>() / positive.len() as f64
    }
}

/// Status of each of the last `days` days, oldest first.
pub fn history_grid(
    habit: &Habit,
    records: &[HabitRecord],
    today: NaiveDate,
    days: u32,
) -> Vec<(NaiveDate, DayStatus)> {
    last_n_days(today, days)
        .into_iter()
        .map(|d| (d, day_status(records, habit, d)))
        .collect()
}

pub fn habit_stats(
    habit: &Habit,
    records: &[HabitRecord],
    today: NaiveDate,
    max_lookback_days: u32,
) -> HabitStats {
    HabitStats {
        streak: streak(habit, records, today, max_lookback_days),
        completion_percentage: completion_percentage(habit, records),
        total_days: total_days(records),
        total_quantity: total_quantity(records),
        average_rating: average_rating(records),
    }
}

pub fn overall_summary(
    histories: &[HabitHistory],
    today: NaiveDate,
    max_lookback_days: u32,
) -> OverallSummary {
    if histories.is_empty() {
        return OverallSummary::default();
    }

    let percent_sum: u32 = histories
        .iter()
        .map(|h| completion_percentage(&h.habit, &h.records))
        .sum();
    let best_current_streak = histories
        .iter()
        .map(|h| current_streak(&h.habit, &h.records, today, max_lookback_days))
        .max()
        .unwrap_or(0);
    let active_days: HashSet<NaiveDate> = histories
        .iter()
        .flat_map(|h| h.records.iter().map(|r| r.date))
        .collect();

    OverallSummary {
        habit_count: histories.len() as u32,
        average_completion: percent_sum as f64 / histories.len() as f64,
        best_current_streak,
        active_days: active_days.len() as u32,
    }
}
