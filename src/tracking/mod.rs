//! Scheduling, streaks and statistics.
//!
//! Everything here is a pure function of a habit, its records and an explicit
//! reference date; nothing reads the clock or the store.

pub mod aggregate;
pub mod completion;
pub mod schedule;
pub mod streak;

pub use aggregate::{
    HabitHistory, average_rating, completion_percentage, habit_stats, history_grid,
    monthly_series, overall_summary, total_days, total_quantity, weekly_series,
};
pub use completion::{daily_value, day_status, is_completed, record_for};
pub use schedule::{habits_for_date, is_active};
pub use streak::{DEFAULT_LOOKBACK_DAYS, best_streak, current_streak, streak};
