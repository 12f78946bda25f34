use chrono::NaiveDate;
use thiserror::Error;

/// Input rejected before anything is written to the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter habit name")]
    EmptyName,
    #[error("Please select at least one day")]
    EmptySchedule,
    #[error("Unknown weekday '{0}'. Use mon..sun or 1..7 (1 = Monday)")]
    UnknownWeekday(String),
    #[error("Unknown habit type '{0}'. Use: quantitative, qualitative, scalable")]
    UnknownHabitType(String),
    #[error("Please enter a valid target value (greater than 0)")]
    InvalidTarget,
    #[error("Please enter a valid scale range (greater than 0)")]
    InvalidScaleRange,
    #[error("Please enter your name")]
    EmptyUserName,
    #[error("Please enter your surname")]
    EmptySurname,
    #[error("Please enter a valid age")]
    InvalidAge,
    #[error("Unknown gender '{0}'. Use: Male, Female, Other")]
    UnknownGender(String),
    #[error("{date} is outside the last {window} days and cannot be marked")]
    DateOutsideWindow { date: NaiveDate, window: u32 },
    #[error("'{habit}' is a {expected} habit; use {hint}")]
    WrongMark {
        habit: String,
        expected: &'static str,
        hint: &'static str,
    },
    #[error("'{0}' has an unrecognized type and cannot be marked")]
    UntypedHabit(String),
    #[error("Quantity cannot be negative")]
    NegativeQuantity,
    #[error("Quantity is too large")]
    QuantityTooLarge,
    #[error("Rating {value} is outside 0..={max}")]
    RatingOutOfRange { value: i32, max: i32 },
}
