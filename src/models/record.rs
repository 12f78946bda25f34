use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of a habit. Only the field matching the habit's type is written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HabitRecord {
    pub id: Option<i64>,
    pub habit_id: i64,
    pub date: NaiveDate,
    pub is_completed: bool,
    pub quantity: i32,
    pub scale_value: i32,
}

impl HabitRecord {
    pub fn new(habit_id: i64, date: NaiveDate) -> Self {
        Self {
            id: None,
            habit_id,
            date,
            ..Default::default()
        }
    }
}

/// A single-field write to a day's record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordUpdate {
    Completed(bool),
    Quantity(i32),
    Scale(i32),
}

impl RecordUpdate {
    pub fn column(&self) -> &'static str {
        match self {
            RecordUpdate::Completed(_) => "is_completed",
            RecordUpdate::Quantity(_) => "quantity",
            RecordUpdate::Scale(_) => "scale_value",
        }
    }

    pub fn value(&self) -> i32 {
        match self {
            RecordUpdate::Completed(done) => *done as i32,
            RecordUpdate::Quantity(q) => *q,
            RecordUpdate::Scale(s) => *s,
        }
    }

    pub fn apply(&self, record: &mut HabitRecord) {
        match *self {
            RecordUpdate::Completed(done) => record.is_completed = done,
            RecordUpdate::Quantity(q) => record.quantity = q,
            RecordUpdate::Scale(s) => record.scale_value = s,
        }
    }
}
