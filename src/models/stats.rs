use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub current: u32,
    pub best: u32,
}

/// Per-habit numbers shown on the detail and summary screens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HabitStats {
    pub streak: Streak,
    pub completion_percentage: u32,
    pub total_days: u32,
    pub total_quantity: i64,
    pub average_rating: f64,
}

/// Numbers across every habit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverallSummary {
    pub habit_count: u32,
    pub average_completion: f64,
    pub best_current_streak: u32,
    pub active_days: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    Completed,
    Failed,
    NotTracked,
    Empty,
}

impl DayStatus {
    pub fn glyph(&self) -> &'static str {
        match self {
            DayStatus::Completed => "●",
            DayStatus::Failed => "✗",
            DayStatus::NotTracked => "?",
            DayStatus::Empty => "○",
        }
    }
}
