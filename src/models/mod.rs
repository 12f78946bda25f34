pub mod habit;
pub mod record;
pub mod stats;
pub mod user;
pub mod validation;

pub use habit::{Habit, HabitDraft, HabitType, WeekdaySet};
pub use record::{HabitRecord, RecordUpdate};
pub use stats::{DayStatus, HabitStats, OverallSummary, Streak};
pub use user::{Gender, User};
pub use validation::ValidationError;
