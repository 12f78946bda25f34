use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::ValidationError;
use crate::utils::calendar::{storage_to_ui_day, storage_weekday, ui_to_storage_day};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitType {
    /// Done or not done.
    Quantitative,
    /// Counted towards a daily target.
    Qualitative,
    /// Rated on a 0..=scale_range scale.
    Scalable,
}

impl HabitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HabitType::Quantitative => "quantitative",
            HabitType::Qualitative => "qualitative",
            HabitType::Scalable => "scalable",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            HabitType::Quantitative => "Quantitative",
            HabitType::Qualitative => "Qualitative",
            HabitType::Scalable => "Scalable",
        }
    }

    /// Lenient read of a stored type; anything unrecognized is "no type".
    pub fn from_stored(s: &str) -> Option<HabitType> {
        match HabitType::from_str(s) {
            Ok(t) => Some(t),
            Err(_) => {
                log::warn!("Unrecognized habit type '{}' in store", s);
                None
            }
        }
    }
}

impl std::fmt::Display for HabitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for HabitType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quantitative" | "check" | "binary" => Ok(HabitType::Quantitative),
            "qualitative" | "count" | "counter" => Ok(HabitType::Qualitative),
            "scalable" | "scale" | "rating" => Ok(HabitType::Scalable),
            _ => Err(ValidationError::UnknownHabitType(s.to_string())),
        }
    }
}

const UI_DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Weekdays a habit is scheduled on.
///
/// Bit `n - 1` is set for storage day `n` (1=Sunday..7=Saturday). The store
/// keeps the set as a comma-joined list of storage day numbers; the CLI talks
/// in UI days (1=Monday..7=Sunday) or names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EVERY_DAY: WeekdaySet = WeekdaySet(0b0111_1111);

    pub fn empty() -> Self {
        WeekdaySet(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns false when `day` is not a storage day number.
    pub fn insert_storage_day(&mut self, day: u8) -> bool {
        if !(1..=7).contains(&day) {
            return false;
        }
        self.0 |= 1 << (day - 1);
        true
    }

    pub fn contains_storage_day(&self, day: u8) -> bool {
        (1..=7).contains(&day) && self.0 & (1 << (day - 1)) != 0
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.contains_storage_day(storage_weekday(date))
    }

    pub fn storage_days(&self) -> Vec<u8> {
        (1..=7).filter(|d| self.contains_storage_day(*d)).collect()
    }

    pub fn ui_days(&self) -> Vec<u8> {
        let mut days: Vec<u8> = self
            .storage_days()
            .into_iter()
            .map(storage_to_ui_day)
            .collect();
        days.sort_unstable();
        days
    }

    pub fn from_ui_days(days: &[u8]) -> Result<Self, ValidationError> {
        let mut set = WeekdaySet::empty();
        for &day in days {
            if !(1..=7).contains(&day) {
                return Err(ValidationError::UnknownWeekday(day.to_string()));
            }
            set.insert_storage_day(ui_to_storage_day(day));
        }
        Ok(set)
    }

    /// Lenient parse of the stored form; malformed tokens are dropped.
    pub fn parse_storage(s: &str) -> Self {
        let mut set = WeekdaySet::empty();
        for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let ok = token
                .parse::<u8>()
                .map(|d| set.insert_storage_day(d))
                .unwrap_or(false);
            if !ok {
                log::warn!("Ignoring malformed weekday token '{}' in '{}'", token, s);
            }
        }
        set
    }

    pub fn to_storage_string(&self) -> String {
        self.storage_days()
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// "Every day" or e.g. "Mon, Wed, Fri".
    pub fn labels(&self) -> String {
        if *self == WeekdaySet::EVERY_DAY {
            return "Every day".to_string();
        }
        self.ui_days()
            .iter()
            .map(|d| UI_DAY_NAMES[(*d - 1) as usize])
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn parse_ui_day(token: &str) -> Result<u8, ValidationError> {
    let lower = token.to_lowercase();
    if let Ok(n) = lower.parse::<u8>() {
        if (1..=7).contains(&n) {
            return Ok(n);
        }
    }
    let day = match lower.as_str() {
        "mon" | "monday" => 1,
        "tue" | "tues" | "tuesday" => 2,
        "wed" | "wednesday" => 3,
        "thu" | "thur" | "thurs" | "thursday" => 4,
        "fri" | "friday" => 5,
        "sat" | "saturday" => 6,
        "sun" | "sunday" => 7,
        _ => return Err(ValidationError::UnknownWeekday(token.to_string())),
    };
    Ok(day)
}

/// Parses user input: `daily`, `weekdays`, `weekends`, or a comma list of
/// weekday names / UI day numbers (1 = Monday).
impl FromStr for WeekdaySet {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "every" | "all" => return Ok(WeekdaySet::EVERY_DAY),
            "weekdays" => return WeekdaySet::from_ui_days(&[1, 2, 3, 4, 5]),
            "weekends" => return WeekdaySet::from_ui_days(&[6, 7]),
            _ => {}
        }
        let days = s
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(parse_ui_day)
            .collect::<Result<Vec<_>, _>>()?;
        let set = WeekdaySet::from_ui_days(&days)?;
        if set.is_empty() {
            return Err(ValidationError::EmptySchedule);
        }
        Ok(set)
    }
}

impl From<String> for WeekdaySet {
    fn from(s: String) -> Self {
        WeekdaySet::parse_storage(&s)
    }
}

impl From<WeekdaySet> for String {
    fn from(set: WeekdaySet) -> Self {
        set.to_storage_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: i64,
    pub name: String,
    pub emoji: String,
    pub created_at: NaiveDateTime,
    /// `None` when the stored type is not recognized.
    pub habit_type: Option<HabitType>,
    pub frequency: WeekdaySet,
    pub target_value: i32,
    pub scale_range: Option<String>,
}

impl Habit {
    pub fn scale_max(&self) -> Option<i32> {
        self.scale_range
            .as_deref()
            .and_then(|s| s.trim().parse::<i32>().ok())
            .filter(|v| *v > 0)
    }

    pub fn type_label(&self) -> &'static str {
        self.habit_type.map(|t| t.display_name()).unwrap_or("Unknown")
    }
}

/// Add/edit form contents, validated before a habit is written.
#[derive(Debug, Clone)]
pub struct HabitDraft {
    pub name: String,
    pub emoji: String,
    pub habit_type: HabitType,
    pub frequency: WeekdaySet,
    pub target_value: Option<i32>,
    pub scale_range: Option<String>,
}

impl HabitDraft {
    pub fn from_habit(habit: &Habit) -> Self {
        Self {
            name: habit.name.clone(),
            emoji: habit.emoji.clone(),
            habit_type: habit.habit_type.unwrap_or(HabitType::Quantitative),
            frequency: habit.frequency,
            target_value: Some(habit.target_value).filter(|t| *t > 0),
            scale_range: habit.scale_range.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.frequency.is_empty() {
            return Err(ValidationError::EmptySchedule);
        }
        match self.habit_type {
            HabitType::Qualitative => {
                if !matches!(self.target_value, Some(t) if t > 0) {
                    return Err(ValidationError::InvalidTarget);
                }
            }
            HabitType::Scalable => {
                let parsed = self
                    .scale_range
                    .as_deref()
                    .and_then(|s| s.trim().parse::<i32>().ok());
                if !matches!(parsed, Some(v) if v > 0) {
                    return Err(ValidationError::InvalidScaleRange);
                }
            }
            HabitType::Quantitative => {}
        }
        Ok(())
    }

    /// Target as stored: only qualitative habits keep one.
    pub fn stored_target(&self) -> i32 {
        match self.habit_type {
            HabitType::Qualitative => self.target_value.unwrap_or(0),
            HabitType::Quantitative | HabitType::Scalable => 0,
        }
    }

    /// Scale range as stored: only scalable habits keep one.
    pub fn stored_scale_range(&self) -> Option<String> {
        match self.habit_type {
            HabitType::Scalable => self.scale_range.as_ref().map(|s| s.trim().to_string()),
            HabitType::Quantitative | HabitType::Qualitative => None,
        }
    }
}
