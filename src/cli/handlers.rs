use anyhow::{Context, Result, anyhow};
use chrono::{Datelike, Duration, Local, NaiveDate};
use rusqlite::Connection;
use serde::Serialize;

use crate::cli::args::{HabitArgs, MarkArgs, TimeRange};
use crate::cli::prompt::confirm;
use crate::config::AppConfig;
use crate::config::settings::{HabitDefaults, TrackingConfig};
use crate::db::repository::{HabitRepo, RecordRepo, UserRepo, load_histories};
use crate::models::{
    DayStatus, Habit, HabitDraft, HabitRecord, HabitStats, HabitType, RecordUpdate, User,
    ValidationError, WeekdaySet,
};
use crate::tracking::{
    HabitHistory, current_streak, habit_stats, habits_for_date, history_grid, is_completed,
    monthly_series, overall_summary, record_for, weekly_series,
};
use crate::utils::calendar::{format_date, parse_date, short_weekday, week_dates};
use crate::utils::format::{format_value, pad_display, progress_bar, value_bar};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const YELLOW: &str = "\x1b[38;2;240;200;40m";

const NAME_WIDTH: usize = 24;
const HISTORY_DAYS: u32 = 30;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn find_habit(conn: &Connection, key: &str) -> Result<Habit> {
    HabitRepo::find(conn, key)?.ok_or_else(|| anyhow!("Habit '{}' not found", key))
}

// ─── Habit form ──────────────────────────────────────────────────────────────

/// Apply the given fields on top of `base` (a fresh form when adding).
fn build_draft(
    mut base: HabitDraft,
    name: Option<&str>,
    fields: &HabitArgs,
    defaults: &HabitDefaults,
) -> Result<HabitDraft, ValidationError> {
    if let Some(name) = name {
        base.name = name.to_string();
    }
    if let Some(t) = &fields.habit_type {
        base.habit_type = t.parse()?;
    }
    if let Some(days) = &fields.days {
        base.frequency = days.parse()?;
    }
    if let Some(target) = fields.target {
        base.target_value = Some(target);
    }
    if let Some(scale) = fields.scale {
        base.scale_range = Some(scale.to_string());
    }
    if let Some(emoji) = &fields.emoji {
        base.emoji = emoji.clone();
    }
    if base.habit_type == HabitType::Scalable && base.scale_range.is_none() {
        base.scale_range = Some(defaults.default_scale_range.to_string());
    }
    base.validate()?;
    Ok(base)
}

fn new_draft(defaults: &HabitDefaults) -> HabitDraft {
    HabitDraft {
        name: String::new(),
        emoji: defaults.default_emoji.clone(),
        habit_type: HabitType::Quantitative,
        frequency: WeekdaySet::EVERY_DAY,
        target_value: None,
        scale_range: None,
    }
}

fn describe_goal(habit: &Habit) -> String {
    match habit.habit_type {
        Some(HabitType::Qualitative) => format!("target {} per day", habit.target_value),
        Some(HabitType::Scalable) => format!(
            "scale 0-{}",
            habit.scale_range.as_deref().unwrap_or("?")
        ),
        Some(HabitType::Quantitative) => "done / not done".to_string(),
        None => "unrecognized type".to_string(),
    }
}

pub fn handle_add(
    conn: &Connection,
    config: &AppConfig,
    name: &str,
    fields: &HabitArgs,
) -> Result<()> {
    let draft = build_draft(new_draft(&config.habits), Some(name), fields, &config.habits)?;
    let id = HabitRepo::create(conn, &draft, Local::now().naive_local())
        .context("Failed to save habit")?;
    log::info!("Added habit {} '{}'", id, draft.name);
    println_colored!(
        GREEN,
        "  ✓ Added {} {} (#{}) · {}",
        draft.emoji,
        draft.name.trim(),
        id,
        draft.frequency.labels()
    );
    Ok(())
}

pub fn handle_edit(
    conn: &Connection,
    config: &AppConfig,
    key: &str,
    name: Option<&str>,
    fields: &HabitArgs,
) -> Result<()> {
    let habit = find_habit(conn, key)?;
    let draft = build_draft(HabitDraft::from_habit(&habit), name, fields, &config.habits)?;
    HabitRepo::update(conn, habit.id, &draft).context("Failed to save habit")?;
    println_colored!(GREEN, "  ✓ Saved changes to {} {}", draft.emoji, draft.name.trim());
    Ok(())
}

pub fn handle_delete(conn: &Connection, key: &str, yes: bool) -> Result<()> {
    let habit = find_habit(conn, key)?;
    let records = RecordRepo::for_habit(conn, habit.id)?.len();
    if !yes {
        let question = format!(
            "  Delete {} {} and its {} records? This cannot be undone. [y/N] ",
            habit.emoji, habit.name, records
        );
        if !confirm(&question)? {
            println_colored!(DIM, "  Cancelled");
            return Ok(());
        }
    }
    HabitRepo::delete(conn, habit.id).context("Failed to delete habit")?;
    log::info!("Deleted habit {} with {} records", habit.id, records);
    println_colored!(RED, "  ✗ Deleted {} {}", habit.emoji, habit.name);
    Ok(())
}

// ─── List ────────────────────────────────────────────────────────────────────

fn status_text(habit: &Habit, record: Option<&HabitRecord>) -> String {
    let Some(record) = record else {
        return format!("{}○ not marked\x1b[0m", DIM);
    };
    match habit.habit_type {
        Some(HabitType::Quantitative) => {
            if record.is_completed {
                format!("{}✓ done\x1b[0m", GREEN)
            } else {
                format!("{}✗ not done\x1b[0m", RED)
            }
        }
        Some(HabitType::Qualitative) => {
            let color = if is_completed(record, habit) { GREEN } else { AMBER };
            format!(
                "{}{}/{}  {}\x1b[0m",
                color,
                record.quantity,
                habit.target_value,
                progress_bar(record.quantity.max(0) as u32, habit.target_value.max(0) as u32, 8)
            )
        }
        Some(HabitType::Scalable) => {
            let max = habit.scale_max().unwrap_or(0);
            format!(
                "{}{}/{}  {}\x1b[0m",
                AMBER,
                record.scale_value,
                max,
                progress_bar(record.scale_value.max(0) as u32, max as u32, 8)
            )
        }
        None => format!("{}? untracked\x1b[0m", DIM),
    }
}

pub fn handle_list(
    conn: &Connection,
    config: &AppConfig,
    date: Option<&str>,
    all: bool,
) -> Result<()> {
    let today = today();
    let day = match date {
        Some(s) => parse_date(s)?,
        None => today,
    };
    let habits = HabitRepo::all(conn)?;
    let shown: Vec<&Habit> = if all {
        habits.iter().collect()
    } else {
        habits_for_date(&habits, day)
    };

    println!();
    println_colored!(
        YELLOW,
        "  Habits for {} {}",
        short_weekday(day.weekday()),
        format_date(day)
    );
    println!();

    if habits.is_empty() {
        println_colored!(DIM, "  No habits yet. Add one with: habita add <name>");
        println!();
        return Ok(());
    }
    if shown.is_empty() {
        println_colored!(DIM, "  Nothing scheduled for this day");
        println!();
        return Ok(());
    }

    for habit in shown {
        let records = RecordRepo::for_habit(conn, habit.id)?;
        let streak = current_streak(habit, &records, today, config.tracking.streak_lookback_days);
        let label = pad_display(&format!("{} {}", habit.emoji, habit.name), NAME_WIDTH);
        let flame = if streak > 0 {
            format!("  {}🔥 {}\x1b[0m", AMBER, streak)
        } else {
            String::new()
        };
        println!(
            "  {}{:>4}  {}{}",
            label,
            format!("#{}", habit.id),
            status_text(habit, record_for(&records, day)),
            flame
        );
    }
    println!();
    Ok(())
}

// ─── Mark ────────────────────────────────────────────────────────────────────

/// Dates from `today - (window - 1)` to `today` may be marked.
fn check_mark_window(date: NaiveDate, today: NaiveDate, window: u32) -> Result<(), ValidationError> {
    let earliest = today
        .checked_sub_signed(Duration::days(window.saturating_sub(1) as i64))
        .unwrap_or(NaiveDate::MIN);
    if date > today || date < earliest {
        return Err(ValidationError::DateOutsideWindow { date, window });
    }
    Ok(())
}

/// Work out the single field write a `mark` asks for.
///
/// With no value flag a quantitative habit toggles and a qualitative one
/// counts up by one.
fn resolve_mark(
    habit: &Habit,
    value: &MarkArgs,
    existing: Option<&HabitRecord>,
) -> Result<RecordUpdate, ValidationError> {
    let wrong = |expected: &'static str, hint: &'static str| ValidationError::WrongMark {
        habit: habit.name.clone(),
        expected,
        hint,
    };
    match habit.habit_type {
        None => Err(ValidationError::UntypedHabit(habit.name.clone())),
        Some(HabitType::Quantitative) => {
            if value.quantity.is_some() || value.add.is_some() || value.scale.is_some() {
                return Err(wrong("quantitative", "--done or --failed"));
            }
            let done = if value.done {
                true
            } else if value.failed {
                false
            } else {
                !existing.map(|r| r.is_completed).unwrap_or(false)
            };
            Ok(RecordUpdate::Completed(done))
        }
        Some(HabitType::Qualitative) => {
            if value.done || value.failed || value.scale.is_some() {
                return Err(wrong("qualitative", "--quantity N or --add N"));
            }
            if value.quantity.is_some_and(|q| q < 0) || value.add.is_some_and(|a| a < 0) {
                return Err(ValidationError::NegativeQuantity);
            }
            let current = existing.map(|r| r.quantity).unwrap_or(0);
            let quantity = match (value.quantity, value.add) {
                (Some(q), _) => Some(q),
                (None, Some(add)) => current.checked_add(add),
                (None, None) => current.checked_add(1),
            };
            let quantity = quantity.ok_or(ValidationError::QuantityTooLarge)?;
            if quantity < 0 {
                return Err(ValidationError::NegativeQuantity);
            }
            Ok(RecordUpdate::Quantity(quantity))
        }
        Some(HabitType::Scalable) => {
            let Some(rating) = value.scale else {
                return Err(wrong("scalable", "--scale N"));
            };
            let max = habit.scale_max().unwrap_or(i32::MAX);
            if !(0..=max).contains(&rating) {
                return Err(ValidationError::RatingOutOfRange { value: rating, max });
            }
            Ok(RecordUpdate::Scale(rating))
        }
    }
}

pub fn handle_mark(
    conn: &Connection,
    tracking: &TrackingConfig,
    key: &str,
    date: Option<&str>,
    value: &MarkArgs,
) -> Result<()> {
    let habit = find_habit(conn, key)?;
    let today = today();
    let day = match date {
        Some(s) => parse_date(s)?,
        None => today,
    };
    check_mark_window(day, today, tracking.mark_window_days)?;

    let existing = RecordRepo::get(conn, habit.id, day)?;
    let update = resolve_mark(&habit, value, existing.as_ref())?;
    RecordRepo::upsert(conn, habit.id, day, update).context("Failed to save record")?;

    let mut record = existing.unwrap_or_else(|| HabitRecord::new(habit.id, day));
    update.apply(&mut record);
    let status = status_text(&habit, Some(&record));
    println!("  {} {}  {}  {}", habit.emoji, habit.name, format_date(day), status);

    if is_completed(&record, &habit) {
        let records = RecordRepo::for_habit(conn, habit.id)?;
        let streak = current_streak(&habit, &records, today, tracking.streak_lookback_days);
        if streak > 0 {
            println_colored!(AMBER, "  🔥 {} day streak", streak);
        }
    }
    Ok(())
}

// ─── Show ────────────────────────────────────────────────────────────────────

fn print_stats_block(habit: &Habit, stats: &HabitStats) {
    println!(
        "  Streak:      {}{} current\x1b[0m  |  {} best",
        BOLD, stats.streak.current, stats.streak.best
    );
    println!(
        "  Completion:  {}%  {}",
        stats.completion_percentage,
        progress_bar(stats.completion_percentage, 100, 20)
    );
    println!("  Days logged: {}", stats.total_days);
    match habit.habit_type {
        Some(HabitType::Qualitative) => println!("  Total count: {}", stats.total_quantity),
        Some(HabitType::Scalable) => {
            println!("  Avg rating:  {}", format_value(stats.average_rating))
        }
        Some(HabitType::Quantitative) | None => {}
    }
}

fn print_history_grid(grid: &[(NaiveDate, DayStatus)]) {
    print!("  ");
    for name in ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"] {
        print!("{:<4}", name);
    }
    println!();

    let lead = grid
        .first()
        .map(|(d, _)| d.weekday().num_days_from_monday() as usize)
        .unwrap_or(0);
    let mut cells: Vec<String> = vec!["    ".to_string(); lead];
    for (_, status) in grid {
        let color = match status {
            DayStatus::Completed => GREEN,
            DayStatus::Failed => RED,
            DayStatus::NotTracked | DayStatus::Empty => DIM,
        };
        cells.push(format!("{}{}\x1b[0m   ", color, status.glyph()));
    }
    for row in cells.chunks(7) {
        println!("  {}", row.concat());
    }
}

pub fn handle_show(conn: &Connection, config: &AppConfig, key: &str) -> Result<()> {
    let habit = find_habit(conn, key)?;
    let records = RecordRepo::for_habit(conn, habit.id)?;
    let today = today();
    let stats = habit_stats(&habit, &records, today, config.tracking.streak_lookback_days);

    println!();
    println_colored!(YELLOW, "  {} {}  (#{})", habit.emoji, habit.name, habit.id);
    println_colored!(
        DIM,
        "  {} · {} · {} · since {}",
        habit.type_label(),
        describe_goal(&habit),
        habit.frequency.labels(),
        habit.created_at.format("%Y-%m-%d")
    );
    println!();
    println!("  Today:       {}", status_text(&habit, record_for(&records, today)));
    print_stats_block(&habit, &stats);
    println!();
    println_colored!(DIM, "  Last {} days  (● done, ✗ missed, ○ no record)", HISTORY_DAYS);
    print_history_grid(&history_grid(&habit, &records, today, HISTORY_DAYS));
    println!();
    Ok(())
}

// ─── Stats ───────────────────────────────────────────────────────────────────

fn print_series(labels: &[String], values: &[f64]) {
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    for (label, value) in labels.iter().zip(values) {
        println!(
            "  {:<10} {:>5}  {}{}\x1b[0m",
            label,
            format_value(*value),
            YELLOW,
            value_bar(*value, max, 20)
        );
    }
}

fn print_range_chart(
    history: &HabitHistory,
    range: TimeRange,
    today: NaiveDate,
    week: &[NaiveDate; 7],
    offset: i64,
) {
    let habit = &history.habit;
    match range {
        TimeRange::Week => {
            let labels: Vec<String> = week
                .iter()
                .map(|d| format!("{} {}", short_weekday(d.weekday()), d.day()))
                .collect();
            print_series(&labels, &weekly_series(habit, &history.records, today, offset));
        }
        TimeRange::Month => {
            let labels: Vec<String> = (1..=4).map(|w| format!("Week {}", w)).collect();
            print_series(&labels, &monthly_series(habit, &history.records, today));
        }
        TimeRange::Overall => {}
    }
}

pub fn handle_stats(
    conn: &Connection,
    config: &AppConfig,
    range: TimeRange,
    habit_key: Option<&str>,
    offset: i64,
) -> Result<()> {
    let today = today();
    let lookback = config.tracking.streak_lookback_days;
    let week = week_dates(today, offset)
        .ok_or_else(|| anyhow!("Week offset {} is out of range", offset))?;
    let histories = load_histories(conn)?;

    println!();
    if histories.is_empty() {
        println_colored!(DIM, "  No stats to display. Add habits to see statistics.");
        println!();
        return Ok(());
    }

    match range {
        TimeRange::Overall => {
            let summary = overall_summary(&histories, today, lookback);
            println_colored!(YELLOW, "  Overall Summary");
            println!();
            println!("  Habits:          {}", summary.habit_count);
            println!("  Avg completion:  {}%", summary.average_completion as u32);
            println!("  Best streak:     {}", summary.best_current_streak);
            println!("  Active days:     {}", summary.active_days);
            println!("  Records:         {}", RecordRepo::count(conn)?);
        }
        TimeRange::Week => {
            println_colored!(
                YELLOW,
                "  Week {} – {}",
                week[0].format("%b %-d"),
                week[6].format("%b %-d")
            );
        }
        TimeRange::Month => {
            println_colored!(YELLOW, "  Last 4 weeks (average of logged days)");
        }
    }

    let selected: Vec<&HabitHistory> = match habit_key {
        Some(key) => {
            let habit = find_habit(conn, key)?;
            histories.iter().filter(|h| h.habit.id == habit.id).collect()
        }
        None => histories.iter().collect(),
    };

    for history in selected {
        let stats = habit_stats(&history.habit, &history.records, today, lookback);
        println!();
        println_colored!(
            BOLD,
            "  {} {}  ({})",
            history.habit.emoji,
            history.habit.name,
            history.habit.type_label()
        );
        print_range_chart(history, range, today, &week, offset);
        print_stats_block(&history.habit, &stats);
    }
    println!();
    Ok(())
}

// ─── Export ──────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ExportedHabit<'a> {
    habit: &'a Habit,
    stats: HabitStats,
    records: &'a [HabitRecord],
}

#[derive(Serialize)]
struct Export<'a> {
    exported_on: NaiveDate,
    profile: Option<User>,
    habits: Vec<ExportedHabit<'a>>,
}

pub fn handle_export(conn: &Connection, config: &AppConfig, json: bool) -> Result<()> {
    let today = today();
    let lookback = config.tracking.streak_lookback_days;
    let histories = load_histories(conn)?;

    if json {
        let export = Export {
            exported_on: today,
            profile: UserRepo::get(conn)?,
            habits: histories
                .iter()
                .map(|h| ExportedHabit {
                    habit: &h.habit,
                    stats: habit_stats(&h.habit, &h.records, today, lookback),
                    records: &h.records,
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&export)?);
        return Ok(());
    }

    let week_start = today - Duration::days(6);
    let summary = overall_summary(&histories, today, lookback);

    println!("# habita: Weekly Summary");
    println!("# {}", format_date(today));
    println!();
    println!("## Last 7 days ({} to {})", format_date(week_start), format_date(today));
    for history in &histories {
        let grid = history_grid(&history.habit, &history.records, today, 7);
        let row: String = grid.iter().map(|(_, s)| s.glyph()).collect();
        let stats = habit_stats(&history.habit, &history.records, today, lookback);
        println!(
            "  {}  {}  streak {} (best {}), {}%",
            pad_display(&format!("{} {}", history.habit.emoji, history.habit.name), NAME_WIDTH),
            row,
            stats.streak.current,
            stats.streak.best,
            stats.completion_percentage
        );
    }
    println!();
    println!("## Summary");
    println!("  Habits:          {}", summary.habit_count);
    println!("  Avg completion:  {}%", summary.average_completion as u32);
    println!("  Best streak:     {}", summary.best_current_streak);
    println!("  Active days:     {}", summary.active_days);
    Ok(())
}

// ─── Config ──────────────────────────────────────────────────────────────────

pub fn handle_config(config: &AppConfig, init: bool) -> Result<()> {
    let path = AppConfig::config_path()?;
    if init {
        if path.exists() {
            println_colored!(AMBER, "  Config already exists at {:?}", path);
        } else {
            config.save()?;
            println_colored!(GREEN, "  ✓ Wrote default config to {:?}", path);
        }
        return Ok(());
    }
    println_colored!(DIM, "  # {:?}", path);
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, day).unwrap()
    }

    fn habit(habit_type: Option<HabitType>) -> Habit {
        Habit {
            id: 7,
            name: "Focus".to_string(),
            emoji: "🧠".to_string(),
            created_at: d(1).and_hms_opt(9, 0, 0).unwrap(),
            habit_type,
            frequency: WeekdaySet::EVERY_DAY,
            target_value: 4,
            scale_range: Some("5".to_string()),
        }
    }

    fn record_with(f: impl FnOnce(&mut HabitRecord)) -> HabitRecord {
        let mut r = HabitRecord::new(7, d(19));
        f(&mut r);
        r
    }

    #[test]
    fn mark_window_is_inclusive() {
        assert!(check_mark_window(d(20), d(20), 7).is_ok());
        assert!(check_mark_window(d(14), d(20), 7).is_ok());
        assert_eq!(
            check_mark_window(d(13), d(20), 7),
            Err(ValidationError::DateOutsideWindow { date: d(13), window: 7 })
        );
        assert!(check_mark_window(d(21), d(20), 7).is_err());
    }

    #[test]
    fn huge_mark_window_reaches_back_to_the_earliest_date() {
        assert!(check_mark_window(d(1), d(20), u32::MAX).is_ok());
        assert!(check_mark_window(NaiveDate::MIN, d(20), u32::MAX).is_ok());
        assert!(check_mark_window(d(21), d(20), u32::MAX).is_err());
    }

    #[test]
    fn quantitative_mark_toggles_without_flags() {
        let h = habit(Some(HabitType::Quantitative));
        let none = MarkArgs::default();
        assert_eq!(resolve_mark(&h, &none, None), Ok(RecordUpdate::Completed(true)));

        let done = record_with(|r| r.is_completed = true);
        assert_eq!(resolve_mark(&h, &none, Some(&done)), Ok(RecordUpdate::Completed(false)));

        let failed = MarkArgs { failed: true, ..Default::default() };
        assert_eq!(resolve_mark(&h, &failed, None), Ok(RecordUpdate::Completed(false)));

        let wrong = MarkArgs { quantity: Some(2), ..Default::default() };
        assert!(matches!(
            resolve_mark(&h, &wrong, None),
            Err(ValidationError::WrongMark { .. })
        ));
    }

    #[test]
    fn qualitative_mark_sets_or_adds() {
        let h = habit(Some(HabitType::Qualitative));
        let existing = record_with(|r| r.quantity = 3);

        let add = MarkArgs { add: Some(2), ..Default::default() };
        assert_eq!(resolve_mark(&h, &add, Some(&existing)), Ok(RecordUpdate::Quantity(5)));

        let set = MarkArgs { quantity: Some(1), ..Default::default() };
        assert_eq!(resolve_mark(&h, &set, Some(&existing)), Ok(RecordUpdate::Quantity(1)));

        assert_eq!(
            resolve_mark(&h, &MarkArgs::default(), None),
            Ok(RecordUpdate::Quantity(1))
        );

        let negative = MarkArgs { add: Some(-9), ..Default::default() };
        assert_eq!(
            resolve_mark(&h, &negative, Some(&existing)),
            Err(ValidationError::NegativeQuantity)
        );
    }

    #[test]
    fn qualitative_mark_rejects_negative_input() {
        let h = habit(Some(HabitType::Qualitative));
        let existing = record_with(|r| r.quantity = 3);

        let take_one = MarkArgs { add: Some(-1), ..Default::default() };
        assert_eq!(
            resolve_mark(&h, &take_one, Some(&existing)),
            Err(ValidationError::NegativeQuantity)
        );

        let set_negative = MarkArgs { quantity: Some(-1), ..Default::default() };
        assert_eq!(
            resolve_mark(&h, &set_negative, Some(&existing)),
            Err(ValidationError::NegativeQuantity)
        );
    }

    #[test]
    fn qualitative_mark_rejects_overflowing_count() {
        let h = habit(Some(HabitType::Qualitative));
        let existing = record_with(|r| r.quantity = 5);

        let huge = MarkArgs { add: Some(i32::MAX), ..Default::default() };
        assert_eq!(
            resolve_mark(&h, &huge, Some(&existing)),
            Err(ValidationError::QuantityTooLarge)
        );

        let full = record_with(|r| r.quantity = i32::MAX);
        assert_eq!(
            resolve_mark(&h, &MarkArgs::default(), Some(&full)),
            Err(ValidationError::QuantityTooLarge)
        );
    }

    #[test]
    fn scalable_mark_checks_range() {
        let h = habit(Some(HabitType::Scalable));
        let ok = MarkArgs { scale: Some(5), ..Default::default() };
        assert_eq!(resolve_mark(&h, &ok, None), Ok(RecordUpdate::Scale(5)));

        let high = MarkArgs { scale: Some(6), ..Default::default() };
        assert_eq!(
            resolve_mark(&h, &high, None),
            Err(ValidationError::RatingOutOfRange { value: 6, max: 5 })
        );
        assert!(resolve_mark(&h, &MarkArgs::default(), None).is_err());
    }

    #[test]
    fn untyped_habits_cannot_be_marked() {
        let h = habit(None);
        assert_eq!(
            resolve_mark(&h, &MarkArgs { done: true, ..Default::default() }, None),
            Err(ValidationError::UntypedHabit("Focus".to_string()))
        );
    }

    #[test]
    fn draft_defaults_and_overrides() {
        let defaults = HabitDefaults::default();
        let fields = HabitArgs {
            habit_type: Some("scalable".to_string()),
            days: Some("weekdays".to_string()),
            ..Default::default()
        };
        let draft = build_draft(new_draft(&defaults), Some("Mood"), &fields, &defaults).unwrap();
        assert_eq!(draft.scale_range.as_deref(), Some("10"));
        assert_eq!(draft.frequency.ui_days(), vec![1, 2, 3, 4, 5]);
        assert_eq!(draft.emoji, defaults.default_emoji);

        let missing_target = HabitArgs {
            habit_type: Some("qualitative".to_string()),
            ..Default::default()
        };
        assert_eq!(
            build_draft(new_draft(&defaults), Some("Water"), &missing_target, &defaults).unwrap_err(),
            ValidationError::InvalidTarget
        );

        assert_eq!(
            build_draft(new_draft(&defaults), Some(""), &HabitArgs::default(), &defaults).unwrap_err(),
            ValidationError::EmptyName
        );
    }

    #[test]
    fn editing_keeps_untouched_fields() {
        let defaults = HabitDefaults::default();
        let mut existing = habit(Some(HabitType::Qualitative));
        existing.frequency = "mon,thu".parse().unwrap();

        let fields = HabitArgs { target: Some(6), ..Default::default() };
        let draft = build_draft(HabitDraft::from_habit(&existing), None, &fields, &defaults).unwrap();
        assert_eq!(draft.name, "Focus");
        assert_eq!(draft.target_value, Some(6));
        assert_eq!(draft.frequency, existing.frequency);
    }
}
