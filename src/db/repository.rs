use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, params};

use crate::models::{
    Gender, Habit, HabitDraft, HabitRecord, HabitType, RecordUpdate, User, WeekdaySet,
};
use crate::tracking::HabitHistory;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| anyhow!("Bad date '{}': {}", s, e))
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .map_err(|e| anyhow!("Bad timestamp '{}': {}", s, e))
}

// ─── Habit repo ──────────────────────────────────────────────────────────────

const HABIT_COLUMNS: &str =
    "id, name, emoji, habit_type, frequency, target_value, scale_range, created_at";

type HabitRow = (i64, String, String, String, String, i32, Option<String>, String);

fn read_habit_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<HabitRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
    ))
}

fn habit_from_row(row: HabitRow) -> Result<Habit> {
    let (id, name, emoji, habit_type, frequency, target_value, scale_range, created_at) = row;
    Ok(Habit {
        id,
        name,
        emoji,
        created_at: parse_timestamp(&created_at)?,
        habit_type: HabitType::from_stored(&habit_type),
        frequency: WeekdaySet::parse_storage(&frequency),
        target_value,
        scale_range,
    })
}

pub struct HabitRepo;

impl HabitRepo {
    pub fn create(conn: &Connection, draft: &HabitDraft, created_at: NaiveDateTime) -> Result<i64> {
        conn.execute(
            "INSERT INTO habits (name, emoji, habit_type, frequency, target_value, scale_range, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                draft.name.trim(),
                draft.emoji,
                draft.habit_type.as_str(),
                draft.frequency.to_storage_string(),
                draft.stored_target(),
                draft.stored_scale_range(),
                created_at.format(TIMESTAMP_FORMAT).to_string(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        log::debug!("Created habit {} ({})", id, draft.name);
        Ok(id)
    }

    pub fn update(conn: &Connection, id: i64, draft: &HabitDraft) -> Result<()> {
        let changed = conn.execute(
            "UPDATE habits
             SET name = ?1, emoji = ?2, habit_type = ?3, frequency = ?4,
                 target_value = ?5, scale_range = ?6
             WHERE id = ?7",
            params![
                draft.name.trim(),
                draft.emoji,
                draft.habit_type.as_str(),
                draft.frequency.to_storage_string(),
                draft.stored_target(),
                draft.stored_scale_range(),
                id,
            ],
        )?;
        if changed == 0 {
            return Err(anyhow!("Habit {} no longer exists", id));
        }
        log::debug!("Updated habit {}", id);
        Ok(())
    }

    /// Deletes the habit and, through the foreign key, all of its records.
    pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
        let changed = conn.execute("DELETE FROM habits WHERE id = ?1", params![id])?;
        log::debug!("Deleted habit {} ({} rows)", id, changed);
        Ok(changed > 0)
    }

    pub fn get(conn: &Connection, id: i64) -> Result<Option<Habit>> {
        let row = conn
            .query_row(
                &format!("SELECT {} FROM habits WHERE id = ?1", HABIT_COLUMNS),
                params![id],
                read_habit_row,
            )
            .optional()?;
        row.map(habit_from_row).transpose()
    }

    /// Newest first.
    pub fn all(conn: &Connection) -> Result<Vec<Habit>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM habits ORDER BY created_at DESC, id DESC",
            HABIT_COLUMNS
        ))?;
        let rows = stmt.query_map([], read_habit_row)?;

        let mut result = Vec::new();
        for r in rows {
            result.push(habit_from_row(r?)?);
        }
        Ok(result)
    }

    /// Look a habit up by numeric id or case-insensitive name.
    pub fn find(conn: &Connection, key: &str) -> Result<Option<Habit>> {
        if let Ok(id) = key.trim().parse::<i64>() {
            if let Some(habit) = Self::get(conn, id)? {
                return Ok(Some(habit));
            }
        }
        let wanted = key.trim().to_lowercase();
        Ok(Self::all(conn)?
            .into_iter()
            .find(|h| h.name.to_lowercase() == wanted))
    }
}

// ─── Record repo ─────────────────────────────────────────────────────────────

type RecordRow = (i64, i64, String, i32, i32, i32);

fn read_record_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RecordRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}

fn record_from_row(row: RecordRow) -> Result<HabitRecord> {
    let (id, habit_id, date, is_completed, quantity, scale_value) = row;
    Ok(HabitRecord {
        id: Some(id),
        habit_id,
        date: parse_date(&date)?,
        is_completed: is_completed != 0,
        quantity,
        scale_value,
    })
}

pub struct RecordRepo;

impl RecordRepo {
    pub fn for_habit(conn: &Connection, habit_id: i64) -> Result<Vec<HabitRecord>> {
        let mut stmt = conn.prepare(
            "SELECT id, habit_id, date, is_completed, quantity, scale_value
             FROM habit_records WHERE habit_id = ?1 ORDER BY date",
        )?;
        let rows = stmt.query_map(params![habit_id], read_record_row)?;

        let mut result = Vec::new();
        for r in rows {
            result.push(record_from_row(r?)?);
        }
        Ok(result)
    }

    pub fn get(conn: &Connection, habit_id: i64, date: NaiveDate) -> Result<Option<HabitRecord>> {
        let row = conn
            .query_row(
                "SELECT id, habit_id, date, is_completed, quantity, scale_value
                 FROM habit_records WHERE habit_id = ?1 AND date = ?2",
                params![habit_id, date.format(DATE_FORMAT).to_string()],
                read_record_row,
            )
            .optional()?;
        row.map(record_from_row).transpose()
    }

    /// Write one field of the day's record, creating the record if needed.
    pub fn upsert(
        conn: &Connection,
        habit_id: i64,
        date: NaiveDate,
        update: RecordUpdate,
    ) -> Result<()> {
        let column = update.column();
        conn.execute(
            &format!(
                "INSERT INTO habit_records (habit_id, date, {col}) VALUES (?1, ?2, ?3)
                 ON CONFLICT(habit_id, date) DO UPDATE SET {col} = excluded.{col}",
                col = column
            ),
            params![habit_id, date.format(DATE_FORMAT).to_string(), update.value()],
        )
        .with_context(|| format!("Writing {} for habit {} on {}", column, habit_id, date))?;
        log::debug!("Habit {} on {}: {} = {}", habit_id, date, column, update.value());
        Ok(())
    }

    pub fn count(conn: &Connection) -> Result<i64> {
        conn.query_row("SELECT COUNT(*) FROM habit_records", [], |row| row.get(0))
            .map_err(anyhow::Error::from)
    }
}

/// Every habit (newest first) with its records.
pub fn load_histories(conn: &Connection) -> Result<Vec<HabitHistory>> {
    HabitRepo::all(conn)?
        .into_iter()
        .map(|habit| {
            let records = RecordRepo::for_habit(conn, habit.id)?;
            Ok(HabitHistory { habit, records })
        })
        .collect()
}

// ─── User repo ───────────────────────────────────────────────────────────────

pub struct UserRepo;

impl UserRepo {
    pub fn get(conn: &Connection) -> Result<Option<User>> {
        let row = conn
            .query_row(
                "SELECT name, surname, age, gender FROM users WHERE id = 1",
                [],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, i32>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()?;

        match row {
            None => Ok(None),
            Some((name, surname, age, gender)) => Ok(Some(User {
                name,
                surname,
                age,
                gender: gender.parse::<Gender>()?,
            })),
        }
    }

    pub fn exists(conn: &Connection) -> Result<bool> {
        Ok(Self::get(conn)?.is_some())
    }

    /// Create or replace the single profile.
    pub fn save(conn: &Connection, user: &User) -> Result<()> {
        conn.execute(
            "INSERT INTO users (id, name, surname, age, gender) VALUES (1, ?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET name = ?1, surname = ?2, age = ?3, gender = ?4",
            params![
                user.name.trim(),
                user.surname.trim(),
                user.age,
                user.gender.as_str()
            ],
        )?;
        log::debug!("Saved profile for {}", user.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    fn draft(name: &str, habit_type: HabitType) -> HabitDraft {
        HabitDraft {
            name: name.to_string(),
            emoji: "💧".to_string(),
            habit_type,
            frequency: "mon,wed,fri".parse().unwrap(),
            target_value: Some(8),
            scale_range: Some("10".to_string()),
        }
    }

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, d).unwrap()
    }

    #[test]
    fn create_and_reload_habit() {
        let conn = open_in_memory().unwrap();
        let id = HabitRepo::create(&conn, &draft("Water", HabitType::Qualitative), at(19, 9)).unwrap();

        let habit = HabitRepo::get(&conn, id).unwrap().unwrap();
        assert_eq!(habit.name, "Water");
        assert_eq!(habit.habit_type, Some(HabitType::Qualitative));
        assert_eq!(habit.frequency.labels(), "Mon, Wed, Fri");
        assert_eq!(habit.target_value, 8);
        // only scalable habits keep a scale range
        assert_eq!(habit.scale_range, None);
        assert_eq!(habit.created_at, at(19, 9));

        let stored: String = conn
            .query_row("SELECT frequency FROM habits WHERE id = ?1", params![id], |r| r.get(0))
            .unwrap();
        assert_eq!(stored, "2,4,6");
    }

    #[test]
    fn find_by_id_or_name() {
        let conn = open_in_memory().unwrap();
        let id = HabitRepo::create(&conn, &draft("Morning Run", HabitType::Quantitative), at(19, 9)).unwrap();

        assert_eq!(HabitRepo::find(&conn, &id.to_string()).unwrap().unwrap().id, id);
        assert_eq!(HabitRepo::find(&conn, "morning run").unwrap().unwrap().id, id);
        assert!(HabitRepo::find(&conn, "nap").unwrap().is_none());
    }

    #[test]
    fn all_is_newest_first() {
        let conn = open_in_memory().unwrap();
        HabitRepo::create(&conn, &draft("Old", HabitType::Quantitative), at(1, 9)).unwrap();
        HabitRepo::create(&conn, &draft("New", HabitType::Quantitative), at(2, 9)).unwrap();
        let names: Vec<_> = HabitRepo::all(&conn).unwrap().into_iter().map(|h| h.name).collect();
        assert_eq!(names, vec!["New", "Old"]);
    }

    #[test]
    fn update_switches_type_fields() {
        let conn = open_in_memory().unwrap();
        let id = HabitRepo::create(&conn, &draft("Mood", HabitType::Qualitative), at(19, 9)).unwrap();
        HabitRepo::update(&conn, id, &draft("Mood", HabitType::Scalable)).unwrap();

        let habit = HabitRepo::get(&conn, id).unwrap().unwrap();
        assert_eq!(habit.habit_type, Some(HabitType::Scalable));
        assert_eq!(habit.target_value, 0);
        assert_eq!(habit.scale_max(), Some(10));

        assert!(HabitRepo::update(&conn, 999, &draft("Gone", HabitType::Scalable)).is_err());
    }

    #[test]
    fn unrecognized_type_loads_as_none() {
        let conn = open_in_memory().unwrap();
        conn.execute(
            "INSERT INTO habits (name, emoji, habit_type, frequency, created_at)
             VALUES ('Legacy', 'x', 'weekly', '1,2,3', '2025-05-01 08:00:00')",
            [],
        )
        .unwrap();
        let habit = HabitRepo::find(&conn, "legacy").unwrap().unwrap();
        assert_eq!(habit.habit_type, None);
        assert_eq!(habit.type_label(), "Unknown");
    }

    #[test]
    fn upsert_writes_only_the_given_field() {
        let conn = open_in_memory().unwrap();
        let id = HabitRepo::create(&conn, &draft("Water", HabitType::Qualitative), at(19, 9)).unwrap();

        RecordRepo::upsert(&conn, id, day(19), RecordUpdate::Quantity(3)).unwrap();
        RecordRepo::upsert(&conn, id, day(19), RecordUpdate::Quantity(5)).unwrap();
        RecordRepo::upsert(&conn, id, day(20), RecordUpdate::Completed(true)).unwrap();

        let records = RecordRepo::for_habit(&conn, id).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, day(19));
        assert_eq!(records[0].quantity, 5);
        assert!(!records[0].is_completed);
        assert!(records[1].is_completed);
        assert_eq!(records[1].quantity, 0);

        let one = RecordRepo::get(&conn, id, day(20)).unwrap().unwrap();
        assert_eq!(one.habit_id, id);
        assert!(RecordRepo::get(&conn, id, day(21)).unwrap().is_none());
    }

    #[test]
    fn deleting_a_habit_deletes_its_records() {
        let conn = open_in_memory().unwrap();
        let keep = HabitRepo::create(&conn, &draft("Keep", HabitType::Quantitative), at(19, 9)).unwrap();
        let drop = HabitRepo::create(&conn, &draft("Drop", HabitType::Quantitative), at(19, 10)).unwrap();
        RecordRepo::upsert(&conn, keep, day(19), RecordUpdate::Completed(true)).unwrap();
        RecordRepo::upsert(&conn, drop, day(19), RecordUpdate::Completed(true)).unwrap();
        RecordRepo::upsert(&conn, drop, day(20), RecordUpdate::Completed(false)).unwrap();

        assert!(HabitRepo::delete(&conn, drop).unwrap());
        assert!(!HabitRepo::delete(&conn, drop).unwrap());
        assert_eq!(RecordRepo::count(&conn).unwrap(), 1);
        assert!(RecordRepo::for_habit(&conn, drop).unwrap().is_empty());
    }

    #[test]
    fn histories_pair_habits_with_records() {
        let conn = open_in_memory().unwrap();
        let a = HabitRepo::create(&conn, &draft("A", HabitType::Quantitative), at(1, 9)).unwrap();
        HabitRepo::create(&conn, &draft("B", HabitType::Quantitative), at(2, 9)).unwrap();
        RecordRepo::upsert(&conn, a, day(19), RecordUpdate::Completed(true)).unwrap();

        let histories = load_histories(&conn).unwrap();
        assert_eq!(histories.len(), 2);
        assert_eq!(histories[0].habit.name, "B");
        assert!(histories[0].records.is_empty());
        assert_eq!(histories[1].records.len(), 1);
    }

    #[test]
    fn single_profile() {
        let conn = open_in_memory().unwrap();
        assert!(!UserRepo::exists(&conn).unwrap());

        let mut user = User {
            name: "Ada".to_string(),
            surname: "Lovelace".to_string(),
            age: 36,
            gender: Gender::Female,
        };
        UserRepo::save(&conn, &user).unwrap();
        user.age = 37;
        UserRepo::save(&conn, &user).unwrap();

        assert_eq!(UserRepo::get(&conn).unwrap(), Some(user));
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }
}
