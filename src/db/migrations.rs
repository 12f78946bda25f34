use anyhow::Result;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch("
        CREATE TABLE IF NOT EXISTS habits (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            name          TEXT NOT NULL,
            emoji         TEXT NOT NULL,
            habit_type    TEXT NOT NULL,
            frequency     TEXT NOT NULL,
            target_value  INTEGER NOT NULL DEFAULT 0,
            scale_range   TEXT,
            created_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS habit_records (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            habit_id      INTEGER NOT NULL REFERENCES habits(id) ON DELETE CASCADE,
            date          TEXT NOT NULL,
            is_completed  INTEGER NOT NULL DEFAULT 0,
            quantity      INTEGER NOT NULL DEFAULT 0,
            scale_value   INTEGER NOT NULL DEFAULT 0,
            UNIQUE(habit_id, date)
        );

        CREATE INDEX IF NOT EXISTS idx_habit_records_habit ON habit_records(habit_id);

        CREATE TABLE IF NOT EXISTS users (
            id       INTEGER PRIMARY KEY CHECK(id = 1),
            name     TEXT NOT NULL,
            surname  TEXT NOT NULL,
            age      INTEGER NOT NULL,
            gender   TEXT NOT NULL CHECK(gender IN ('Male','Female','Other'))
        );
    ")?;
    Ok(())
}
