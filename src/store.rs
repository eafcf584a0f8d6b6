/// Practice session store.
///
/// Thin SQLite wrapper. The list kernel never touches SQL; it only consumes
/// counts, day bounds, and materialized pages from here. Days are persisted
/// as epoch-relative day numbers so range scoping is two integer
/// comparisons.
use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::Path;

use crate::filter::DateRange;
use crate::session::{PracticeSession, SessionId};
use crate::timeunit::{Day, Minutes};

pub struct SessionDb {
    conn: Connection,
}

impl SessionDb {
    /// Open or create the session database under `data_dir`.
    pub fn init(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
        let db_path = data_dir.join("sessions.sqlite");
        let conn = Connection::open(&db_path)
            .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS sessions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                piece TEXT NOT NULL,
                minutes INTEGER NOT NULL,
                notes TEXT,
                started_at_ms INTEGER NOT NULL,
                day INTEGER NOT NULL
            )",
            [],
        )
        .context("Failed to create sessions table")?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_sessions_day ON sessions(day)",
            [],
        )
        .context("Failed to create day index")?;

        Ok(Self { conn })
    }

    pub fn insert(
        &self,
        piece: &str,
        minutes: i64,
        notes: Option<&str>,
        started_at: Minutes,
        day: Day,
    ) -> Result<SessionId> {
        self.conn
            .execute(
                "INSERT INTO sessions (piece, minutes, notes, started_at_ms, day)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    piece,
                    minutes,
                    notes,
                    started_at.timestamp_millis(),
                    day.num_days_from_epoch()
                ],
            )
            .context("Failed to insert session")?;
        Ok(SessionId(self.conn.last_insert_rowid()))
    }

    /// Delete the given sessions, returning how many rows actually existed.
    pub fn delete(&self, ids: &[SessionId]) -> Result<usize> {
        let mut deleted = 0;
        for id in ids {
            deleted += self
                .conn
                .execute("DELETE FROM sessions WHERE id = ?1", params![id.0])
                .with_context(|| format!("Failed to delete session {}", id))?;
        }
        Ok(deleted)
    }

    /// Number of sessions whose day falls in `range`. Empty ranges count 0
    /// without touching the database.
    pub fn count_in(&self, range: &DateRange) -> Result<usize> {
        if range.is_empty() {
            return Ok(0);
        }
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sessions WHERE day >= ?1 AND day <= ?2",
                params![
                    range.start.num_days_from_epoch(),
                    range.end.num_days_from_epoch()
                ],
                |row| row.get(0),
            )
            .context("Failed to count sessions")?;
        Ok(count as usize)
    }

    /// One page of sessions in `range`, newest first.
    pub fn page_in(
        &self,
        range: &DateRange,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<PracticeSession>> {
        if range.is_empty() {
            return Ok(Vec::new());
        }
        let mut stmt = self.conn.prepare(
            "SELECT id, piece, minutes, notes, started_at_ms, day
             FROM sessions
             WHERE day >= ?1 AND day <= ?2
             ORDER BY started_at_ms DESC, id DESC
             LIMIT ?3 OFFSET ?4",
        )?;
        let rows = stmt.query_map(
            params![
                range.start.num_days_from_epoch(),
                range.end.num_days_from_epoch(),
                limit as i64,
                offset as i64
            ],
            row_to_session,
        )?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read session page")
    }

    /// Every session in `range`, newest first.
    pub fn all_in(&self, range: &DateRange) -> Result<Vec<PracticeSession>> {
        if range.is_empty() {
            return Ok(Vec::new());
        }
        let mut stmt = self.conn.prepare(
            "SELECT id, piece, minutes, notes, started_at_ms, day
             FROM sessions
             WHERE day >= ?1 AND day <= ?2
             ORDER BY started_at_ms DESC, id DESC",
        )?;
        let rows = stmt.query_map(
            params![
                range.start.num_days_from_epoch(),
                range.end.num_days_from_epoch()
            ],
            row_to_session,
        )?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read sessions")
    }

    /// Ids of every session in `range`, newest first. Used to materialize a
    /// selection into concrete rows.
    pub fn ids_in(&self, range: &DateRange) -> Result<Vec<SessionId>> {
        if range.is_empty() {
            return Ok(Vec::new());
        }
        let mut stmt = self.conn.prepare(
            "SELECT id FROM sessions
             WHERE day >= ?1 AND day <= ?2
             ORDER BY started_at_ms DESC, id DESC",
        )?;
        let rows = stmt.query_map(
            params![
                range.start.num_days_from_epoch(),
                range.end.num_days_from_epoch()
            ],
            |row| Ok(SessionId(row.get(0)?)),
        )?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read session ids")
    }

    /// First and last recorded day, or `None` while the store is empty.
    pub fn bounds(&self) -> Result<Option<(Day, Day)>> {
        let (min, max): (Option<i64>, Option<i64>) = self
            .conn
            .query_row("SELECT MIN(day), MAX(day) FROM sessions", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .context("Failed to read day bounds")?;
        match (min, max) {
            (Some(min), Some(max)) => {
                Ok(Some((Day::from_num_days(min), Day::from_num_days(max))))
            }
            _ => Ok(None),
        }
    }
}

fn row_to_session(row: &rusqlite::Row<'_>) -> rusqlite::Result<PracticeSession> {
    Ok(PracticeSession {
        id: SessionId(row.get(0)?),
        piece: row.get(1)?,
        minutes: row.get(2)?,
        notes: row.get(3)?,
        started_at: Minutes::from_millis(row.get(4)?),
        day: Day::from_num_days(row.get(5)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_db() -> (tempfile::TempDir, SessionDb) {
        let dir = tempfile::tempdir().unwrap();
        let db = SessionDb::init(dir.path()).unwrap();
        (dir, db)
    }

    fn day(y: i32, m: u32, d: u32) -> Day {
        Day::from_ymd(y, m, d).unwrap()
    }

    fn range(start: Day, end: Day) -> DateRange {
        DateRange { start, end }
    }

    #[test]
    fn insert_count_page_delete_roundtrip() {
        let (_dir, db) = open_db();
        let d = day(2025, 4, 1);
        let a = db
            .insert("Chopin Op. 10 No. 1", 40, None, Minutes::from_millis(1_000_000), d)
            .unwrap();
        let b = db
            .insert("Scales", 15, Some("slow"), Minutes::from_millis(2_000_000), d)
            .unwrap();
        assert_ne!(a, b);

        let r = range(d, d);
        assert_eq!(db.count_in(&r).unwrap(), 2);

        let page = db.page_in(&r, 0, 10).unwrap();
        assert_eq!(page.len(), 2);
        // Newest first.
        assert_eq!(page[0].id, b);
        assert_eq!(page[0].notes.as_deref(), Some("slow"));
        assert_eq!(page[1].piece, "Chopin Op. 10 No. 1");

        assert_eq!(db.delete(&[a]).unwrap(), 1);
        assert_eq!(db.count_in(&r).unwrap(), 1);
        // Deleting a missing id is not an error, just zero rows.
        assert_eq!(db.delete(&[a]).unwrap(), 0);
    }

    #[test]
    fn range_scoping_and_bounds() {
        let (_dir, db) = open_db();
        assert!(db.bounds().unwrap().is_none());

        for (i, d) in [day(2025, 1, 10), day(2025, 1, 20), day(2025, 2, 5)]
            .into_iter()
            .enumerate()
        {
            db.insert("piece", 10, None, Minutes::from_millis(i as i64 * 60_000), d)
                .unwrap();
        }

        let (first, last) = db.bounds().unwrap().unwrap();
        assert_eq!(first, day(2025, 1, 10));
        assert_eq!(last, day(2025, 2, 5));

        let january = range(day(2025, 1, 1), day(2025, 1, 31));
        assert_eq!(db.count_in(&january).unwrap(), 2);
        assert_eq!(db.ids_in(&january).unwrap().len(), 2);

        let empty = range(day(2025, 3, 1), day(2025, 2, 1));
        assert!(empty.is_empty());
        assert_eq!(db.count_in(&empty).unwrap(), 0);
        assert!(db.page_in(&empty, 0, 10).unwrap().is_empty());
    }

    #[test]
    fn paging_respects_offset_and_limit() {
        let (_dir, db) = open_db();
        let d = day(2025, 5, 1);
        for i in 0..7 {
            db.insert("piece", 10, None, Minutes::from_millis(i * 60_000), d)
                .unwrap();
        }
        let r = range(d, d);
        let page = db.page_in(&r, 5, 3).unwrap();
        assert_eq!(page.len(), 2);

        let all = db.all_in(&r).unwrap();
        assert_eq!(all.len(), 7);
        assert!(all.windows(2).all(|w| w[0].started_at >= w[1].started_at));
    }
}
