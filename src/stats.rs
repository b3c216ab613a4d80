use chrono::{Duration as ChronoDuration, Local, NaiveDate};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::error::Result;
use crate::summary::DailyRecord;
use crate::util::DATE_KEY_FORMAT;

/// Storage for one result per calendar day, keyed by `YYYY-MM-DD`.
pub trait ResultStore {
    fn record(&mut self, date: &str, record: &DailyRecord) -> Result<()>;
    fn get(&self, date: &str) -> Result<Option<DailyRecord>>;

    /// Number of consecutive played days ending at `date`
    fn streak_ending(&self, date: NaiveDate) -> Result<u32> {
        let mut streak = 0;
        let mut day = date;
        while self.get(&day.format(DATE_KEY_FORMAT).to_string())?.is_some() {
            streak += 1;
            day -= ChronoDuration::days(1);
        }
        Ok(streak)
    }
}

/// SQLite-backed daily results
#[derive(Debug)]
pub struct DailyResultsDb {
    conn: Connection,
}

impl DailyResultsDb {
    /// Open the database at the default state path, creating tables if needed
    pub fn new() -> Result<Self> {
        let db_path = AppDirs::db_path().unwrap_or_else(|| PathBuf::from("typoslinger_results.db"));
        Self::with_path(db_path)
    }

    pub fn with_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "opened results db");
        Self::init(conn)
    }

    pub fn in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS daily_results (
                date TEXT PRIMARY KEY,
                hits INTEGER NOT NULL,
                misses INTEGER NOT NULL,
                elapsed_secs INTEGER NOT NULL,
                recorded_at TEXT NOT NULL
            )
            "#,
            [],
        )?;
        Ok(Self { conn })
    }

    /// Every stored day, oldest first
    pub fn all(&self) -> Result<Vec<(String, DailyRecord)>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, hits, misses, elapsed_secs FROM daily_results ORDER BY date ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                DailyRecord {
                    hits: row.get::<_, i64>(1)? as usize,
                    misses: row.get::<_, i64>(2)? as usize,
                    elapsed_seconds: row.get::<_, i64>(3)? as u64,
                },
            ))
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}

impl ResultStore for DailyResultsDb {
    fn record(&mut self, date: &str, record: &DailyRecord) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT OR REPLACE INTO daily_results (date, hits, misses, elapsed_secs, recorded_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                date,
                record.hits as i64,
                record.misses as i64,
                record.elapsed_seconds as i64,
                Local::now().to_rfc3339(),
            ],
        )?;
        tracing::info!(date, hits = record.hits, misses = record.misses, "daily result saved");
        Ok(())
    }

    fn get(&self, date: &str) -> Result<Option<DailyRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT hits, misses, elapsed_secs FROM daily_results WHERE date = ?1",
                [date],
                |row| {
                    Ok(DailyRecord {
                        hits: row.get::<_, i64>(0)? as usize,
                        misses: row.get::<_, i64>(1)? as usize,
                        elapsed_seconds: row.get::<_, i64>(2)? as u64,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }
}
