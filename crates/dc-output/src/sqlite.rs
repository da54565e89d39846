//! SQLite frame backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the output directory with two
//! tables: `frames` and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::FrameWriter;
use crate::{FrameRow, OutputResult, TickSummaryRow};

pub const DB_FILE: &str = "output.db";

/// Writes recorded frames to an SQLite database.
pub struct SqliteFrameWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteFrameWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join(DB_FILE))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS frames (
                 tick     INTEGER NOT NULL,
                 drone_id INTEGER NOT NULL,
                 lat      REAL    NOT NULL,
                 lon      REAL    NOT NULL,
                 order_id INTEGER,
                 leg      TEXT
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick              INTEGER PRIMARY KEY,
                 free              INTEGER NOT NULL,
                 awaiting_planning INTEGER NOT NULL,
                 delivering        INTEGER NOT NULL,
                 matched           INTEGER NOT NULL,
                 delivered         INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl FrameWriter for SqliteFrameWriter {
    fn write_frame(&mut self, rows: &[FrameRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO frames (tick, drone_id, lat, lon, order_id, leg) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick as i64,
                    row.drone_id,
                    row.lat,
                    row.lon,
                    row.order_id,
                    row.leg,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, free, awaiting_planning, delivering, matched, delivered) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                row.tick as i64,
                row.free,
                row.awaiting_planning,
                row.delivering,
                row.matched,
                row.delivered,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
