//! CSV frame backend.
//!
//! Creates two files in the output directory:
//! - `frames.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::FrameWriter;
use crate::{FrameRow, OutputResult, TickSummaryRow};

pub const FRAMES_FILE: &str = "frames.csv";
pub const SUMMARIES_FILE: &str = "tick_summaries.csv";

/// Writes recorded frames to two CSV files.
pub struct CsvFrameWriter {
    frames:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvFrameWriter {
    /// Create the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut frames = Writer::from_path(dir.join(FRAMES_FILE))?;
        frames.write_record(["tick", "drone_id", "lat", "lon", "order_id", "leg"])?;

        let mut summaries = Writer::from_path(dir.join(SUMMARIES_FILE))?;
        summaries.write_record([
            "tick",
            "free",
            "awaiting_planning",
            "delivering",
            "matched",
            "delivered",
        ])?;

        Ok(Self { frames, summaries, finished: false })
    }
}

impl FrameWriter for CsvFrameWriter {
    fn write_frame(&mut self, rows: &[FrameRow]) -> OutputResult<()> {
        for row in rows {
            self.frames.write_record(&[
                row.tick.to_string(),
                row.drone_id.to_string(),
                row.lat.to_string(),
                row.lon.to_string(),
                row.order_id.map(|id| id.to_string()).unwrap_or_default(),
                row.leg.unwrap_or_default().to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.free.to_string(),
            row.awaiting_planning.to_string(),
            row.delivering.to_string(),
            row.matched.to_string(),
            row.delivered.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.frames.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
