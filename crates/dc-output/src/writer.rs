//! The `FrameWriter` trait implemented by the frame backends.

use crate::{FrameRow, OutputResult, TickSummaryRow};

/// Trait implemented by the CSV and SQLite frame writers.
///
/// Errors are stored by [`FrameRecorder`][crate::FrameRecorder] and
/// retrieved with its `take_error`.
pub trait FrameWriter {
    /// Write one tick's delivering-drone positions.
    fn write_frame(&mut self, rows: &[FrameRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}

impl<W: FrameWriter + ?Sized> FrameWriter for Box<W> {
    fn write_frame(&mut self, rows: &[FrameRow]) -> OutputResult<()> {
        (**self).write_frame(rows)
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        (**self).write_tick_summary(row)
    }

    fn finish(&mut self) -> OutputResult<()> {
        (**self).finish()
    }
}
