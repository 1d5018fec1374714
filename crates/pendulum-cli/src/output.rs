//! Frame and summary writers.

use std::io::{self, Write};

use crate::cli::OutputFormat;
use crate::driver::{FrameRecord, Summary};

/// Destination for a run's output.
pub trait FrameWriter {
    /// Writes one frame.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying writer.
    fn write_frame(&mut self, record: &FrameRecord) -> io::Result<()>;

    /// Writes whatever closes the run and flushes.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying writer.
    fn finish(&mut self, summary: &Summary) -> io::Result<()>;
}

/// Builds the writer for `format`.
pub fn writer<'a>(format: OutputFormat, out: Box<dyn Write + 'a>) -> Box<dyn FrameWriter + 'a> {
    match format {
        OutputFormat::Jsonl => Box::new(JsonLines::new(out)),
        OutputFormat::Table => Box::new(Table::new(out)),
        OutputFormat::Summary => Box::new(SummaryOnly::new(out)),
    }
}

/// One compact JSON object per frame.
pub struct JsonLines<W: Write> {
    out: W,
}

impl<W: Write> JsonLines<W> {
    /// Wraps `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> FrameWriter for JsonLines<W> {
    fn write_frame(&mut self, record: &FrameRecord) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, record)?;
        self.out.write_all(b"\n")
    }

    fn finish(&mut self, _summary: &Summary) -> io::Result<()> {
        self.out.flush()
    }
}

/// Fixed-width columns with wrapped angles, followed by a one-line footer.
pub struct Table<W: Write> {
    out: W,
    header_written: bool,
}

impl<W: Write> Table<W> {
    /// Wraps `out`.
    pub const fn new(out: W) -> Self {
        Self {
            out,
            header_written: false,
        }
    }
}

impl<W: Write> FrameWriter for Table<W> {
    fn write_frame(&mut self, record: &FrameRecord) -> io::Result<()> {
        if !self.header_written {
            writeln!(
                self.out,
                "{:>6} {:>8} {:>9} {:>9} {:>9} {:>9} {:>11} {:>10}",
                "frame", "t", "a1", "da1", "a2", "da2", "energy", "drift"
            )?;
            self.header_written = true;
        }

        writeln!(
            self.out,
            "{:>6} {:>8.3} {:>9.4} {:>9.4} {:>9.4} {:>9.4} {:>11.5} {:>10.2e}",
            record.frame,
            record.time_ms / 1000.0,
            record.wrapped[0],
            record.state.da1,
            record.wrapped[1],
            record.state.da2,
            record.energy.total,
            record.drift,
        )
    }

    fn finish(&mut self, summary: &Summary) -> io::Result<()> {
        writeln!(
            self.out,
            "# {} frames, {} stepped, max drift {:.2e}",
            summary.frames, summary.stepped_frames, summary.max_drift
        )?;
        self.out.flush()
    }
}

/// Nothing per frame; the [`Summary`] as pretty JSON at the end.
pub struct SummaryOnly<W: Write> {
    out: W,
}

impl<W: Write> SummaryOnly<W> {
    /// Wraps `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> FrameWriter for SummaryOnly<W> {
    fn write_frame(&mut self, _record: &FrameRecord) -> io::Result<()> {
        Ok(())
    }

    fn finish(&mut self, summary: &Summary) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, summary)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}
