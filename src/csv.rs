use crate::error::Result;
use crate::models::AlertRow;
use csv::{Writer, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const HEADER: [&str; 6] = [
    "IncidentNum",
    "Timestamp",
    "ClusterName",
    "AlertName",
    "Urgency",
    "URL",
];

/// Writes report rows under a fixed header and counts what actually landed.
///
/// The header goes out on construction so an empty report still has one.
pub struct AlertCsvWriter<W: Write> {
    wtr: Writer<W>,
    rows: usize,
}

impl AlertCsvWriter<File> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(File::create(path)?)
    }
}

impl<W: Write> AlertCsvWriter<W> {
    pub fn new(inner: W) -> Result<Self> {
        let mut wtr = WriterBuilder::new().has_headers(false).from_writer(inner);
        wtr.write_record(HEADER)?;
        Ok(AlertCsvWriter { wtr, rows: 0 })
    }

    pub fn write_row(&mut self, row: &AlertRow) -> Result<()> {
        self.wtr.serialize(row)?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows
    }

    /// Flushes and hands back the number of data rows written.
    pub fn finish(mut self) -> Result<usize> {
        self.wtr.flush()?;
        Ok(self.rows)
    }
}
