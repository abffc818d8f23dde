// --- File: crates/bookify_gcal/src/ledger.rs ---
//! The append-only booking ledger.
//!
//! One CSV row per successful booking, written after the calendar insert.
//! Rows are never updated or deleted by this system.

use serde::Serialize;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_LEDGER_PATH: &str = "bookings.csv";

const LEDGER_HEADER: [&str; 4] = ["Email", "Start Time", "End Time", "Description"];

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Ledger I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Ledger write error: {0}")]
    Csv(#[from] csv::Error),
}

/// One audit row: who booked which interval, with the free-text note.
#[derive(Debug, Clone, Serialize)]
pub struct BookingRecord {
    pub email: String,
    pub start_time: String,
    pub end_time: String,
    pub description: String,
}

/// Append-only CSV file of successful bookings. The header row is written
/// when the file is first created.
pub struct BookingLedger {
    path: PathBuf,
}

impl BookingLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one record, creating the file with its header if needed.
    pub fn append(&self, record: &BookingRecord) -> Result<(), LedgerError> {
        let file_exists = self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if !file_exists {
            writer.write_record(LEDGER_HEADER)?;
        }
        writer.write_record([
            record.email.as_str(),
            record.start_time.as_str(),
            record.end_time.as_str(),
            record.description.as_str(),
        ])?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_ledger() -> BookingLedger {
        let path = std::env::temp_dir().join(format!("bookify-ledger-{}.csv", uuid::Uuid::new_v4()));
        BookingLedger::new(path)
    }

    fn record(email: &str, description: &str) -> BookingRecord {
        BookingRecord {
            email: email.to_string(),
            start_time: "2025-05-05T03:30:00+00:00".to_string(),
            end_time: "2025-05-05T04:00:00+00:00".to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn header_is_written_once() {
        let ledger = temp_ledger();
        ledger.append(&record("a@example.com", "first")).unwrap();
        ledger.append(&record("b@example.com", "second")).unwrap();

        let contents = fs::read_to_string(ledger.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Email,Start Time,End Time,Description");
        assert!(lines[1].starts_with("a@example.com,"));
        assert!(lines[2].starts_with("b@example.com,"));

        fs::remove_file(ledger.path()).unwrap();
    }

    #[test]
    fn descriptions_with_commas_are_quoted() {
        let ledger = temp_ledger();
        ledger
            .append(&record("a@example.com", "flat viewing, then coffee"))
            .unwrap();

        let mut reader = csv::Reader::from_path(ledger.path()).unwrap();
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[0], "a@example.com");
        assert_eq!(&row[3], "flat viewing, then coffee");

        fs::remove_file(ledger.path()).unwrap();
    }
}
