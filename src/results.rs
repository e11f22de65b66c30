//! Response Logger
//!
//! Append-only CSV results file shared by every session run against the same
//! path. One writer at a time; there is no locking.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::error::{ExperimentError, Result};
use crate::session::{ParticipantSession, Response};

pub const DEFAULT_RESULTS_FILE: &str = "data/experiment_results.csv";

pub const HEADER: [&str; 5] = ["ParticipantID", "Group", "Item", "Response", "Rating"];

pub struct ResponseLogger {
    path: PathBuf,
}

impl ResponseLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> PathBuf {
        PathBuf::from(DEFAULT_RESULTS_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row per response, writing the header first if the file is
    /// empty. Returns the number of data rows written.
    pub fn append(&self, session: &ParticipantSession, responses: &[Response]) -> Result<usize> {
        let rows: Vec<String> = responses.iter().map(|r| format_row(session, r)).collect();

        if let Err(e) = self.write_rows(&rows) {
            error!("Could not save {} rows for participant '{}': {}", rows.len(), session.identifier(), e);
            for row in &rows {
                error!("Unsaved row: {}", row);
            }
            return Err(e);
        }

        info!("Saved {} responses to {}", rows.len(), self.path.display());
        Ok(rows.len())
    }

    fn write_rows(&self, rows: &[String]) -> Result<()> {
        let io_err = |source: std::io::Error| ExperimentError::ResultsWrite {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;

        let mut out = String::new();
        if file.metadata().map_err(io_err)?.len() == 0 {
            out.push_str(&HEADER.join(","));
            out.push('\n');
        }
        for row in rows {
            out.push_str(row);
            out.push('\n');
        }

        file.write_all(out.as_bytes()).map_err(io_err)?;
        file.flush().map_err(io_err)?;
        Ok(())
    }
}

fn format_row(session: &ParticipantSession, response: &Response) -> String {
    let rating = response.rating().map(|r| r.to_string()).unwrap_or_default();
    [
        escape_field(session.identifier()),
        escape_field(session.group().as_str()),
        escape_field(response.item_label()),
        escape_field(response.decision().label()),
        escape_field(&rating),
    ]
    .join(",")
}

/// Quote a field only when it contains a delimiter, quote or line break
fn escape_field(field: &str) -> String {
    if field.contains(|c: char| matches!(c, ',' | '"' | '\r' | '\n')) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
