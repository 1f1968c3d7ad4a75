//! One-shot export pipeline: fetch console packets for a task, decode
//! their payloads, clean the text, and write the result to a file.

use std::fs;
use std::path::Path;

use console_store::sqlite_repo::ConsoleRepo;
use console_store::{PacketSource, StoreError};
use output_cleaner::clean_fragments;
use packet_model::{decode_packets, TaskId};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Terminal state of one export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Cleaned text was written to the output path.
    Written { text: String },
    /// No record carried a non-empty `a_text`; nothing written.
    NoText,
    /// Fragments existed but cleaning removed every line; nothing written.
    NoCleanText,
}

/// What one export run did, including per-record decode failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub outcome: ExportOutcome,
    /// Raw payloads skipped because they were not valid JSON. SQLite's
    /// JSON parser accepts JSON5, so a row can pass the SQL filter and
    /// still fail strict decoding here.
    pub invalid_payloads: Vec<String>,
}

/// Run the full pipeline against the datastore at `db_path`.
///
/// Strictly sequential: fetch, decode, clean, write. A store or IO failure
/// aborts the remaining stages; per-record decode failures are collected
/// into the report instead. The written file is the cleaned text plus
/// exactly one trailing newline, overwriting any previous content.
pub fn export_task_output(
    db_path: impl AsRef<Path>,
    task_id: &TaskId,
    output_path: impl AsRef<Path>,
) -> Result<ExportReport, ExportError> {
    // Connection lives for this call only and drops on every exit path.
    let repo = ConsoleRepo::open(db_path)?;
    let rows = repo.fetch_packets(task_id)?;
    let batch = decode_packets(rows);

    if batch.texts.is_empty() {
        return Ok(ExportReport {
            outcome: ExportOutcome::NoText,
            invalid_payloads: batch.invalid,
        });
    }

    let cleaned = clean_fragments(&batch.texts);
    if cleaned.is_empty() {
        return Ok(ExportReport {
            outcome: ExportOutcome::NoCleanText,
            invalid_payloads: batch.invalid,
        });
    }

    fs::write(output_path, format!("{cleaned}\n"))?;
    Ok(ExportReport {
        outcome: ExportOutcome::Written { text: cleaned },
        invalid_payloads: batch.invalid,
    })
}
