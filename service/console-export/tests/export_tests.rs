use std::fs;
use std::path::PathBuf;

use console_export::{export_task_output, ExportError, ExportOutcome};
use console_store::sqlite_repo::ConsoleRepo;
use packet_model::TaskId;
use tempfile::TempDir;

fn fixture_db(dir: &TempDir, rows: &[&str]) -> PathBuf {
    let db_path = dir.path().join("consoles.db");
    let repo = ConsoleRepo::open(&db_path).expect("fixture datastore opens");
    repo.ensure_schema().expect("schema creates");
    for raw in rows {
        repo.insert_packet(raw).expect("fixture row inserts");
    }
    db_path
}

#[test]
fn end_to_end_writes_cleaned_output() {
    let dir = TempDir::new().expect("tempdir");
    let db_path = fixture_db(
        &dir,
        &[
            r#"{"a_task_id":"T1","a_text":"[01/01 00:00:00] [+] BOF output\nHello"}"#,
            r#"{"a_task_id":"T1","a_text":"World"}"#,
        ],
    );
    let out_path = dir.path().join("task1.txt");

    let report = export_task_output(&db_path, &TaskId::new("T1"), &out_path)
        .expect("pipeline succeeds");

    assert_eq!(
        report.outcome,
        ExportOutcome::Written {
            text: "Hello\nWorld".to_string()
        }
    );
    assert!(report.invalid_payloads.is_empty());

    let written = fs::read_to_string(&out_path).expect("output file exists");
    assert_eq!(written, "Hello\nWorld\n");
}

#[test]
fn unknown_task_writes_no_file() {
    let dir = TempDir::new().expect("tempdir");
    let db_path = fixture_db(&dir, &[r#"{"a_task_id":"T1","a_text":"Hello"}"#]);
    let out_path = dir.path().join("nothing.txt");

    let report = export_task_output(&db_path, &TaskId::new("UNKNOWN"), &out_path)
        .expect("pipeline succeeds");

    assert_eq!(report.outcome, ExportOutcome::NoText);
    assert!(!out_path.exists());
}

#[test]
fn all_noise_reports_no_clean_text_and_writes_nothing() {
    let dir = TempDir::new().expect("tempdir");
    let db_path = fixture_db(
        &dir,
        &[r#"{"a_task_id":"T1","a_text":"[01/01 00:00:00] [+] BOF output\n   "}"#],
    );
    let out_path = dir.path().join("empty.txt");

    let report = export_task_output(&db_path, &TaskId::new("T1"), &out_path)
        .expect("pipeline succeeds");

    assert_eq!(report.outcome, ExportOutcome::NoCleanText);
    assert!(!out_path.exists());
}

#[test]
fn json5_payload_is_skipped_with_diagnostic() {
    // SQLite's JSON functions accept JSON5 (unquoted keys), so this row
    // passes the SQL filter but fails strict serde_json decoding.
    let dir = TempDir::new().expect("tempdir");
    let db_path = fixture_db(
        &dir,
        &[
            r#"{"a_task_id":"T1","a_text":"Hello"}"#,
            r#"{a_task_id:"T1",a_text:"dropped"}"#,
            r#"{"a_task_id":"T1","a_text":"World"}"#,
        ],
    );
    let out_path = dir.path().join("partial.txt");

    let report = export_task_output(&db_path, &TaskId::new("T1"), &out_path)
        .expect("pipeline survives one bad row");

    assert_eq!(
        report.outcome,
        ExportOutcome::Written {
            text: "Hello\nWorld".to_string()
        }
    );
    assert_eq!(report.invalid_payloads.len(), 1);
    assert!(report.invalid_payloads[0].contains("dropped"));
}

#[test]
fn rerun_overwrites_byte_identically() {
    let dir = TempDir::new().expect("tempdir");
    let db_path = fixture_db(
        &dir,
        &[
            r#"{"a_task_id":"T1","a_text":"Hello"}"#,
            r#"{"a_task_id":"T1","a_text":"World"}"#,
        ],
    );
    let out_path = dir.path().join("stable.txt");
    fs::write(&out_path, "stale content that should disappear").expect("seed file");

    export_task_output(&db_path, &TaskId::new("T1"), &out_path).expect("first run");
    let first = fs::read_to_string(&out_path).expect("first output");
    export_task_output(&db_path, &TaskId::new("T1"), &out_path).expect("second run");
    let second = fs::read_to_string(&out_path).expect("second output");

    assert_eq!(first, "Hello\nWorld\n");
    assert_eq!(first, second);
}

#[test]
fn missing_table_surfaces_as_store_error() {
    let dir = TempDir::new().expect("tempdir");
    // Valid SQLite file, but no `consoles` table in it.
    let db_path = dir.path().join("empty.db");
    drop(ConsoleRepo::open(&db_path).expect("creates empty datastore"));
    let out_path = dir.path().join("out.txt");

    let err = export_task_output(&db_path, &TaskId::new("T1"), &out_path)
        .expect_err("query against missing table fails");
    assert!(matches!(err, ExportError::Store(_)));
    assert!(!out_path.exists());
}

#[test]
fn unwritable_output_path_surfaces_as_io_error() {
    let dir = TempDir::new().expect("tempdir");
    let db_path = fixture_db(&dir, &[r#"{"a_task_id":"T1","a_text":"Hello"}"#]);

    // The output path is a directory, so the write must fail.
    let err = export_task_output(&db_path, &TaskId::new("T1"), dir.path())
        .expect_err("writing to a directory fails");
    assert!(matches!(err, ExportError::Io(_)));
}
