use std::fs;
use std::path::Path;

use console_export::{export_task_output, ExportOutcome};
use console_store::sqlite_repo::ConsoleRepo;
use packet_model::TaskId;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let db_path = "target/demo/consoles.db";
    let out_path = "target/demo/task-42.txt";

    if let Some(parent) = Path::new(db_path).parent() {
        fs::create_dir_all(parent)?;
    }
    let _ = fs::remove_file(db_path);

    let repo = ConsoleRepo::open(db_path)?;
    repo.ensure_schema()?;
    repo.insert_packet(
        r#"{"a_task_id":"42","a_text":"[01/01 00:00:00] [+] BOF output received\nwhoami: lab\\operator"}"#,
    )?;
    repo.insert_packet(r#"{"a_task_id":"42","a_text":"hostname: WS01"}"#)?;
    repo.insert_packet(r#"{"a_task_id":"7","a_text":"other task"}"#)?;
    drop(repo);

    let report = export_task_output(db_path, &TaskId::new("42"), out_path)?;
    match report.outcome {
        ExportOutcome::Written { text } => println!("wrote {out_path}:\n{text}"),
        other => println!("nothing written: {other:?}"),
    }
    Ok(())
}
