use std::env;
use std::process::ExitCode;

use console_export::{export_task_output, ExportError, ExportOutcome};
use packet_model::TaskId;

fn print_usage() {
    eprintln!(
        "Usage: task-output <db_path> <task_id> <output_file>\n\
         \n\
         Extracts console output for one task from the server datastore,\n\
         strips BOF marker and blank lines, and writes the result to\n\
         <output_file>.\n"
    );
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() != 3 {
        print_usage();
        return ExitCode::from(2);
    }
    let db_path = &args[0];
    let task_id = TaskId::new(args[1].as_str());
    let output_file = &args[2];

    let report = match export_task_output(db_path, &task_id, output_file) {
        Ok(report) => report,
        Err(ExportError::Store(err)) => {
            eprintln!("SQLite error: {err}");
            return ExitCode::from(1);
        }
        Err(ExportError::Io(err)) => {
            eprintln!("Error writing to {output_file}: {err}");
            return ExitCode::from(1);
        }
    };

    for raw in &report.invalid_payloads {
        eprintln!("Skipping invalid JSON: {raw}");
    }

    match report.outcome {
        ExportOutcome::Written { text } => {
            println!("Saved cleaned a_text to {output_file}");
            println!();
            println!("Cleaned a_text for task_id '{}':", task_id.as_str());
            println!("{text}");
            println!("\n---");
        }
        ExportOutcome::NoText => {
            println!("No non-empty a_text found for task_id '{}'.", task_id.as_str());
        }
        ExportOutcome::NoCleanText => {
            println!(
                "No non-empty cleaned a_text found for task_id '{}'.",
                task_id.as_str()
            );
        }
    }
    ExitCode::SUCCESS
}
