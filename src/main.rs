//! Exam Results Engine CLI
//!
//! Command-line interface for ingesting exam result submissions.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- results.txt --exam-event 5 --transaction 42 > rows.csv
//! cargo run -- --policy best-effort results.txt --exam-event 5 --transaction 42
//! ```
//!
//! The program reads one result line per student from the input file,
//! parses them with the configured exam event and transaction identifiers,
//! and commits the batch against the in-memory backend under the selected
//! policy. Committed rows are written to stdout as CSV; parse failures and
//! the submission summary go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Submission committed
//! - 1: Submission aborted, or a fatal error occurred

use exam_results_engine::cli;
use exam_results_engine::core::{BatchCommitter, MemoryStore, TransactionState};
use exam_results_engine::io::{read_submission, write_rows_csv, LineParser};
use exam_results_engine::types::IngestError;
use std::process;

fn main() {
    let args = cli::parse_args();

    match run(&args) {
        Ok(TransactionState::Committed) => {}
        Ok(TransactionState::Aborted) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Run the ingest pipeline for one submission
///
/// Reads the submission file, parses every line, commits the batch
/// against a fresh in-memory backend, reports failures to stderr and
/// committed rows to stdout.
fn run(args: &cli::CliArgs) -> Result<TransactionState, IngestError> {
    let lines = read_submission(&args.input_file)?;

    let parser = LineParser::new(args.exam_event, args.transaction);
    let parsed = parser.parse_submission(lines.iter().map(String::as_str));

    let backend = MemoryStore::new();
    let (mut staging, handle) = backend.begin(args.transaction);
    let committer = BatchCommitter::new(args.policy.clone().into());
    let outcome = committer.insert_grades(parsed, &mut staging, handle)?;

    for failure in &outcome.failures {
        eprintln!("Warning: {}", failure);
    }

    let mut output = std::io::stdout();
    write_rows_csv(&backend.rows(), &mut output)?;

    match outcome.state {
        TransactionState::Committed => eprintln!(
            "Committed {} row(s) under transaction {} ({} failure(s))",
            outcome.rows_committed,
            args.transaction,
            outcome.failures.len()
        ),
        TransactionState::Aborted => eprintln!(
            "Aborted transaction {}: {} failure(s), no rows committed",
            args.transaction,
            outcome.failures.len()
        ),
    }

    Ok(outcome.state)
}
