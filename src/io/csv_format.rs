//! CSV output for committed grade rows
//!
//! Serializes committed ResultRecords as CSV for the CLI report. This is a
//! display concern only: rows are sorted by student id here so the report
//! is deterministic, while row-insert order inside a batch stays
//! unspecified.

use crate::types::{IngestError, ResultRecord};
use std::io::Write;

/// Write committed rows to CSV format
///
/// Writes rows with columns: student_id, exam_event_id, grade,
/// transaction_id. Rows are sorted by student id for deterministic output.
///
/// # Arguments
///
/// * `rows` - Slice of committed rows to write
/// * `output` - Mutable reference to a writer for outputting CSV
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(IngestError)` if a write error occurred
pub fn write_rows_csv(rows: &[ResultRecord], output: &mut dyn Write) -> Result<(), IngestError> {
    let mut writer = csv::Writer::from_writer(output);

    // Sort rows by student id for deterministic output
    let mut sorted_rows = rows.to_vec();
    sorted_rows.sort_by_key(|row| row.student_id);

    for row in sorted_rows {
        writer.serialize(row)?;
    }

    writer.flush()?;
    Ok(())
}
