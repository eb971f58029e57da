//! I/O module
//!
//! Handles submission input and report output.
//!
//! # Components
//!
//! - `line_format` - Free-form line parsing (token extraction, failure classification)
//! - `line_reader` - Synchronous submission reader with iterator interface
//! - `csv_format` - CSV report output for committed rows

pub mod csv_format;
pub mod line_format;
pub mod line_reader;

pub use csv_format::write_rows_csv;
pub use line_format::LineParser;
pub use line_reader::{read_submission, SubmissionReader};
