//! Synchronous submission reader with iterator interface
//!
//! Provides a streaming iterator over the raw lines of a submission file.
//! Parsing is left to [`crate::io::line_format::LineParser`]; this module
//! only deals with getting lines off disk.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found) are returned from `new()`
//! - Per-line I/O errors are yielded as Err variants in the iterator
//!
//! # Memory Efficiency
//!
//! The reader streams lines one at a time; memory usage is O(1) per line,
//! not O(file_size). Callers that need the whole submission at once (the
//! batch committer works per submission) can use [`read_submission`].

use crate::types::IngestError;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

/// Streaming reader over the lines of one submission file
///
/// # Examples
///
/// ```no_run
/// use exam_results_engine::io::line_reader::SubmissionReader;
/// use std::path::Path;
///
/// let reader = SubmissionReader::new(Path::new("results.txt")).unwrap();
/// for line in reader {
///     match line {
///         Ok(line) => println!("line: {}", line),
///         Err(e) => eprintln!("Error: {}", e),
///     }
/// }
/// ```
#[derive(Debug)]
pub struct SubmissionReader {
    lines: Lines<BufReader<File>>,
}

impl SubmissionReader {
    /// Open a submission file for streaming reads
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the submission file
    ///
    /// # Returns
    ///
    /// * `Ok(SubmissionReader)` - Reader positioned at the first line
    /// * `Err(IngestError)` - File not found or not readable
    pub fn new(path: &Path) -> Result<Self, IngestError> {
        if !path.exists() {
            return Err(IngestError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path)?;
        Ok(SubmissionReader {
            lines: BufReader::new(file).lines(),
        })
    }
}

impl Iterator for SubmissionReader {
    type Item = Result<String, IngestError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines
            .next()
            .map(|result| result.map_err(IngestError::from))
    }
}

/// Read a whole submission into memory, preserving line order
///
/// # Arguments
///
/// * `path` - Path to the submission file
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Every line of the file, in order
/// * `Err(IngestError)` - File not found or a read failed partway
pub fn read_submission(path: &Path) -> Result<Vec<String>, IngestError> {
    SubmissionReader::new(path)?.collect()
}
