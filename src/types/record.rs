//! Result-record types for the Exam Results Engine
//!
//! This module defines the validated result record produced by the line
//! parser, the classified parse failure for lines that could not be turned
//! into a record, and the identifier aliases used throughout the system.

use serde::Serialize;
use thiserror::Error;

/// Student identifier
///
/// Student numbers are exactly 7 decimal digits (0000000 to 9999999)
pub type StudentId = u32;

/// Exam event identifier
///
/// References a row in the externally-owned exam-events relation
pub type ExamEventId = u32;

/// Transaction identifier
///
/// Supplied by the caller's already-open transaction; shared by every
/// record of one submission
pub type TransactionId = u64;

/// Fixed-point grade
///
/// A decimal grade scaled by 10: the valid range is 10 to 100 inclusive,
/// representing original values 1.0 to 10.0
pub type Grade = u8;

/// A validated exam result, ready for insertion
///
/// Produced exclusively by the line parser. Once constructed, all four
/// fields are valid per the parsing rules; no partially-valid record can
/// exist. Records are consumed exactly once by the batch committer and
/// never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    /// The 7-digit student number extracted from the line
    pub student_id: StudentId,

    /// The exam event this submission belongs to (constant per submission)
    pub exam_event_id: ExamEventId,

    /// The grade scaled by 10 (e.g. `7,7` parses to 77, `10` to 100)
    pub grade: Grade,

    /// The transaction stamped onto every row of this submission
    pub transaction_id: TransactionId,
}

/// Classification of what a failed line was missing
///
/// Evaluated only when the primary extraction fails. The first three
/// variants are decided by testing each pattern anywhere in the line;
/// `Malformed` is the explicit catch-all for lines where both patterns
/// appear but the anchored extraction still fails (e.g. a valid grade
/// token that is not the trailing token).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MissingField {
    /// A grade pattern is present but no 7-digit student id was found
    #[error("student id missing")]
    StudentId,

    /// A student id is present but no valid grade pattern was found
    #[error("grade missing")]
    Grade,

    /// Neither a student id nor a grade pattern was found
    ///
    /// Empty lines and header rows classify here.
    #[error("neither student id nor grade found")]
    Both,

    /// Both patterns are present but the line does not end in a grade token
    #[error("malformed line")]
    Malformed,
}

/// A line that could not become a [`ResultRecord`]
///
/// Carries the offending line verbatim together with a best-effort
/// classification of which field is missing. Parse failures are always
/// recoverable at the submission level; how they affect the batch is
/// decided by the committer's policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse line '{line}': {missing}")]
pub struct ParseFailure {
    /// The raw line text as submitted
    pub line: String,

    /// Which field (or fields) could not be extracted
    pub missing: MissingField,
}

impl ParseFailure {
    /// Create a ParseFailure for the given line and classification
    pub fn new(line: impl Into<String>, missing: MissingField) -> Self {
        ParseFailure {
            line: line.into(),
            missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::student_id(
        ParseFailure::new("name 7,5", MissingField::StudentId),
        "cannot parse line 'name 7,5': student id missing"
    )]
    #[case::grade(
        ParseFailure::new("1234567 name", MissingField::Grade),
        "cannot parse line '1234567 name': grade missing"
    )]
    #[case::both(
        ParseFailure::new("header row", MissingField::Both),
        "cannot parse line 'header row': neither student id nor grade found"
    )]
    #[case::malformed(
        ParseFailure::new("7,5 1234567", MissingField::Malformed),
        "cannot parse line '7,5 1234567': malformed line"
    )]
    fn test_parse_failure_display(#[case] failure: ParseFailure, #[case] expected: &str) {
        assert_eq!(failure.to_string(), expected);
    }
}
