//! Line format handling for exam result submissions
//!
//! This module centralizes the free-form line format concerns, providing:
//! - Token patterns for student ids and grades
//! - The LineParser that turns raw lines into validated ResultRecords
//! - Failure classification for lines that cannot be parsed
//!
//! All functions are pure (no I/O) for easy testing.
//!
//! # Line Format
//!
//! A submission line carries examiner-chosen columns separated by one or
//! more whitespace characters (spaces or tabs). Only two columns matter:
//!
//! - The **student id** is the first token consisting of exactly 7 digits,
//!   wherever it appears on the line.
//! - The **grade** must be the final token: either the literal `10`, or a
//!   digit `1`-`9` optionally followed by `,` or `.` and exactly one more
//!   digit. Nothing but whitespace may follow it.
//!
//! All other columns are ignored. Grades are converted to a fixed-point
//! integer scaled by 10 (`7,7` becomes 77, `8` becomes 80, `10` becomes
//! 100), so every accepted grade lands in the valid range 10..=100.

use crate::types::{
    ExamEventId, Grade, MissingField, ParseFailure, ResultRecord, StudentId, TransactionId,
};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

lazy_static! {
    /// A whole token of exactly 7 digits
    static ref STUDENT_ID_TOKEN: Regex = Regex::new(r"^[0-9]{7}$").unwrap();

    /// A whole grade token: the literal `10`, or a digit `1`-`9` optionally
    /// followed by a decimal separator and exactly one more digit
    ///
    /// The leading digit excludes `0` so the token pattern itself
    /// guarantees the fixed-point range 10..=100; values of 10.0 or above
    /// other than the literal `10` never match.
    static ref GRADE_TOKEN: Regex = Regex::new(r"^(?:10|[1-9](?:[,.][0-9])?)$").unwrap();
}

/// Parser for one submission's lines
///
/// Configured once per submission with the exam event and transaction
/// identifiers, which are stamped onto every record it produces. Parsing
/// is a pure function of the line and this fixed configuration:
/// re-parsing the same line always yields the same record or the same
/// failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineParser {
    exam_event_id: ExamEventId,
    transaction_id: TransactionId,
}

impl LineParser {
    /// Create a LineParser for one submission
    ///
    /// # Arguments
    ///
    /// * `exam_event_id` - The exam event every produced record references
    /// * `transaction_id` - The transaction every produced record is stamped with
    pub fn new(exam_event_id: ExamEventId, transaction_id: TransactionId) -> Self {
        LineParser {
            exam_event_id,
            transaction_id,
        }
    }

    /// Parse a single raw line into a validated ResultRecord
    ///
    /// Applies the extraction rules described in the module documentation.
    /// When extraction fails the returned ParseFailure carries the line
    /// verbatim and a classification of what was missing:
    ///
    /// - [`MissingField::Both`] - neither pattern appears anywhere on the
    ///   line (empty lines and header rows classify here)
    /// - [`MissingField::StudentId`] - a grade pattern appears but no
    ///   7-digit token does
    /// - [`MissingField::Grade`] - a 7-digit token appears but no grade
    ///   pattern does
    /// - [`MissingField::Malformed`] - both patterns appear, but the line
    ///   does not end in a grade token
    ///
    /// # Arguments
    ///
    /// * `line` - The raw submission line
    ///
    /// # Returns
    ///
    /// * `Ok(ResultRecord)` - All four fields extracted and valid
    /// * `Err(ParseFailure)` - The line text plus a failure classification
    pub fn parse_line(&self, line: &str) -> Result<ResultRecord, ParseFailure> {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        let student_token = tokens
            .iter()
            .copied()
            .find(|token| STUDENT_ID_TOKEN.is_match(token));
        let grade_token = tokens
            .last()
            .copied()
            .filter(|token| GRADE_TOKEN.is_match(token));

        match (student_token, grade_token) {
            (Some(student), Some(grade)) => {
                // Guarded by the token patterns; neither conversion can
                // fail for a matched token.
                let student_id = student
                    .parse::<StudentId>()
                    .map_err(|_| ParseFailure::new(line, MissingField::Malformed))?;
                let grade = convert_grade_token(grade)
                    .ok_or_else(|| ParseFailure::new(line, MissingField::Malformed))?;

                Ok(ResultRecord {
                    student_id,
                    exam_event_id: self.exam_event_id,
                    grade,
                    transaction_id: self.transaction_id,
                })
            }
            _ => Err(ParseFailure::new(line, classify(&tokens))),
        }
    }

    /// Parse every line of a submission, preserving order
    ///
    /// # Arguments
    ///
    /// * `lines` - The raw submission lines
    ///
    /// # Returns
    ///
    /// One parse outcome per input line, in input order, ready to hand to
    /// the batch committer.
    pub fn parse_submission<'a, I>(&self, lines: I) -> Vec<Result<ResultRecord, ParseFailure>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        lines.into_iter().map(|line| self.parse_line(line)).collect()
    }
}

/// Classify a failed line by testing each pattern anywhere in it
///
/// Only called after the anchored extraction has failed, so the
/// (true, true) arm means both patterns are present somewhere but the
/// line does not end in a grade token.
fn classify(tokens: &[&str]) -> MissingField {
    let has_student = tokens.iter().any(|token| STUDENT_ID_TOKEN.is_match(token));
    let has_grade = tokens.iter().any(|token| GRADE_TOKEN.is_match(token));

    match (has_student, has_grade) {
        (false, false) => MissingField::Both,
        (false, true) => MissingField::StudentId,
        (true, false) => MissingField::Grade,
        (true, true) => MissingField::Malformed,
    }
}

/// Convert a matched grade token to its fixed-point representation
///
/// Normalizes the decimal separator, parses with Decimal, scales by 10
/// and truncates. For tokens matching the grade pattern the result is
/// always in 10..=100.
fn convert_grade_token(token: &str) -> Option<Grade> {
    let normalized = token.replace(',', ".");
    let value = Decimal::from_str(&normalized).ok()?;
    (value * Decimal::TEN).trunc().to_u8()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parser() -> LineParser {
        LineParser::new(5, 42)
    }

    #[rstest]
    #[case::comma_grade("1234567   7,7", 1234567, 77)]
    #[case::dot_grade("1234567 8.5", 1234567, 85)]
    #[case::whole_grade("1234567 name 9", 1234567, 90)]
    #[case::literal_ten_tab("1234567\t10", 1234567, 100)]
    #[case::minimum_grade("1234567 1", 1234567, 10)]
    #[case::lowest_fraction("1234567 1,0", 1234567, 10)]
    #[case::extra_columns("1234567  A  B  7,7", 1234567, 77)]
    #[case::id_not_first("x y 1234567 z 6.1", 1234567, 61)]
    #[case::leading_zero_id("0234567 8", 234567, 80)]
    #[case::mixed_whitespace(" 1234567 \t group-4 \t 9,9 ", 1234567, 99)]
    fn test_parse_line_valid(
        #[case] line: &str,
        #[case] student_id: StudentId,
        #[case] grade: Grade,
    ) {
        let record = parser().parse_line(line).unwrap();
        assert_eq!(
            record,
            ResultRecord {
                student_id,
                exam_event_id: 5,
                grade,
                transaction_id: 42,
            }
        );
    }

    #[rstest]
    #[case::empty_line("", MissingField::Both)]
    #[case::whitespace_only("   \t  ", MissingField::Both)]
    #[case::header_row("student name grade", MissingField::Both)]
    #[case::neither_pattern("badline", MissingField::Both)]
    #[case::id_too_short("123456 7,7", MissingField::StudentId)]
    #[case::id_too_long("12345678 7,7", MissingField::StudentId)]
    #[case::id_embedded("A1234567 7,7", MissingField::StudentId)]
    #[case::no_grade_token("1234567 absent", MissingField::Grade)]
    #[case::id_only("1234567", MissingField::Grade)]
    #[case::grade_above_ten("1234567 10.5", MissingField::Grade)]
    #[case::grade_two_decimals("1234567 7,75", MissingField::Grade)]
    #[case::grade_leading_zero("1234567 0,5", MissingField::Grade)]
    #[case::grade_zero("1234567 0", MissingField::Grade)]
    #[case::bare_ninety("1234567 90", MissingField::Grade)]
    #[case::grade_not_trailing("1234567 7,7 remark", MissingField::Malformed)]
    #[case::grade_before_id("7,5 1234567", MissingField::Malformed)]
    fn test_parse_line_failures(#[case] line: &str, #[case] expected: MissingField) {
        let failure = parser().parse_line(line).unwrap_err();
        assert_eq!(failure.missing, expected);
        assert_eq!(failure.line, line);
    }

    #[rstest]
    #[case::valid("1234567 7,7")]
    #[case::invalid("1234567 10.5")]
    fn test_parse_line_is_idempotent(#[case] line: &str) {
        let first = parser().parse_line(line);
        let second = parser().parse_line(line);
        assert_eq!(first, second);
    }

    #[test]
    fn test_configuration_is_stamped_onto_records() {
        let record = LineParser::new(9, 77).parse_line("7654321 10").unwrap();
        assert_eq!(record.exam_event_id, 9);
        assert_eq!(record.transaction_id, 77);
        assert_eq!(record.grade, 100);
    }

    #[test]
    fn test_parse_submission_preserves_order() {
        let outcomes = parser().parse_submission(vec!["1234567 8", "badline", "7654321 9,1"]);

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].as_ref().unwrap().grade, 80);
        assert_eq!(
            outcomes[1].as_ref().unwrap_err().missing,
            MissingField::Both
        );
        assert_eq!(outcomes[2].as_ref().unwrap().grade, 91);
    }

    #[rstest]
    #[case("10", 100)]
    #[case("7,7", 77)]
    #[case("8.5", 85)]
    #[case("8", 80)]
    #[case("1,0", 10)]
    #[case("9,9", 99)]
    fn test_convert_grade_token(#[case] token: &str, #[case] expected: Grade) {
        assert_eq!(convert_grade_token(token), Some(expected));
    }
}
