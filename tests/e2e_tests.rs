//! End-to-end integration tests
//!
//! These tests validate the complete ingest pipeline: a submission file is
//! written to disk, read back line by line, parsed, and committed against
//! the in-memory backend. Assertions cover the committed row set
//! (set-equality only; row order within a batch is unspecified), the
//! reported failures, the transaction end state, and the exactly-once
//! finalize guarantee.

#[cfg(test)]
mod tests {
    use exam_results_engine::core::{
        BackendState, BatchCommitter, CommitPolicy, Faults, MemoryStore, Outcome,
        TransactionState,
    };
    use exam_results_engine::io::{read_submission, write_rows_csv, LineParser};
    use exam_results_engine::types::{CommitError, IngestError, MissingField, ResultRecord};
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const EVENT: u32 = 5;
    const TX: u64 = 42;

    /// Write a submission file and run the full pipeline against a backend
    /// with the given faults
    fn run_submission(
        lines: &[&str],
        policy: CommitPolicy,
        faults: Faults,
    ) -> (MemoryStore, Result<Outcome, CommitError>) {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        for line in lines {
            writeln!(file, "{}", line).expect("Failed to write submission line");
        }
        file.flush().expect("Failed to flush temp file");

        let raw = read_submission(file.path()).expect("Failed to read submission");
        let parser = LineParser::new(EVENT, TX);
        let parsed = parser.parse_submission(raw.iter().map(String::as_str));

        let backend = MemoryStore::with_faults(faults);
        let (mut staging, handle) = backend.begin(TX);
        let result = BatchCommitter::new(policy).insert_grades(parsed, &mut staging, handle);
        (backend, result)
    }

    fn sorted_rows(backend: &MemoryStore) -> Vec<ResultRecord> {
        let mut rows = backend.rows();
        rows.sort_by_key(|row| row.student_id);
        rows
    }

    #[rstest]
    #[case::strict(CommitPolicy::Strict)]
    #[case::best_effort(CommitPolicy::BestEffort)]
    fn test_valid_submission_commits_both_rows(#[case] policy: CommitPolicy) {
        let (backend, result) = run_submission(
            &["1234567  A  B  7,7", "7654321 name 9"],
            policy,
            Faults::default(),
        );

        let outcome = result.unwrap();
        assert!(outcome.is_clean());
        assert_eq!(outcome.rows_committed, 2);
        assert_eq!(outcome.state, TransactionState::Committed);

        assert_eq!(
            sorted_rows(&backend),
            vec![
                ResultRecord {
                    student_id: 1234567,
                    exam_event_id: EVENT,
                    grade: 77,
                    transaction_id: TX,
                },
                ResultRecord {
                    student_id: 7654321,
                    exam_event_id: EVENT,
                    grade: 90,
                    transaction_id: TX,
                },
            ]
        );
        assert_eq!(backend.finalize_calls(), 1);
    }

    #[test]
    fn test_strict_submission_with_bad_line_commits_nothing() {
        let (backend, result) = run_submission(
            &["1234567 8", "badline"],
            CommitPolicy::Strict,
            Faults::default(),
        );

        let outcome = result.unwrap();
        assert_eq!(outcome.rows_committed, 0);
        assert_eq!(outcome.state, TransactionState::Aborted);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].line, "badline");
        assert_eq!(outcome.failures[0].missing, MissingField::Both);

        assert!(backend.rows().is_empty());
        assert_eq!(backend.state(), BackendState::Aborted);
        assert_eq!(backend.finalize_calls(), 1);
    }

    #[test]
    fn test_best_effort_submission_with_bad_line_commits_the_rest() {
        let (backend, result) = run_submission(
            &["1234567 8", "badline"],
            CommitPolicy::BestEffort,
            Faults::default(),
        );

        let outcome = result.unwrap();
        assert_eq!(outcome.rows_committed, 1);
        assert_eq!(outcome.state, TransactionState::Committed);
        assert_eq!(outcome.failures.len(), 1);

        let rows = backend.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].student_id, 1234567);
        assert_eq!(rows[0].grade, 80);
        assert_eq!(backend.finalize_calls(), 1);
    }

    #[rstest]
    #[case::strict(CommitPolicy::Strict)]
    #[case::best_effort(CommitPolicy::BestEffort)]
    fn test_staging_failure_leaves_zero_rows_visible(#[case] policy: CommitPolicy) {
        let (backend, result) = run_submission(
            &["1111111 6", "2222222 7", "3333333 8"],
            policy,
            Faults {
                fail_stage_at: Some(1),
                ..Faults::default()
            },
        );

        assert!(matches!(
            result.unwrap_err(),
            CommitError::Staging { staged: 1, .. }
        ));
        assert!(backend.rows().is_empty());
        assert_eq!(backend.state(), BackendState::Aborted);
        assert_eq!(backend.finalize_calls(), 1);
    }

    #[test]
    fn test_commit_failure_surfaces_as_finalize_error() {
        let (backend, result) = run_submission(
            &["1234567 10"],
            CommitPolicy::Strict,
            Faults {
                fail_commit: true,
                ..Faults::default()
            },
        );

        let error = result.unwrap_err();
        assert!(error.is_finalize_failure());
        assert!(backend.rows().is_empty());
        assert_eq!(backend.finalize_calls(), 1);
    }

    #[test]
    fn test_committed_rows_serialize_to_csv_report() {
        let (backend, result) = run_submission(
            &["7654321 9", "1234567 7,7"],
            CommitPolicy::Strict,
            Faults::default(),
        );
        result.unwrap();

        let mut output = Vec::new();
        write_rows_csv(&backend.rows(), &mut output).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "student_id,exam_event_id,grade,transaction_id\n\
             1234567,5,77,42\n\
             7654321,5,90,42\n"
        );
    }

    #[test]
    fn test_missing_submission_file_is_fatal() {
        let error = read_submission(std::path::Path::new("tests/no_such_submission.txt"))
            .unwrap_err();
        assert!(matches!(error, IngestError::FileNotFound { .. }));
    }
}
