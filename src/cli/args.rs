use crate::core::CommitPolicy;
use crate::types::{ExamEventId, TransactionId};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Ingest exam result submissions as atomic transactions
#[derive(Parser, Debug)]
#[command(name = "exam-results-engine")]
#[command(about = "Ingest exam result submissions as atomic transactions", long_about = None)]
pub struct CliArgs {
    /// Input file path containing one result line per student
    #[arg(value_name = "INPUT", help = "Path to the submission file")]
    pub input_file: PathBuf,

    /// Exam event the submission belongs to
    #[arg(
        long = "exam-event",
        value_name = "ID",
        help = "Identifier of the exam event in the exam-events relation"
    )]
    pub exam_event: ExamEventId,

    /// Transaction identifier allocated for this submission
    #[arg(
        long = "transaction",
        value_name = "ID",
        help = "Identifier of the caller's open transaction"
    )]
    pub transaction: TransactionId,

    /// Atomicity policy for submissions mixing valid and invalid lines
    #[arg(
        long = "policy",
        value_name = "POLICY",
        default_value = "strict",
        help = "Commit policy: 'strict' for all-or-nothing or 'best-effort' to commit valid rows"
    )]
    pub policy: PolicyType,
}

/// Available commit policies for a submission
#[derive(Clone, Debug, ValueEnum)]
pub enum PolicyType {
    Strict,
    BestEffort,
}

impl From<PolicyType> for CommitPolicy {
    fn from(policy: PolicyType) -> Self {
        match policy {
            PolicyType::Strict => CommitPolicy::Strict,
            PolicyType::BestEffort => CommitPolicy::BestEffort,
        }
    }
}
