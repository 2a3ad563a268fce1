//! Financial self-assessment scoring.
//!
//! This module owns the question bank and turns a respondent's answers into
//! per-category percentages, a qualitative tier and improvement advice.
//! Everything here is pure: callers hold the [`AnswerSet`] and pass it in.

pub mod advice;
pub mod bank;
pub mod category;
pub mod report;
pub mod scoring;
pub mod snapshot;
pub mod tier;
pub mod types;

pub use bank::{question_bank, AnswerOption, Question, QuestionBank};
pub use category::{Category, ColorBand};
pub use scoring::{compute_result, record_answer};
pub use snapshot::{AssessmentSnapshot, ResultMessage, ASSESSMENT_RESULTS_KEY};
pub use tier::ResultTier;
pub use types::{Answer, AnswerSet, AssessmentResult, OptionId};

/// Highest score a single option can carry.
pub const MAX_OPTION_SCORE: u8 = 4;

/// Errors that can occur while recording answers or computing a result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssessmentError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Cannot compute a result without any answers")]
    EmptyInput,
}
