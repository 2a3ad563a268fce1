//! Core types for answers and assessment results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::assessment::bank::QuestionBank;
use crate::assessment::category::Category;
use crate::assessment::tier::ResultTier;
use crate::assessment::AssessmentError;

/// Identifier of an option within a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionId {
    A,
    B,
    C,
    D,
}

impl OptionId {
    /// All option ids in ordinal order.
    pub fn all() -> &'static [OptionId; 4] {
        &[OptionId::A, OptionId::B, OptionId::C, OptionId::D]
    }
}

impl std::fmt::Display for OptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "a"),
            Self::B => write!(f, "b"),
            Self::C => write!(f, "c"),
            Self::D => write!(f, "d"),
        }
    }
}

impl std::str::FromStr for OptionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a" => Ok(Self::A),
            "b" => Ok(Self::B),
            "c" => Ok(Self::C),
            "d" => Ok(Self::D),
            _ => Err(format!("Unknown option: '{}'. Valid options: a, b, c, d", s)),
        }
    }
}

/// A respondent's answer to a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: u32,
    pub option_id: OptionId,
    /// Score of the chosen option (1-4).
    pub score: u8,
    pub category: Category,
}

/// All answers collected in one assessment session, keyed by question id.
///
/// Answering a question again replaces the earlier answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    answers: BTreeMap<u32, Answer>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the chosen option for a question, replacing any previous answer.
    pub fn record(
        &mut self,
        bank: &QuestionBank,
        question_id: u32,
        option_id: OptionId,
    ) -> Result<&Answer, AssessmentError> {
        let question = bank.get(question_id).ok_or_else(|| {
            AssessmentError::InvalidInput(format!("unknown question {}", question_id))
        })?;
        let option = question.option(option_id).ok_or_else(|| {
            AssessmentError::InvalidInput(format!(
                "question {} has no option '{}'",
                question_id, option_id
            ))
        })?;

        let answer = Answer {
            question_id,
            option_id,
            score: option.score,
            category: question.category,
        };
        self.answers.insert(question_id, answer);
        Ok(&self.answers[&question_id])
    }

    pub fn get(&self, question_id: u32) -> Option<&Answer> {
        self.answers.get(&question_id)
    }

    /// Answers in question id order.
    pub fn iter(&self) -> impl Iterator<Item = &Answer> {
        self.answers.values()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// True once every question in the bank has an answer.
    pub fn is_complete(&self, bank: &QuestionBank) -> bool {
        bank.iter().all(|q| self.answers.contains_key(&q.id))
    }

    /// Check that every answer is exactly what recording it against `bank`
    /// would have produced.
    ///
    /// Sets loaded from storage carry their own scores and categories; this
    /// rejects any that were edited or built against a different bank.
    pub fn verify(&self, bank: &QuestionBank) -> Result<(), AssessmentError> {
        for (key, answer) in &self.answers {
            if *key != answer.question_id {
                return Err(AssessmentError::InvalidInput(format!(
                    "answer stored under question {} claims question {}",
                    key, answer.question_id
                )));
            }
            let question = bank.get(answer.question_id).ok_or_else(|| {
                AssessmentError::InvalidInput(format!(
                    "answer for question {} is not in the question bank",
                    answer.question_id
                ))
            })?;
            let option = question.option(answer.option_id).ok_or_else(|| {
                AssessmentError::InvalidInput(format!(
                    "question {} has no option '{}'",
                    answer.question_id, answer.option_id
                ))
            })?;
            if option.score != answer.score || question.category != answer.category {
                return Err(AssessmentError::InvalidInput(format!(
                    "answer for question {} does not match option '{}' (score {}, {})",
                    answer.question_id, answer.option_id, option.score, question.category
                )));
            }
        }
        Ok(())
    }
}

/// Outcome of scoring an [`AnswerSet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResult {
    /// Sum of the scores of all answers.
    pub total_score: u32,
    /// Four points per answered question.
    pub max_score: u32,
    /// Percentage per category present in the answers (0-100).
    pub category_percentages: BTreeMap<Category, u8>,
    pub tier: ResultTier,
    /// Improvement advice, never empty.
    pub advice: Vec<String>,
}

impl AssessmentResult {
    /// Overall percentage of the maximum score, rounded half up.
    pub fn percentage(&self) -> u8 {
        crate::assessment::scoring::round_percentage(self.total_score, self.max_score)
    }
}
