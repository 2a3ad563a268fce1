//! The questionnaire: questions, their options, and the reference bank.

use std::collections::HashSet;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::assessment::category::Category;
use crate::assessment::types::OptionId;
use crate::assessment::{AssessmentError, MAX_OPTION_SCORE};

/// A selectable answer to a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: OptionId,
    pub label: String,
    /// Score from 1 (worst) to 4 (best).
    pub score: u8,
}

impl AnswerOption {
    pub fn new(id: OptionId, label: impl Into<String>, score: u8) -> Self {
        Self {
            id,
            label: label.into(),
            score,
        }
    }
}

/// A single questionnaire question with four options ordered worst to best.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub prompt: String,
    pub category: Category,
    pub options: [AnswerOption; 4],
}

impl Question {
    /// Build a question whose labels are scored 1 to 4 in order (a..d).
    pub fn ranked(id: u32, category: Category, prompt: impl Into<String>, labels: [&str; 4]) -> Self {
        let [a, b, c, d] = labels;
        Self {
            id,
            prompt: prompt.into(),
            category,
            options: [
                AnswerOption::new(OptionId::A, a, 1),
                AnswerOption::new(OptionId::B, b, 2),
                AnswerOption::new(OptionId::C, c, 3),
                AnswerOption::new(OptionId::D, d, 4),
            ],
        }
    }

    pub fn option(&self, id: OptionId) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.id == id)
    }
}

/// An ordered, validated set of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Build a bank, checking ids and option scores.
    pub fn new(questions: Vec<Question>) -> Result<Self, AssessmentError> {
        if questions.is_empty() {
            return Err(AssessmentError::InvalidInput(
                "question bank must contain at least one question".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.id) {
                return Err(AssessmentError::InvalidInput(format!(
                    "duplicate question id {}",
                    question.id
                )));
            }

            let option_ids: HashSet<OptionId> = question.options.iter().map(|o| o.id).collect();
            if option_ids.len() != question.options.len() {
                return Err(AssessmentError::InvalidInput(format!(
                    "question {} has duplicate option ids",
                    question.id
                )));
            }

            if let Some(option) = question
                .options
                .iter()
                .find(|o| !(1..=MAX_OPTION_SCORE).contains(&o.score))
            {
                return Err(AssessmentError::InvalidInput(format!(
                    "question {} option '{}' has score {} outside 1-{}",
                    question.id, option.id, option.score, MAX_OPTION_SCORE
                )));
            }
        }

        Ok(Self { questions })
    }

    /// The reference questionnaire, built once per process.
    pub fn standard() -> &'static QuestionBank {
        static STANDARD: OnceLock<QuestionBank> = OnceLock::new();
        STANDARD.get_or_init(|| QuestionBank {
            questions: standard_questions(),
        })
    }

    pub fn get(&self, id: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Returns the reference question bank.
pub fn question_bank() -> &'static QuestionBank {
    QuestionBank::standard()
}

fn standard_questions() -> Vec<Question> {
    vec![
        Question::ranked(
            1,
            Category::Savings,
            "What share of your monthly income do you save?",
            ["0-10%", "10-20%", "20-30%", "More than 30%"],
        ),
        Question::ranked(
            2,
            Category::Risk,
            "How much investment risk are you willing to accept?",
            [
                "Very conservative, I avoid any risk",
                "Fairly conservative, I accept a little risk",
                "Moderate, I accept some risk for higher returns",
                "Aggressive, I accept high risk for high returns",
            ],
        ),
        Question::ranked(
            3,
            Category::Emergency,
            "Do you have an emergency fund that covers several months of living expenses?",
            [
                "No emergency fund",
                "Covers 1-3 months of expenses",
                "Covers 3-6 months of expenses",
                "Covers more than 6 months of expenses",
            ],
        ),
        Question::ranked(
            4,
            Category::Debt,
            "What share of your income goes to debt (credit cards, loans, etc.)?",
            ["More than 50%", "30-50%", "10-30%", "Under 10% or no debt"],
        ),
        Question::ranked(
            5,
            Category::Knowledge,
            "How would you rate your own financial knowledge?",
            [
                "Very low, I barely know any financial concepts",
                "Basic, I know a few fundamentals",
                "Intermediate, I understand most products and concepts",
                "Advanced, I know many products and investment strategies",
            ],
        ),
        Question::ranked(
            6,
            Category::Income,
            "How stable is your current income?",
            [
                "Very unstable, it swings a lot",
                "Some swings, but it covers living costs",
                "Fairly stable, with a fixed source",
                "Very stable and growing",
            ],
        ),
        Question::ranked(
            7,
            Category::Goals,
            "Do you have clear financial goals?",
            [
                "No financial goals at all",
                "Some vague ideas but no concrete plan",
                "Clear goals without a detailed plan",
                "Clear goals with a detailed plan",
            ],
        ),
        Question::ranked(
            8,
            Category::Tracking,
            "Do you regularly track your income and spending?",
            [
                "I never look at it",
                "I check my balance now and then",
                "I record the main income and expenses",
                "I record every transaction and review it regularly",
            ],
        ),
        Question::ranked(
            9,
            Category::Insurance,
            "Do you have insurance cover (health, accident, etc.)?",
            [
                "No insurance at all",
                "Only basic public health insurance",
                "Public cover plus one or two private policies",
                "A complete insurance plan",
            ],
        ),
        Question::ranked(
            10,
            Category::Pressure,
            "How do you usually handle sudden financial pressure?",
            [
                "Credit cards or borrowing",
                "Asking family or friends for help",
                "Dipping into savings or investments",
                "Using a dedicated emergency fund",
            ],
        ),
    ]
}
