//! Shared test utilities for creating test fixtures.
//!
//! This module provides helper functions for creating question banks and
//! answer sets used across multiple test modules.

use crate::assessment::{
    compute_result, AnswerSet, AssessmentResult, Category, OptionId, Question, QuestionBank,
};

/// Create a bank of `count` questions, all in one category, scored 1-4 by option a-d.
pub fn uniform_bank(count: u32, category: Category) -> QuestionBank {
    mixed_bank(&[(category, count)])
}

/// Create a bank with the given number of questions per category, in order.
pub fn mixed_bank(layout: &[(Category, u32)]) -> QuestionBank {
    let mut questions = Vec::new();
    for (category, count) in layout {
        for _ in 0..*count {
            let id = questions.len() as u32 + 1;
            questions.push(Question::ranked(
                id,
                *category,
                format!("Question {}", id),
                ["worst", "poor", "good", "best"],
            ));
        }
    }
    QuestionBank::new(questions).expect("fixture bank is valid")
}

/// Answer every question in the bank with the same option.
pub fn answer_all(bank: &QuestionBank, option: OptionId) -> AnswerSet {
    let mut answers = AnswerSet::new();
    for question in bank.iter() {
        answers.record(bank, question.id, option).unwrap();
    }
    answers
}

/// Answer the first questions of the bank with the given scores (1-4), in order.
pub fn answers_with_scores(bank: &QuestionBank, scores: &[u8]) -> AnswerSet {
    let mut answers = AnswerSet::new();
    for (question, score) in bank.iter().zip(scores) {
        answers
            .record(bank, question.id, option_for_score(question, *score))
            .unwrap();
    }
    answers
}

/// Answer every question so the scores add up to `total`.
pub fn answers_summing_to(bank: &QuestionBank, total: u32) -> AnswerSet {
    let count = bank.len() as u32;
    assert!(
        (count..=count * 4).contains(&total),
        "total {} not reachable with {} questions",
        total,
        count
    );

    let mut remaining = total - count;
    let scores: Vec<u8> = (0..count)
        .map(|_| {
            let extra = remaining.min(3);
            remaining -= extra;
            1 + extra as u8
        })
        .collect();
    answers_with_scores(bank, &scores)
}

/// Score the reference bank with every question answered by `option`.
pub fn standard_result(option: OptionId) -> AssessmentResult {
    let bank = QuestionBank::standard();
    compute_result(&answer_all(bank, option), bank).unwrap()
}

fn option_for_score(question: &Question, score: u8) -> OptionId {
    question
        .options
        .iter()
        .find(|o| o.score == score)
        .map(|o| o.id)
        .unwrap_or_else(|| panic!("question {} has no option scored {}", question.id, score))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_bank() {
        let bank = mixed_bank(&[(Category::Savings, 2), (Category::Debt, 1)]);
        assert_eq!(bank.len(), 3);
        assert_eq!(bank.get(3).unwrap().category, Category::Debt);
    }

    #[test]
    fn test_answers_summing_to() {
        let bank = uniform_bank(25, Category::Goals);
        let answers = answers_summing_to(&bank, 69);
        assert_eq!(answers.len(), 25);
        assert_eq!(answers.iter().map(|a| a.score as u32).sum::<u32>(), 69);
    }
}
