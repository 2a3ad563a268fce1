//! Answer recording and result computation.

use std::collections::BTreeMap;

use log::debug;

use crate::assessment::advice::generate_advice;
use crate::assessment::bank::QuestionBank;
use crate::assessment::category::Category;
use crate::assessment::tier::ResultTier;
use crate::assessment::types::{AnswerSet, AssessmentResult, OptionId};
use crate::assessment::{AssessmentError, MAX_OPTION_SCORE};

/// Record an answer and return the updated set.
///
/// Recording the same question again replaces the earlier answer, so calling
/// this twice with the same arguments yields the same set.
pub fn record_answer(
    mut answers: AnswerSet,
    bank: &QuestionBank,
    question_id: u32,
    option_id: OptionId,
) -> Result<AnswerSet, AssessmentError> {
    answers.record(bank, question_id, option_id)?;
    Ok(answers)
}

/// Score an answer set against the bank it was built from.
///
/// Every answer must match what the bank would record for it, so each
/// question counts once and the total never exceeds the maximum.
///
/// Maxima count only answered questions, so a partially completed
/// questionnaire still yields percentages relative to what was answered.
pub fn compute_result(
    answers: &AnswerSet,
    bank: &QuestionBank,
) -> Result<AssessmentResult, AssessmentError> {
    if answers.is_empty() {
        return Err(AssessmentError::EmptyInput);
    }

    answers.verify(bank)?;

    let total_score: u32 = answers.iter().map(|a| a.score as u32).sum();
    let max_score = MAX_OPTION_SCORE as u32 * answers.len() as u32;

    // (sum, count) per category
    let mut sums: BTreeMap<Category, (u32, u32)> = BTreeMap::new();
    for answer in answers.iter() {
        let entry = sums.entry(answer.category).or_insert((0, 0));
        entry.0 += answer.score as u32;
        entry.1 += 1;
    }

    let category_percentages: BTreeMap<Category, u8> = sums
        .into_iter()
        .map(|(category, (sum, count))| {
            let max = MAX_OPTION_SCORE as u32 * count;
            (category, round_percentage(sum, max))
        })
        .collect();

    let percentage = round_percentage(total_score, max_score);
    let tier = ResultTier::from_percentage(percentage);
    let advice = generate_advice(&category_percentages);

    debug!(
        "Scored {} answers: {}/{} ({}%) -> {}",
        answers.len(),
        total_score,
        max_score,
        percentage,
        tier.title()
    );

    Ok(AssessmentResult {
        total_score,
        max_score,
        category_percentages,
        tier,
        advice,
    })
}

/// `100 * value / max`, rounded half up and clamped to 0-100. Zero max yields 0.
pub fn round_percentage(value: u32, max: u32) -> u8 {
    if max == 0 {
        return 0;
    }
    let value = value.min(max) as u64;
    let max = max as u64;
    ((200 * value + max) / (2 * max)) as u8
}
