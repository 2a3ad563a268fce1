//! End-to-end scoring through the public API using the reference question bank.

use fincoach::assessment::advice::{advice_for, FALLBACK_ADVICE};
use fincoach::assessment::report::{format_result, OutputFormat};
use fincoach::assessment::snapshot::{load_snapshot, save_snapshot};
use fincoach::assessment::{
    compute_result, question_bank, record_answer, AnswerSet, AssessmentError, AssessmentSnapshot,
    Category, OptionId, ResultTier,
};
use fincoach::store::{FileStore, MemoryStore};

fn answer_everything(option: OptionId) -> AnswerSet {
    let bank = question_bank();
    bank.iter().fold(AnswerSet::new(), |answers, question| {
        record_answer(answers, bank, question.id, option).unwrap()
    })
}

#[test]
fn all_best_answers_reach_the_top_tier() {
    let bank = question_bank();
    let result = compute_result(&answer_everything(OptionId::D), bank).unwrap();

    assert_eq!(result.total_score, 40);
    assert_eq!(result.max_score, 40);
    assert_eq!(result.percentage(), 100);
    assert_eq!(result.tier, ResultTier::Master);
    assert_eq!(result.category_percentages.len(), Category::all().len());
    assert!(result.category_percentages.values().all(|p| *p == 100));
    assert_eq!(result.advice, vec![FALLBACK_ADVICE.to_string()]);
}

#[test]
fn all_worst_answers_get_every_piece_of_advice() {
    let bank = question_bank();
    let result = compute_result(&answer_everything(OptionId::A), bank).unwrap();

    assert_eq!(result.total_score, 10);
    assert_eq!(result.max_score, 40);
    assert_eq!(result.percentage(), 25);
    assert_eq!(result.tier, ResultTier::Starting);
    assert!(result.category_percentages.values().all(|p| *p == 25));

    let expected: Vec<String> = [
        Category::Savings,
        Category::Emergency,
        Category::Debt,
        Category::Knowledge,
        Category::Tracking,
        Category::Insurance,
    ]
    .iter()
    .map(|c| advice_for(*c).unwrap().to_string())
    .collect();
    assert_eq!(result.advice, expected);
}

#[test]
fn changing_an_answer_replaces_it() {
    let bank = question_bank();
    let answers = record_answer(AnswerSet::new(), bank, 1, OptionId::A).unwrap();
    let answers = record_answer(answers, bank, 1, OptionId::D).unwrap();

    let result = compute_result(&answers, bank).unwrap();
    assert_eq!(result.total_score, 4);
    assert_eq!(result.max_score, 4);
    assert_eq!(result.category_percentages.get(&Category::Savings), Some(&100));
}

#[test]
fn partial_answers_score_against_answered_questions() {
    let bank = question_bank();
    let answers = [(1, OptionId::B), (2, OptionId::C), (4, OptionId::A)]
        .into_iter()
        .fold(AnswerSet::new(), |answers, (q, o)| {
            record_answer(answers, bank, q, o).unwrap()
        });

    let result = compute_result(&answers, bank).unwrap();
    assert_eq!(result.total_score, 6);
    assert_eq!(result.max_score, 12);
    assert_eq!(result.percentage(), 50);
    assert_eq!(result.tier, ResultTier::Growth);
    assert!(!result.category_percentages.contains_key(&Category::Emergency));
    assert_eq!(result.category_percentages.get(&Category::Debt), Some(&25));
}

#[test]
fn empty_and_invalid_input_are_rejected() {
    let bank = question_bank();
    assert_eq!(
        compute_result(&AnswerSet::new(), bank),
        Err(AssessmentError::EmptyInput)
    );
    assert!(matches!(
        record_answer(AnswerSet::new(), bank, 0, OptionId::A),
        Err(AssessmentError::InvalidInput(_))
    ));
}

#[test]
fn snapshot_survives_a_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let result = compute_result(&answer_everything(OptionId::C), question_bank()).unwrap();
    let snapshot = AssessmentSnapshot::from_result(&result, Some("  Kim "));

    save_snapshot(&FileStore::new(dir.path()), &snapshot).unwrap();
    let loaded = load_snapshot(&FileStore::new(dir.path())).unwrap().unwrap();

    assert_eq!(loaded, snapshot);
    assert_eq!(loaded.user_name, "Kim");
    assert_eq!(loaded.result_message.title, result.tier.title());
}

#[test]
fn snapshot_json_uses_service_field_names() {
    let result = compute_result(&answer_everything(OptionId::B), question_bank()).unwrap();
    let snapshot = AssessmentSnapshot::from_result(&result, None);
    let store = MemoryStore::new();
    save_snapshot(&store, &snapshot).unwrap();

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["score"], 20);
    assert_eq!(json["maxScore"], 40);
    assert_eq!(json["categoryScores"]["savings"], 50);
    assert_eq!(json["userName"], "User");
    assert!(json["resultMessage"]["title"].is_string());
    assert!(json["categoryAdvice"].is_array());
    assert!(json["completedAt"].is_string());
}

#[test]
fn reports_render_in_every_format() {
    let result = compute_result(&answer_everything(OptionId::A), question_bank()).unwrap();

    let pretty = format_result(&result, Some("Ana"), OutputFormat::Pretty);
    assert!(pretty.contains("Assessment for Ana"));
    assert!(pretty.contains("Total Score: 10 / 40 (25%)"));

    let json: serde_json::Value =
        serde_json::from_str(&format_result(&result, None, OutputFormat::Json)).unwrap();
    assert_eq!(json["percentage"], 25);

    let compact = format_result(&result, None, OutputFormat::Compact);
    assert!(compact.starts_with("10/40 (25%) Financial Starting Stage"));

    let markdown = format_result(&result, None, OutputFormat::Markdown);
    assert!(markdown.contains('|'));
}
