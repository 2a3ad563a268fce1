//! Assessment snapshots handed from the questionnaire to the coach.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::assessment::category::Category;
use crate::assessment::tier::ResultTier;
use crate::assessment::types::AssessmentResult;
use crate::store::{load_json, save_json, SessionStore, StoreError};

/// Store key under which the latest snapshot is kept.
pub const ASSESSMENT_RESULTS_KEY: &str = "assessment_results";

/// Name used when the respondent gave none.
pub const DEFAULT_USER_NAME: &str = "User";

/// Categories at or above this percentage count as strengths.
pub const STRENGTH_THRESHOLD: u8 = 70;

/// Categories at or below this percentage count as weaknesses.
pub const WEAKNESS_THRESHOLD: u8 = 40;

/// Tier title, message and severity tag as shown to the respondent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultMessage {
    pub title: String,
    pub message: String,
    pub color: String,
}

impl From<ResultTier> for ResultMessage {
    fn from(tier: ResultTier) -> Self {
        Self {
            title: tier.title().to_string(),
            message: tier.message().to_string(),
            color: tier.severity().to_string(),
        }
    }
}

/// Everything the coach needs to know about a finished assessment.
///
/// Field names follow the coach service's camelCase JSON contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSnapshot {
    pub score: u32,
    pub max_score: u32,
    pub category_scores: BTreeMap<Category, u8>,
    pub result_message: ResultMessage,
    pub category_advice: Vec<String>,
    pub user_name: String,
    /// Timestamp of completion (RFC 3339 format).
    pub completed_at: String,
}

impl AssessmentSnapshot {
    /// Capture a result, defaulting a missing or blank name.
    pub fn from_result(result: &AssessmentResult, user_name: Option<&str>) -> Self {
        Self {
            score: result.total_score,
            max_score: result.max_score,
            category_scores: result.category_percentages.clone(),
            result_message: result.tier.into(),
            category_advice: result.advice.clone(),
            user_name: display_name(user_name).to_string(),
            completed_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Overall percentage of the maximum score.
    pub fn percentage(&self) -> u8 {
        crate::assessment::scoring::round_percentage(self.score, self.max_score)
    }

    /// Categories scoring at or above 70%, in category order.
    pub fn strengths(&self) -> Vec<Category> {
        self.category_scores
            .iter()
            .filter(|(_, p)| **p >= STRENGTH_THRESHOLD)
            .map(|(c, _)| *c)
            .collect()
    }

    /// Categories scoring at or below 40%, in category order.
    pub fn weaknesses(&self) -> Vec<Category> {
        self.category_scores
            .iter()
            .filter(|(_, p)| **p <= WEAKNESS_THRESHOLD)
            .map(|(c, _)| *c)
            .collect()
    }
}

/// Trimmed name, or the default label when missing or blank.
pub fn display_name(user_name: Option<&str>) -> &str {
    user_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_USER_NAME)
}

/// Persist a snapshot as the latest assessment.
pub fn save_snapshot<S: SessionStore + ?Sized>(
    store: &S,
    snapshot: &AssessmentSnapshot,
) -> Result<(), StoreError> {
    save_json(store, ASSESSMENT_RESULTS_KEY, snapshot)
}

/// Load the latest assessment, if one was saved.
pub fn load_snapshot<S: SessionStore + ?Sized>(
    store: &S,
) -> Result<Option<AssessmentSnapshot>, StoreError> {
    load_json(store, ASSESSMENT_RESULTS_KEY)
}

/// Forget the latest assessment.
pub fn clear_snapshot<S: SessionStore + ?Sized>(store: &S) -> Result<(), StoreError> {
    store.remove(ASSESSMENT_RESULTS_KEY)
}
