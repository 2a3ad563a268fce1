//! Improvement advice for low-scoring categories.

use std::collections::BTreeMap;

use crate::assessment::category::Category;

/// Categories scoring below this percentage receive advice.
pub const ADVICE_THRESHOLD: u8 = 50;

/// Returned alone when no category needs advice.
pub const FALLBACK_ADVICE: &str =
    "Keep up your good financial habits and review your goals and plans regularly.";

/// Advice bound to a category, if that category is one we advise on.
pub fn advice_for(category: Category) -> Option<&'static str> {
    match category {
        Category::Savings => Some(
            "Raise your savings rate: try the 50/30/20 rule, putting 50% of income toward \
             needs, 30% toward wants and 20% toward savings.",
        ),
        Category::Emergency => Some(
            "Build an emergency fund: aim to cover at least 3-6 months of basic living \
             expenses and keep it in an easily accessible account.",
        ),
        Category::Debt => Some(
            "Manage your debt: pay off high-interest debt such as credit cards first, and \
             consider consolidating to lower your interest rate.",
        ),
        Category::Knowledge => Some(
            "Grow your financial knowledge: read personal finance books, take a money \
             management course and follow reliable financial media.",
        ),
        Category::Tracking => Some(
            "Track your income and spending: use a budgeting app or spreadsheet to record \
             every inflow and outflow so you know where your money goes.",
        ),
        Category::Insurance => Some(
            "Complete your insurance plan: make sure you have adequate health, accident and \
             life cover as a safety net for you and your family.",
        ),
        _ => None,
    }
}

/// Collect advice for every advised category present below the threshold.
///
/// Categories missing from `percentages` are not treated as failing. Never
/// returns an empty list.
pub fn generate_advice(percentages: &BTreeMap<Category, u8>) -> Vec<String> {
    let advice: Vec<String> = Category::advised()
        .iter()
        .filter(|category| {
            percentages
                .get(*category)
                .is_some_and(|p| *p < ADVICE_THRESHOLD)
        })
        .filter_map(|category| advice_for(*category))
        .map(str::to_string)
        .collect();

    if advice.is_empty() {
        vec![FALLBACK_ADVICE.to_string()]
    } else {
        advice
    }
}
