//! Opening message of a coach conversation.

use crate::assessment::{AssessmentSnapshot, Category, ResultTier};

/// Welcome shown when no assessment is available.
pub const DEFAULT_WELCOME: &str = "Hi! I'm your AI money-mindset coach. I can answer your \
    financial questions, suggest ways to budget and save, or talk through building healthy \
    money habits. What can I help you with today?";

/// Focus areas suggested when the assessment carried no advice.
const DEFAULT_FOCUS: [&str; 2] = [
    "Build a steady budgeting habit",
    "Set up a realistic savings plan",
];

/// How many advice entries the greeting lists.
const FOCUS_COUNT: usize = 2;

/// Build the first assistant message, personalised when a snapshot exists.
pub fn greeting(snapshot: Option<&AssessmentSnapshot>) -> String {
    let Some(snapshot) = snapshot else {
        return DEFAULT_WELCOME.to_string();
    };

    let title = if snapshot.result_message.title.trim().is_empty() {
        ResultTier::Growth.title()
    } else {
        snapshot.result_message.title.as_str()
    };

    let mut message = format!(
        "Hi {}! Great to meet you. I can see you've completed the financial health \
         assessment, and your result is \"{}\".\n\n",
        snapshot.user_name, title
    );

    let strengths = snapshot.strengths();
    if !strengths.is_empty() {
        message.push_str(&format!("You're doing well in {}.\n\n", join_names(&strengths)));
    }

    let weaknesses = snapshot.weaknesses();
    if !weaknesses.is_empty() {
        message.push_str(&format!(
            "We can work together on improving {}.\n\n",
            join_names(&weaknesses)
        ));
    }

    message.push_str("Based on your results, I suggest we focus on:\n");
    let focus: Vec<String> = if snapshot.category_advice.is_empty() {
        DEFAULT_FOCUS.iter().map(|s| format!("- {}", s)).collect()
    } else {
        snapshot
            .category_advice
            .iter()
            .take(FOCUS_COUNT)
            .map(|s| format!("- {}", s))
            .collect()
    };
    message.push_str(&focus.join("\n"));
    message.push_str(
        "\n\nIs there a specific financial question on your mind, or an area you'd like \
         help planning?",
    );

    message
}

fn join_names(categories: &[Category]) -> String {
    categories
        .iter()
        .map(|c| c.name())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::advice::advice_for;
    use crate::assessment::{compute_result, question_bank, OptionId};
    use crate::test_utils::{answers_with_scores, standard_result};

    #[test]
    fn generic_welcome_without_snapshot() {
        assert_eq!(greeting(None), DEFAULT_WELCOME);
    }

    #[test]
    fn names_user_and_tier() {
        let snapshot = AssessmentSnapshot::from_result(&standard_result(OptionId::D), Some("Mei"));
        let text = greeting(Some(&snapshot));

        assert!(text.starts_with("Hi Mei!"));
        assert!(text.contains("\"Financial Planning Master\""));
        assert!(text.contains("You're doing well in Saving Capacity, Risk Management"));
        assert!(!text.contains("We can work together"));
    }

    #[test]
    fn lists_first_two_advice_entries() {
        let snapshot = AssessmentSnapshot::from_result(&standard_result(OptionId::A), None);
        let text = greeting(Some(&snapshot));

        assert!(text.contains("We can work together on improving Saving Capacity"));
        assert!(text.contains(advice_for(Category::Savings).unwrap()));
        assert!(text.contains(advice_for(Category::Emergency).unwrap()));
        assert!(!text.contains(advice_for(Category::Debt).unwrap()));
    }

    #[test]
    fn middle_scores_are_neither_strength_nor_weakness() {
        let bank = question_bank();
        let answers = answers_with_scores(bank, &[2, 2]);
        let result = compute_result(&answers, bank).unwrap();
        let snapshot = AssessmentSnapshot::from_result(&result, None);
        let text = greeting(Some(&snapshot));

        assert!(!text.contains("doing well"));
        assert!(!text.contains("work together"));
    }

    #[test]
    fn falls_back_when_snapshot_has_no_advice() {
        let mut snapshot = AssessmentSnapshot::from_result(&standard_result(OptionId::C), None);
        snapshot.category_advice.clear();
        snapshot.result_message.title.clear();
        let text = greeting(Some(&snapshot));

        assert!(text.contains("- Build a steady budgeting habit"));
        assert!(text.contains("\"Financial Growth Stage\""));
    }
}
