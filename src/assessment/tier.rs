//! Qualitative result tiers.

use serde::{Deserialize, Serialize};

/// One of five result bands, selected from the overall percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultTier {
    Master,
    Excellent,
    Steady,
    Growth,
    Starting,
}

/// Inclusive lower bounds, highest first. Anything below the last is `Starting`.
const THRESHOLDS: [(u8, ResultTier); 4] = [
    (85, ResultTier::Master),
    (70, ResultTier::Excellent),
    (55, ResultTier::Steady),
    (40, ResultTier::Growth),
];

impl ResultTier {
    pub fn all() -> &'static [ResultTier] {
        &[
            ResultTier::Master,
            ResultTier::Excellent,
            ResultTier::Steady,
            ResultTier::Growth,
            ResultTier::Starting,
        ]
    }

    /// Select the tier for an overall percentage of the maximum score.
    pub fn from_percentage(percentage: u8) -> Self {
        THRESHOLDS
            .iter()
            .find(|(min, _)| percentage >= *min)
            .map(|(_, tier)| *tier)
            .unwrap_or(ResultTier::Starting)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Master => "Financial Planning Master",
            Self::Excellent => "Excellent Financial Planner",
            Self::Steady => "Steady Financial Manager",
            Self::Growth => "Financial Growth Stage",
            Self::Starting => "Financial Starting Stage",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Master => {
                "You show outstanding financial management, with a sound financial system and \
                 excellent money habits. You not only understand financial concepts but apply them \
                 well. Consider more advanced investment strategies to optimise further, and you \
                 could even start guiding your family's finances."
            }
            Self::Excellent => {
                "You manage your finances very well, with good habits and solid knowledge. Your \
                 foundation is strong but there is still room to grow. Focus on optimising your \
                 portfolio and on long-term planning to reach greater financial freedom."
            }
            Self::Steady => {
                "You have a basic understanding of your finances and some planning in place, and \
                 you are on the right track. Strengthen your emergency fund, tighten your budget \
                 and consider diversifying your investments to improve your financial health."
            }
            Self::Growth => {
                "You have some foundation in managing money but need more attention and learning. \
                 Start with a systematic budget, control spending, build an emergency fund step \
                 by step and learn basic investing to move towards healthier finances."
            }
            Self::Starting => {
                "You may be facing some financial challenges, but don't worry: every expert \
                 started somewhere. Begin with a basic budget and a saving habit, pay down \
                 high-interest debt, seek professional advice and improve one step at a time."
            }
        }
    }

    /// Severity tag used by presentation to pick a color.
    pub fn severity(&self) -> &'static str {
        match self {
            Self::Master => "success",
            Self::Excellent => "primary",
            Self::Steady => "info",
            Self::Growth => "warning",
            Self::Starting => "secondary",
        }
    }
}

impl std::fmt::Display for ResultTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_inclusive_lower() {
        assert_eq!(ResultTier::from_percentage(100), ResultTier::Master);
        assert_eq!(ResultTier::from_percentage(85), ResultTier::Master);
        assert_eq!(ResultTier::from_percentage(84), ResultTier::Excellent);
        assert_eq!(ResultTier::from_percentage(70), ResultTier::Excellent);
        assert_eq!(ResultTier::from_percentage(69), ResultTier::Steady);
        assert_eq!(ResultTier::from_percentage(55), ResultTier::Steady);
        assert_eq!(ResultTier::from_percentage(54), ResultTier::Growth);
        assert_eq!(ResultTier::from_percentage(40), ResultTier::Growth);
        assert_eq!(ResultTier::from_percentage(39), ResultTier::Starting);
        assert_eq!(ResultTier::from_percentage(0), ResultTier::Starting);
    }

    #[test]
    fn every_tier_has_copy() {
        for tier in ResultTier::all() {
            assert!(!tier.title().is_empty());
            assert!(!tier.message().is_empty());
            assert!(!tier.severity().is_empty());
        }
        assert_eq!(ResultTier::Master.to_string(), "Financial Planning Master");
    }
}
