//! Question categories and percentage color bands.

use serde::{Deserialize, Serialize};

/// One of the financial-behavior dimensions the questionnaire measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Savings,
    Risk,
    Emergency,
    Debt,
    Knowledge,
    Income,
    Goals,
    Tracking,
    Insurance,
    Pressure,
}

impl Category {
    /// Returns every category in questionnaire order.
    pub fn all() -> &'static [Category] {
        &[
            Category::Savings,
            Category::Risk,
            Category::Emergency,
            Category::Debt,
            Category::Knowledge,
            Category::Income,
            Category::Goals,
            Category::Tracking,
            Category::Insurance,
            Category::Pressure,
        ]
    }

    /// Categories that produce improvement advice when they score low.
    pub fn advised() -> &'static [Category] {
        &[
            Category::Savings,
            Category::Emergency,
            Category::Debt,
            Category::Knowledge,
            Category::Tracking,
            Category::Insurance,
        ]
    }

    /// Returns the human-readable name of this category.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Savings => "Saving Capacity",
            Self::Risk => "Risk Management",
            Self::Emergency => "Emergency Readiness",
            Self::Debt => "Debt Management",
            Self::Knowledge => "Financial Knowledge",
            Self::Income => "Income Stability",
            Self::Goals => "Financial Goals",
            Self::Tracking => "Spending Tracking",
            Self::Insurance => "Insurance Coverage",
            Self::Pressure => "Coping Ability",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Savings => write!(f, "savings"),
            Self::Risk => write!(f, "risk"),
            Self::Emergency => write!(f, "emergency"),
            Self::Debt => write!(f, "debt"),
            Self::Knowledge => write!(f, "knowledge"),
            Self::Income => write!(f, "income"),
            Self::Goals => write!(f, "goals"),
            Self::Tracking => write!(f, "tracking"),
            Self::Insurance => write!(f, "insurance"),
            Self::Pressure => write!(f, "pressure"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::all()
            .iter()
            .copied()
            .find(|c| c.to_string() == s.trim().to_lowercase())
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// Qualitative band for a category percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorBand {
    High,
    MidHigh,
    MidLow,
    Low,
}

impl ColorBand {
    /// Band for a percentage: >=75 high, >=50 mid-high, >=25 mid-low, else low.
    pub fn from_percentage(percentage: u8) -> Self {
        if percentage >= 75 {
            Self::High
        } else if percentage >= 50 {
            Self::MidHigh
        } else if percentage >= 25 {
            Self::MidLow
        } else {
            Self::Low
        }
    }

    /// Single-character gauge used in compact output.
    pub fn marker(&self) -> char {
        match self {
            Self::High => '+',
            Self::MidHigh => '=',
            Self::MidLow => '-',
            Self::Low => '!',
        }
    }
}

impl std::fmt::Display for ColorBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::MidHigh => write!(f, "mid-high"),
            Self::MidLow => write!(f, "mid-low"),
            Self::Low => write!(f, "low"),
        }
    }
}
