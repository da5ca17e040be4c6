use serde::{Deserialize, Serialize};
use std::fmt;

/// Financial, academic and household facts a scholarship decision is allowed to use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StudentEligibilityProfile {
    pub family_annual_income: f64,
    pub academic_score_percent: f64,
    pub attendance_percent: f64,
    pub has_sibling_enrolled: bool,
    pub is_single_parent_household: bool,
    pub has_sports_achievement: bool,
}

/// Undiscounted monthly transport fee the awards are computed against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeBasis {
    pub base_monthly_fee: f64,
}

impl FeeBasis {
    pub const fn monthly(base_monthly_fee: f64) -> Self {
        Self { base_monthly_fee }
    }
}

/// Scholarship programs, declared in the order they are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScholarshipProgram {
    Merit,
    NeedBased,
    Sports,
    Sibling,
    SingleParent,
}

impl ScholarshipProgram {
    pub const ALL: [Self; 5] = [
        Self::Merit,
        Self::NeedBased,
        Self::Sports,
        Self::Sibling,
        Self::SingleParent,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Merit => "Merit",
            Self::NeedBased => "Need-based",
            Self::Sports => "Sports",
            Self::Sibling => "Sibling",
            Self::SingleParent => "Single Parent",
        }
    }
}

impl fmt::Display for ScholarshipProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
