use super::domain::ScholarshipProgram;
use super::rules::{
    MERIT_MAX_INCOME, NEED_BASED_MAX_INCOME, SIBLING_MAX_INCOME, SIBLING_PERCENTAGE,
    SINGLE_PARENT_MAX_INCOME, SPORTS_MAX_INCOME,
};
use serde::Serialize;

/// Published description of a program for administrators and fee notices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramDescriptor {
    pub program: ScholarshipProgram,
    pub label: &'static str,
    pub description: &'static str,
    pub criteria: &'static str,
    pub percentage_range: (f64, f64),
    pub max_income: f64,
}

impl ScholarshipProgram {
    pub fn descriptor(self) -> ProgramDescriptor {
        let (description, criteria, percentage_range, max_income) = match self {
            Self::Merit => (
                "Academic excellence scholarship",
                "Academic score >= 90%",
                (20.0, 30.0),
                MERIT_MAX_INCOME,
            ),
            Self::NeedBased => (
                "Financial assistance for low-income families",
                "Family income <= 30,000",
                (30.0, 50.0),
                NEED_BASED_MAX_INCOME,
            ),
            Self::Sports => (
                "Athletic achievement scholarship",
                "Sports achievement + attendance >= 95%",
                (30.0, 40.0),
                SPORTS_MAX_INCOME,
            ),
            Self::Sibling => (
                "Multiple children from same family",
                "Sibling enrolled in the transport service",
                (SIBLING_PERCENTAGE, SIBLING_PERCENTAGE),
                SIBLING_MAX_INCOME,
            ),
            Self::SingleParent => (
                "Support for single-parent families",
                "Single parent household",
                (20.0, 35.0),
                SINGLE_PARENT_MAX_INCOME,
            ),
        };

        ProgramDescriptor {
            program: self,
            label: self.label(),
            description,
            criteria,
            percentage_range,
            max_income,
        }
    }
}

pub fn catalog() -> Vec<ProgramDescriptor> {
    ScholarshipProgram::ALL
        .into_iter()
        .map(ScholarshipProgram::descriptor)
        .collect()
}
