//! Scholarship eligibility and fee-reduction rules.
//!
//! Five programs are checked independently against a student's profile. Every match is
//! reported for audit, but only the single award with the largest amount reduces the
//! fee; awards never stack.

mod catalog;
mod domain;
mod policy;
mod rules;
mod validation;

#[cfg(test)]
mod tests;

pub use catalog::{catalog, ProgramDescriptor};
pub use domain::{FeeBasis, ScholarshipProgram, StudentEligibilityProfile};
pub use validation::EvaluationError;

use serde::{Deserialize, Serialize};

pub(crate) use validation::{validate_fee, validate_profile};

/// Stateless evaluator; safe to share across threads and reuse for whole rosters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScholarshipEvaluator;

impl ScholarshipEvaluator {
    pub const fn new() -> Self {
        Self
    }

    pub fn evaluate(
        &self,
        profile: &StudentEligibilityProfile,
        fee: FeeBasis,
    ) -> Result<EvaluationResult, EvaluationError> {
        validate_fee(&fee)?;
        validate_profile(profile)?;

        let eligible_awards = rules::eligible_awards(profile, fee);
        let recommended_award = policy::recommend(&eligible_awards).cloned();
        let total_savings = recommended_award
            .as_ref()
            .map(|award| award.amount)
            .unwrap_or(0.0);

        Ok(EvaluationResult {
            base_fee: fee.base_monthly_fee,
            eligible_awards,
            recommended_award,
            final_fee: fee.base_monthly_fee - total_savings,
            total_savings,
        })
    }
}

/// One program the profile qualifies for. `amount` is always
/// `base_fee * percentage / 100` for the fee the evaluation ran against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScholarshipAward {
    pub program: ScholarshipProgram,
    pub percentage: f64,
    pub amount: f64,
    pub reason: String,
}

/// Evaluation output: every match in evaluation order plus the award actually applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub base_fee: f64,
    pub eligible_awards: Vec<ScholarshipAward>,
    pub recommended_award: Option<ScholarshipAward>,
    pub final_fee: f64,
    pub total_savings: f64,
}

impl EvaluationResult {
    pub fn recommended_program(&self) -> Option<ScholarshipProgram> {
        self.recommended_award.as_ref().map(|award| award.program)
    }

    pub fn summary(&self) -> String {
        match &self.recommended_award {
            Some(award) => format!(
                "{} scholarship at {}% saves {:.2}; final fee {:.2}",
                award.program.label(),
                award.percentage,
                award.amount,
                self.final_fee
            ),
            None => format!("no scholarship applies; final fee {:.2}", self.final_fee),
        }
    }
}
