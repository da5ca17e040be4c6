use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::ledger::{BillingPeriod, FeeRecord, LateFeePolicy};
use super::roster::{EnrolledStudent, RosterError, StudentId, StudentRoster};
use super::scholarships::{
    catalog, EvaluationError, EvaluationResult, FeeBasis, ProgramDescriptor,
    ScholarshipEvaluator, StudentEligibilityProfile,
};
use super::summary::{FeeAssessment, FeeSummary};
use crate::config::FeeConfig;

/// Ad-hoc calculator input as submitted by the fee dashboard. Missing numbers read as
/// zero and missing flags as false; a missing base fee falls back to the configured one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationRequest {
    pub family_income: f64,
    pub academic_score: f64,
    pub attendance_percentage: f64,
    pub has_sibling: bool,
    pub is_single_parent: bool,
    pub has_sports_achievement: bool,
    pub base_fee: Option<f64>,
}

impl CalculationRequest {
    pub fn profile(&self) -> StudentEligibilityProfile {
        StudentEligibilityProfile {
            family_annual_income: self.family_income,
            academic_score_percent: self.academic_score,
            attendance_percent: self.attendance_percentage,
            has_sibling_enrolled: self.has_sibling,
            is_single_parent_household: self.is_single_parent,
            has_sports_achievement: self.has_sports_achievement,
        }
    }
}

/// Service composing the roster, the scholarship evaluator and billing defaults.
pub struct FeeService<R> {
    roster: Arc<R>,
    evaluator: ScholarshipEvaluator,
    config: FeeConfig,
}

impl<R> FeeService<R>
where
    R: StudentRoster + 'static,
{
    pub fn new(roster: Arc<R>, config: FeeConfig) -> Self {
        Self {
            roster,
            evaluator: ScholarshipEvaluator::new(),
            config,
        }
    }

    pub fn config(&self) -> &FeeConfig {
        &self.config
    }

    pub fn late_fee_policy(&self) -> LateFeePolicy {
        LateFeePolicy {
            per_day: self.config.late_fee_per_day,
            max: self.config.max_late_fee,
        }
    }

    pub fn catalog(&self) -> Vec<ProgramDescriptor> {
        catalog()
    }

    /// Run the calculator for a profile that is not (yet) on the roster.
    pub fn calculate(
        &self,
        request: &CalculationRequest,
    ) -> Result<EvaluationResult, FeeServiceError> {
        let base_fee = request.base_fee.unwrap_or(self.config.default_base_fee);
        let result = self
            .evaluator
            .evaluate(&request.profile(), FeeBasis::monthly(base_fee))?;

        debug!(
            base_fee,
            eligible = result.eligible_awards.len(),
            recommended = ?result.recommended_program(),
            "scholarship calculated"
        );
        Ok(result)
    }

    pub fn assess(&self, student_id: &StudentId) -> Result<FeeAssessment, FeeServiceError> {
        let student = self
            .roster
            .fetch(student_id)?
            .ok_or_else(|| RosterError::NotFound(student_id.clone()))?;
        self.assess_student(student)
    }

    pub fn assess_roster(&self) -> Result<Vec<FeeAssessment>, FeeServiceError> {
        let students = self.roster.list()?;
        let assessments = students
            .into_iter()
            .map(|student| self.assess_student(student))
            .collect::<Result<Vec<_>, _>>()?;

        info!(students = assessments.len(), "roster assessed");
        Ok(assessments)
    }

    pub fn summary(&self) -> Result<FeeSummary, FeeServiceError> {
        let assessments = self.assess_roster()?;
        Ok(FeeSummary::from_assessments(&assessments))
    }

    /// Generate one fee record per enrolled student for `period`, with status and late
    /// fees brought up to date as of `today`.
    pub fn bill_roster(
        &self,
        period: &BillingPeriod,
        due_date: NaiveDate,
        today: NaiveDate,
    ) -> Result<Vec<FeeRecord>, FeeServiceError> {
        let policy = self.late_fee_policy();
        let records: Vec<FeeRecord> = self
            .assess_roster()?
            .into_iter()
            .map(|assessment| {
                let mut record = FeeRecord::from_evaluation(
                    assessment.student_id,
                    period.clone(),
                    due_date,
                    &assessment.evaluation,
                );
                record.refresh_status(today);
                let late_fee = record.apply_late_fee(today, &policy);
                if late_fee > 0.0 {
                    warn!(
                        student_id = %record.student_id,
                        late_fee,
                        days_overdue = record.days_overdue(today),
                        "late fee applied"
                    );
                }
                record
            })
            .collect();

        info!(
            academic_year = %period.academic_year,
            month = period.month,
            records = records.len(),
            "billing cycle generated"
        );
        Ok(records)
    }

    fn assess_student(&self, student: EnrolledStudent) -> Result<FeeAssessment, FeeServiceError> {
        let evaluation = self
            .evaluator
            .evaluate(&student.profile, FeeBasis::monthly(student.base_monthly_fee))
            .map_err(|source| {
                warn!(student_id = %student.student_id, %source, "roster entry failed validation");
                source
            })?;

        Ok(FeeAssessment {
            student_id: student.student_id,
            full_name: student.full_name,
            class_name: student.class_name,
            evaluation,
        })
    }
}

/// Error raised by the fee service.
#[derive(Debug, thiserror::Error)]
pub enum FeeServiceError {
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    Roster(#[from] RosterError),
}
