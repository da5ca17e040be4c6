use crate::workflows::fees::scholarships::{
    EvaluationResult, FeeBasis, ScholarshipEvaluator, StudentEligibilityProfile,
};

pub(super) fn profile(income: f64, academic: f64, attendance: f64) -> StudentEligibilityProfile {
    StudentEligibilityProfile {
        family_annual_income: income,
        academic_score_percent: academic,
        attendance_percent: attendance,
        has_sibling_enrolled: false,
        is_single_parent_household: false,
        has_sports_achievement: false,
    }
}

pub(super) fn evaluate(profile: &StudentEligibilityProfile, base_fee: f64) -> EvaluationResult {
    ScholarshipEvaluator::new()
        .evaluate(profile, FeeBasis::monthly(base_fee))
        .expect("valid profile evaluates")
}
