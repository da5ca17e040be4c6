use super::domain::{FeeBasis, ScholarshipProgram, StudentEligibilityProfile};
use super::ScholarshipAward;

pub(crate) const MERIT_MIN_SCORE: f64 = 90.0;
pub(crate) const MERIT_MAX_INCOME: f64 = 60_000.0;
pub(crate) const NEED_BASED_MAX_INCOME: f64 = 30_000.0;
pub(crate) const SPORTS_MIN_ATTENDANCE: f64 = 95.0;
pub(crate) const SPORTS_HIGH_ATTENDANCE: f64 = 98.0;
pub(crate) const SPORTS_MAX_INCOME: f64 = 50_000.0;
pub(crate) const SIBLING_MAX_INCOME: f64 = 70_000.0;
pub(crate) const SIBLING_PERCENTAGE: f64 = 15.0;
pub(crate) const SINGLE_PARENT_MAX_INCOME: f64 = 40_000.0;

/// Percentage and audit note produced by a program whose predicate holds.
struct RuleMatch {
    percentage: f64,
    reason: String,
}

pub(crate) fn eligible_awards(
    profile: &StudentEligibilityProfile,
    fee: FeeBasis,
) -> Vec<ScholarshipAward> {
    ScholarshipProgram::ALL
        .into_iter()
        .filter_map(|program| {
            apply_rule(program, profile).map(|matched| ScholarshipAward {
                program,
                percentage: matched.percentage,
                amount: fee.base_monthly_fee * matched.percentage / 100.0,
                reason: matched.reason,
            })
        })
        .collect()
}

fn apply_rule(program: ScholarshipProgram, profile: &StudentEligibilityProfile) -> Option<RuleMatch> {
    match program {
        ScholarshipProgram::Merit => merit(profile),
        ScholarshipProgram::NeedBased => need_based(profile),
        ScholarshipProgram::Sports => sports(profile),
        ScholarshipProgram::Sibling => sibling(profile),
        ScholarshipProgram::SingleParent => single_parent(profile),
    }
}

fn merit(profile: &StudentEligibilityProfile) -> Option<RuleMatch> {
    let score = profile.academic_score_percent;
    if score < MERIT_MIN_SCORE || profile.family_annual_income > MERIT_MAX_INCOME {
        return None;
    }

    Some(RuleMatch {
        percentage: (20.0 + (score - MERIT_MIN_SCORE) * 2.0).min(30.0),
        reason: format!("Academic score: {score}%"),
    })
}

fn need_based(profile: &StudentEligibilityProfile) -> Option<RuleMatch> {
    let income = profile.family_annual_income;
    if income > NEED_BASED_MAX_INCOME {
        return None;
    }

    // Upper bound first, then the floor.
    Some(RuleMatch {
        percentage: (60.0 - income / 1000.0).min(50.0).max(30.0),
        reason: format!("Family income: {income}"),
    })
}

fn sports(profile: &StudentEligibilityProfile) -> Option<RuleMatch> {
    let attendance = profile.attendance_percent;
    if !profile.has_sports_achievement
        || attendance < SPORTS_MIN_ATTENDANCE
        || profile.family_annual_income > SPORTS_MAX_INCOME
    {
        return None;
    }

    let percentage = if attendance >= SPORTS_HIGH_ATTENDANCE {
        40.0
    } else {
        30.0
    };

    Some(RuleMatch {
        percentage,
        reason: format!("Sports achievement + {attendance}% attendance"),
    })
}

fn sibling(profile: &StudentEligibilityProfile) -> Option<RuleMatch> {
    if !profile.has_sibling_enrolled || profile.family_annual_income > SIBLING_MAX_INCOME {
        return None;
    }

    Some(RuleMatch {
        percentage: SIBLING_PERCENTAGE,
        reason: "Multiple children discount".to_string(),
    })
}

fn single_parent(profile: &StudentEligibilityProfile) -> Option<RuleMatch> {
    let income = profile.family_annual_income;
    if !profile.is_single_parent_household || income > SINGLE_PARENT_MAX_INCOME {
        return None;
    }

    Some(RuleMatch {
        percentage: (20.0 + (SINGLE_PARENT_MAX_INCOME - income) / 1000.0).min(35.0),
        reason: "Single parent household support".to_string(),
    })
}
