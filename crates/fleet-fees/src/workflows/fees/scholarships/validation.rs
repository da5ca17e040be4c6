use super::domain::{FeeBasis, StudentEligibilityProfile};

/// Input that falls outside the domain the scholarship rules are defined on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error("base fee must be a positive amount, got {0}")]
    InvalidBaseFee(f64),
    #[error("family income cannot be negative, got {0}")]
    NegativeIncome(f64),
    #[error("{field} must be between 0 and 100, got {value}")]
    PercentOutOfRange { field: &'static str, value: f64 },
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
}

pub(crate) fn validate_fee(fee: &FeeBasis) -> Result<(), EvaluationError> {
    let amount = fee.base_monthly_fee;
    if !amount.is_finite() {
        return Err(EvaluationError::NonFinite {
            field: "base_monthly_fee",
        });
    }
    if amount <= 0.0 {
        return Err(EvaluationError::InvalidBaseFee(amount));
    }
    Ok(())
}

pub(crate) fn validate_profile(profile: &StudentEligibilityProfile) -> Result<(), EvaluationError> {
    let income = profile.family_annual_income;
    if !income.is_finite() {
        return Err(EvaluationError::NonFinite {
            field: "family_annual_income",
        });
    }
    if income < 0.0 {
        return Err(EvaluationError::NegativeIncome(income));
    }

    percent("academic_score_percent", profile.academic_score_percent)?;
    percent("attendance_percent", profile.attendance_percent)?;
    Ok(())
}

fn percent(field: &'static str, value: f64) -> Result<(), EvaluationError> {
    if !value.is_finite() {
        return Err(EvaluationError::NonFinite { field });
    }
    if !(0.0..=100.0).contains(&value) {
        return Err(EvaluationError::PercentOutOfRange { field, value });
    }
    Ok(())
}
