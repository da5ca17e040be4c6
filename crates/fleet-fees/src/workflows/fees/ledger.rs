//! Monthly fee records: the billed amount after scholarship, payments received and
//! the late-fee policy applied once a record runs past its due date.

use super::roster::StudentId;
use super::scholarships::{EvaluationResult, ScholarshipProgram};
use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};

/// Academic years start in April.
const ACADEMIC_YEAR_START_MONTH: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPeriod {
    pub academic_year: String,
    pub month: u32,
    pub year: i32,
}

impl BillingPeriod {
    pub fn new(year: i32, month: u32) -> Result<Self, LedgerError> {
        if !(1..=12).contains(&month) {
            return Err(LedgerError::InvalidMonth(month));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(LedgerError::InvalidYear(year));
        }
        let academic_year =
            academic_year_label(year, month).ok_or(LedgerError::InvalidYear(year))?;

        Ok(Self {
            academic_year,
            month,
            year,
        })
    }

    pub fn containing(date: NaiveDate) -> Result<Self, LedgerError> {
        Self::new(date.year(), date.month())
    }

    pub fn month_name(&self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|month| Month::try_from(month).ok())
            .map(|month| month.name())
            .unwrap_or("Unknown")
    }

    /// Due date on `day` of the billed month, clamped to the month's last day.
    pub fn due_date(&self, day: u32) -> Option<NaiveDate> {
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1)?;
        let next_month = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)?
        };
        let last_day = next_month.pred_opt()?.day();
        first.with_day(day.clamp(1, last_day))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeStatus {
    Pending,
    Paid,
    Partial,
    Overdue,
    Waived,
}

impl FeeStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Paid => "Paid",
            Self::Partial => "Partial",
            Self::Overdue => "Overdue",
            Self::Waived => "Waived",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Online,
    Cheque,
    Upi,
    BankTransfer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub amount: f64,
    pub paid_on: NaiveDate,
    pub method: PaymentMethod,
    pub transaction_id: Option<String>,
}

/// Scholarship applied when the record was generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedScholarship {
    pub program: ScholarshipProgram,
    pub percentage: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LateFeePolicy {
    pub per_day: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeRecord {
    pub student_id: StudentId,
    pub period: BillingPeriod,
    pub base_amount: f64,
    pub scholarship: Option<AppliedScholarship>,
    pub final_amount: f64,
    pub paid_amount: f64,
    pub late_fee_amount: f64,
    pub late_fee_applied_on: Option<NaiveDate>,
    pub due_date: NaiveDate,
    pub status: FeeStatus,
    pub payments: Vec<Payment>,
    pub waiver_reason: Option<String>,
}

impl FeeRecord {
    pub fn from_evaluation(
        student_id: StudentId,
        period: BillingPeriod,
        due_date: NaiveDate,
        evaluation: &EvaluationResult,
    ) -> Self {
        let scholarship = evaluation
            .recommended_award
            .as_ref()
            .map(|award| AppliedScholarship {
                program: award.program,
                percentage: award.percentage,
                amount: award.amount,
            });

        Self {
            student_id,
            period,
            base_amount: evaluation.base_fee,
            scholarship,
            final_amount: evaluation.final_fee,
            paid_amount: 0.0,
            late_fee_amount: 0.0,
            late_fee_applied_on: None,
            due_date,
            status: FeeStatus::Pending,
            payments: Vec::new(),
            waiver_reason: None,
        }
    }

    pub fn total_due(&self) -> f64 {
        self.final_amount + self.late_fee_amount
    }

    pub fn balance(&self) -> f64 {
        self.total_due() - self.paid_amount
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !matches!(self.status, FeeStatus::Paid | FeeStatus::Waived) && today > self.due_date
    }

    pub fn days_overdue(&self, today: NaiveDate) -> i64 {
        if self.is_overdue(today) {
            (today - self.due_date).num_days()
        } else {
            0
        }
    }

    pub fn payment_percentage(&self) -> f64 {
        let total_due = self.total_due();
        if total_due > 0.0 {
            round2(self.paid_amount / total_due * 100.0)
        } else {
            0.0
        }
    }

    pub fn effective_discount_percentage(&self) -> f64 {
        let discount = self
            .scholarship
            .as_ref()
            .map(|scholarship| scholarship.amount)
            .unwrap_or(0.0);
        if self.base_amount > 0.0 {
            round2(discount / self.base_amount * 100.0)
        } else {
            0.0
        }
    }

    /// Applies the late fee at most once per record and returns the amount added.
    pub fn apply_late_fee(&mut self, today: NaiveDate, policy: &LateFeePolicy) -> f64 {
        if !self.is_overdue(today) || self.late_fee_amount > 0.0 {
            return 0.0;
        }

        let late_fee = (self.days_overdue(today) as f64 * policy.per_day).min(policy.max);
        if late_fee <= 0.0 {
            return 0.0;
        }
        self.late_fee_amount = late_fee;
        self.late_fee_applied_on = Some(today);
        self.refresh_status(today);
        late_fee
    }

    pub fn record_payment(&mut self, payment: Payment, today: NaiveDate) -> Result<(), LedgerError> {
        if self.status == FeeStatus::Waived {
            return Err(LedgerError::Waived);
        }
        if !payment.amount.is_finite() || payment.amount <= 0.0 {
            return Err(LedgerError::NonPositivePayment(payment.amount));
        }

        self.paid_amount += payment.amount;
        self.payments.push(payment);
        self.refresh_status(today);
        Ok(())
    }

    pub fn refresh_status(&mut self, today: NaiveDate) {
        if self.status == FeeStatus::Waived {
            return;
        }

        self.status = if self.paid_amount >= self.total_due() {
            FeeStatus::Paid
        } else if self.paid_amount > 0.0 {
            FeeStatus::Partial
        } else if today > self.due_date {
            FeeStatus::Overdue
        } else {
            FeeStatus::Pending
        };
    }

    pub fn waive(&mut self, reason: impl Into<String>) {
        self.status = FeeStatus::Waived;
        self.waiver_reason = Some(reason.into());
    }
}

/// Totals over one student's fee records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentFeeSummary {
    pub total_amount: f64,
    pub paid_amount: f64,
    pub balance_amount: f64,
    pub overdue_count: usize,
    pub total_fees: usize,
    pub payment_percentage: f64,
}

impl StudentFeeSummary {
    pub fn from_records(records: &[FeeRecord], today: NaiveDate) -> Self {
        let total_amount: f64 = records.iter().map(FeeRecord::total_due).sum();
        let paid_amount: f64 = records.iter().map(|record| record.paid_amount).sum();
        let overdue_count = records
            .iter()
            .filter(|record| record.is_overdue(today))
            .count();
        let payment_percentage = if total_amount > 0.0 {
            round2(paid_amount / total_amount * 100.0)
        } else {
            0.0
        };

        Self {
            total_amount,
            paid_amount,
            balance_amount: total_amount - paid_amount,
            overdue_count,
            total_fees: records.len(),
            payment_percentage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    #[error("month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),
    #[error("year {0} is outside the supported calendar range")]
    InvalidYear(i32),
    #[error("payment amount must be positive, got {0}")]
    NonPositivePayment(f64),
    #[error("fee record has been waived")]
    Waived,
}

/// `2025-26` style label for the academic year a calendar month falls in.
fn academic_year_label(year: i32, month: u32) -> Option<String> {
    let start_year = if month >= ACADEMIC_YEAR_START_MONTH {
        year
    } else {
        year.checked_sub(1)?
    };
    let end_year = start_year.checked_add(1)?;
    Some(format!("{}-{:02}", start_year, end_year.rem_euclid(100)))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
