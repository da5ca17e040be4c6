use super::roster::StudentId;
use super::scholarships::{EvaluationResult, ScholarshipProgram};
use serde::{Deserialize, Serialize};

/// Scholarship evaluation for one enrolled student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeAssessment {
    pub student_id: StudentId,
    pub full_name: String,
    pub class_name: String,
    pub evaluation: EvaluationResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramBreakdown {
    pub program: ScholarshipProgram,
    pub program_label: &'static str,
    pub count: usize,
    pub total_savings: f64,
    pub average_percentage: f64,
}

/// Revenue and scholarship statistics over a set of assessments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeSummary {
    pub total_students: usize,
    pub scholarship_recipients: usize,
    pub scholarship_percentage: f64,
    pub total_base_revenue: f64,
    pub total_actual_revenue: f64,
    pub total_scholarship_amount: f64,
    pub average_scholarship_percentage: f64,
    pub scholarship_breakdown: Vec<ProgramBreakdown>,
}

impl FeeSummary {
    pub fn from_assessments(assessments: &[FeeAssessment]) -> Self {
        let total_students = assessments.len();
        let awarded: Vec<_> = assessments
            .iter()
            .filter_map(|assessment| assessment.evaluation.recommended_award.as_ref())
            .collect();
        let scholarship_recipients = awarded.len();

        let scholarship_percentage = if total_students > 0 {
            scholarship_recipients as f64 / total_students as f64 * 100.0
        } else {
            0.0
        };

        let total_base_revenue = assessments
            .iter()
            .map(|assessment| assessment.evaluation.base_fee)
            .sum();
        let total_actual_revenue = assessments
            .iter()
            .map(|assessment| assessment.evaluation.final_fee)
            .sum();
        let total_scholarship_amount = assessments
            .iter()
            .map(|assessment| assessment.evaluation.total_savings)
            .sum();

        let average_scholarship_percentage =
            mean(awarded.iter().map(|award| award.percentage), scholarship_recipients);

        let scholarship_breakdown = ScholarshipProgram::ALL
            .into_iter()
            .filter_map(|program| {
                let matching: Vec<_> = awarded
                    .iter()
                    .filter(|award| award.program == program)
                    .collect();
                if matching.is_empty() {
                    return None;
                }

                Some(ProgramBreakdown {
                    program,
                    program_label: program.label(),
                    count: matching.len(),
                    total_savings: matching.iter().map(|award| award.amount).sum(),
                    average_percentage: mean(
                        matching.iter().map(|award| award.percentage),
                        matching.len(),
                    ),
                })
            })
            .collect();

        Self {
            total_students,
            scholarship_recipients,
            scholarship_percentage,
            total_base_revenue,
            total_actual_revenue,
            total_scholarship_amount,
            average_scholarship_percentage,
            scholarship_breakdown,
        }
    }
}

fn mean(values: impl Iterator<Item = f64>, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    values.sum::<f64>() / count as f64
}
