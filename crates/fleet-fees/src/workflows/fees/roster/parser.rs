use super::{EnrolledStudent, RosterImportError, StudentId};
use crate::workflows::fees::scholarships::{
    validate_fee, validate_profile, FeeBasis, StudentEligibilityProfile,
};
use serde::{de, Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_students<R: Read>(reader: R) -> Result<Vec<EnrolledStudent>, RosterImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut students = Vec::new();

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        // Quoted fields may span lines, so report where the record starts.
        let line = record
            .position()
            .and_then(|position| usize::try_from(position.line()).ok())
            .unwrap_or(index + 2);
        let student = record.deserialize::<RosterRow>(Some(&headers))?.into_student();

        validate_fee(&FeeBasis::monthly(student.base_monthly_fee))
            .and_then(|()| validate_profile(&student.profile))
            .map_err(|source| RosterImportError::Invalid { row: line, source })?;

        students.push(student);
    }

    Ok(students)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    student_id: String,
    full_name: String,
    #[serde(default)]
    class_name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    route_id: Option<u32>,
    base_monthly_fee: f64,
    family_income: f64,
    academic_score: f64,
    attendance_percentage: f64,
    #[serde(default, deserialize_with = "flag")]
    has_sibling: bool,
    #[serde(default, deserialize_with = "flag")]
    is_single_parent: bool,
    #[serde(default, deserialize_with = "flag")]
    has_sports_achievement: bool,
}

impl RosterRow {
    fn into_student(self) -> EnrolledStudent {
        EnrolledStudent {
            student_id: StudentId(self.student_id),
            full_name: self.full_name,
            class_name: self.class_name,
            route_id: self.route_id,
            base_monthly_fee: self.base_monthly_fee,
            profile: StudentEligibilityProfile {
                family_annual_income: self.family_income,
                academic_score_percent: self.academic_score,
                attendance_percent: self.attendance_percentage,
                has_sibling_enrolled: self.has_sibling,
                is_single_parent_household: self.is_single_parent,
                has_sports_achievement: self.has_sports_achievement,
            },
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<u32>().map(Some).map_err(de::Error::custom),
    }
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "no" | "n" | "0" => Ok(false),
        "true" | "yes" | "y" | "1" => Ok(true),
        other => Err(de::Error::custom(format!("'{other}' is not a yes/no flag"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::fees::scholarships::EvaluationError;

    const HEADER: &str = "student_id,full_name,class_name,route_id,base_monthly_fee,family_income,academic_score,attendance_percentage,has_sibling,is_single_parent,has_sports_achievement\n";

    #[test]
    fn parses_rows_with_flags_and_blank_route() {
        let csv = format!(
            "{HEADER}STU001, Alice Brown ,Grade 10,1,2000,45000,92,95,no,no,no\n\
STU005,Emma Thompson,Grade 10,,2000,55000,89,93,yes,0,false\n"
        );

        let students = parse_students(csv.as_bytes()).expect("roster parses");
        assert_eq!(students.len(), 2);
        assert_eq!(students[0].student_id, StudentId("STU001".to_string()));
        assert_eq!(students[0].full_name, "Alice Brown");
        assert_eq!(students[0].route_id, Some(1));
        assert_eq!(students[0].profile.academic_score_percent, 92.0);
        assert!(students[1].route_id.is_none());
        assert!(students[1].profile.has_sibling_enrolled);
        assert!(!students[1].profile.is_single_parent_household);
    }

    #[test]
    fn rejects_out_of_range_scores_with_row_number() {
        let csv = format!(
            "{HEADER}STU001,Alice Brown,Grade 10,1,2000,45000,92,95,no,no,no\n\
STU002,Bob Davis,Grade 11,2,2200,25000,178,88,no,no,no\n"
        );

        let err = parse_students(csv.as_bytes()).expect_err("bad score rejected");
        match err {
            RosterImportError::Invalid { row, source } => {
                assert_eq!(row, 3);
                assert!(matches!(
                    source,
                    EvaluationError::PercentOutOfRange {
                        field: "academic_score_percent",
                        ..
                    }
                ));
            }
            other => panic!("expected invalid row, got {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_fee() {
        let csv = format!("{HEADER}STU004,David Kumar,Grade 12,4,0,75000,88,91,no,no,no\n");
        let err = parse_students(csv.as_bytes()).expect_err("zero fee rejected");
        assert!(err.to_string().contains("roster row 2 rejected"));
    }

    #[test]
    fn reports_non_finite_fee_as_such() {
        let csv = format!("{HEADER}STU004,David Kumar,Grade 12,4,NaN,75000,88,91,no,no,no\n");
        match parse_students(csv.as_bytes()).expect_err("NaN fee rejected") {
            RosterImportError::Invalid { row, source } => {
                assert_eq!(row, 2);
                assert_eq!(
                    source,
                    EvaluationError::NonFinite {
                        field: "base_monthly_fee"
                    }
                );
            }
            other => panic!("expected invalid row, got {other:?}"),
        }
    }

    #[test]
    fn row_numbers_follow_multiline_fields() {
        let csv = format!(
            "{HEADER}STU001,\"Alice\nBrown\",Grade 10,1,2000,45000,92,95,no,no,no\n\
STU002,Bob Davis,Grade 11,2,2200,25000,78,188,no,no,no\n"
        );
        match parse_students(csv.as_bytes()).expect_err("bad attendance rejected") {
            RosterImportError::Invalid { row, .. } => assert_eq!(row, 4),
            other => panic!("expected invalid row, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_flag_values() {
        let csv = format!("{HEADER}STU004,David Kumar,Grade 12,4,2500,75000,88,91,maybe,no,no\n");
        let err = parse_students(csv.as_bytes()).expect_err("flag rejected");
        assert!(matches!(err, RosterImportError::Csv(_)));
    }
}
