use chrono::NaiveDate;
use fleet_fees::error::AppError;
use fleet_fees::workflows::fees::{
    EnrolledStudent, RosterError, RosterImporter, StudentEligibilityProfile, StudentId,
    StudentRoster,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Roster held in process memory, ordered by student id.
#[derive(Default, Clone)]
pub(crate) struct InMemoryStudentRoster {
    students: Arc<Mutex<BTreeMap<StudentId, EnrolledStudent>>>,
}

impl InMemoryStudentRoster {
    pub(crate) fn with_students(students: impl IntoIterator<Item = EnrolledStudent>) -> Self {
        let roster = Self::default();
        {
            let mut guard = roster.students.lock().expect("roster mutex poisoned");
            for student in students {
                guard.insert(student.student_id.clone(), student);
            }
        }
        roster
    }

    pub(crate) fn len(&self) -> usize {
        self.students.lock().expect("roster mutex poisoned").len()
    }
}

/// Roster imported from `path`, or an empty one when no export is given.
pub(crate) fn load_roster(path: Option<&Path>) -> Result<InMemoryStudentRoster, AppError> {
    let students = match path {
        Some(path) => RosterImporter::from_path(path)?,
        None => Vec::new(),
    };
    Ok(InMemoryStudentRoster::with_students(students))
}

impl StudentRoster for InMemoryStudentRoster {
    fn list(&self) -> Result<Vec<EnrolledStudent>, RosterError> {
        let guard = self.students.lock().expect("roster mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn fetch(&self, id: &StudentId) -> Result<Option<EnrolledStudent>, RosterError> {
        let guard = self.students.lock().expect("roster mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

/// The five students the transport office uses when walking new staff through billing.
pub(crate) fn sample_roster() -> Vec<EnrolledStudent> {
    vec![
        sample_student(
            "STU001",
            "Alice Brown",
            "Grade 10",
            2000.0,
            (45_000.0, 92.0, 95.0),
            Flags::default(),
        ),
        sample_student(
            "STU002",
            "Bob Davis",
            "Grade 9",
            2200.0,
            (25_000.0, 78.0, 88.0),
            Flags::default(),
        ),
        sample_student(
            "STU003",
            "Carol Wilson",
            "Grade 11",
            1800.0,
            (35_000.0, 85.0, 97.0),
            Flags {
                sports: true,
                ..Flags::default()
            },
        ),
        sample_student(
            "STU004",
            "David Kumar",
            "Grade 12",
            2500.0,
            (75_000.0, 88.0, 91.0),
            Flags::default(),
        ),
        sample_student(
            "STU005",
            "Emma Thompson",
            "Grade 8",
            2000.0,
            (55_000.0, 89.0, 93.0),
            Flags {
                sibling: true,
                ..Flags::default()
            },
        ),
    ]
}

#[derive(Default, Clone, Copy)]
struct Flags {
    sibling: bool,
    single_parent: bool,
    sports: bool,
}

fn sample_student(
    id: &str,
    name: &str,
    class_name: &str,
    base_monthly_fee: f64,
    (income, academic, attendance): (f64, f64, f64),
    flags: Flags,
) -> EnrolledStudent {
    EnrolledStudent {
        student_id: StudentId(id.to_string()),
        full_name: name.to_string(),
        class_name: class_name.to_string(),
        route_id: Some(1),
        base_monthly_fee,
        profile: StudentEligibilityProfile {
            family_annual_income: income,
            academic_score_percent: academic,
            attendance_percent: attendance,
            has_sibling_enrolled: flags.sibling,
            is_single_parent_household: flags.single_parent,
            has_sports_achievement: flags.sports,
        },
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_roster_is_listed_in_id_order() {
        let mut students = sample_roster();
        students.reverse();
        let roster = InMemoryStudentRoster::with_students(students);

        let ids: Vec<_> = roster
            .list()
            .expect("list")
            .into_iter()
            .map(|student| student.student_id.0)
            .collect();
        assert_eq!(ids, vec!["STU001", "STU002", "STU003", "STU004", "STU005"]);
        assert!(roster
            .fetch(&StudentId("STU009".to_string()))
            .expect("fetch")
            .is_none());
    }

    #[test]
    fn load_roster_starts_empty_without_export() {
        let roster = load_roster(None).expect("empty roster");
        assert_eq!(roster.len(), 0);
        assert!(roster.list().expect("list").is_empty());
    }

    #[test]
    fn load_roster_reports_missing_export() {
        let err = load_roster(Some(Path::new("does-not-exist/roster.csv")))
            .err()
            .expect("missing file rejected");
        assert!(matches!(err, AppError::Roster(_)));
    }

    #[test]
    fn parse_date_reports_bad_input() {
        assert_eq!(
            parse_date(" 2025-09-13 "),
            Ok(NaiveDate::from_ymd_opt(2025, 9, 13).expect("date"))
        );
        assert!(parse_date("13/09/2025")
            .expect_err("rejects")
            .contains("YYYY-MM-DD"));
    }
}
