mod parser;

use crate::workflows::fees::scholarships::{EvaluationError, StudentEligibilityProfile};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::Path;

/// School-issued student number, e.g. `STU001`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StudentId(pub String);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A student enrolled on a bus route along with the facts needed to bill them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrolledStudent {
    pub student_id: StudentId,
    pub full_name: String,
    pub class_name: String,
    pub route_id: Option<u32>,
    pub base_monthly_fee: f64,
    pub profile: StudentEligibilityProfile,
}

/// Read access to the enrollment records maintained elsewhere.
pub trait StudentRoster: Send + Sync {
    fn list(&self) -> Result<Vec<EnrolledStudent>, RosterError>;
    fn fetch(&self, id: &StudentId) -> Result<Option<EnrolledStudent>, RosterError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("student {0} not found")]
    NotFound(StudentId),
    #[error("roster unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Invalid {
        row: usize,
        source: EvaluationError,
    },
}

impl fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster export: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::Invalid { row, source } => {
                write!(f, "roster row {} rejected: {}", row, source)
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::Invalid { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads enrollment records from the dashboard's CSV export.
pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<EnrolledStudent>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<EnrolledStudent>, RosterImportError> {
        parser::parse_students(reader)
    }
}
