//! Transport fee workflow: scholarship evaluation, roster assessment, reporting and
//! monthly billing records.

pub mod ledger;
pub mod roster;
pub mod router;
pub mod scholarships;
pub mod service;
pub mod summary;

pub use ledger::{
    AppliedScholarship, BillingPeriod, FeeRecord, FeeStatus, LateFeePolicy, LedgerError, Payment,
    PaymentMethod, StudentFeeSummary,
};
pub use roster::{
    EnrolledStudent, RosterError, RosterImportError, RosterImporter, StudentId, StudentRoster,
};
pub use router::fee_router;
pub use scholarships::{
    catalog, EvaluationError, EvaluationResult, FeeBasis, ProgramDescriptor, ScholarshipAward,
    ScholarshipEvaluator, ScholarshipProgram, StudentEligibilityProfile,
};
pub use service::{CalculationRequest, FeeService, FeeServiceError};
pub use summary::{FeeAssessment, FeeSummary, ProgramBreakdown};
