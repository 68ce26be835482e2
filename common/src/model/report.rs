use crate::model::issue::{Severity, ValidationIssue};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValidationStatus {
    Pass,
    Fail,
}

/// The outcome of one export scan. Warnings alone never fail a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub validation_status: ValidationStatus,
    /// Whether any canonical flat-export file was found at all.
    pub canonical_present: bool,
    pub files_scanned: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub issues: Vec<ValidationIssue>,
    pub generated_at: String,
}

impl Report {
    /// Assembles a report from the accumulated issues, deriving the tallies
    /// and overall status.
    pub fn from_issues(
        issues: Vec<ValidationIssue>,
        canonical_present: bool,
        files_scanned: usize,
        generated_at: String,
    ) -> Report {
        let error_count = issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count();
        let warning_count = issues.len() - error_count;
        let validation_status = if error_count == 0 {
            ValidationStatus::Pass
        } else {
            ValidationStatus::Fail
        };
        Report {
            validation_status,
            canonical_present,
            files_scanned,
            error_count,
            warning_count,
            issues,
            generated_at,
        }
    }
}
