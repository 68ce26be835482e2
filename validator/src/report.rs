//! Scan artifacts and the console summary.
//!
//! Every run that reaches the scanning phase writes two reports into the
//! scanned root: `manifest.json` (every discovered file with size, hash,
//! and schema key) and `issues.json` (the full report with the issue
//! list). Both are regenerated idempotently and never touch the scanned
//! data itself.

use common::model::issue::{IssueKind, Severity};
use common::model::manifest::Manifest;
use common::model::report::{Report, ValidationStatus};
use std::path::Path;

pub const MANIFEST_FILE: &str = "manifest.json";
pub const ISSUES_FILE: &str = "issues.json";

pub fn write_artifacts(root: &Path, manifest: &Manifest, report: &Report) -> Result<(), String> {
    write_json(&root.join(MANIFEST_FILE), manifest)?;
    write_json(&root.join(ISSUES_FILE), report)
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), String> {
    let body = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    std::fs::write(path, body + "\n").map_err(|e| e.to_string())
}

fn status_label(status: ValidationStatus) -> &'static str {
    match status {
        ValidationStatus::Pass => "PASS",
        ValidationStatus::Fail => "FAIL",
    }
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    }
}

fn kind_label(kind: IssueKind) -> &'static str {
    match kind {
        IssueKind::SchemaDrift => "SCHEMA_DRIFT",
        IssueKind::MissingDirectory => "MISSING_DIRECTORY",
        IssueKind::CsvReadError => "CSV_READ_ERROR",
        IssueKind::ParquetReadError => "PARQUET_READ_ERROR",
        IssueKind::MissingCsvPair => "MISSING_CSV_PAIR",
        IssueKind::MissingParquetPair => "MISSING_PARQUET_PAIR",
    }
}

/// Always printed, strict mode or not. The first `max_issues` issues are
/// echoed; the rest live in the issues file.
pub fn print_summary(report: &Report, max_issues: usize) {
    println!(
        "Validation: {} ({} files scanned, {} errors, {} warnings)",
        status_label(report.validation_status),
        report.files_scanned,
        report.error_count,
        report.warning_count,
    );
    println!(
        "Canonical 13-column export present: {}",
        if report.canonical_present { "yes" } else { "no" }
    );
    for issue in report.issues.iter().take(max_issues) {
        println!(
            "  [{}] {} {}: {}",
            severity_label(issue.severity),
            kind_label(issue.kind),
            issue.target,
            issue.detail,
        );
    }
    let remaining = report.issues.len().saturating_sub(max_issues);
    if remaining > 0 {
        println!("  ... {} more issue(s) in {}", remaining, ISSUES_FILE);
    }
}
