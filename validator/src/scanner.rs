//! Export directory scanning.
//!
//! A scan walks the export root, inspects every CSV/CSV.GZ/Parquet file
//! against the schema registry, checks CSV/Parquet pairing per dataset
//! stem, and assembles the manifest and report. The scan is exhaustive,
//! not fail-fast: one bad file never aborts validation of the rest. The
//! single exception is a missing root, where no per-file scanning is
//! possible at all.
//!
//! File inspections run on the rayon thread pool. Discovery output is
//! sorted by relative path and the indexed parallel map preserves that
//! order, so two scans over unchanged data produce identical manifests
//! and issue lists (modulo `generated_at`).

use crate::columnar::ColumnarReader;
use crate::inspect;
use chrono::Utc;
use common::model::issue::{IssueKind, Severity, ValidationIssue};
use common::model::manifest::{FileFormat, Manifest};
use common::model::report::Report;
use common::model::schema::SchemaRegistry;
use log::warn;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub struct ScanOptions {
    /// Treat pairing gaps as errors instead of warnings.
    pub pairing_errors: bool,
}

pub struct ScanOutcome {
    pub report: Report,
    /// `None` when the root was missing and no scanning took place.
    pub manifest: Option<Manifest>,
}

struct Discovered {
    rel: String,
    stem: String,
    format: FileFormat,
}

pub fn scan(
    root: &Path,
    registry: &SchemaRegistry,
    columnar: Option<&dyn ColumnarReader>,
    options: &ScanOptions,
) -> ScanOutcome {
    let generated_at = Utc::now().to_rfc3339();

    if !root.is_dir() {
        let issue = ValidationIssue {
            kind: IssueKind::MissingDirectory,
            target: root.display().to_string(),
            severity: Severity::Error,
            detail: "export root does not exist".to_string(),
        };
        return ScanOutcome {
            report: Report::from_issues(vec![issue], false, 0, generated_at),
            manifest: None,
        };
    }

    let discovered = discover(root);

    let records: Vec<inspect::FileRecord> = discovered
        .par_iter()
        .map(|d| inspect::inspect(root, &d.rel, &d.stem, d.format, registry, columnar))
        .collect();

    let canonical_present = records.iter().any(|r| r.canonical);
    let mut issues: Vec<ValidationIssue> = Vec::new();
    for record in &records {
        issues.extend(record.issues.iter().cloned());
    }
    issues.extend(pairing_issues(&records, options));

    let files: Vec<_> = records.into_iter().map(|r| r.entry).collect();
    let files_scanned = files.len();

    ScanOutcome {
        report: Report::from_issues(issues, canonical_present, files_scanned, generated_at.clone()),
        manifest: Some(Manifest {
            generated_at,
            root: root.display().to_string(),
            files,
        }),
    }
}

/// Recursively enumerates data files under the root, sorted by relative
/// path so downstream output is deterministic.
fn discover(root: &Path) -> Vec<Discovered> {
    let mut rels = Vec::new();
    walk(root, root, &mut rels);
    rels.sort();
    rels.into_iter()
        .filter_map(|rel| {
            let file_name = rel.rsplit('/').next().unwrap_or(rel.as_str()).to_string();
            FileFormat::split(&file_name).map(|(stem, format)| Discovered {
                stem: stem.to_string(),
                format,
                rel,
            })
        })
        .collect()
}

fn walk(root: &Path, dir: &Path, rels: &mut Vec<String>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("cannot read directory {}: {}", dir.display(), e);
            return;
        }
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(root, &path, rels);
        } else if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if FileFormat::split(name).is_some() {
                if let Ok(rel) = path.strip_prefix(root) {
                    rels.push(rel.to_string_lossy().replace('\\', "/"));
                }
            }
        }
    }
}

/// Per stem, every CSV form should have a Parquet counterpart and vice
/// versa. A gap means an incomplete export, not corrupted data, so it is a
/// warning unless the deployment promotes pairing to an error.
fn pairing_issues(records: &[inspect::FileRecord], options: &ScanOptions) -> Vec<ValidationIssue> {
    let severity = if options.pairing_errors {
        Severity::Error
    } else {
        Severity::Warning
    };

    let mut stems: BTreeMap<&str, (bool, bool)> = BTreeMap::new();
    for record in records {
        let slot = stems.entry(record.stem.as_str()).or_insert((false, false));
        if record.entry.format.is_csv_form() {
            slot.0 = true;
        } else {
            slot.1 = true;
        }
    }

    let mut issues = Vec::new();
    for (stem, (has_csv, has_parquet)) in stems {
        if has_csv && !has_parquet {
            issues.push(ValidationIssue {
                kind: IssueKind::MissingParquetPair,
                target: stem.to_string(),
                severity,
                detail: "CSV form present without a Parquet counterpart".to_string(),
            });
        } else if has_parquet && !has_csv {
            issues.push(ValidationIssue {
                kind: IssueKind::MissingCsvPair,
                target: stem.to_string(),
                severity,
                detail: "Parquet form present without a CSV counterpart".to_string(),
            });
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;
    use common::model::report::ValidationStatus;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const CANONICAL_HEADER: &str = "Transaction_ID,Transaction_Value,Basket_Size,Category,\
Brand,Daypart,Demographics_Age_Gender_Role,Weekday_vs_Weekend,Time_of_Transaction,Location,\
Other_Products,Was_Substitution,Export_Timestamp";

    fn options() -> ScanOptions {
        ScanOptions {
            pairing_errors: false,
        }
    }

    fn write(dir: &TempDir, name: &str, contents: &str) {
        std::fs::write(dir.path().join(name), contents).unwrap();
    }

    fn run(dir: &TempDir) -> ScanOutcome {
        scan(dir.path(), &registry::builtin(), None, &options())
    }

    #[test]
    fn canonical_exact_header_passes_cleanly() {
        let dir = TempDir::new().unwrap();
        write(&dir, "scout_flat_export.csv", &format!("{}\nT1,9.5,3,Snacks,BrandA,AM,F35,Weekday,08:12,Manila,none,false,2026-08-01\n", CANONICAL_HEADER));
        // Empty placeholder keeps the pairing check satisfied; without a
        // columnar reader its schema is skipped.
        write(&dir, "scout_flat_export.parquet", "");

        let outcome = run(&dir);
        let report = outcome.report;
        assert_eq!(report.validation_status, ValidationStatus::Pass);
        assert!(report.canonical_present);
        assert_eq!(report.files_scanned, 2);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn missing_column_detected() {
        let dir = TempDir::new().unwrap();
        let drifted = CANONICAL_HEADER.replace("Category,Brand,", "Category,");
        write(&dir, "scout_flat_export.csv", &format!("{}\n", drifted));
        write(&dir, "scout_flat_export.parquet", "");

        let report = run(&dir).report;
        assert_eq!(report.validation_status, ValidationStatus::Fail);
        assert_eq!(report.error_count, 1);
        let issue = &report.issues[0];
        assert_eq!(issue.kind, IssueKind::SchemaDrift);
        assert!(issue.detail.contains("Missing: Brand"), "{}", issue.detail);
    }

    #[test]
    fn reordered_columns_detected_distinctly() {
        let dir = TempDir::new().unwrap();
        let swapped = CANONICAL_HEADER.replace("Category,Brand", "Brand,Category");
        write(&dir, "scout_flat_export.csv", &format!("{}\n", swapped));
        write(&dir, "scout_flat_export.parquet", "");

        let report = run(&dir).report;
        assert_eq!(report.error_count, 1);
        assert_eq!(report.issues[0].detail, "Column order mismatch");
    }

    #[test]
    fn registry_schema_drift_detected() {
        let dir = TempDir::new().unwrap();
        write(&dir, "store_profiles.csv", "store_id,store_name,region,transactions,total_items\n");
        write(&dir, "store_profiles.parquet", "");

        let report = run(&dir).report;
        assert_eq!(report.validation_status, ValidationStatus::Fail);
        assert_eq!(report.issues[0].kind, IssueKind::SchemaDrift);
        assert!(report.issues[0].detail.contains("Missing: total_amount"));
    }

    #[test]
    fn pairing_gap_is_warning_not_error() {
        let dir = TempDir::new().unwrap();
        write(&dir, "store_profiles.csv", "store_id,store_name,region,transactions,total_items,total_amount\n");

        let report = run(&dir).report;
        assert_eq!(report.validation_status, ValidationStatus::Pass);
        assert_eq!(report.error_count, 0);
        assert_eq!(report.warning_count, 1);
        let issue = &report.issues[0];
        assert_eq!(issue.kind, IssueKind::MissingParquetPair);
        assert_eq!(issue.severity, Severity::Warning);
        assert_eq!(issue.target, "store_profiles");
    }

    #[test]
    fn parquet_without_csv_is_missing_csv_pair() {
        let dir = TempDir::new().unwrap();
        write(&dir, "store_profiles.parquet", "");

        let report = run(&dir).report;
        assert_eq!(report.validation_status, ValidationStatus::Pass);
        assert_eq!(report.issues[0].kind, IssueKind::MissingCsvPair);
    }

    #[test]
    fn pairing_gap_promotable_to_error() {
        let dir = TempDir::new().unwrap();
        write(&dir, "store_profiles.csv", "store_id,store_name,region,transactions,total_items,total_amount\n");

        let outcome = scan(
            dir.path(),
            &registry::builtin(),
            None,
            &ScanOptions {
                pairing_errors: true,
            },
        );
        assert_eq!(outcome.report.validation_status, ValidationStatus::Fail);
        assert_eq!(outcome.report.error_count, 1);
    }

    #[test]
    fn gzipped_csv_header_is_read() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write as _;

        let dir = TempDir::new().unwrap();
        let file = std::fs::File::create(dir.path().join("store_profiles.csv.gz")).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder
            .write_all(b"store_id,store_name,region,transactions,total_items,total_amount\n")
            .unwrap();
        encoder.finish().unwrap();
        write(&dir, "store_profiles.parquet", "");

        let report = run(&dir).report;
        assert_eq!(report.validation_status, ValidationStatus::Pass);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn corrupt_gzip_recorded_and_scan_continues() {
        let dir = TempDir::new().unwrap();
        write(&dir, "broken.csv.gz", "this is not gzip data");
        write(&dir, "scout_flat_export.csv", &format!("{}\n", CANONICAL_HEADER));
        write(&dir, "scout_flat_export.parquet", "");

        let report = run(&dir).report;
        assert_eq!(report.validation_status, ValidationStatus::Fail);
        assert!(report
            .issues
            .iter()
            .any(|i| i.kind == IssueKind::CsvReadError && i.target == "broken.csv.gz"));
        // The canonical file was still validated cleanly.
        assert!(report.canonical_present);
        assert!(!report
            .issues
            .iter()
            .any(|i| i.target == "scout_flat_export.csv"));
    }

    #[test]
    fn unmapped_file_listed_but_not_validated() {
        let dir = TempDir::new().unwrap();
        write(&dir, "ad_hoc_notes.csv", "whatever,columns,go,here\n");
        write(&dir, "ad_hoc_notes.parquet", "");

        let outcome = run(&dir);
        assert!(outcome.report.issues.is_empty());
        let manifest = outcome.manifest.unwrap();
        let entry = manifest
            .files
            .iter()
            .find(|f| f.path == "ad_hoc_notes.csv")
            .unwrap();
        assert_eq!(entry.schema_key, None);
        assert!(!entry.md5.is_empty());
        assert!(entry.size_bytes > 0);
    }

    #[test]
    fn missing_root_fails_fast() {
        let missing = PathBuf::from("/definitely/not/an/export/root");
        let outcome = scan(&missing, &registry::builtin(), None, &options());
        assert!(outcome.manifest.is_none());
        let report = outcome.report;
        assert_eq!(report.validation_status, ValidationStatus::Fail);
        assert_eq!(report.files_scanned, 0);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].kind, IssueKind::MissingDirectory);
    }

    #[test]
    fn nested_directories_are_walked() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("overall")).unwrap();
        std::fs::write(
            dir.path().join("overall/store_profiles.csv"),
            "store_id,store_name,region,transactions,total_items,total_amount\n",
        )
        .unwrap();

        let outcome = run(&dir);
        let manifest = outcome.manifest.unwrap();
        assert_eq!(manifest.files[0].path, "overall/store_profiles.csv");
        assert_eq!(
            manifest.files[0].schema_key.as_deref(),
            Some("overall/store_profiles")
        );
    }

    #[test]
    fn scans_are_deterministic_across_runs() {
        let dir = TempDir::new().unwrap();
        write(&dir, "scout_flat_export.csv", &format!("{}\n", CANONICAL_HEADER));
        write(&dir, "store_profiles.csv", "store_id,store_name,region,transactions,total_items,total_amount\n");
        write(&dir, "sticks_per_visit.parquet", "");

        let first = run(&dir);
        let second = run(&dir);

        let first_manifest = first.manifest.unwrap();
        let second_manifest = second.manifest.unwrap();
        assert_eq!(first_manifest.files, second_manifest.files);
        assert_eq!(first.report.issues, second.report.issues);
        assert_eq!(
            first.report.validation_status,
            second.report.validation_status
        );
    }

    struct FakeColumnar(Vec<String>);
    impl ColumnarReader for FakeColumnar {
        fn read_columns(&self, _path: &Path) -> Result<Vec<String>, String> {
            Ok(self.0.clone())
        }
    }

    struct FailingColumnar;
    impl ColumnarReader for FailingColumnar {
        fn read_columns(&self, _path: &Path) -> Result<Vec<String>, String> {
            Err("unreadable columnar footer".to_string())
        }
    }

    #[test]
    fn columnar_reader_validates_parquet_schema() {
        let dir = TempDir::new().unwrap();
        write(&dir, "store_profiles.parquet", "");
        write(&dir, "store_profiles.csv", "store_id,store_name,region,transactions,total_items,total_amount\n");

        let drifted = FakeColumnar(vec!["store_id".to_string(), "store_name".to_string()]);
        let outcome = scan(dir.path(), &registry::builtin(), Some(&drifted), &options());
        let issue = &outcome.report.issues[0];
        assert_eq!(issue.kind, IssueKind::SchemaDrift);
        assert_eq!(issue.target, "store_profiles.parquet");
    }

    #[test]
    fn columnar_read_failure_is_parquet_read_error() {
        let dir = TempDir::new().unwrap();
        write(&dir, "store_profiles.parquet", "");
        write(&dir, "store_profiles.csv", "store_id,store_name,region,transactions,total_items,total_amount\n");

        let outcome = scan(
            dir.path(),
            &registry::builtin(),
            Some(&FailingColumnar),
            &options(),
        );
        assert!(outcome
            .report
            .issues
            .iter()
            .any(|i| i.kind == IssueKind::ParquetReadError));
    }
}
