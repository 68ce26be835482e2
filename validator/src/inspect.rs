//! Per-file inspection: content hashing, header extraction, and schema
//! comparison. Each file is fully independent, which is what lets the
//! scanner fan inspections out across a thread pool.

use crate::columnar::ColumnarReader;
use crate::compare;
use common::model::issue::{IssueKind, Severity, ValidationIssue};
use common::model::manifest::{FileFormat, ManifestEntry};
use common::model::schema::{self, SchemaRegistry};
use flate2::read::GzDecoder;
use log::info;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Everything learned about one discovered file. Issues found here never
/// abort the scan; they are merged into the final report.
pub struct FileRecord {
    pub entry: ManifestEntry,
    /// Format-agnostic dataset name, shared across CSV and Parquet forms.
    pub stem: String,
    /// Whether the filename marks this as the canonical flat export.
    pub canonical: bool,
    pub issues: Vec<ValidationIssue>,
}

pub fn inspect(
    root: &Path,
    rel: &str,
    stem: &str,
    format: FileFormat,
    registry: &SchemaRegistry,
    columnar: Option<&dyn ColumnarReader>,
) -> FileRecord {
    let path = root.join(rel);
    let file_name = rel.rsplit('/').next().unwrap_or(rel);
    let canonical = schema::is_canonical_name(file_name);
    let matched = registry.resolve(file_name);
    let schema_key = matched.map(|p| p.schema_key.clone());
    let mut issues = Vec::new();

    let (md5, size_bytes) = match hash_and_size(&path) {
        Ok(v) => v,
        Err(e) => {
            // Unreadable outright: record the failure and stop looking at
            // this file; the header read would only fail the same way.
            issues.push(read_error(format, rel, e));
            return FileRecord {
                entry: ManifestEntry {
                    path: rel.to_string(),
                    format,
                    schema_key,
                    size_bytes: 0,
                    md5: String::new(),
                },
                stem: stem.to_string(),
                canonical,
                issues,
            };
        }
    };

    let actual = match format {
        FileFormat::Csv | FileFormat::CsvGz => {
            match read_csv_header(&path, format == FileFormat::CsvGz) {
                Ok(cols) => Some(cols),
                Err(e) => {
                    issues.push(read_error(format, rel, e));
                    None
                }
            }
        }
        FileFormat::Parquet => match columnar {
            Some(reader) => match reader.read_columns(&path) {
                Ok(cols) => Some(cols),
                Err(e) => {
                    issues.push(read_error(format, rel, e));
                    None
                }
            },
            None => {
                info!("no columnar reader available; skipping schema check for {}", rel);
                None
            }
        },
    };

    if let Some(actual) = &actual {
        let actual_refs: Vec<&str> = actual.iter().map(String::as_str).collect();
        // The canonical contract takes precedence over any registry match.
        let expected: Option<Vec<&str>> = if canonical {
            Some(schema::CANONICAL_COLUMNS.to_vec())
        } else {
            matched.map(|p| p.expected_columns.iter().map(String::as_str).collect())
        };
        if let Some(expected) = expected {
            if let Some(detail) = compare::compare_headers(&expected, &actual_refs) {
                issues.push(ValidationIssue {
                    kind: IssueKind::SchemaDrift,
                    target: rel.to_string(),
                    severity: Severity::Error,
                    detail,
                });
            }
        }
    }

    FileRecord {
        entry: ManifestEntry {
            path: rel.to_string(),
            format,
            schema_key,
            size_bytes,
            md5,
        },
        stem: stem.to_string(),
        canonical,
        issues,
    }
}

fn read_error(format: FileFormat, rel: &str, detail: String) -> ValidationIssue {
    let kind = if format == FileFormat::Parquet {
        IssueKind::ParquetReadError
    } else {
        IssueKind::CsvReadError
    };
    ValidationIssue {
        kind,
        target: rel.to_string(),
        severity: Severity::Error,
        detail,
    }
}

/// Streams the whole file through MD5 for the manifest.
fn hash_and_size(path: &Path) -> Result<(String, u64), String> {
    let mut file = File::open(path).map_err(|e| e.to_string())?;
    let mut hasher = md5::Context::new();
    let mut buf = [0u8; 64 * 1024];
    let mut size: u64 = 0;
    loop {
        let n = file.read(&mut buf).map_err(|e| e.to_string())?;
        if n == 0 {
            break;
        }
        hasher.consume(&buf[..n]);
        size += n as u64;
    }
    Ok((format!("{:x}", hasher.finalize()), size))
}

/// Reads only the header record of a (possibly gzipped) CSV file.
fn read_csv_header(path: &Path, gzipped: bool) -> Result<Vec<String>, String> {
    let file = File::open(path).map_err(|e| e.to_string())?;
    let reader: Box<dyn Read> = if gzipped {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };
    let mut rdr = csv::ReaderBuilder::new().from_reader(reader);
    let headers = rdr.headers().map_err(|e| e.to_string())?;
    Ok(headers.iter().map(str::to_string).collect())
}
