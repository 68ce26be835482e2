use serde::{Deserialize, Serialize};

/// The category of a problem detected during an export scan.
///
/// Serialized in the screaming-snake form used by the issues report
/// (`SCHEMA_DRIFT`, `MISSING_PARQUET_PAIR`, ...), which downstream CI jobs
/// grep for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueKind {
    SchemaDrift,
    MissingDirectory,
    CsvReadError,
    ParquetReadError,
    MissingCsvPair,
    MissingParquetPair,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One detected problem. Issues are accumulated during a scan and never
/// mutated after creation; pairing gaps are warnings, everything else is
/// an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    /// File path or stem the issue refers to, relative to the scan root.
    pub target: String,
    pub severity: Severity,
    /// Free-text specifics: missing/extra column names, decode error, etc.
    pub detail: String,
}
