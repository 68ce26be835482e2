use serde::{Deserialize, Serialize};

/// On-disk format of a discovered export file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileFormat {
    #[serde(rename = "csv")]
    Csv,
    #[serde(rename = "csv.gz")]
    CsvGz,
    #[serde(rename = "parquet")]
    Parquet,
}

impl FileFormat {
    /// Splits a filename into its format and format-agnostic stem, e.g.
    /// `store_profiles.csv.gz` -> (`store_profiles`, `CsvGz`). Returns
    /// `None` for files the validator does not handle.
    pub fn split(file_name: &str) -> Option<(&str, FileFormat)> {
        if let Some(stem) = file_name.strip_suffix(".csv.gz") {
            Some((stem, FileFormat::CsvGz))
        } else if let Some(stem) = file_name.strip_suffix(".csv") {
            Some((stem, FileFormat::Csv))
        } else if let Some(stem) = file_name.strip_suffix(".parquet") {
            Some((stem, FileFormat::Parquet))
        } else {
            None
        }
    }

    /// Whether this format is a CSV representation (plain or gzipped) for
    /// the purpose of CSV/Parquet pairing.
    pub fn is_csv_form(self) -> bool {
        matches!(self, FileFormat::Csv | FileFormat::CsvGz)
    }
}

/// One discovered file as recorded in `manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Path relative to the scan root, with `/` separators.
    pub path: String,
    pub format: FileFormat,
    /// Registry key the file mapped to, or `null` for unmapped files.
    pub schema_key: Option<String>,
    pub size_bytes: u64,
    /// Lowercase hex MD5 of the file contents.
    pub md5: String,
}

/// The full inventory of one scan, written alongside the scanned data.
/// Regenerating it over unchanged data must produce identical content
/// except for `generated_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub generated_at: String,
    pub root: String,
    pub files: Vec<ManifestEntry>,
}
