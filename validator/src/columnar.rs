use std::path::Path;

/// Capability seam for reading column names out of a columnar (Parquet)
/// file. The validator never requires an implementation: when none is
/// supplied, Parquet files are still discovered, hashed, and paired, but
/// their schemas are skipped. Tests inject fakes through this trait.
pub trait ColumnarReader: Sync {
    fn read_columns(&self, path: &Path) -> Result<Vec<String>, String>;
}
