use serde::{Deserialize, Serialize};

/// One locked export schema: any file whose name contains `contains` is
/// expected to carry exactly `expected_columns`, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaPattern {
    /// Filename substring that selects this schema.
    pub contains: String,
    /// Slash-namespaced artifact key, e.g. `overall/store_profiles`.
    pub schema_key: String,
    /// Required column order. Order is load-bearing.
    pub expected_columns: Vec<String>,
}

/// The registry of locked schemas for one deployment.
///
/// Patterns are evaluated in order and the first match wins, so more
/// specific substrings must be listed before more general ones. The
/// registry is read-only during a validation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaRegistry {
    pub patterns: Vec<SchemaPattern>,
}

impl SchemaRegistry {
    /// Resolves a filename to its locked schema. First match wins; a file
    /// matching no pattern is simply not schema-validated.
    pub fn resolve(&self, file_name: &str) -> Option<&SchemaPattern> {
        self.patterns
            .iter()
            .find(|p| file_name.contains(p.contains.as_str()))
    }
}

/// Filename markers that identify the distinguished canonical flat export.
pub const CANONICAL_MARKERS: [&str; 3] = ["canonical", "13col", "flat_export"];

/// The locked 13-column header of the canonical flat export. Downstream
/// consumers depend on this exact order; any deviation is schema drift.
pub const CANONICAL_COLUMNS: [&str; 13] = [
    "Transaction_ID",
    "Transaction_Value",
    "Basket_Size",
    "Category",
    "Brand",
    "Daypart",
    "Demographics_Age_Gender_Role",
    "Weekday_vs_Weekend",
    "Time_of_Transaction",
    "Location",
    "Other_Products",
    "Was_Substitution",
    "Export_Timestamp",
];

/// Whether a filename denotes the canonical flat export.
pub fn is_canonical_name(file_name: &str) -> bool {
    let lowered = file_name.to_lowercase();
    CANONICAL_MARKERS.iter().any(|m| lowered.contains(m))
}
