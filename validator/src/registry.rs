use common::model::schema::{SchemaPattern, SchemaRegistry};
use std::path::Path;

/// The locked schema set for the current deployment. Patterns are ordered;
/// the first filename substring match wins, so keep more specific names
/// ahead of more general ones when extending this list.
pub fn builtin() -> SchemaRegistry {
    SchemaRegistry {
        patterns: vec![
            pattern(
                "store_profiles",
                "overall/store_profiles",
                &[
                    "store_id",
                    "store_name",
                    "region",
                    "transactions",
                    "total_items",
                    "total_amount",
                ],
            ),
            pattern(
                "sticks_per_visit",
                "tobacco/sticks_per_visit",
                &[
                    "transaction_id",
                    "brand",
                    "items",
                    "sticks_per_pack",
                    "estimated_sticks",
                ],
            ),
        ],
    }
}

fn pattern(contains: &str, schema_key: &str, columns: &[&str]) -> SchemaPattern {
    SchemaPattern {
        contains: contains.to_string(),
        schema_key: schema_key.to_string(),
        expected_columns: columns.iter().map(|c| c.to_string()).collect(),
    }
}

/// Loads a registry from a JSON file, for deployments that override the
/// built-in set.
pub fn load(path: &Path) -> Result<SchemaRegistry, String> {
    let contents = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&contents).map_err(|e| e.to_string())
}
