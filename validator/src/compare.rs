use std::collections::HashSet;

/// Compares an actual header against the expected column order.
///
/// Returns `None` on an exact, order-sensitive match, otherwise a detail
/// string: missing and extra columns are named; the same column set in a
/// different order is reported as an order mismatch, distinct from both.
pub fn compare_headers(expected: &[&str], actual: &[&str]) -> Option<String> {
    if expected == actual {
        return None;
    }

    let expected_set: HashSet<&str> = expected.iter().copied().collect();
    let actual_set: HashSet<&str> = actual.iter().copied().collect();

    let missing: Vec<&str> = expected
        .iter()
        .copied()
        .filter(|c| !actual_set.contains(c))
        .collect();
    let extra: Vec<&str> = actual
        .iter()
        .copied()
        .filter(|c| !expected_set.contains(c))
        .collect();

    if missing.is_empty() && extra.is_empty() {
        return Some("Column order mismatch".to_string());
    }

    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("Missing: {}", missing.join(", ")));
    }
    if !extra.is_empty() {
        parts.push(format!("Extra: {}", extra.join(", ")));
    }
    Some(parts.join("; "))
}
