//! Output shaping for query diagnostics and match sets.
//!
//! Parse failures are rendered as caret diagnostics: the query line with a
//! `^` under the offending position. Match sets are shaped into
//! `serde_json::Value` so the CLI prints deterministic JSON.

use std::collections::BTreeSet;

/// Renders a caret diagnostic for an error at `position` (a char offset into
/// `query`):
///
/// ```text
/// abc.xyz =< 5
///         ^
/// ```
pub fn caret_diagnostic(query: &str, position: usize) -> String {
    let width = position.min(query.chars().count());
    format!("{}\n{}^", query, " ".repeat(width))
}

/// Shapes a match set as a JSON array of uids.
pub fn matches_to_json(matches: &[String]) -> serde_json::Value {
    serde_json::Value::Array(
        matches
            .iter()
            .map(|uid| serde_json::Value::String(uid.clone()))
            .collect(),
    )
}

/// Shapes a match set together with the keys to open so every match is
/// visible in the tree view.
pub fn matches_with_open_to_json(
    matches: &[String],
    open: &BTreeSet<String>,
) -> serde_json::Value {
    let open = serde_json::Value::Array(
        open.iter()
            .map(|uid| serde_json::Value::String(uid.clone()))
            .collect(),
    );
    let mut result = serde_json::Map::new();
    result.insert("matches".to_string(), matches_to_json(matches));
    result.insert("open".to_string(), open);
    serde_json::Value::Object(result)
}
