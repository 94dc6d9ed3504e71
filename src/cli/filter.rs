//! Execute ctxq queries against serialized context trees

use super::CliError;
use crate::{context::Context, evaluator, output, parser};

/// Options for the filter command
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// The ctxq query to evaluate
    pub query: String,
    /// Serialized context tree (JSON)
    pub input: Option<String>,
    /// Also report the ancestor keys to open so matches are visible
    pub open_keys: bool,
}

/// Parses the query, decodes the context tree, and returns the match set as
/// JSON (a uid array, or an object with `matches` and `open` arrays when
/// `open_keys` is set).
pub fn execute_filter(options: &FilterOptions) -> Result<serde_json::Value, CliError> {
    let expr = parser::parse_query(&options.query)?;

    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let json_value: serde_json::Value = serde_json::from_str(json_str)?;
    let root = Context::from_json(json_value)?;

    let matches = evaluator::find_matches(&expr, &root);

    if options.open_keys {
        let open = evaluator::ancestors_of_matches(&expr, &root);
        Ok(output::matches_with_open_to_json(&matches, &open))
    } else {
        Ok(output::matches_to_json(&matches))
    }
}
