// tests/integration_tests.rs

use std::collections::BTreeSet;

use ctxq::cli::{self, CliError, FilterOptions};
use ctxq::context::{Context, ContextError, gather_kinds_and_tags};
use ctxq::evaluator::find_matches;
use ctxq::opener::{OpenerMode, initial_open, set_open};
use ctxq::output::caret_diagnostic;
use ctxq::parser::parse_query;
use ctxq::value::Value;
use serde_json::json;

fn sample_tree_json() -> serde_json::Value {
    json!({
        "_type": "Context",
        "uid": "root",
        "name": "experiment",
        "kind": "root",
        "tags": ["experiment", {"name": "alpha", "color": "#ff0000"}],
        "children": [
            {
                "_type": "Context",
                "uid": "q1",
                "name": "ask model",
                "kind": "query",
                "inputs": {"model": "gpt-4", "temperature": 0.7},
                "result": "fine",
                "duration": 120
            },
            {
                "_type": "Context",
                "uid": "r1",
                "name": "repeat block",
                "kind": "repeat",
                "children": [
                    {
                        "_type": "Context",
                        "uid": "q2",
                        "kind": "query",
                        "tags": ["alpha"],
                        "inputs": {"model": "claude"},
                        "duration": "300"
                    }
                ]
            }
        ]
    })
}

// ============================================================================
// Context Decoding
// ============================================================================

#[test]
fn test_decode_context_tree() {
    let root = Context::from_json(sample_tree_json()).unwrap();

    assert_eq!(root.uid, "root");
    assert_eq!(root.kind.as_deref(), Some("root"));
    // Tags may be plain strings or objects carrying a name.
    assert_eq!(
        root.tags,
        ["alpha".to_string(), "experiment".to_string()].into()
    );
    // Structural fields stay out of the attribute mapping; the rest is data.
    assert!(!root.attributes.contains_key("uid"));
    assert!(!root.attributes.contains_key("children"));
    assert_eq!(
        root.attributes.get("name"),
        Some(&Value::String("experiment".to_string()))
    );

    assert_eq!(root.children.len(), 2);
    let q1 = &root.children[0];
    assert_eq!(q1.uid, "q1");
    assert_eq!(q1.attributes.get("duration"), Some(&Value::Integer(120)));
}

#[test]
fn test_decode_errors() {
    assert!(matches!(
        Context::from_json(json!([1, 2])),
        Err(ContextError::NotAnObject)
    ));
    assert!(matches!(
        Context::from_json(json!({"kind": "query"})),
        Err(ContextError::MissingUid)
    ));
    assert!(matches!(
        Context::from_json(json!({"uid": "x", "tags": [7]})),
        Err(ContextError::InvalidTag)
    ));
}

// ============================================================================
// End-to-End Queries
// ============================================================================

#[test]
fn test_query_against_decoded_tree() {
    let root = Context::from_json(sample_tree_json()).unwrap();

    let expr = parse_query("kind = query").unwrap();
    assert_eq!(find_matches(&expr, &root), vec!["q1", "q2"]);

    let expr = parse_query("tag = alpha").unwrap();
    assert_eq!(find_matches(&expr, &root), vec!["root", "q2"]);

    let expr = parse_query("inputs.model = \"gpt-4\"").unwrap();
    assert_eq!(find_matches(&expr, &root), vec!["q1"]);

    // "300" is stored as a string but still orders numerically.
    let expr = parse_query("duration >= 200").unwrap();
    assert_eq!(find_matches(&expr, &root), vec!["q2"]);

    let expr = parse_query("no.such.path = 1").unwrap();
    assert_eq!(find_matches(&expr, &root), Vec::<String>::new());
}

// ============================================================================
// CLI Operations
// ============================================================================

#[test]
fn test_execute_filter() {
    let options = FilterOptions {
        query: "kind = query".to_string(),
        input: Some(sample_tree_json().to_string()),
        open_keys: false,
    };
    let result = cli::execute_filter(&options).unwrap();
    assert_eq!(result, json!(["q1", "q2"]));
}

#[test]
fn test_execute_filter_with_open_keys() {
    let options = FilterOptions {
        query: "inputs.model = \"claude\"".to_string(),
        input: Some(sample_tree_json().to_string()),
        open_keys: true,
    };
    let result = cli::execute_filter(&options).unwrap();
    assert_eq!(result, json!({"matches": ["q2"], "open": ["r1", "root"]}));
}

#[test]
fn test_execute_filter_errors() {
    let options = FilterOptions {
        query: "kind = query".to_string(),
        input: None,
        open_keys: false,
    };
    assert!(matches!(
        cli::execute_filter(&options),
        Err(CliError::NoInput)
    ));

    let options = FilterOptions {
        query: "kind = query".to_string(),
        input: Some("{not json".to_string()),
        open_keys: false,
    };
    assert!(matches!(cli::execute_filter(&options), Err(CliError::Json(_))));
}

#[test]
fn test_check_reports_positions_for_caret() {
    let err = cli::execute_check("abc.xyz =< 5").unwrap_err();
    assert_eq!(err.position(), Some(8));

    let err = cli::execute_check("name = \"abc").unwrap_err();
    assert!(matches!(err, CliError::Tokenize(_)));
    assert_eq!(err.position(), Some(7));

    assert!(cli::execute_check("abc.xyz = 5").is_ok());
    assert_eq!(cli::execute_tokens("abc.xyz = 5").unwrap().len(), 3);
}

#[test]
fn test_caret_diagnostic_rendering() {
    assert_eq!(
        caret_diagnostic("abc.xyz =< 5", 8),
        "abc.xyz =< 5\n        ^"
    );
    assert_eq!(caret_diagnostic("$", 0), "$\n^");
    // Position past the input clamps to its end.
    assert_eq!(caret_diagnostic("a =", 3), "a =\n   ^");
}

// ============================================================================
// Open-State Collaborator
// ============================================================================

#[test]
fn test_set_open_modes() {
    let current: BTreeSet<String> = ["a".to_string()].into();

    let opened = set_open(&current, ["b", "c"], OpenerMode::Open);
    assert_eq!(
        opened,
        ["a".to_string(), "b".to_string(), "c".to_string()].into()
    );

    let closed = set_open(&opened, ["a", "b"], OpenerMode::Close);
    assert_eq!(closed, ["c".to_string()].into());

    let toggled = set_open(&closed, ["c", "d"], OpenerMode::Toggle);
    assert_eq!(toggled, ["d".to_string()].into());

    // Each update is copy-on-write; the input sets are unchanged.
    assert_eq!(current, ["a".to_string()].into());
}

#[test]
fn test_open_matches_flow() {
    // Open everything needed to make the match set visible.
    let root = Context::from_json(sample_tree_json()).unwrap();
    let expr = parse_query("kind = query").unwrap();

    let opened = set_open(
        &initial_open(&root),
        ctxq::evaluator::ancestors_of_matches(&expr, &root),
        OpenerMode::Open,
    );
    assert!(opened.contains("root"));
    assert!(opened.contains("r1"));
    // Kind and tag groups start expanded.
    assert!(opened.contains("query"));
    assert!(opened.contains("alpha"));
}

#[test]
fn test_gather_kinds_and_tags() {
    let root = Context::from_json(sample_tree_json()).unwrap();
    let mut names = BTreeSet::new();
    gather_kinds_and_tags(&root, &mut names);
    let expected: BTreeSet<String> = ["root", "query", "repeat", "experiment", "alpha"]
        .into_iter()
        .map(str::to_string)
        .collect();
    assert_eq!(names, expected);
}
