//! Matching parsed expressions against context trees.
//!
//! Evaluation never errors: an unresolved path or a comparison that does not
//! apply to the resolved value degrades to "no match", so a query stays safe
//! against heterogeneous trees. All functions here are pure; independent
//! queries may be evaluated concurrently with no coordination.

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::{
    ast::{CompareOp, Expr, Literal},
    context::Context,
    value::Value,
};

/// Reserved path addressing a node's kind string.
const KIND_PATH: &str = "kind";
/// Reserved path addressing a node's tag set.
const TAG_PATH: &str = "tag";

/// Evaluates the expression against a single node.
///
/// Each node is judged independently; a match never propagates to ancestors
/// or descendants.
pub fn matches(expr: &Expr, context: &Context) -> bool {
    if let [segment] = expr.path.as_slice() {
        match segment.as_str() {
            KIND_PATH => {
                return match &context.kind {
                    Some(kind) => compare_text(expr.op, kind, &expr.literal),
                    None => false,
                };
            }
            TAG_PATH => return matches_tag(expr, context),
            _ => {}
        }
    }

    match resolve_path(context, &expr.path) {
        Some(value) => compare_value(expr.op, value, &expr.literal),
        None => false,
    }
}

/// Uids of every matching node in the tree rooted at `context`, in
/// depth-first preorder.
pub fn find_matches(expr: &Expr, context: &Context) -> Vec<String> {
    let mut found = Vec::new();
    collect_matches(expr, context, &mut found);
    found
}

fn collect_matches(expr: &Expr, context: &Context, found: &mut Vec<String>) {
    if matches(expr, context) {
        found.push(context.uid.clone());
    }
    for child in &context.children {
        collect_matches(expr, child, found);
    }
}

/// Uids of every strict ancestor of a matching node.
///
/// This is the "nodes to open" set handed to the tree view so every match
/// becomes visible.
pub fn ancestors_of_matches(expr: &Expr, context: &Context) -> BTreeSet<String> {
    let mut open = BTreeSet::new();
    let mut trail = Vec::new();
    collect_ancestors(expr, context, &mut trail, &mut open);
    open
}

fn collect_ancestors(
    expr: &Expr,
    context: &Context,
    trail: &mut Vec<String>,
    open: &mut BTreeSet<String>,
) {
    if matches(expr, context) {
        open.extend(trail.iter().cloned());
    }
    trail.push(context.uid.clone());
    for child in &context.children {
        collect_ancestors(expr, child, trail, open);
    }
    trail.pop();
}

/// Tag comparisons are set membership: Eq tests presence, NotEq absence.
/// Ordering operators never match a tag set.
fn matches_tag(expr: &Expr, context: &Context) -> bool {
    let name = expr.literal.as_text();
    match expr.op {
        CompareOp::Eq => context.tags.contains(&name),
        CompareOp::NotEq => !context.tags.contains(&name),
        _ => false,
    }
}

/// Resolves a dotted path through the node's attribute mapping, descending
/// nested objects segment by segment.
fn resolve_path<'a>(context: &'a Context, path: &[String]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    let mut current = context.attributes.get(first)?;
    for segment in rest {
        match current {
            Value::Object(fields) => current = fields.get(segment)?,
            _ => return None,
        }
    }
    Some(current)
}

fn compare_value(op: CompareOp, value: &Value, literal: &Literal) -> bool {
    if op.is_ordering() {
        // Ordering requires both sides to be numbers; anything else is
        // simply no match.
        let (Some(left), Some(right)) = (value.as_number(), literal_number(literal)) else {
            return false;
        };
        return compare_ordering(op, left, right);
    }

    let equal = match literal {
        Literal::Number(n) => match value.as_number() {
            Some(number) => number == Decimal::from(*n),
            None => value.as_text().is_some_and(|text| text == n.to_string()),
        },
        Literal::String(s) => value.as_text().is_some_and(|text| text == *s),
    };

    match op {
        CompareOp::Eq => equal,
        _ => !equal,
    }
}

/// Compares a bare string (the node's kind) against the literal.
fn compare_text(op: CompareOp, text: &str, literal: &Literal) -> bool {
    compare_value(op, &Value::String(text.to_string()), literal)
}

fn literal_number(literal: &Literal) -> Option<Decimal> {
    match literal {
        Literal::Number(n) => Some(Decimal::from(*n)),
        Literal::String(s) => s.trim().parse::<Decimal>().ok(),
    }
}

fn compare_ordering(op: CompareOp, left: Decimal, right: Decimal) -> bool {
    match op {
        CompareOp::Lt => left < right,
        CompareOp::Gt => left > right,
        CompareOp::Le => left <= right,
        CompareOp::Ge => left >= right,
        // Equality is handled by compare_value before numbers come into play.
        CompareOp::Eq | CompareOp::NotEq => false,
    }
}
