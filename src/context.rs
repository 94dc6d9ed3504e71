//! The context tree the evaluator matches against.
//!
//! A context is one node of a hierarchical data set: a unique identifier, an
//! optional kind string, a set of tags, an attribute mapping, and ordered
//! children. The query core only ever reads a tree; it is treated as an
//! immutable snapshot for the duration of one evaluation.

use std::collections::{BTreeSet, HashMap};

use crate::value::Value;

/// Serialized-tree fields with structural meaning; everything else becomes
/// an attribute.
const RESERVED_FIELDS: [&str; 4] = ["_type", "uid", "kind", "children"];

#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    /// Unique identifier of the node.
    pub uid: String,
    /// Kind string, addressed by the reserved query path `kind`.
    pub kind: Option<String>,
    /// Tag set, addressed by the reserved query path `tag`.
    pub tags: BTreeSet<String>,
    /// Everything else carried by the node; queried by dotted path.
    pub attributes: HashMap<String, Value>,
    /// Ordered child nodes.
    pub children: Vec<Context>,
}

/// Errors decoding a serialized context tree.
#[derive(Debug)]
pub enum ContextError {
    /// A node in the tree was not a JSON object.
    NotAnObject,
    /// A node had no `uid` string.
    MissingUid,
    /// A tag entry was neither a string nor an object with a `name` field.
    InvalidTag,
}

impl std::fmt::Display for ContextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContextError::NotAnObject => write!(f, "context node is not a JSON object"),
            ContextError::MissingUid => write!(f, "context node has no 'uid' field"),
            ContextError::InvalidTag => {
                write!(f, "tag entry is neither a string nor an object with a 'name'")
            }
        }
    }
}

impl std::error::Error for ContextError {}

impl Context {
    pub fn new(uid: impl Into<String>) -> Self {
        Context {
            uid: uid.into(),
            kind: None,
            tags: BTreeSet::new(),
            attributes: HashMap::new(),
            children: Vec::new(),
        }
    }

    /// Decodes a serialized context tree.
    ///
    /// Expects the shape produced by the context serializer: `uid` required,
    /// `kind` optional, `tags` a list of strings or objects carrying a
    /// `name`, `children` decoded recursively. Every remaining field except
    /// `_type` lands in the attribute mapping.
    pub fn from_json(v: serde_json::Value) -> Result<Context, ContextError> {
        let serde_json::Value::Object(mut obj) = v else {
            return Err(ContextError::NotAnObject);
        };

        let uid = match obj.get("uid") {
            Some(serde_json::Value::String(uid)) => uid.clone(),
            _ => return Err(ContextError::MissingUid),
        };

        let kind = match obj.get("kind") {
            Some(serde_json::Value::String(kind)) => Some(kind.clone()),
            _ => None,
        };

        let tags = match obj.remove("tags") {
            Some(serde_json::Value::Array(entries)) => {
                let mut tags = BTreeSet::new();
                for entry in entries {
                    tags.insert(decode_tag(entry)?);
                }
                tags
            }
            _ => BTreeSet::new(),
        };

        let children = match obj.remove("children") {
            Some(serde_json::Value::Array(entries)) => entries
                .into_iter()
                .map(Context::from_json)
                .collect::<Result<Vec<_>, _>>()?,
            _ => Vec::new(),
        };

        let attributes = obj
            .into_iter()
            .filter(|(key, _)| !RESERVED_FIELDS.contains(&key.as_str()))
            .map(|(key, value)| (key, Value::from_json(value)))
            .collect();

        Ok(Context {
            uid,
            kind,
            tags,
            attributes,
            children,
        })
    }
}

fn decode_tag(entry: serde_json::Value) -> Result<String, ContextError> {
    match entry {
        serde_json::Value::String(name) => Ok(name),
        serde_json::Value::Object(obj) => match obj.get("name") {
            Some(serde_json::Value::String(name)) => Ok(name.clone()),
            _ => Err(ContextError::InvalidTag),
        },
        _ => Err(ContextError::InvalidTag),
    }
}

/// Collects every kind string and tag name in the tree into `out`.
///
/// The tree view seeds its initial opened set with these, so kind and tag
/// groupings start expanded.
pub fn gather_kinds_and_tags(context: &Context, out: &mut BTreeSet<String>) {
    if let Some(kind) = &context.kind {
        out.insert(kind.clone());
    }
    for tag in &context.tags {
        out.insert(tag.clone());
    }
    for child in &context.children {
        gather_kinds_and_tags(child, out);
    }
}
