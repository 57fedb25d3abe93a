use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One locale's translations: nested key → string-or-subtree.
///
/// Serializes as plain JSON (`"text"` for a leaf, `{...}` for a node), which is
/// the format locale files use and the format the virtual module exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageTree {
    Leaf(String),
    Node(IndexMap<String, MessageTree>),
}

/// All loaded locales, in load order.
pub type LocaleIndex = IndexMap<String, MessageTree>;

/// Where a JSON value broke the message tree shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeViolation {
    /// Dot path of the offending value; empty for the document root.
    pub key_path: String,
    /// JSON type that was found instead of a string or object.
    pub found: JsonKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Null,
    Bool,
    Number,
    String,
    Array,
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonKind::Null => write!(f, "null"),
            JsonKind::Bool => write!(f, "boolean"),
            JsonKind::Number => write!(f, "number"),
            JsonKind::String => write!(f, "string"),
            JsonKind::Array => write!(f, "array"),
        }
    }
}

impl MessageTree {
    /// Validate a parsed locale document.
    ///
    /// The root must be an object; below it every value must be a string or
    /// another object.
    pub fn from_json(value: Value) -> Result<Self, ShapeViolation> {
        match value {
            Value::Object(_) => Self::from_value(value, String::new()),
            other => Err(ShapeViolation {
                key_path: String::new(),
                found: kind_of(&other),
            }),
        }
    }

    fn from_value(value: Value, key_path: String) -> Result<Self, ShapeViolation> {
        match value {
            Value::String(s) => Ok(MessageTree::Leaf(s)),
            Value::Object(map) => {
                let mut node = IndexMap::with_capacity(map.len());
                for (key, child) in map {
                    let child_path = join_key(&key_path, &key);
                    node.insert(key, Self::from_value(child, child_path)?);
                }
                Ok(MessageTree::Node(node))
            }
            other => Err(ShapeViolation {
                key_path,
                found: kind_of(&other),
            }),
        }
    }

    /// Look up a dot-separated path, returning the leaf string it names.
    ///
    /// Returns `None` when a segment is missing or the path ends on a subtree.
    pub fn get(&self, path: &str) -> Option<&str> {
        let mut current = self;
        for segment in path.split('.') {
            match current {
                MessageTree::Node(children) => current = children.get(segment)?,
                MessageTree::Leaf(_) => return None,
            }
        }
        match current {
            MessageTree::Leaf(text) => Some(text),
            MessageTree::Node(_) => None,
        }
    }

    /// Visit every leaf with its full dot path.
    pub fn walk_leaves<F>(&self, prefix: &mut String, visit: &mut F)
    where
        F: FnMut(&str, &str),
    {
        match self {
            MessageTree::Leaf(text) => visit(prefix, text),
            MessageTree::Node(children) => {
                for (key, child) in children {
                    let restore = prefix.len();
                    if !prefix.is_empty() {
                        prefix.push('.');
                    }
                    prefix.push_str(key);
                    child.walk_leaves(prefix, visit);
                    prefix.truncate(restore);
                }
            }
        }
    }
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn kind_of(value: &Value) -> JsonKind {
    match value {
        Value::Null => JsonKind::Null,
        Value::Bool(_) => JsonKind::Bool,
        Value::Number(_) => JsonKind::Number,
        Value::String(_) => JsonKind::String,
        Value::Array(_) => JsonKind::Array,
        Value::Object(_) => unreachable!("objects are valid message nodes"),
    }
}
