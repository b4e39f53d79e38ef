//! Hierarchical translation table.
//!
//! Interior nodes map a key segment to a child node; leaves are strings.
//! Children are held in `BTreeMap`s so serialization is sorted at every level.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

use crate::key::KEY_SEPARATOR;

const INDENT: &[u8] = b"    ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Leaf(String),
    Branch(BTreeMap<String, Node>),
}

/// Result of [`TranslationTable::ensure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ensured {
    /// The key was absent and now holds the placeholder.
    Inserted,
    /// The key held an empty string and now holds the placeholder.
    Filled,
    /// The key already held a value (or a subtree); nothing changed.
    Kept,
    /// A parent segment is a string leaf, so the key cannot exist.
    Blocked,
}

impl Ensured {
    pub fn is_change(&self) -> bool {
        matches!(self, Ensured::Inserted | Ensured::Filled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Ensured::Inserted => "inserted",
            Ensured::Filled => "filled",
            Ensured::Kept => "kept",
            Ensured::Blocked => "blocked",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationTable {
    root: BTreeMap<String, Node>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Parse a JSON document whose root is an object of nested objects and strings.
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Serialize with 4-space indentation, keys sorted at every level.
    ///
    /// Non-ASCII characters are written as-is.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        self.serialize(&mut serializer)?;
        // serde_json only emits valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Walk `key` segment by segment.
    ///
    /// Returns `None` when a segment is absent or the path ends on a subtree.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        let mut segments = key.split(KEY_SEPARATOR);
        let mut node = self.root.get(segments.next()?)?;

        for segment in segments {
            node = match node {
                Node::Branch(children) => children.get(segment)?,
                Node::Leaf(_) => return None,
            };
        }

        match node {
            Node::Leaf(value) => Some(value.as_str()),
            Node::Branch(_) => None,
        }
    }

    /// Make sure `key` holds a value, writing `placeholder` if it is absent or empty.
    ///
    /// Intermediate objects are created as needed. An existing non-empty
    /// value is never overwritten.
    pub fn ensure(&mut self, key: &str, placeholder: &str) -> Ensured {
        let segments: Vec<&str> = key.split(KEY_SEPARATOR).collect();
        let Some((last, parents)) = segments.split_last() else {
            return Ensured::Blocked;
        };

        let mut current = &mut self.root;
        for segment in parents {
            current = match current
                .entry(segment.to_string())
                .or_insert_with(|| Node::Branch(BTreeMap::new()))
            {
                Node::Branch(children) => children,
                Node::Leaf(_) => return Ensured::Blocked,
            };
        }

        match current.get_mut(*last) {
            None => {
                current.insert(last.to_string(), Node::Leaf(placeholder.to_string()));
                Ensured::Inserted
            }
            Some(Node::Leaf(value)) if value.is_empty() => {
                *value = placeholder.to_string();
                Ensured::Filled
            }
            Some(_) => Ensured::Kept,
        }
    }

    /// Flatten to dot-joined key paths and their string values.
    pub fn leaves(&self) -> BTreeMap<String, String> {
        let mut result = BTreeMap::new();
        collect_leaves(&self.root, "", &mut result);
        result
    }
}

fn collect_leaves(map: &BTreeMap<String, Node>, prefix: &str, result: &mut BTreeMap<String, String>) {
    for (segment, node) in map {
        let path = if prefix.is_empty() {
            segment.clone()
        } else {
            format!("{prefix}{KEY_SEPARATOR}{segment}")
        };
        match node {
            Node::Leaf(value) => {
                result.insert(path, value.clone());
            }
            Node::Branch(children) => collect_leaves(children, &path, result),
        }
    }
}
