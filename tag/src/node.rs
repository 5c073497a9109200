use std::{collections::BTreeMap, fmt};

use serde_json::Value;

use crate::{Id, Tag, join};

/// One node of a key hierarchy built from a nested shape.
///
/// Every node knows its path from the root and can render it as an [`Id`] or
/// a [`Tag`], optionally extended with extra segments:
///
/// ```text
/// { "user": { "byId": null } }
///
/// root.child("user")            -> "user"
/// root.at(["user", "byId"])     -> "user:byId"
///     .id_with([42])            -> "user:byId:42"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Node {
    path: Vec<String>,
    children: BTreeMap<String, Node>,
}

impl Node {
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds the hierarchy from a JSON shape whose leaves are `null`.
    pub fn from_shape(shape: &Value) -> Result<Self, ShapeError> {
        Self::build(shape, Vec::new())
    }

    fn build(shape: &Value, path: Vec<String>) -> Result<Self, ShapeError> {
        let Value::Object(fields) = shape else {
            return Err(ShapeError::NotAnObject {
                path: join(&path),
                found: kind(shape),
            });
        };

        let mut children = BTreeMap::new();
        for (name, child) in fields {
            let mut child_path = path.clone();
            child_path.push(name.clone());

            let node = match child {
                Value::Null => Node {
                    path: child_path,
                    children: BTreeMap::new(),
                },
                Value::Object(_) => Self::build(child, child_path)?,
                other => {
                    return Err(ShapeError::InvalidLeaf {
                        path: join(&child_path),
                        found: kind(other),
                    });
                }
            };
            children.insert(name.clone(), node);
        }

        Ok(Node { path, children })
    }

    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.get(name)
    }

    /// Walks down several levels at once.
    pub fn at<I, S>(&self, names: I) -> Option<&Node>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .try_fold(self, |node, name| node.child(name.as_ref()))
    }

    pub fn children(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.children.iter().map(|(name, node)| (name.as_str(), node))
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn id(&self) -> Id {
        Id::new(join(&self.path))
    }

    pub fn id_with<I>(&self, segments: I) -> Id
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        Id::new(self.key_with(segments))
    }

    pub fn tag(&self) -> Tag {
        Tag::new(join(&self.path))
    }

    pub fn tag_with<I>(&self, segments: I) -> Tag
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        Tag::new(self.key_with(segments))
    }

    fn key_with<I>(&self, segments: I) -> String
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        join(
            self.path
                .iter()
                .cloned()
                .chain(segments.into_iter().map(|segment| segment.to_string())),
        )
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("shape at '{path}' must be an object :: found {found}")]
    NotAnObject { path: String, found: &'static str },

    #[error("invalid leaf at '{path}' :: expected null or an object, found {found}")]
    InvalidLeaf { path: String, found: &'static str },
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
