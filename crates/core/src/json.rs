//! Tag-checked access to `serde_json::Value` trees.
//!
//! `serde_json::Value` is the JSON node representation consumed by every
//! decoder. This module adds the pieces decoders rely on: a [`Tag`]
//! classification for error reporting, accessors that fail with a
//! `TypeMismatch` when the node has the wrong shape, and field lookup
//! shorthands for hand-written struct decoders.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::decode::Decode;
use crate::error::DecodeError;
use crate::keypath::{parse, parse_optional};
use crate::path::Path;

/// The shape of a JSON node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl Tag {
    pub fn of(value: &Value) -> Tag {
        match value {
            Value::Null => Tag::Null,
            Value::Bool(_) => Tag::Bool,
            Value::Number(_) => Tag::Number,
            Value::String(_) => Tag::String,
            Value::Array(_) => Tag::Array,
            Value::Object(_) => Tag::Object,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Null => "null",
            Tag::Bool => "bool",
            Tag::Number => "number",
            Tag::String => "string",
            Tag::Array => "array",
            Tag::Object => "object",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extension methods on `serde_json::Value` used by decoders.
///
/// The `expect_*` accessors mirror `Value::as_*` but return a
/// `TypeMismatch` error carrying the offending node instead of `None`.
pub trait JsonExt {
    fn tag(&self) -> Tag;
    fn expect_null(&self) -> Result<(), DecodeError>;
    fn expect_bool(&self) -> Result<bool, DecodeError>;
    fn expect_number(&self) -> Result<&Number, DecodeError>;
    fn expect_str(&self) -> Result<&str, DecodeError>;
    fn expect_array(&self) -> Result<&Vec<Value>, DecodeError>;
    fn expect_object(&self) -> Result<&Map<String, Value>, DecodeError>;

    /// Decode the member `key` of an object.
    ///
    /// A missing key is a `MissingKey` error even when `T` is an
    /// `Option`; a present `null` member decodes to `None` in that case.
    fn field<T: Decode>(&self, key: &str) -> Result<T, DecodeError>;

    /// Decode the member `key` of an object, treating a missing key and
    /// a `null` member alike as `None`.
    fn optional_field<T: Decode>(&self, key: &str) -> Result<Option<T>, DecodeError>;

    /// Decode the node found by walking `path` from this node.
    fn at_path<T: Decode>(&self, path: &Path) -> Result<T, DecodeError>;
}

impl JsonExt for Value {
    fn tag(&self) -> Tag {
        Tag::of(self)
    }

    fn expect_null(&self) -> Result<(), DecodeError> {
        match self {
            Value::Null => Ok(()),
            other => Err(DecodeError::type_mismatch("null", other)),
        }
    }

    fn expect_bool(&self) -> Result<bool, DecodeError> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(DecodeError::type_mismatch("bool", other)),
        }
    }

    fn expect_number(&self) -> Result<&Number, DecodeError> {
        match self {
            Value::Number(n) => Ok(n),
            other => Err(DecodeError::type_mismatch("number", other)),
        }
    }

    fn expect_str(&self) -> Result<&str, DecodeError> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(DecodeError::type_mismatch("string", other)),
        }
    }

    fn expect_array(&self) -> Result<&Vec<Value>, DecodeError> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(DecodeError::type_mismatch("array", other)),
        }
    }

    fn expect_object(&self) -> Result<&Map<String, Value>, DecodeError> {
        match self {
            Value::Object(map) => Ok(map),
            other => Err(DecodeError::type_mismatch("object", other)),
        }
    }

    fn field<T: Decode>(&self, key: &str) -> Result<T, DecodeError> {
        parse(self, &Path::from(key))
    }

    fn optional_field<T: Decode>(&self, key: &str) -> Result<Option<T>, DecodeError> {
        parse_optional(self, &Path::from(key))
    }

    fn at_path<T: Decode>(&self, path: &Path) -> Result<T, DecodeError> {
        parse(self, path)
    }
}

/// Build a JSON tree from a native object graph.
///
/// Lets JSON-shaped input originate somewhere other than parsed text,
/// e.g. a struct deriving `Serialize` or a `HashMap` built in code.
pub fn from_object<T: Serialize + ?Sized>(object: &T) -> Result<Value, DecodeError> {
    serde_json::to_value(object).map_err(|err| DecodeError::custom(err.to_string()))
}

/// Nesting depth of a tree: scalars and empty containers are depth 1.
///
/// Walks the tree with an explicit stack so arbitrarily deep input
/// cannot overflow the call stack.
pub fn depth(value: &Value) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(value, 1usize)];
    while let Some((node, level)) = stack.pop() {
        deepest = deepest.max(level);
        match node {
            Value::Array(items) => stack.extend(items.iter().map(|item| (item, level + 1))),
            Value::Object(map) => stack.extend(map.values().map(|item| (item, level + 1))),
            _ => {}
        }
    }
    deepest
}
