use std::fmt;

use serde_json::Value;

use crate::json::Tag;
use crate::path::{Path, PathSegment};

/// What went wrong while decoding, independent of where.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// The node has a different shape than the decoder requires.
    #[error("expected {expected}, found {actual}")]
    TypeMismatch { expected: &'static str, actual: Tag },

    /// A required object member is absent.
    #[error("missing key '{key}'")]
    MissingKey { key: String },

    /// An array is shorter than the index being read.
    #[error("index {index} out of range for array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The node has the right shape but an unusable value
    /// (integer overflow, malformed date, and the like).
    #[error("invalid {expected}: {reason}")]
    InvalidValue {
        expected: &'static str,
        reason: String,
    },

    /// A raw value decoded fine but maps to no variant of the target.
    #[error("no variant matches raw value {raw}")]
    RawValue { raw: String },

    /// Input nesting exceeds the configured limit.
    #[error("nesting depth exceeds limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    /// Raised by hand-written decoders.
    #[error("{0}")]
    Custom(String),
}

/// A decode failure with the location it occurred at.
///
/// Combinators that descend into a member or element prepend that step
/// with [`DecodeError::at`] as the error unwinds, so by the time it
/// reaches the caller [`DecodeError::path`] runs from the root of the
/// decoded tree to the failing node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    kind: ErrorKind,
    path: Path,
    value: Option<Box<Value>>,
}

impl DecodeError {
    pub fn new(kind: ErrorKind) -> Self {
        DecodeError {
            kind,
            path: Path::new(),
            value: None,
        }
    }

    pub fn type_mismatch(expected: &'static str, actual: &Value) -> Self {
        DecodeError::new(ErrorKind::TypeMismatch {
            expected,
            actual: Tag::of(actual),
        })
        .with_value(actual)
    }

    pub fn missing_key(key: impl Into<String>) -> Self {
        DecodeError::new(ErrorKind::MissingKey { key: key.into() })
    }

    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        DecodeError::new(ErrorKind::IndexOutOfRange { index, len })
    }

    pub fn invalid_value(expected: &'static str, reason: impl Into<String>, actual: &Value) -> Self {
        DecodeError::new(ErrorKind::InvalidValue {
            expected,
            reason: reason.into(),
        })
        .with_value(actual)
    }

    pub fn raw_value(raw: impl fmt::Display, actual: &Value) -> Self {
        DecodeError::new(ErrorKind::RawValue {
            raw: raw.to_string(),
        })
        .with_value(actual)
    }

    pub fn custom(message: impl Into<String>) -> Self {
        DecodeError::new(ErrorKind::Custom(message.into()))
    }

    /// Attach the offending node.
    pub fn with_value(mut self, value: &Value) -> Self {
        self.value = Some(Box::new(value.clone()));
        self
    }

    /// Prepend one traversal step to the path.
    pub fn at(mut self, segment: impl Into<PathSegment>) -> Self {
        self.path.push_front(segment.into());
        self
    }

    /// Prepend every step of `prefix`, keeping its order.
    pub fn within(mut self, prefix: &Path) -> Self {
        for segment in prefix.iter().rev() {
            self.path.push_front(segment.clone());
        }
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The node that failed to decode, when the decoder recorded it.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_deref()
    }

    /// True when the failure happened below the node passed to the
    /// outermost decoder.
    pub fn is_nested(&self) -> bool {
        !self.path.is_empty()
    }

    /// The failing location as a JSON Pointer.
    pub fn pointer(&self) -> String {
        self.path.to_pointer()
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "at {}: {}", self.path, self.kind)
        }
    }
}

impl std::error::Error for DecodeError {}

impl From<ErrorKind> for DecodeError {
    fn from(kind: ErrorKind) -> Self {
        DecodeError::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn path_grows_at_the_front() {
        let err = DecodeError::missing_key("id").at(3usize).at("items").at("order");
        assert_eq!(err.path().to_string(), "order.items[3]");
        assert_eq!(err.pointer(), "/order/items/3");
        assert_eq!(err.to_string(), "at order.items[3]: missing key 'id'");
        assert!(err.is_nested());
    }

    #[test]
    fn within_keeps_prefix_order() {
        let err = DecodeError::custom("bad").at("leaf");
        let err = err.within(&crate::path!["a", 0usize]);
        assert_eq!(err.path().to_string(), "a[0].leaf");
    }

    #[test]
    fn root_errors_render_without_location() {
        let err = DecodeError::type_mismatch("array", &json!({"a": 1}));
        assert_eq!(err.to_string(), "expected array, found object");
        assert!(!err.is_nested());
        assert_eq!(err.value(), Some(&json!({"a": 1})));
    }

    #[test]
    fn kind_messages() {
        assert_eq!(
            ErrorKind::IndexOutOfRange { index: 4, len: 2 }.to_string(),
            "index 4 out of range for array of length 2"
        );
        assert_eq!(
            ErrorKind::RawValue {
                raw: "\"teal\"".to_string()
            }
            .to_string(),
            "no variant matches raw value \"teal\""
        );
        assert_eq!(
            ErrorKind::DepthLimitExceeded { limit: 8 }.to_string(),
            "nesting depth exceeds limit of 8"
        );
    }
}
