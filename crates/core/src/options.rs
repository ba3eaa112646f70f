//! Decode-time configuration.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{DecodeError, ErrorKind};
use crate::json::depth;

/// Default nesting limit, the same as serde_json's parser recursion limit.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options for [`crate::decode_with`].
///
/// Deserializable so it can live in a caller's configuration file. A
/// missing `max_depth` takes the default; an explicit `null` disables the
/// limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Reject input nested deeper than this before decoding starts.
    ///
    /// Decoding recurses once per level, so this bounds stack use on
    /// untrusted input.
    pub max_depth: Option<usize>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl DecodeOptions {
    /// No depth limit.
    pub fn unbounded() -> Self {
        DecodeOptions { max_depth: None }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Check `json` against the configured limits.
    pub fn check(&self, json: &Value) -> Result<(), DecodeError> {
        if let Some(limit) = self.max_depth {
            let actual = depth(json);
            if actual > limit {
                debug!(depth = actual, limit, "rejecting input nested past the configured limit");
                return Err(DecodeError::new(ErrorKind::DepthLimitExceeded { limit }));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_limit() {
        assert_eq!(DecodeOptions::default().max_depth, Some(DEFAULT_MAX_DEPTH));
        assert_eq!(DecodeOptions::unbounded().max_depth, None);
    }

    #[test]
    fn check_enforces_limit() {
        let options = DecodeOptions::default().with_max_depth(2);
        assert!(options.check(&json!([1, 2])).is_ok());
        let err = options.check(&json!([[1]])).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::DepthLimitExceeded { limit: 2 });
        assert!(DecodeOptions::unbounded().check(&json!([[[[[]]]]])).is_ok());
    }

    #[test]
    fn deserializes_from_config() {
        let options: DecodeOptions = serde_json::from_value(json!({})).unwrap();
        assert_eq!(options, DecodeOptions::default());
        let options: DecodeOptions = serde_json::from_value(json!({"max_depth": 16})).unwrap();
        assert_eq!(options.max_depth, Some(16));
        let options: DecodeOptions = serde_json::from_value(json!({"max_depth": null})).unwrap();
        assert_eq!(options, DecodeOptions::unbounded());
    }
}
