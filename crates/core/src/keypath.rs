//! Decoding a value found by walking a key path.

use serde_json::Value;

use crate::combinators::decode_optional;
use crate::decode::Decode;
use crate::error::{DecodeError, ErrorKind};
use crate::json::JsonExt;
use crate::path::{Path, PathSegment};

fn step<'a>(current: &'a Value, segment: &PathSegment) -> Result<&'a Value, DecodeError> {
    match segment {
        PathSegment::Key(key) => current
            .expect_object()?
            .get(key)
            .ok_or_else(|| DecodeError::missing_key(key.as_str())),
        PathSegment::Index(index) => {
            let items = current.expect_array()?;
            items
                .get(*index)
                .ok_or_else(|| DecodeError::index_out_of_range(*index, items.len()))
        }
    }
}

/// Decode the node at `path` below `json`.
///
/// A missing key, short array or wrong container shape along the way
/// fails with the path walked so far; a failure decoding the node itself
/// carries the full path.
pub fn parse<T: Decode>(json: &Value, path: &Path) -> Result<T, DecodeError> {
    let mut current = json;
    for (depth, segment) in path.iter().enumerate() {
        current = step(current, segment).map_err(|err| err.within(&path.prefix(depth)))?;
    }
    T::decode(current).map_err(|err| err.within(path))
}

/// Like [`parse`], but yields `None` when the path runs out early.
///
/// A missing key, an out-of-range index, or a `null` anywhere along the
/// path (the target included) gives `None`. A container of the wrong
/// shape, or a target that fails to decode, is still an error.
pub fn parse_optional<T: Decode>(json: &Value, path: &Path) -> Result<Option<T>, DecodeError> {
    let mut current = json;
    for (depth, segment) in path.iter().enumerate() {
        if current.is_null() {
            return Ok(None);
        }
        match step(current, segment) {
            Ok(next) => current = next,
            Err(err) if is_absent(&err) => return Ok(None),
            Err(err) => return Err(err.within(&path.prefix(depth))),
        }
    }
    decode_optional(current, T::decode).map_err(|err| err.within(path))
}

fn is_absent(err: &DecodeError) -> bool {
    matches!(
        err.kind(),
        ErrorKind::MissingKey { .. } | ErrorKind::IndexOutOfRange { .. }
    )
}
