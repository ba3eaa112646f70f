//! Decoders for container types, derived from the decoder of their
//! elements.
//!
//! The free functions take the element decoder as a closure so callers
//! can plug in something other than `T::decode`; the `Decode` impls at
//! the bottom wire them to the element type's own impl.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};

use serde_json::Value;
use tracing::trace;

use crate::decode::Decode;
use crate::error::DecodeError;
use crate::json::JsonExt;

/// Run `decoder`, turning a failure into `None`.
///
/// The error is dropped. This is the only place decode errors are
/// swallowed; lenient arrays and the trial-decode resolver go through it.
pub fn attempt<T, F>(decoder: F, json: &Value) -> Option<T>
where
    F: FnOnce(&Value) -> Result<T, DecodeError>,
{
    match decoder(json) {
        Ok(value) => Some(value),
        Err(err) => {
            trace!(error = %err, "decode attempt failed, substituting absent");
            None
        }
    }
}

/// Keep the present values of `items`, in order.
pub fn compact<T, I>(items: I) -> Vec<T>
where
    I: IntoIterator<Item = Option<T>>,
{
    items.into_iter().flatten().collect()
}

/// `null` decodes to `None`; anything else goes to `decoder`.
///
/// Errors from `decoder` pass through untouched.
pub fn decode_optional<T, F>(json: &Value, decoder: F) -> Result<Option<T>, DecodeError>
where
    F: FnOnce(&Value) -> Result<T, DecodeError>,
{
    if json.is_null() {
        return Ok(None);
    }
    decoder(json).map(Some)
}

/// Decode every element of an array in index order.
///
/// The first failing element aborts the whole decode; its error is
/// annotated with the element index.
pub fn decode_array<T, F>(json: &Value, decoder: F) -> Result<Vec<T>, DecodeError>
where
    F: FnMut(&Value) -> Result<T, DecodeError>,
{
    collect_array(json, decoder)
}

/// Decode the elements of an array that decode, dropping the rest.
///
/// Failing elements are skipped without a trace in the result; use
/// [`decode_array`] when every element matters.
pub fn decode_array_lenient<T, F>(json: &Value, mut decoder: F) -> Result<Vec<T>, DecodeError>
where
    F: FnMut(&Value) -> Result<T, DecodeError>,
{
    let items = json.expect_array()?;
    let decoded = items
        .iter()
        .enumerate()
        .map(|(index, item)| attempt(|item| decoder(item).map_err(|err| err.at(index)), item));
    Ok(compact(decoded))
}

/// `Vec<T>` decode with the lenient switch exposed.
pub fn decode_vec<T: Decode>(json: &Value, lenient: bool) -> Result<Vec<T>, DecodeError> {
    if lenient {
        decode_array_lenient(json, T::decode)
    } else {
        decode_array(json, T::decode)
    }
}

/// Decode every member of an object into a key/value collection.
///
/// Keys are handed to `key_decoder` as JSON strings. A failing key or
/// value aborts the decode with the member's key in the path. Members are
/// visited in `serde_json::Map` order.
///
/// The `Decode` impls for `BTreeMap` and `HashMap` use `K::decode` on that
/// string, so a numeric key type such as `u32` always fails there. Parse
/// such keys here instead, or give the key a newtype that reads strings:
///
/// ```
/// use std::collections::BTreeMap;
/// use decodable::combinators::decode_map;
/// use decodable::{Decode, DecodeError, JsonExt};
/// use serde_json::json;
///
/// let ports: BTreeMap<u16, String> = decode_map(
///     &json!({"80": "http", "443": "https"}),
///     |key| -> Result<u16, DecodeError> {
///         let s = key.expect_str()?;
///         s.parse()
///             .map_err(|_| DecodeError::invalid_value("port", "not a number", key))
///     },
///     String::decode,
/// )
/// .unwrap();
/// assert_eq!(ports[&443], "https");
/// ```
pub fn decode_map<M, K, V, FK, FV>(
    json: &Value,
    mut key_decoder: FK,
    mut value_decoder: FV,
) -> Result<M, DecodeError>
where
    M: FromIterator<(K, V)>,
    FK: FnMut(&Value) -> Result<K, DecodeError>,
    FV: FnMut(&Value) -> Result<V, DecodeError>,
{
    let members = json.expect_object()?;
    members
        .iter()
        .map(|(key, value)| {
            let k = key_decoder(&Value::String(key.clone())).map_err(|err| err.at(key))?;
            let v = value_decoder(value).map_err(|err| err.at(key))?;
            Ok((k, v))
        })
        .collect()
}

fn collect_array<C, T, F>(json: &Value, mut decoder: F) -> Result<C, DecodeError>
where
    C: FromIterator<T>,
    F: FnMut(&Value) -> Result<T, DecodeError>,
{
    let items = json.expect_array()?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| decoder(item).map_err(|err| err.at(index)))
        .collect()
}

/// An array decoded leniently: elements that fail to decode are dropped.
///
/// Use as a field type to opt a single member into lenient decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lenient<T>(pub Vec<T>);

impl<T> Lenient<T> {
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T> std::ops::Deref for Lenient<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Vec<T> {
        &self.0
    }
}

impl<T: Decode> Decode for Lenient<T> {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        decode_array_lenient(json, T::decode).map(Lenient)
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        decode_optional(json, T::decode)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        decode_array(json, T::decode)
    }
}

impl<T: Decode> Decode for VecDeque<T> {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        collect_array(json, T::decode)
    }
}

impl<T: Decode + Ord> Decode for BTreeSet<T> {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        collect_array(json, T::decode)
    }
}

impl<T, S> Decode for HashSet<T, S>
where
    T: Decode + Eq + Hash,
    S: BuildHasher + Default,
{
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        collect_array(json, T::decode)
    }
}

impl<K, V> Decode for BTreeMap<K, V>
where
    K: Decode + Ord,
    V: Decode,
{
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        decode_map(json, K::decode, V::decode)
    }
}

impl<K, V, S> Decode for HashMap<K, V, S>
where
    K: Decode + Eq + Hash,
    V: Decode,
    S: BuildHasher + Default,
{
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        decode_map(json, K::decode, V::decode)
    }
}
