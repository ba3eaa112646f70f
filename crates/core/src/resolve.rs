//! Trial decoding: try candidate types in order, keep the first that fits.
//!
//! Every candidate but the last is tried through [`attempt`], so its
//! error is discarded. The last candidate is the fallback shape and is
//! decoded without suppression: if nothing matched, its error is the one
//! the caller sees.
//!
//! Two flavours are provided. [`decode_first_of`] works on closures that
//! all produce one type (typically an enum wrapping each shape).
//! [`decode_as_one_of`] works on [`Candidate`] descriptors and hands back
//! a [`Decoded`] box for the caller to downcast.

use std::any::{type_name, Any};
use std::fmt;

use serde_json::Value;
use tracing::trace;

use crate::combinators::attempt;
use crate::decode::Decode;
use crate::error::DecodeError;
use crate::json::JsonExt;

/// Resolve `json` against `candidates` in order.
///
/// # Panics
///
/// Panics if `candidates` is empty. An empty list is a bug in the caller,
/// not a property of the input.
pub fn decode_first_of<T, F>(json: &Value, candidates: &[F]) -> Result<T, DecodeError>
where
    F: Fn(&Value) -> Result<T, DecodeError>,
{
    let Some((last, rest)) = candidates.split_last() else {
        panic!("decode_first_of called with an empty candidate list");
    };
    for (position, candidate) in rest.iter().enumerate() {
        if let Some(value) = attempt(candidate, json) {
            return Ok(value);
        }
        trace!(position, "candidate rejected");
    }
    last(json)
}

/// Resolve each element of an array independently with
/// [`decode_first_of`].
///
/// A failing element aborts the whole array with its index in the path.
///
/// # Panics
///
/// Panics if `candidates` is empty, whatever `json` holds.
pub fn decode_array_first_of<T, F>(json: &Value, candidates: &[F]) -> Result<Vec<T>, DecodeError>
where
    F: Fn(&Value) -> Result<T, DecodeError>,
{
    assert!(
        !candidates.is_empty(),
        "decode_array_first_of called with an empty candidate list"
    );
    json.expect_array()?
        .iter()
        .enumerate()
        .map(|(index, item)| decode_first_of(item, candidates).map_err(|err| err.at(index)))
        .collect()
}

/// A successfully decoded value of a type known only at runtime.
pub struct Decoded {
    value: Box<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Decoded {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Decoded {
            value: Box::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Name of the candidate type that produced this value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Take the value out as `T`, or get `self` back if it is another type.
    pub fn downcast<T: Any>(self) -> Result<T, Decoded> {
        let type_name = self.type_name;
        match self.value.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(value) => Err(Decoded { value, type_name }),
        }
    }
}

impl fmt::Debug for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoded")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// A decodable type described at runtime.
#[derive(Clone, Copy)]
pub struct Candidate {
    name: &'static str,
    decode: fn(&Value) -> Result<Decoded, DecodeError>,
}

impl Candidate {
    /// The candidate that decodes with `T`'s `Decode` impl.
    pub fn of<T: Decode + Any + Send + Sync>() -> Self {
        Candidate {
            name: type_name::<T>(),
            decode: decode_boxed::<T>,
        }
    }

    /// A candidate with a hand-written decode function.
    pub fn new(name: &'static str, decode: fn(&Value) -> Result<Decoded, DecodeError>) -> Self {
        Candidate { name, decode }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn decode(&self, json: &Value) -> Result<Decoded, DecodeError> {
        (self.decode)(json)
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Candidate").field(&self.name).finish()
    }
}

fn decode_boxed<T: Decode + Any + Send + Sync>(json: &Value) -> Result<Decoded, DecodeError> {
    T::decode(json).map(Decoded::new)
}

/// Decode `json` as the first of `candidates` that accepts it.
///
/// ```
/// use decodable::{decode_as_one_of, Candidate};
/// use serde_json::json;
///
/// let decoded = decode_as_one_of(&json!("42"), &[Candidate::of::<u32>(), Candidate::of::<String>()])
///     .unwrap();
/// assert_eq!(decoded.downcast::<String>().unwrap(), "42");
/// ```
///
/// # Panics
///
/// Panics if `candidates` is empty.
pub fn decode_as_one_of(json: &Value, candidates: &[Candidate]) -> Result<Decoded, DecodeError> {
    let Some((last, rest)) = candidates.split_last() else {
        panic!("decode_as_one_of called with an empty candidate list");
    };
    for candidate in rest {
        if let Some(value) = attempt(|json| candidate.decode(json), json) {
            return Ok(value);
        }
        trace!(candidate = candidate.name(), "candidate rejected");
    }
    last.decode(json)
}

/// Decode each element of an array with [`decode_as_one_of`].
///
/// # Panics
///
/// Panics if `candidates` is empty, whatever `json` holds.
pub fn decode_array_as_one_of(
    json: &Value,
    candidates: &[Candidate],
) -> Result<Vec<Decoded>, DecodeError> {
    assert!(
        !candidates.is_empty(),
        "decode_array_as_one_of called with an empty candidate list"
    );
    json.expect_array()?
        .iter()
        .enumerate()
        .map(|(index, item)| decode_as_one_of(item, candidates).map_err(|err| err.at(index)))
        .collect()
}
