//! decodable: type-driven decoding of `serde_json::Value` trees.
//!
//! A caller holding a parsed JSON tree asks for a type and gets a typed
//! value or a [`DecodeError`] that names where in the tree decoding went
//! wrong. Each type says how to build itself once, by implementing
//! [`Decode`]; containers (`Option`, `Vec`, maps, sets, tuples) derive
//! their decoding from their element types.
//!
//! # Public API
//!
//! - [`decode()`] / [`decode_with()`] -- entry points
//! - [`Decode`] -- the per-type decode contract
//! - [`JsonExt`] -- tag-checked accessors and `field` lookups on `Value`
//! - [`combinators`] -- optional / array / lenient array / map decoders
//! - [`parse()`] / [`parse_optional()`] with [`Path`] and [`path!`] --
//!   decode a value deep inside a tree
//! - [`decode_as_one_of()`] / [`decode_array_as_one_of()`] -- try several
//!   candidate types in order, keeping the first that decodes
//! - [`DecodeOptions`] -- nesting limit for untrusted input
//!
//! Decoding never mutates the input and keeps no state between calls, so
//! one tree can be decoded from several threads at once.

pub mod combinators;
pub mod decode;
pub mod error;
mod formats;
pub mod json;
pub mod keypath;
pub mod options;
pub mod path;
pub mod resolve;

// ── Convenience re-exports ───────────────────────────────────────────

pub use combinators::{decode_vec, Lenient};
pub use decode::{decode_raw, Decode};
pub use error::{DecodeError, ErrorKind};
pub use json::{from_object, JsonExt, Tag};
pub use keypath::{parse, parse_optional};
pub use options::{DecodeOptions, DEFAULT_MAX_DEPTH};
pub use path::{Path, PathSegment};
pub use resolve::{
    decode_array_as_one_of, decode_array_first_of, decode_as_one_of, decode_first_of, Candidate,
    Decoded,
};

use serde_json::Value;

/// Decode `json` as a `T`.
pub fn decode<T: Decode>(json: &Value) -> Result<T, DecodeError> {
    T::decode(json)
}

/// Decode `json` as a `T` after checking it against `options`.
///
/// Use this for input from untrusted sources: the nesting check runs
/// without recursion, so a hostile tree is rejected before the recursive
/// decode could exhaust the stack.
pub fn decode_with<T: Decode>(json: &Value, options: &DecodeOptions) -> Result<T, DecodeError> {
    options.check(json)?;
    T::decode(json)
}
