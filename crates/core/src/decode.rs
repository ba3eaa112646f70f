//! The `Decode` contract and its implementations for scalar types.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::json::JsonExt;

/// A type that can be built from a JSON tree.
///
/// Implement this once per type. Composite types decode their members
/// with [`JsonExt::field`] / [`JsonExt::optional_field`] and let the
/// container impls handle `Option`, `Vec`, maps and the rest.
///
/// ```
/// use decodable::{Decode, DecodeError, JsonExt};
/// use serde_json::{json, Value};
///
/// struct Repository {
///     name: String,
///     stars: u32,
///     topics: Vec<String>,
///     homepage: Option<String>,
/// }
///
/// impl Decode for Repository {
///     fn decode(json: &Value) -> Result<Self, DecodeError> {
///         Ok(Repository {
///             name: json.field("name")?,
///             stars: json.field("stars")?,
///             topics: json.field("topics")?,
///             homepage: json.optional_field("homepage")?,
///         })
///     }
/// }
///
/// let repo: Repository = decodable::decode(&json!({
///     "name": "decodable",
///     "stars": 12,
///     "topics": ["json"]
/// }))
/// .unwrap();
/// assert_eq!(repo.stars, 12);
/// assert!(repo.homepage.is_none());
/// ```
pub trait Decode: Sized {
    fn decode(json: &Value) -> Result<Self, DecodeError>;
}

impl Decode for Value {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        Ok(json.clone())
    }
}

impl Decode for Map<String, Value> {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        json.expect_object().cloned()
    }
}

impl Decode for () {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        json.expect_null()
    }
}

impl Decode for bool {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        json.expect_bool()
    }
}

impl Decode for String {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        json.expect_str().map(str::to_owned)
    }
}

impl Decode for char {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        let s = json.expect_str()?;
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(DecodeError::invalid_value(
                "char",
                format!("expected a single character, found {} characters", s.chars().count()),
                json,
            )),
        }
    }
}

impl Decode for f64 {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        let n = json.expect_number()?;
        n.as_f64()
            .ok_or_else(|| DecodeError::invalid_value("f64", format!("{} is not representable", n), json))
    }
}

impl Decode for f32 {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        let wide = f64::decode(json)?;
        let narrow = wide as f32;
        if narrow.is_infinite() {
            return Err(DecodeError::invalid_value(
                "f32",
                format!("{} is out of range", wide),
                json,
            ));
        }
        Ok(narrow)
    }
}

/// Integral JSON numbers only; `1.0` is rejected like `1.5`.
fn integer<T>(json: &Value, expected: &'static str) -> Result<T, DecodeError>
where
    T: TryFrom<u64> + TryFrom<i64>,
{
    let n = json.expect_number()?;
    let converted = if let Some(v) = n.as_u64() {
        <T as TryFrom<u64>>::try_from(v).ok()
    } else if let Some(v) = n.as_i64() {
        <T as TryFrom<i64>>::try_from(v).ok()
    } else {
        return Err(DecodeError::invalid_value(
            expected,
            format!("{} is not an integer", n),
            json,
        ));
    };
    converted.ok_or_else(|| DecodeError::invalid_value(expected, format!("{} is out of range", n), json))
}

macro_rules! impl_decode_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Decode for $ty {
                fn decode(json: &Value) -> Result<Self, DecodeError> {
                    integer(json, stringify!($ty))
                }
            }
        )*
    };
}

impl_decode_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl<T: Decode> Decode for Box<T> {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        T::decode(json).map(Box::new)
    }
}

impl<T: Decode> Decode for Arc<T> {
    fn decode(json: &Value) -> Result<Self, DecodeError> {
        T::decode(json).map(Arc::new)
    }
}

/// Decode `items[index]`, annotating failures with the index.
pub(crate) fn element<T: Decode>(items: &[Value], index: usize) -> Result<T, DecodeError> {
    let item = items
        .get(index)
        .ok_or_else(|| DecodeError::index_out_of_range(index, items.len()))?;
    T::decode(item).map_err(|err| err.at(index))
}

// Tuples decode from fixed-length arrays.
macro_rules! impl_decode_tuple {
    ($len:expr => $($idx:tt $name:ident),+) => {
        impl<$($name: Decode),+> Decode for ($($name,)+) {
            fn decode(json: &Value) -> Result<Self, DecodeError> {
                let items = json.expect_array()?;
                if items.len() > $len {
                    return Err(DecodeError::invalid_value(
                        "tuple",
                        format!("expected {} elements, found {}", $len, items.len()),
                        json,
                    ));
                }
                Ok(($(element::<$name>(items, $idx)?,)+))
            }
        }
    };
}

impl_decode_tuple!(1 => 0 A);
impl_decode_tuple!(2 => 0 A, 1 B);
impl_decode_tuple!(3 => 0 A, 1 B, 2 C);
impl_decode_tuple!(4 => 0 A, 1 B, 2 C, 3 D);

/// Decode a raw value `R` and convert it into `T`.
///
/// Suited to enums backed by strings or integers: implement
/// `TryFrom<String>` (or `TryFrom<i64>`, ...) for the enum and call this
/// from its `Decode` impl. A raw value that decodes but converts to
/// nothing fails with `ErrorKind::RawValue`.
pub fn decode_raw<R, T>(json: &Value) -> Result<T, DecodeError>
where
    R: Decode + Clone + std::fmt::Debug,
    T: TryFrom<R>,
{
    let raw = R::decode(json)?;
    T::try_from(raw.clone()).map_err(|_| DecodeError::raw_value(format!("{:?}", raw), json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::json::Tag;
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    enum Color {
        Red,
        Green,
    }

    impl TryFrom<String> for Color {
        type Error = ();

        fn try_from(raw: String) -> Result<Self, ()> {
            match raw.as_str() {
                "red" => Ok(Color::Red),
                "green" => Ok(Color::Green),
                _ => Err(()),
            }
        }
    }

    impl Decode for Color {
        fn decode(json: &Value) -> Result<Self, DecodeError> {
            decode_raw::<String, Color>(json)
        }
    }

    #[test]
    fn scalars() {
        assert!(bool::decode(&json!(true)).unwrap());
        assert_eq!(String::decode(&json!("hi")).unwrap(), "hi");
        assert_eq!(char::decode(&json!("é")).unwrap(), 'é');
        assert_eq!(f64::decode(&json!(2.5)).unwrap(), 2.5);
        assert_eq!(f64::decode(&json!(3)).unwrap(), 3.0);
        assert_eq!(f32::decode(&json!(0.5)).unwrap(), 0.5);
        assert!(<()>::decode(&json!(null)).is_ok());
        assert_eq!(Value::decode(&json!({"a": [1]})).unwrap(), json!({"a": [1]}));
    }

    #[test]
    fn scalar_type_mismatch() {
        let err = String::decode(&json!(5)).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::TypeMismatch {
                expected: "string",
                actual: Tag::Number
            }
        );
        assert!(bool::decode(&json!("true")).is_err());
        assert!(<()>::decode(&json!(0)).is_err());
    }

    #[test]
    fn integers_are_range_checked() {
        assert_eq!(u8::decode(&json!(255)).unwrap(), 255);
        assert_eq!(i64::decode(&json!(-7)).unwrap(), -7);
        assert_eq!(u64::decode(&json!(u64::MAX)).unwrap(), u64::MAX);
        assert_eq!(i128::decode(&json!(u64::MAX)).unwrap(), u64::MAX as i128);

        let err = u8::decode(&json!(256)).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::InvalidValue {
                expected: "u8",
                reason: "256 is out of range".to_string()
            }
        );
        assert!(u32::decode(&json!(-1)).is_err());
        assert!(i64::decode(&json!(u64::MAX)).is_err());
    }

    #[test]
    fn integers_reject_fractions() {
        let err = i32::decode(&json!(1.5)).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::InvalidValue {
                expected: "i32",
                reason: "1.5 is not an integer".to_string()
            }
        );
    }

    #[test]
    fn char_requires_exactly_one_character() {
        assert!(char::decode(&json!("")).is_err());
        assert!(char::decode(&json!("ab")).is_err());
    }

    #[test]
    fn f32_overflow_is_rejected() {
        assert!(f32::decode(&json!(1e300)).is_err());
    }

    #[test]
    fn tuples_decode_from_fixed_arrays() {
        let (a, b): (String, u8) = Decode::decode(&json!(["x", 2])).unwrap();
        assert_eq!((a.as_str(), b), ("x", 2));

        let err = <(u8, u8, u8)>::decode(&json!([1, 2])).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::IndexOutOfRange { index: 2, len: 2 });

        let err = <(u8, u8)>::decode(&json!([1, "two"])).unwrap_err();
        assert_eq!(err.path().to_string(), "[1]");

        assert!(<(u8,)>::decode(&json!([1, 2])).is_err());
    }

    #[test]
    fn raw_values_map_to_variants() {
        assert_eq!(Color::decode(&json!("red")).unwrap(), Color::Red);
        assert_eq!(Color::decode(&json!("green")).unwrap(), Color::Green);

        let err = Color::decode(&json!("teal")).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::RawValue {
                raw: "\"teal\"".to_string()
            }
        );
        assert_eq!(err.value(), Some(&json!("teal")));

        let err = Color::decode(&json!(1)).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::TypeMismatch { .. }));
    }

    #[test]
    fn boxed_values() {
        assert_eq!(*Box::<u8>::decode(&json!(4)).unwrap(), 4);
        assert_eq!(*Arc::<String>::decode(&json!("s")).unwrap(), "s");
    }
}
