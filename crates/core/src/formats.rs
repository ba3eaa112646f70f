//! Decoders for date and decimal types, behind the `time` and `decimal`
//! features.

#[cfg(feature = "time")]
mod dates {
    use serde_json::Value;
    use time::format_description::well_known::Rfc3339;
    use time::macros::format_description;
    use time::{Date, OffsetDateTime};

    use crate::decode::Decode;
    use crate::error::DecodeError;
    use crate::json::JsonExt;

    /// RFC 3339 timestamps, e.g. `2024-05-01T12:00:00Z`.
    impl Decode for OffsetDateTime {
        fn decode(json: &Value) -> Result<Self, DecodeError> {
            let s = json.expect_str()?;
            OffsetDateTime::parse(s, &Rfc3339)
                .map_err(|err| DecodeError::invalid_value("RFC 3339 timestamp", err.to_string(), json))
        }
    }

    /// Calendar dates in `YYYY-MM-DD` form.
    impl Decode for Date {
        fn decode(json: &Value) -> Result<Self, DecodeError> {
            let s = json.expect_str()?;
            Date::parse(s, format_description!("[year]-[month]-[day]"))
                .map_err(|err| DecodeError::invalid_value("date", err.to_string(), json))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::error::ErrorKind;
        use serde_json::json;
        use time::Month;

        #[test]
        fn timestamp() {
            let ts = OffsetDateTime::decode(&json!("2024-05-01T12:30:00+02:00")).unwrap();
            assert_eq!(ts.year(), 2024);
            assert_eq!(ts.hour(), 12);
            assert_eq!(ts.offset().whole_hours(), 2);
        }

        #[test]
        fn malformed_timestamp() {
            let err = OffsetDateTime::decode(&json!("yesterday")).unwrap_err();
            assert!(matches!(
                err.kind(),
                ErrorKind::InvalidValue {
                    expected: "RFC 3339 timestamp",
                    ..
                }
            ));
            assert!(OffsetDateTime::decode(&json!(1714566600)).is_err());
        }

        #[test]
        fn date() {
            let date = Date::decode(&json!("2023-02-28")).unwrap();
            assert_eq!(date.month(), Month::February);
            assert_eq!(date.day(), 28);
            assert!(Date::decode(&json!("2023-02-30")).is_err());
        }
    }
}

#[cfg(feature = "decimal")]
mod decimal {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use serde_json::Value;

    use crate::decode::Decode;
    use crate::error::DecodeError;

    /// Exact decimals from JSON numbers or numeric strings.
    ///
    /// Numbers are read through their textual form so no `f64` rounding
    /// is introduced beyond what the JSON parser already did.
    impl Decode for Decimal {
        fn decode(json: &Value) -> Result<Self, DecodeError> {
            let text = match json {
                Value::Number(n) => n.to_string(),
                Value::String(s) => s.clone(),
                other => return Err(DecodeError::type_mismatch("number or numeric string", other)),
            };
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .map_err(|err| DecodeError::invalid_value("decimal", err.to_string(), json))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::error::ErrorKind;
        use crate::json::Tag;
        use serde_json::json;

        #[test]
        fn from_number_and_string() {
            assert_eq!(
                Decimal::decode(&json!(12.25)).unwrap(),
                Decimal::from_str("12.25").unwrap()
            );
            assert_eq!(Decimal::decode(&json!(7)).unwrap(), Decimal::from(7));
            assert_eq!(
                Decimal::decode(&json!("5000.00")).unwrap(),
                Decimal::from_str("5000.00").unwrap()
            );
            assert_eq!(
                Decimal::decode(&json!("1.5e3")).unwrap(),
                Decimal::from(1500)
            );
        }

        #[test]
        fn rejects_other_shapes() {
            let err = Decimal::decode(&json!(true)).unwrap_err();
            assert!(matches!(
                err.kind(),
                ErrorKind::TypeMismatch {
                    expected: "number or numeric string",
                    actual: Tag::Bool
                }
            ));
            let err = Decimal::decode(&json!("ten")).unwrap_err();
            assert!(matches!(
                err.kind(),
                ErrorKind::InvalidValue {
                    expected: "decimal",
                    ..
                }
            ));
        }
    }
}
