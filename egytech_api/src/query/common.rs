//! Shared query infrastructure: the [`Query`] trait, the years-of-experience
//! [`RangePolicy`], and the value decoders used when a query is built from a
//! JSON mapping.

use std::ops::RangeInclusive;
use std::str::FromStr;

use serde_json::Value;
use url::Url;

use crate::config::Endpoint;
use crate::errors::ValidationError;

use super::ParticipantsQuery;

/// Allowed values for `min_yoe` (inclusive lower bound of experience).
pub const MIN_YOE_RANGE: RangeInclusive<i64> = 0..=20;
/// Allowed values for `max_yoe` (exclusive upper bound of experience).
pub const MAX_YOE_RANGE: RangeInclusive<i64> = 1..=26;

/// Trait implemented by both query models. Provides wire encoding and access
/// to the participant filters every query carries.
pub trait Query {
    /// The endpoint this query type is sent to.
    const ENDPOINT: Endpoint;

    /// Ordered `(wire key, wire value)` pairs. Unset filters are absent.
    fn query_pairs(&self) -> Vec<(&'static str, String)>;

    /// The participant filters shared by every query type.
    fn filters(&self) -> &ParticipantsQuery;

    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        let pairs = self.query_pairs();
        if !pairs.is_empty() {
            let mut serializer = url.query_pairs_mut();
            for (key, value) in pairs {
                serializer.append_pair(key, &value);
            }
        }
        url
    }
}

/// Whether `min_yoe` must be strictly lower than `max_yoe`.
///
/// The API itself does not reject an inverted range, it just returns no rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RangePolicy {
    /// Each bound is checked on its own. An inverted pair is logged and kept.
    #[default]
    Unchecked,
    /// An inverted or empty range is a validation error.
    Ordered,
}

impl RangePolicy {
    pub fn check(&self, min_yoe: Option<u8>, max_yoe: Option<u8>) -> Result<(), ValidationError> {
        let (Some(min_yoe), Some(max_yoe)) = (min_yoe, max_yoe) else {
            return Ok(());
        };
        if min_yoe < max_yoe {
            return Ok(());
        }
        match self {
            RangePolicy::Unchecked => {
                tracing::warn!(
                    "min_yoe ({}) is not lower than max_yoe ({}); the query will match nobody",
                    min_yoe,
                    max_yoe
                );
                Ok(())
            }
            RangePolicy::Ordered => Err(ValidationError::InvertedRange { min_yoe, max_yoe }),
        }
    }
}

/// Per-field literal pair a boolean filter is sent as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagEncoding {
    /// `"yes"` / `"no"`, used by `cs_degree`.
    YesNo,
    /// `"true"` / `"false"`, used by the include flags.
    TrueFalse,
}

impl FlagEncoding {
    pub fn encode(&self, value: bool) -> &'static str {
        match (self, value) {
            (FlagEncoding::YesNo, true) => "yes",
            (FlagEncoding::YesNo, false) => "no",
            (FlagEncoding::TrueFalse, true) => "true",
            (FlagEncoding::TrueFalse, false) => "false",
        }
    }

    fn decode(&self, s: &str) -> Option<bool> {
        match (self, s) {
            (FlagEncoding::YesNo, "yes") | (FlagEncoding::TrueFalse, "true") => Some(true),
            (FlagEncoding::YesNo, "no") | (FlagEncoding::TrueFalse, "false") => Some(false),
            _ => None,
        }
    }
}

pub(crate) fn check_range(
    field: &'static str,
    value: Option<i64>,
    range: RangeInclusive<i64>,
) -> Result<Option<u8>, ValidationError> {
    match value {
        None => Ok(None),
        Some(v) if range.contains(&v) => Ok(Some(v as u8)),
        Some(v) => Err(ValidationError::OutOfRange {
            field,
            value: v,
            min: *range.start(),
            max: *range.end(),
        }),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn wrong_shape(field: &'static str, expected: &str, value: &Value) -> ValidationError {
    ValidationError::InvalidValue {
        field,
        reason: format!("expected {}, got {}", expected, kind(value)),
    }
}

/// Decodes an enum filter. `null` means unset.
pub(crate) fn decode_enum<T>(field: &'static str, value: &Value) -> Result<Option<T>, ValidationError>
where
    T: FromStr<Err = ValidationError>,
{
    match value {
        Value::Null => Ok(None),
        Value::String(s) => s.parse().map(Some),
        other => Err(wrong_shape(field, "a string", other)),
    }
}

/// Decodes an integer filter. Floats and numeric strings are rejected.
///
/// An integer too large for `i64` is out of `range`; the error reports it
/// saturated to `i64::MAX`.
pub(crate) fn decode_integer(
    field: &'static str,
    value: &Value,
    range: RangeInclusive<i64>,
) -> Result<Option<i64>, ValidationError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(v), _) => Ok(Some(v)),
            (None, Some(_)) => Err(ValidationError::OutOfRange {
                field,
                value: i64::MAX,
                min: *range.start(),
                max: *range.end(),
            }),
            (None, None) => Err(wrong_shape(field, "an integer", value)),
        },
        other => Err(wrong_shape(field, "an integer", other)),
    }
}

/// Decodes a boolean filter from a JSON bool or the field's own wire literals.
pub(crate) fn decode_flag(
    field: &'static str,
    value: &Value,
    encoding: FlagEncoding,
) -> Result<Option<bool>, ValidationError> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(*b)),
        Value::String(s) => encoding.decode(s).map(Some).ok_or_else(|| {
            ValidationError::InvalidValue {
                field,
                reason: format!(
                    "'{}' is not one of: {}, {}",
                    s,
                    encoding.encode(true),
                    encoding.encode(false)
                ),
            }
        }),
        other => Err(wrong_shape(field, "a boolean", other)),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn flag_encodings_differ_per_field() {
        assert_eq!(FlagEncoding::YesNo.encode(true), "yes");
        assert_eq!(FlagEncoding::YesNo.encode(false), "no");
        assert_eq!(FlagEncoding::TrueFalse.encode(true), "true");
        assert_eq!(FlagEncoding::TrueFalse.encode(false), "false");
    }

    #[test]
    fn flag_accepts_only_own_literals() {
        let yes = decode_flag("cs_degree", &json!("yes"), FlagEncoding::YesNo).unwrap();
        assert_eq!(yes, Some(true));
        assert!(decode_flag("cs_degree", &json!("true"), FlagEncoding::YesNo).is_err());
        assert!(decode_flag("include_relocated", &json!("no"), FlagEncoding::TrueFalse).is_err());
        assert!(decode_flag("include_relocated", &json!(1), FlagEncoding::TrueFalse).is_err());
        assert_eq!(
            decode_flag("include_relocated", &json!(false), FlagEncoding::TrueFalse).unwrap(),
            Some(false)
        );
    }

    #[test]
    fn integer_rejects_floats_and_strings() {
        assert_eq!(decode_integer("min_yoe", &json!(3), MIN_YOE_RANGE).unwrap(), Some(3));
        assert_eq!(decode_integer("min_yoe", &json!(null), MIN_YOE_RANGE).unwrap(), None);
        assert!(decode_integer("min_yoe", &json!(3.0), MIN_YOE_RANGE).is_err());
        assert!(decode_integer("min_yoe", &json!("3"), MIN_YOE_RANGE).is_err());
        assert!(decode_integer("min_yoe", &json!([3]), MIN_YOE_RANGE).is_err());
    }

    #[test]
    fn integer_beyond_i64_is_out_of_range() {
        let huge = json!(u64::MAX);
        assert_eq!(
            decode_integer("max_yoe", &huge, MAX_YOE_RANGE),
            Err(ValidationError::OutOfRange {
                field: "max_yoe",
                value: i64::MAX,
                min: 1,
                max: 26
            })
        );
        assert!(matches!(
            decode_integer("max_yoe", &json!(-3.5), MAX_YOE_RANGE),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        assert_eq!(check_range("min_yoe", Some(0), MIN_YOE_RANGE).unwrap(), Some(0));
        assert_eq!(check_range("min_yoe", Some(20), MIN_YOE_RANGE).unwrap(), Some(20));
        assert!(check_range("min_yoe", Some(21), MIN_YOE_RANGE).is_err());
        assert!(check_range("min_yoe", Some(-1), MIN_YOE_RANGE).is_err());
        assert!(check_range("max_yoe", Some(0), MAX_YOE_RANGE).is_err());
        assert_eq!(check_range("max_yoe", Some(26), MAX_YOE_RANGE).unwrap(), Some(26));
        assert!(check_range("max_yoe", Some(27), MAX_YOE_RANGE).is_err());
    }

    #[test]
    fn range_policy() {
        assert!(RangePolicy::Unchecked.check(Some(10), Some(5)).is_ok());
        assert!(RangePolicy::Ordered.check(Some(2), Some(5)).is_ok());
        assert!(RangePolicy::Ordered.check(Some(5), None).is_ok());
        assert_eq!(
            RangePolicy::Ordered.check(Some(5), Some(5)),
            Err(ValidationError::InvertedRange {
                min_yoe: 5,
                max_yoe: 5
            })
        );
    }
}
